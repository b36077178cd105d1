use super::AppContext;
use crate::catalog::{AccountSnapshot, Catalog, CreatedEvent, OwnedTicket, TicketStatus, Transaction, TransactionKind};
use dioxus::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Tickets,
    Events,
}

fn ticket_badge(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Active => "bg-green-100 text-green-800",
        TicketStatus::Listed => "bg-yellow-100 text-yellow-800",
        TicketStatus::Expired => "bg-red-100 text-red-800",
    }
}

fn toggle_class(active: bool) -> &'static str {
    if active {
        "toggle toggle-active"
    } else {
        "toggle"
    }
}

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Debit => "text-red-600",
        TransactionKind::Credit => "text-green-600",
    }
}

#[component]
pub fn AccountTab(address: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut view = use_signal(|| View::Tickets);

    let catalog = ctx.catalog.clone();
    let snapshot = use_resource(move || {
        let catalog = catalog.clone();
        let address = address.clone();
        async move {
            catalog
                .account(&address)
                .await
                .inspect_err(|e| warn!(error = %e, "failed to load account"))
        }
    });

    let account: Option<AccountSnapshot> = match &*snapshot.read_unchecked() {
        Some(Ok(account)) => Some(account.clone()),
        _ => None,
    };
    let Some(account) = account else {
        return rsx! {
            div { class: "mt-6 text-sm text-gray-500", "Loading account..." }
        };
    };
    let balance = format!("{:.2}", account.balance);

    rsx! {
        div { class: "mt-6 grid grid-cols-1 gap-6 lg:grid-cols-3",
            div { class: "lg:col-span-2",
                div { class: "flex space-x-4",
                    button {
                        class: "{toggle_class(view() == View::Tickets)}",
                        onclick: move |_| view.set(View::Tickets),
                        "My Tickets"
                    }
                    button {
                        class: "{toggle_class(view() == View::Events)}",
                        onclick: move |_| view.set(View::Events),
                        "Events Dashboard"
                    }
                }
                {match view() {
                    View::Tickets => rsx! { TicketList { tickets: account.owned_tickets.clone() } },
                    View::Events => rsx! { CreatedEventList { events: account.created_events.clone() } },
                }}
            }
            div { class: "space-y-6",
                div { class: "bg-white shadow rounded-lg p-6",
                    h3 { class: "text-sm font-medium text-gray-500", "HKDT Balance" }
                    p { class: "mt-2 text-3xl font-bold text-gray-900", "{balance}" }
                    div { class: "mt-4 flex space-x-2",
                        button { onclick: move |_| info!("deposit requested"), "Deposit" }
                        button { onclick: move |_| info!("withdraw requested"), "Withdraw" }
                    }
                }
                div { class: "bg-white shadow rounded-lg p-6",
                    h3 { class: "text-lg font-medium text-gray-900", "Recent Transactions" }
                    if account.transactions.is_empty() {
                        p { class: "text-sm text-gray-500", "No recent transactions" }
                    }
                    for tx in account.transactions.clone() {
                        TransactionRow { key: "{tx.id}", tx: tx.clone() }
                    }
                }
                div { class: "bg-white shadow rounded-lg p-6 grid grid-cols-3 gap-4",
                    div {
                        p { class: "text-xs text-gray-500", "Total Revenue" }
                        p { class: "text-lg font-semibold", "{account.stats.total_revenue} HKDT" }
                    }
                    div {
                        p { class: "text-xs text-gray-500", "Tickets Sold" }
                        p { class: "text-lg font-semibold", "{account.stats.tickets_sold}" }
                    }
                    div {
                        p { class: "text-xs text-gray-500", "Active Events" }
                        p { class: "text-lg font-semibold", "{account.stats.active_events}" }
                    }
                }
            }
        }
    }
}

#[component]
fn TicketList(tickets: Vec<OwnedTicket>) -> Element {
    if tickets.is_empty() {
        return rsx! {
            div { class: "mt-6 text-center",
                h3 { class: "text-sm font-medium text-gray-900", "No tickets yet" }
                p { class: "mt-1 text-sm text-gray-500", "Purchase tickets from the Explore or Market tabs." }
            }
        };
    }

    rsx! {
        div { class: "mt-6 space-y-4",
            for ticket in tickets {
                div { key: "{ticket.id}", class: "bg-white shadow rounded-lg p-4",
                    div { class: "flex justify-between",
                        div {
                            h4 { class: "font-medium text-gray-900", "{ticket.event_title}" }
                            p { class: "text-sm text-gray-500", "{ticket.event_location} · {ticket.event_date}" }
                            p { class: "text-sm text-gray-500", "ID: {ticket.ticket_id}" }
                        }
                        span { class: "px-2.5 py-0.5 rounded-full text-xs font-medium {ticket_badge(ticket.status)}",
                            "{ticket.status.label()}"
                        }
                    }
                    div { class: "mt-4 flex items-center justify-between",
                        span { class: "font-bold", "{ticket.display_price()} {ticket.currency}" }
                        {ticket_action(&ticket)}
                    }
                }
            }
        }
    }
}

fn ticket_action(ticket: &OwnedTicket) -> Element {
    let id = ticket.ticket_id.clone();
    match ticket.status {
        TicketStatus::Active => rsx! {
            button { onclick: move |_| info!(ticket_id = %id, "sell ticket requested"), "Sell" }
        },
        TicketStatus::Listed => rsx! {
            button { onclick: move |_| info!(ticket_id = %id, "cancel listing requested"), "Cancel Listing" }
        },
        TicketStatus::Expired => None,
    }
}

#[component]
fn CreatedEventList(events: Vec<CreatedEvent>) -> Element {
    if events.is_empty() {
        return rsx! {
            div { class: "mt-6 text-center",
                h3 { class: "text-sm font-medium text-gray-900", "No created events" }
                p { class: "mt-1 text-sm text-gray-500", "Create a new event to start selling tickets." }
            }
        };
    }

    rsx! {
        div { class: "mt-6 space-y-4",
            h3 { class: "text-lg font-medium text-gray-900", "My Created Events" }
            for event in events {
                div { key: "{event.id}", class: "bg-white shadow rounded-lg p-4",
                    div { class: "flex justify-between",
                        div {
                            h4 { class: "font-medium text-gray-900", "{event.title}" }
                            p { class: "text-sm text-gray-500", "{event.date}" }
                        }
                        button {
                            onclick: {
                                let id = event.id.clone();
                                move |_| info!(event_id = %id, "manage event requested")
                            },
                            "Manage"
                        }
                    }
                    div { class: "mt-3",
                        p { class: "text-sm text-gray-500", "{event.tickets_sold}/{event.total_tickets} sold" }
                        div { class: "h-2 bg-gray-200 rounded",
                            div { class: "h-2 bg-purple-500 rounded", style: "width: {event.sold_pct()}%" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn TransactionRow(tx: Transaction) -> Element {
    let amount = tx.display_amount();
    let color = amount_class(tx.kind);
    rsx! {
        div { class: "flex items-center justify-between py-2 border-b border-gray-100",
            div {
                p { class: "text-sm font-medium text-gray-900", "{tx.title}" }
                p { class: "text-xs text-gray-500", "{tx.date}" }
            }
            span { class: "text-sm font-medium {color}", "{amount}" }
        }
    }
}
