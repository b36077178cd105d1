use crate::catalog::{EventRecord, EventStatus};
use dioxus::prelude::*;

fn status_class(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Available => "bg-green-100 text-green-800",
        EventStatus::Resale => "bg-yellow-100 text-yellow-800",
        EventStatus::Expired => "bg-red-100 text-red-800",
    }
}

/// Event tile. Buying is disabled once the event has expired.
#[component]
pub fn EventCard(event: EventRecord, on_buy: EventHandler<String>) -> Element {
    let expired = event.is_expired();
    let price_class = if expired { "text-gray-400" } else { "text-gray-900" };
    let button_class = if expired {
        "bg-gray-400 cursor-not-allowed"
    } else {
        "bg-gradient-to-r from-blue-500 to-purple-500"
    };
    let id = event.id.clone();

    rsx! {
        div { class: "bg-white overflow-hidden shadow rounded-lg",
            div { class: "p-6",
                h3 { class: "text-lg font-medium text-gray-900", "{event.title}" }
                div { class: "mt-2 text-sm text-gray-500", span { "{event.location}" } }
                div { class: "mt-2 text-sm text-gray-500", span { "{event.date}" } }
                div { class: "mt-4",
                    span { class: "inline-flex px-2.5 py-0.5 rounded-full text-xs font-medium {status_class(event.status)}",
                        "{event.status.label()}"
                    }
                }
                div { class: "mt-4 flex items-center justify-between",
                    span { class: "text-2xl font-bold {price_class}", "{event.price} {event.currency}" }
                    button {
                        class: "px-4 py-2 text-sm font-medium rounded-md text-white {button_class}",
                        disabled: expired,
                        onclick: move |_| {
                            if !expired {
                                on_buy.call(id.clone());
                            }
                        },
                        "Buy Ticket"
                    }
                }
            }
        }
    }
}

#[component]
pub fn CreateEventCard(on_create: EventHandler<()>) -> Element {
    rsx! {
        div { class: "overflow-hidden shadow rounded-lg border-2 border-dashed border-purple-300",
            div { class: "p-6 flex flex-col h-full",
                h3 { class: "text-lg font-medium text-gray-900", "Create New Event" }
                p { class: "mt-2 text-sm text-gray-500", "Mint NFT tickets for your event" }
                div { class: "mt-auto pt-8 flex justify-center",
                    button {
                        class: "px-6 py-3 text-sm font-medium rounded-md text-white bg-gradient-to-r from-purple-600 to-indigo-600",
                        onclick: move |_| on_create.call(()),
                        "Create Event"
                    }
                }
            }
        }
    }
}
