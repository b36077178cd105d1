use super::dashboard::use_controller;
use super::network_modal::CustomNetworkModal;
use super::AppContext;
use super::account::TransactionRow;
use crate::catalog::Catalog;
use crate::networks::{self, current_network, format_address, switch_network, NetworkInfo};
use crate::provider::ProviderError;
use dioxus::prelude::*;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideMenu {
    Network,
    Assets,
}

/// Avatar button with the account menu, network and assets side menus.
#[component]
pub fn AccountDropdown(address: String) -> Element {
    let controller = use_controller();
    let mut open = use_signal(|| false);
    let mut side_menu = use_signal(|| None::<SideMenu>);
    let mut show_network_modal = use_signal(|| false);

    let provider = controller.provider().cloned();
    let network = use_resource(move || {
        let provider = provider.clone();
        async move {
            let provider = provider?;
            current_network(&provider)
                .await
                .inspect_err(|e| warn!(error = %e, "failed to read current chain"))
                .ok()
        }
    });
    let current: Option<NetworkInfo> = (*network.read_unchecked()).clone().flatten();
    let network_name = current
        .as_ref()
        .map(|n| n.name.clone())
        .unwrap_or_else(|| "Not connected".to_string());

    let short = format_address(&address);

    let logout_ctrl = controller.clone();
    let on_logout = move |_| {
        let ctrl = logout_ctrl.clone();
        open.set(false);
        spawn(async move { ctrl.logout().await });
    };
    let switch_ctrl = controller.clone();
    let on_switch = move |_| {
        let ctrl = switch_ctrl.clone();
        open.set(false);
        spawn(async move {
            if let Err(e) = ctrl.switch_account().await {
                error!(error = %e, "switch account failed");
            }
        });
    };

    rsx! {
        button {
            class: "flex items-center space-x-2 text-gray-700 hover:text-gray-900",
            onclick: move |_| {
                open.set(!open());
                side_menu.set(None);
            },
            span { class: "w-8 h-8 rounded-full bg-gradient-to-r from-blue-500 to-purple-500" }
            span { "{short}" }
        }

        if open() {
            div { class: "absolute top-16 right-0 w-72 bg-white rounded-lg shadow-lg z-50 overflow-hidden",
                div { class: "p-4 border-b border-gray-200",
                    p { class: "font-medium text-gray-900", "{short}" }
                    p { class: "text-sm text-gray-500", "Connected" }
                }
                div { class: "p-2",
                    button {
                        class: "menu-item",
                        onclick: move |_| {
                            side_menu.set(Some(SideMenu::Network));
                            open.set(false);
                        },
                        p { class: "font-medium text-gray-900", "Network" }
                        p { class: "text-sm text-gray-500", "{network_name}" }
                    }
                    button {
                        class: "menu-item",
                        onclick: move |_| {
                            side_menu.set(Some(SideMenu::Assets));
                            open.set(false);
                        },
                        p { class: "font-medium text-gray-900", "Assets" }
                        p { class: "text-sm text-gray-500", "HKDT & NFT" }
                    }
                    button { class: "menu-item", onclick: on_switch, "Switch Account" }
                    div { class: "my-2 border-t border-gray-200" }
                    button { class: "menu-item", onclick: on_logout, "Logout" }
                }
            }
        }

        if side_menu().is_some() {
            div {
                class: "fixed inset-0 bg-transparent z-50",
                onclick: move |_| side_menu.set(None),
            }
        }

        {match side_menu() {
            Some(SideMenu::Network) => rsx! {
                NetworkMenu {
                    current: current.clone(),
                    on_close: move |_| side_menu.set(None),
                    on_add_custom: move |_| {
                        side_menu.set(None);
                        show_network_modal.set(true);
                    },
                }
            },
            Some(SideMenu::Assets) => rsx! {
                AssetsMenu { address: address.clone(), on_close: move |_| side_menu.set(None) }
            },
            None => None,
        }}

        if show_network_modal() {
            CustomNetworkModal { on_close: move |_| show_network_modal.set(false) }
        }
    }
}

#[component]
fn NetworkMenu(
    current: Option<NetworkInfo>,
    on_close: EventHandler<()>,
    on_add_custom: EventHandler<()>,
) -> Element {
    let current_id = current.as_ref().map(|n| n.chain_id);
    // the wallet may sit on a chain the registry does not list
    let unlisted = current.filter(|n| !networks::is_known(n.chain_id));

    rsx! {
        div { class: "fixed top-0 right-0 bottom-0 w-80 bg-white shadow-lg z-60 overflow-y-auto",
            div { class: "p-4 border-b border-gray-200 flex items-center justify-between",
                h2 { class: "font-medium text-lg text-gray-900", "Select Network" }
                button { onclick: move |_| on_close.call(()), "×" }
            }
            div { class: "flex-1 p-4 space-y-2",
                for network in networks::all() {
                    NetworkOption {
                        key: "{network.chain_id}",
                        active: current_id == Some(network.chain_id),
                        network: network.clone(),
                    }
                }
                if let Some(info) = unlisted {
                    NetworkOption { active: true, network: info }
                }
                button {
                    class: "w-full p-3 rounded-md border border-dashed border-gray-300 text-sm",
                    onclick: move |_| on_add_custom.call(()),
                    "Add Custom Network"
                }
            }
            div { class: "border-t border-gray-200 p-4",
                p { class: "text-xs text-gray-500 text-center", "Switching networks will reconnect your wallet" }
            }
        }
    }
}

#[component]
fn NetworkOption(network: NetworkInfo, active: bool) -> Element {
    let controller = use_controller();
    let subtitle = if active {
        "Currently connected".to_string()
    } else {
        format!("Switch to {} network", network.name)
    };
    let chain_id = network.chain_id;

    rsx! {
        button {
            class: "w-full flex items-center p-3 rounded-md border",
            onclick: move |_| {
                if active {
                    return;
                }
                let provider = controller.provider().cloned();
                spawn(async move {
                    let result = match provider {
                        Some(provider) => switch_network(&provider, chain_id).await,
                        None => Err(ProviderError::NotInstalled),
                    };
                    if let Err(e) = result {
                        error!(chain_id, error = %e, "network switch failed");
                    }
                });
            },
            span { class: "w-8 h-8 mr-3 rounded-full flex items-center justify-center font-bold", "{network.icon}" }
            div { class: "flex-1 text-left",
                p { class: "font-medium text-gray-900", "{network.name}" }
                p { class: "text-sm text-gray-500", "{subtitle} · {network.type_label()}" }
            }
        }
    }
}

#[component]
fn AssetsMenu(address: String, on_close: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog.clone();
    let snapshot = use_resource(move || {
        let catalog = catalog.clone();
        let address = address.clone();
        async move { catalog.account(&address).await.ok() }
    });
    let account = (*snapshot.read_unchecked()).clone().flatten();
    let balance = account
        .as_ref()
        .map(|a| format!("{:.2}", a.balance))
        .unwrap_or_default();

    rsx! {
        div { class: "fixed top-0 right-0 bottom-0 w-80 bg-white shadow-lg z-60 overflow-y-auto",
            div { class: "p-4 border-b border-gray-200 flex items-center justify-between",
                h2 { class: "font-medium text-lg text-gray-900", "My Assets" }
                button { onclick: move |_| on_close.call(()), "×" }
            }
            if let Some(account) = account {
                div { class: "flex-1 p-4",
                    div { class: "mb-6 rounded-xl p-4 text-white bg-gradient-to-r from-green-500 to-teal-500",
                        span { class: "font-medium", "HKDT" }
                        div { class: "text-3xl font-bold mb-1", "{balance}" }
                        p { class: "text-sm opacity-80", "Available for withdrawal" }
                    }
                    h3 { class: "text-lg font-medium text-gray-900 mb-3", "My NFT Tickets" }
                    for ticket in account.owned_tickets.clone() {
                        div { key: "{ticket.id}", class: "rounded-lg border border-gray-200 p-3 mb-3",
                            h4 { class: "font-medium text-gray-900", "{ticket.event_title}" }
                            p { class: "text-sm text-gray-500", "{ticket.event_date}" }
                            span { class: "text-xs", "{ticket.status.label()}" }
                            p { class: "text-sm text-gray-500", "ID: {ticket.ticket_id}" }
                        }
                    }
                    h3 { class: "mt-6 text-lg font-medium text-gray-900 mb-3", "Recent Transactions" }
                    for tx in account.transactions.clone() {
                        TransactionRow { key: "{tx.id}", tx: tx.clone() }
                    }
                }
            }
            div { class: "border-t border-gray-200 p-4 flex space-x-2",
                button { class: "flex-1", onclick: move |_| info!("deposit requested"), "Deposit" }
                button { class: "flex-1", onclick: move |_| info!("withdraw requested"), "Withdraw" }
            }
        }
    }
}
