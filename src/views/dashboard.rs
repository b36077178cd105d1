use super::account::AccountTab;
use super::account_dropdown::AccountDropdown;
use super::explore::ExploreTab;
use super::market::MarketTab;
use super::{app_controller, AppContext, AppController};
use crate::auth::GateOutcome;
use crate::poller::run_every;
use dioxus::prelude::*;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Explore,
    Market,
    Account,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Explore, Tab::Market, Tab::Account];

    fn label(&self) -> &'static str {
        match self {
            Tab::Explore => "Explore",
            Tab::Market => "Market",
            Tab::Account => "Account",
        }
    }
}

/// Wallet-gated page. On mount it checks the session, attaches provider
/// listeners and starts the liveness poller; both are released on unmount.
#[component]
pub fn Dashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = navigator();
    let controller = use_hook(|| app_controller(&ctx.config, navigator));
    use_context_provider(|| controller.clone());

    let mut address = use_signal(|| None::<String>);
    let mut tab = use_signal(|| Tab::Explore);

    let mount_ctrl = controller.clone();
    use_effect(move || {
        // Provider callbacks arrive outside the component scope, so the
        // logout they trigger runs as a detached browser task.
        let weak = Rc::downgrade(&mount_ctrl);
        let on_disconnect: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(ctrl) = weak.upgrade() {
                wasm_bindgen_futures::spawn_local(async move { ctrl.logout().await });
            }
        });

        if let GateOutcome::Authenticated(addr) = mount_ctrl.mount(on_disconnect) {
            address.set(Some(addr));
            let ctrl = mount_ctrl.clone();
            let interval = ctrl.poller().interval();
            spawn(async move {
                run_every(interval, gloo_timers::future::sleep, || {
                    let ctrl = ctrl.clone();
                    async move {
                        let outcome = ctrl.poll().await;
                        debug!(state = %ctrl.poller().state(), ?outcome, "connection check");
                    }
                })
                .await;
            });
        }
    });

    let drop_ctrl = controller.clone();
    use_drop(move || drop_ctrl.unmount());

    let Some(wallet) = address() else {
        return rsx! {
            div { class: "dashboard-loading", "Checking wallet session..." }
        };
    };

    rsx! {
        div { class: "min-h-screen bg-gray-100",
            header { class: "bg-white shadow",
                div { class: "max-w-7xl mx-auto px-4 flex items-center justify-between h-16",
                    span { class: "text-xl font-bold", "DeMai" }
                    nav { class: "flex space-x-8",
                        for t in Tab::ALL {
                            button {
                                key: "{t.label()}",
                                class: "{tab_class(tab() == t)}",
                                onclick: move |_| tab.set(t),
                                "{t.label()}"
                            }
                        }
                    }
                    div { class: "relative",
                        AccountDropdown { address: wallet.clone() }
                    }
                }
            }
            main { class: "max-w-7xl mx-auto py-6 px-4",
                {match tab() {
                    Tab::Explore => rsx! { ExploreTab {} },
                    Tab::Market => rsx! { MarketTab {} },
                    Tab::Account => rsx! { AccountTab { address: wallet.clone() } },
                }}
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab tab-active"
    } else {
        "tab"
    }
}

/// The dashboard's session controller, provided as context to its children.
pub fn use_controller() -> Rc<AppController> {
    use_context::<Rc<AppController>>()
}
