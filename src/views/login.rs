use super::{app_controller, AppContext, Route};
use dioxus::prelude::*;

#[component]
pub fn Login() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = navigator();
    let controller = use_hook(|| app_controller(&ctx.config, navigator));
    let mut connecting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    // Already connected: skip straight to the dashboard.
    let session = controller.session().clone();
    use_effect(move || {
        if session.is_authenticated() {
            navigator.replace(Route::Dashboard {});
        }
    });

    let on_connect = move |_| {
        let controller = controller.clone();
        connecting.set(true);
        error.set(None);
        spawn(async move {
            if let Err(e) = controller.connect().await {
                error.set(Some(e.user_message()));
                connecting.set(false);
            }
        });
    };

    rsx! {
        div { class: "login-page",
            div { class: "login-container",
                div { class: "login-logo-container",
                    div { class: "logo-placeholder" }
                }
                h1 { class: "login-title", "Welcome to DeMai" }
                p { class: "login-subtitle",
                    "Connect your wallet to explore a new NFT ticketing experience. Secure, transparent, and convenient."
                }
                button {
                    r#type: "button",
                    class: "connect-wallet-button",
                    disabled: connecting(),
                    onclick: on_connect,
                    span { if connecting() { "Connecting..." } else { "Connect Wallet" } }
                }
                if let Some(message) = error() {
                    p { class: "login-error", "{message}" }
                }
            }
        }
    }
}
