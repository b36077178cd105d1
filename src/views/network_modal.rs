use super::dashboard::use_controller;
use super::reload_page;
use crate::networks::{add_custom_network, CustomNetworkForm};
use crate::provider::ProviderError;
use dioxus::prelude::*;
use tracing::error;

/// Form for `wallet_addEthereumChain`. Reloads the page once the wallet
/// accepts the new chain.
#[component]
pub fn CustomNetworkModal(on_close: EventHandler<()>) -> Element {
    let controller = use_controller();
    let mut fields = use_signal(CustomNetworkForm::default);
    let mut error_text = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |_: FormEvent| {
        let params = match fields.read().validate() {
            Ok(params) => params,
            Err(e) => {
                error_text.set(Some(e.to_string()));
                return;
            }
        };
        let provider = controller.provider().cloned();
        error_text.set(None);
        submitting.set(true);
        spawn(async move {
            let result = match provider {
                Some(provider) => add_custom_network(&provider, &params).await,
                None => Err(ProviderError::NotInstalled),
            };
            match result {
                Ok(()) => reload_page(),
                Err(e) => {
                    error!(error = %e, "failed to add custom network");
                    error_text.set(Some(e.user_message()));
                    submitting.set(false);
                }
            }
        });
    };

    let current = fields();

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black bg-opacity-50",
            div { class: "bg-white rounded-lg shadow-xl w-full max-w-md p-6",
                div { class: "flex items-center justify-between mb-4",
                    h3 { class: "text-lg font-medium text-gray-900", "Add Custom Network" }
                    button { onclick: move |_| on_close.call(()), "×" }
                }
                form { prevent_default: "onsubmit", onsubmit: on_submit,
                    FormField {
                        label: "Network Name",
                        placeholder: "e.g. My Custom Network",
                        value: current.name.clone(),
                        on_input: move |v: String| fields.write().name = v,
                    }
                    FormField {
                        label: "RPC URL",
                        placeholder: "e.g. https://my-network-rpc.example.com",
                        value: current.rpc_url.clone(),
                        on_input: move |v: String| fields.write().rpc_url = v,
                    }
                    FormField {
                        label: "Chain ID",
                        placeholder: "e.g. 1337",
                        value: current.chain_id.clone(),
                        on_input: move |v: String| fields.write().chain_id = v,
                    }
                    FormField {
                        label: "Currency Symbol",
                        placeholder: "e.g. ETH",
                        value: current.currency_symbol.clone(),
                        on_input: move |v: String| fields.write().currency_symbol = v,
                    }
                    FormField {
                        label: "Currency Name",
                        placeholder: "e.g. Ether",
                        value: current.currency_name.clone(),
                        on_input: move |v: String| fields.write().currency_name = v,
                    }
                    FormField {
                        label: "Block Explorer URL (optional)",
                        placeholder: "e.g. https://explorer.example.com",
                        value: current.explorer_url.clone(),
                        on_input: move |v: String| fields.write().explorer_url = v,
                    }
                    if let Some(message) = error_text() {
                        p { class: "mt-2 text-sm text-red-600", "{message}" }
                    }
                    div { class: "mt-6 flex justify-end space-x-2",
                        button { r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                        button { r#type: "submit", disabled: submitting(),
                            if submitting() { "Adding..." } else { "Add Network" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FormField(
    label: &'static str,
    placeholder: &'static str,
    value: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "mt-3",
            label { class: "block text-sm font-medium text-gray-700", "{label}" }
            input {
                class: "mt-1 block w-full rounded-md border border-gray-300 px-3 py-2",
                r#type: "text",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}
