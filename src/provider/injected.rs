//! `window.ethereum` bindings.

use super::{
    decode_accounts, EventCallback, EventKind, ProviderError, ProviderEvent, RpcMethod,
    WalletProvider,
};
use js_sys::{Function, Object, Promise, Reflect, JSON};
use serde_json::Value;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// The provider object injected by a wallet extension.
#[derive(Debug, Clone)]
pub struct InjectedProvider {
    ethereum: JsValue,
}

/// Keeps the JS handler alive until it has been removed from the provider.
pub struct InjectedSubscription {
    kind: EventKind,
    handler: Closure<dyn FnMut(JsValue)>,
}

impl InjectedProvider {
    /// Returns `None` when no extension is installed.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { ethereum })
    }

    fn function(&self, name: &str) -> Result<Function, ProviderError> {
        Reflect::get(&self.ethereum, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| ProviderError::Decode(format!("provider has no `{}` function", name)))
    }
}

impl WalletProvider for InjectedProvider {
    type Subscription = InjectedSubscription;

    async fn request(&self, method: RpcMethod, params: Value) -> Result<Value, ProviderError> {
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method.as_str()))
            .map_err(js_error)?;
        if !params.is_null() {
            let js_params = JSON::parse(&params.to_string()).map_err(js_error)?;
            Reflect::set(&args, &JsValue::from_str("params"), &js_params).map_err(js_error)?;
        }

        debug!(method = %method, "provider request");
        let pending = self
            .function("request")?
            .call1(&self.ethereum, &args)
            .map_err(js_error)?;
        let promise: Promise = pending
            .dyn_into()
            .map_err(|_| ProviderError::Decode("request did not return a promise".to_string()))?;
        let result = JsFuture::from(promise).await.map_err(js_error)?;
        js_to_json(&result)
    }

    fn subscribe(&self, kind: EventKind, callback: EventCallback) -> InjectedSubscription {
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            callback(decode_event(kind, &payload));
        });
        match self.function("on") {
            Ok(on) => {
                if let Err(e) = on.call2(
                    &self.ethereum,
                    &JsValue::from_str(kind.as_str()),
                    handler.as_ref(),
                ) {
                    warn!(event = %kind, error = ?e, "failed to register provider listener");
                }
            }
            Err(e) => warn!(event = %kind, error = %e, "provider cannot register listeners"),
        }
        InjectedSubscription { kind, handler }
    }

    fn unsubscribe(&self, subscription: InjectedSubscription) {
        let InjectedSubscription { kind, handler } = subscription;
        match self.function("removeListener") {
            Ok(remove) => {
                if let Err(e) = remove.call2(
                    &self.ethereum,
                    &JsValue::from_str(kind.as_str()),
                    handler.as_ref(),
                ) {
                    warn!(event = %kind, error = ?e, "failed to remove provider listener");
                }
            }
            Err(e) => warn!(event = %kind, error = %e, "provider cannot remove listeners"),
        }
        // `handler` drops here, after the provider no longer references it.
    }
}

fn decode_event(kind: EventKind, payload: &JsValue) -> ProviderEvent {
    match kind {
        EventKind::AccountsChanged => {
            let accounts = js_to_json(payload)
                .and_then(decode_accounts)
                .unwrap_or_else(|e| {
                    warn!(error = %e, "undecodable accountsChanged payload");
                    Vec::new()
                });
            ProviderEvent::AccountsChanged(accounts)
        }
        EventKind::ChainChanged => ProviderEvent::ChainChanged(payload.as_string().unwrap_or_default()),
        EventKind::Disconnect => ProviderEvent::Disconnect,
    }
}

fn js_to_json(value: &JsValue) -> Result<Value, ProviderError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = JSON::stringify(value).map_err(js_error)?.into();
    serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Map a thrown JS value (usually `{ code, message }`) to a provider error.
fn js_error(err: JsValue) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string());
    ProviderError::from_rpc(code, message)
}
