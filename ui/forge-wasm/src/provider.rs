//! Injected wallet provider adapter.
//!
//! Wraps the EIP-1193 object the wallet extension injects at
//! `window.ethereum`: presence check, active-account resolution,
//! account-change subscription, `wallet_watchAsset`, and the raw
//! `request` plumbing behind [`BrowserRpc`].

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tf_gateway::{EthereumRpc, GatewayError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn ethereum() -> Result<JsValue, GatewayError> {
    let window = web_sys::window().ok_or(GatewayError::ProviderUnavailable)?;
    let obj = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum"))
        .map_err(|_| GatewayError::ProviderUnavailable)?;
    if obj.is_undefined() || obj.is_null() {
        return Err(GatewayError::ProviderUnavailable);
    }
    Ok(obj)
}

/// True iff a wallet extension has injected a provider into the page.
pub fn is_wallet_available() -> bool {
    ethereum().is_ok()
}

/// EIP-1193 errors carry a numeric `code`; 4001 is the user saying no.
fn map_js_error(e: JsValue) -> GatewayError {
    let code = js_sys::Reflect::get(&e, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64());
    if code == Some(4001.0) {
        return GatewayError::UserRejected;
    }
    let message = js_sys::Reflect::get(&e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{e:?}"));
    GatewayError::Rpc(message)
}

fn to_js(value: &Value) -> Result<JsValue, GatewayError> {
    // json_compatible: plain JS objects, not Maps.
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&ser)
        .map_err(|e| GatewayError::Rpc(e.to_string()))
}

async fn raw_request(payload: &JsValue) -> Result<JsValue, GatewayError> {
    let eth = ethereum()?;
    let request_fn = js_sys::Reflect::get(&eth, &JsValue::from_str("request"))
        .map_err(map_js_error)?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| GatewayError::Rpc("provider has no request method".into()))?;
    let promise = request_fn.call1(&eth, payload).map_err(map_js_error)?;
    let promise: js_sys::Promise = promise
        .dyn_into()
        .map_err(|_| GatewayError::Rpc("provider request did not return a promise".into()))?;
    JsFuture::from(promise).await.map_err(map_js_error)
}

/// `ethereum.request({method, params})` with JSON values on both sides.
pub async fn request_value(method: &str, params: Value) -> Result<Value, GatewayError> {
    let payload = to_js(&serde_json::json!({ "method": method, "params": params }))?;
    let result = raw_request(&payload).await?;
    serde_wasm_bindgen::from_value(result).map_err(|e| GatewayError::Rpc(e.to_string()))
}

/// Request account access (may prompt) and return the first account,
/// checksum-normalised by the caller via [`Address::to_checksum`].
pub async fn active_account() -> Result<Address, GatewayError> {
    let accounts = request_value("eth_requestAccounts", Value::Array(Vec::new())).await?;
    let first = accounts
        .get(0)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::Rpc("provider returned no accounts".into()))?;
    first
        .parse()
        .map_err(|_| GatewayError::Rpc(format!("malformed account address: {first}")))
}

/// Subscribe to `accountsChanged` for the lifetime of the page.
///
/// The event payload is not trusted to name the active account; the
/// handler re-resolves it with [`active_account`].
pub fn on_accounts_changed(handler: impl Fn() + 'static) {
    let Ok(eth) = ethereum() else { return };
    let Ok(on_fn) = js_sys::Reflect::get(&eth, &JsValue::from_str("on")) else { return };
    let Ok(on_fn) = on_fn.dyn_into::<js_sys::Function>() else { return };

    let cb = Closure::wrap(Box::new(move |_: JsValue| handler()) as Box<dyn FnMut(JsValue)>);
    let _ = on_fn.call2(
        &eth,
        &JsValue::from_str("accountsChanged"),
        cb.as_ref().unchecked_ref(),
    );
    cb.forget();
}

/// Ask the wallet to track an ERC20 asset. Returns the wallet's boolean
/// answer.
pub async fn watch_asset(
    address: &str,
    symbol: &str,
    decimals: u8,
    image: &str,
) -> Result<bool, GatewayError> {
    let params = serde_json::json!({
        "type": "ERC20",
        "options": {
            "address": address,
            "symbol": symbol,
            "decimals": decimals,
            "image": image,
        },
    });
    let result = request_value("wallet_watchAsset", params).await?;
    Ok(result.as_bool().unwrap_or(false))
}

/// The production [`EthereumRpc`]: `window.ethereum` for requests and a
/// browser timer for polling pauses.
pub struct BrowserRpc;

#[async_trait(?Send)]
impl EthereumRpc for BrowserRpc {
    async fn request(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        request_value(method, params).await
    }

    async fn sleep_ms(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
