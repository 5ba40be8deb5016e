//! TokenForge WASM Frontend
//!
//! Browser front end for deploying and listing ERC20 tokens through the
//! wallet-injected provider and the pre-deployed factory contract.
//! Each concern lives in its own module.

pub mod config;
pub mod deploy;
pub mod dom;
pub mod events;
pub mod logo;
pub mod provider;
pub mod state;
pub mod table;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
///
/// The same module backs both pages; `Elements::bind` resolves whatever the
/// current page has, and the page-specific steps below are no-ops when
/// their elements are absent.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind();

    table::ensure_loading_overlay();
    events::bind_events(&els);

    if let Some(input) = &els.token_name_input {
        let _ = input.focus();
    }

    // Rebuild the token table from the factory, when this page has one.
    table::load_token_table(&els).await;

    Ok(())
}
