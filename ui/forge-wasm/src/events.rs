//! Event binding.
//!
//! Wires all UI event listeners. To add new events, add closures here and
//! (if async) spawn via `wasm_bindgen_futures::spawn_local`.

use tf_types::display::{format_thousands, shorten_address};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::deploy;
use crate::dom::{self, Elements};
use crate::provider;
use crate::state;

/// Helper: attach async click handler to an HtmlElement.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    // ── Connect wallet ──
    if let Some(btn) = &els.connect_wallet_btn {
        let els2 = els.clone();
        on_click!(btn, move |_: web_sys::MouseEvent| {
            if provider::is_wallet_available() {
                let els3 = els2.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    resolve_account(&els3).await;
                });
            } else {
                show_install_modal(&els2);
            }
        });
    }

    // The event payload alone does not say which account is active now;
    // re-resolve it.
    if provider::is_wallet_available() {
        let els2 = els.clone();
        provider::on_accounts_changed(move || {
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                resolve_account(&els3).await;
            });
        });
    }

    // ── Navigation ──
    if let Some(btn) = &els.create_token_page_btn {
        on_click!(btn, move |_: web_sys::MouseEvent| {
            let _ = dom::window().open_with_url_and_target("create.html", "_blank");
        });
    }
    if let Some(btn) = &els.view_tokens_page_btn {
        on_click!(btn, move |_: web_sys::MouseEvent| {
            let _ = dom::window().open_with_url_and_target("view.html", "_blank");
        });
    }

    // ── Deploy form ──
    if let Some(btn) = &els.deploy_token_btn {
        on_click_async!(btn, els, deploy::on_deploy_token);
    }

    // Live thousands separators on the supply field.
    if let Some(input) = &els.total_supply_input {
        let input2 = input.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            input2.set_value(&format_thousands(&input2.value()));
        }) as Box<dyn FnMut(_)>);
        input
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

/// Resolve the active account from the provider and show it, shortened,
/// in the header.
pub async fn resolve_account(els: &Elements) {
    match provider::active_account().await {
        Ok(addr) => {
            let checksummed = addr.to_checksum(None);
            state::set_active_account(&checksummed);
            if let Some(label) = &els.wallet_account {
                dom::remove_class(label, "fs-2");
                dom::add_class(label, "fs-5");
                dom::set_text(label, &shorten_address(&checksummed));
            }
        }
        Err(e) => {
            if let Some(status) = els.deploy_status.as_ref().or(els.table_status.as_ref()) {
                dom::set_status_error(status, &e.to_string());
            }
        }
    }
}

/// Prompt the user to install a wallet extension.
fn show_install_modal(els: &Elements) {
    if let Some(modal) = &els.install_wallet_modal {
        dom::add_class(modal, "show");
    }
}
