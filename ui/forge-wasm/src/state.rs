//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).

use std::cell::RefCell;

/// Central application state. The wallet provider owns the account; this
/// is only the page's last-resolved copy, replaced wholesale whenever the
/// provider reports a change.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub account: Option<String>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

pub fn active_account() -> Option<String> {
    STATE.with(|s| s.borrow().account.clone())
}

pub fn set_active_account(addr: &str) {
    STATE.with(|s| s.borrow_mut().account = Some(addr.to_string()));
}

// ── localStorage helpers ──

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn local_get(key: &str) -> Option<String> {
    storage()?.get_item(key).ok()?
}

pub fn local_set(key: &str, value: &str) {
    if let Some(s) = storage() {
        let _ = s.set_item(key, value);
    }
}
