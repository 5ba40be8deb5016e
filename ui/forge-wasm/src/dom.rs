//! DOM element bindings.
//!
//! All fields are resolved once at startup. The deploy form and the token
//! table live on different pages served by the same module, so every
//! page-specific field is an `Option` and handlers skip what is absent.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

/// Write a success message into a status element.
pub fn set_status(el: &Element, msg: &str) {
    remove_class(el, "error");
    el.set_text_content(Some(msg));
}

/// Write an error message into a status element.
pub fn set_status_error(el: &Element, msg: &str) {
    add_class(el, "error");
    el.set_text_content(Some(msg));
}

// ── Elements struct ──

/// All DOM element references used by the pages.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Wallet header
    pub connect_wallet_btn: Option<HtmlElement>,
    pub wallet_account: Option<Element>,
    pub install_wallet_modal: Option<Element>,

    // Navigation
    pub create_token_page_btn: Option<HtmlElement>,
    pub view_tokens_page_btn: Option<HtmlElement>,

    // Deploy form
    pub token_name_input: Option<HtmlInputElement>,
    pub token_symbol_input: Option<HtmlInputElement>,
    pub token_decimals_input: Option<HtmlInputElement>,
    pub total_supply_input: Option<HtmlInputElement>,
    pub deploy_token_btn: Option<HtmlElement>,
    pub deploy_status: Option<Element>,

    // Token table
    pub token_table_body: Option<Element>,
    pub table_status: Option<Element>,
}

impl Elements {
    /// Resolve all DOM references for the current page. Call once after
    /// DOMContentLoaded; missing elements simply stay `None`.
    pub fn bind() -> Elements {
        Elements {
            connect_wallet_btn: by_id_typed("connectWalletBtn"),
            wallet_account: by_id("walletAccount"),
            install_wallet_modal: by_id("installWalletModal"),

            create_token_page_btn: by_id_typed("createTokenPageBtn"),
            view_tokens_page_btn: by_id_typed("viewTokensPageBtn"),

            token_name_input: by_id_typed("tokenNameInput"),
            token_symbol_input: by_id_typed("tokenSymbolInput"),
            token_decimals_input: by_id_typed("tokenDecimalsInput"),
            total_supply_input: by_id_typed("totalSupplyInput"),
            deploy_token_btn: by_id_typed("deployTokenBtn"),
            deploy_status: by_id("deployStatus"),

            token_table_body: by_id("tokenTableBody"),
            table_status: by_id("tableStatus"),
        }
    }
}
