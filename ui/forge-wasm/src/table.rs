//! Token table rendering and the loading overlay.
//!
//! Rows are appended in factory index order as the registry loader
//! produces them, so the table fills in top-down while the sequential
//! reads are still in flight.

use tf_gateway::FactoryGateway;
use tf_types::display::format_thousands;
use tf_types::TokenRecord;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config;
use crate::dom::{self, Elements};
use crate::logo;
use crate::provider::BrowserRpc;

// ── Loading overlay ──

/// Create the busy-overlay nodes once, at startup.
pub fn ensure_loading_overlay() {
    if dom::by_id("loadingCover").is_some() {
        return;
    }
    let Some(body) = dom::document().body() else { return };
    let cover = dom::create_element("div");
    cover.set_attribute("id", "loadingCover").unwrap();
    let spinner = dom::create_element("div");
    spinner.set_attribute("id", "loadingSpinner").unwrap();
    cover.append_child(&spinner).unwrap();
    body.append_child(&cover).unwrap();
}

/// Show the process-wide busy indicator. Idempotent, but callers must pair
/// with [`hide_loading`]; there is no nesting count.
pub fn show_loading() {
    if let (Some(cover), Some(spinner)) = (dom::by_id("loadingCover"), dom::by_id("loadingSpinner")) {
        cover.set_attribute("class", "wrapper").unwrap();
        spinner
            .set_attribute("class", "spinner-border text-primary")
            .unwrap();
        spinner.set_attribute("role", "status").unwrap();
    }
}

/// Hide the busy indicator.
pub fn hide_loading() {
    if let (Some(cover), Some(spinner)) = (dom::by_id("loadingCover"), dom::by_id("loadingSpinner")) {
        cover.set_attribute("class", "none").unwrap();
        dom::remove_class(&spinner, "spinner-border");
        dom::remove_class(&spinner, "text-primary");
    }
}

// ── Table ──

/// The shared gateway handle for this page.
pub fn factory_gateway() -> FactoryGateway<BrowserRpc> {
    FactoryGateway::new(BrowserRpc, config::factory_address())
        .with_poll_interval(config::RECEIPT_POLL_INTERVAL_MS)
}

/// Clear and rebuild the token table from the factory. No-op on pages
/// without a table body. Restartable; called again after a deployment.
pub async fn load_token_table(els: &Elements) {
    let Some(tbody) = els.token_table_body.clone() else { return };

    show_loading();
    dom::set_inner_html(&tbody, "");

    let gateway = factory_gateway();
    let els2 = els.clone();
    let result = tf_gateway::load_all_tokens(&gateway, |record, index| {
        render_token(&els2, &tbody, record, index);
    })
    .await;
    hide_loading();

    match result {
        Ok(records) => {
            if let Some(status) = &els.table_status {
                dom::set_status(status, &format!("{} deployed token(s)", records.len()));
            }
        }
        Err(e) => {
            if let Some(status) = &els.table_status {
                dom::set_status_error(status, &e.to_string());
            }
        }
    }
}

/// Append one table row for a token record.
pub fn render_token(els: &Elements, tbody: &Element, record: &TokenRecord, row_index: u64) {
    let tr = dom::create_element("tr");
    tbody.append_child(&tr).unwrap();

    let th = dom::create_element("th");
    th.set_attribute("scope", "row").unwrap();
    th.set_attribute("class", "align-middle text-start py-3").unwrap();
    dom::set_text(&th, &(row_index + 1).to_string());
    tr.append_child(&th).unwrap();

    // Name cell: logo image, name, symbol.
    let td_name = cell(&tr, "align-middle py-3");
    let div_name = flex_div(&td_name, "justify-content-start");
    let img = dom::create_element("img");
    img.set_attribute("src", &logo::logo_or_default(row_index)).unwrap();
    img.set_attribute("class", "coin-logo me-2 rounded-circle").unwrap();
    div_name.append_child(&img).unwrap();
    text_p(&div_name, "me-2 fs-6 mb-0", &record.name);
    text_p(&div_name, "mb-0 fs-6 text-secondary", &record.symbol);

    let td_supply = cell(&tr, "align-middle py-3");
    let div_supply = flex_div(&td_supply, "justify-content-center");
    text_p(&div_supply, "me-2 fs-6 mb-0", &supply_display(record));

    let td_decimals = cell(&tr, "align-middle py-3");
    let div_decimals = flex_div(&td_decimals, "justify-content-center");
    text_p(&div_decimals, "me-2 fs-6 mb-0", &record.decimals.to_string());

    let td_address = cell(&tr, "align-middle d-flex justify-content-center py-3");
    let div_address = flex_div(&td_address, "justify-content-center");
    text_p(&div_address, "me-2 fs-6 mb-0", &record.contract_address);

    // Row actions: add to wallet, edit logo.
    let div_actions = dom::create_element("div");
    td_address.append_child(&div_actions).unwrap();

    let a_watch = action_anchor(&div_actions, "Add to wallet");
    let img_wallet = dom::create_element("img");
    img_wallet.set_attribute("src", "images/wallet.png").unwrap();
    img_wallet.set_attribute("class", "ms-3 action-icon").unwrap();
    a_watch.append_child(&img_wallet).unwrap();
    {
        let els2 = els.clone();
        let record2 = record.clone();
        let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            e.prevent_default();
            let els3 = els2.clone();
            let record3 = record2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                logo::add_token_to_wallet(&els3, &record3, row_index).await;
            });
        }) as Box<dyn FnMut(_)>);
        a_watch
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }

    let a_edit = action_anchor(&div_actions, "Edit logo");
    dom::add_class(&a_edit, "ms-4");
    dom::add_class(&a_edit, "text-secondary");
    let i_edit = dom::create_element("i");
    i_edit.set_attribute("class", "bi bi-pencil-fill").unwrap();
    a_edit.append_child(&i_edit).unwrap();
    {
        let tr2 = tr.clone();
        let img2 = img.clone();
        let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            e.prevent_default();
            logo::edit_row_logo(&tr2, &img2, row_index);
        }) as Box<dyn FnMut(_)>);
        a_edit
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

/// Integer display supply with thousands separators, matching the form
/// input's formatting.
fn supply_display(record: &TokenRecord) -> String {
    if record.total_supply.is_finite() {
        format_thousands(&format!("{}", record.total_supply.trunc() as u128))
    } else {
        record.raw_total_supply.clone()
    }
}

fn cell(tr: &Element, class: &str) -> Element {
    let td = dom::create_element("td");
    td.set_attribute("class", class).unwrap();
    tr.append_child(&td).unwrap();
    td
}

fn flex_div(td: &Element, justify: &str) -> Element {
    let div = dom::create_element("div");
    div.set_attribute("class", &format!("d-flex align-items-center {justify}"))
        .unwrap();
    td.append_child(&div).unwrap();
    div
}

fn text_p(parent: &Element, class: &str, text: &str) {
    let p = dom::create_element("p");
    p.set_attribute("class", class).unwrap();
    dom::set_text(&p, text);
    parent.append_child(&p).unwrap();
}

fn action_anchor(parent: &Element, title: &str) -> Element {
    let a = dom::create_element("a");
    a.set_attribute("href", "#").unwrap();
    a.set_attribute("data-bs-toggle", "tooltip").unwrap();
    a.set_attribute("data-bs-placement", "bottom").unwrap();
    a.set_attribute("title", title).unwrap();
    parent.append_child(&a).unwrap();
    a
}
