//! Per-row logo store and the edit-logo / add-to-wallet actions.
//!
//! Logos live in `localStorage`, keyed by the stringified row index and
//! holding the image as a data URI. Entries are overwritten
//! unconditionally and never expire.

use tf_types::TokenRecord;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, FileReader, HtmlInputElement};

use crate::dom::{self, Elements};
use crate::provider;
use crate::state;

/// Fallback shown (and registered with the wallet) when a row has no
/// custom logo.
pub const DEFAULT_LOGO: &str = "images/default-logo.png";

pub fn get(row_index: u64) -> Option<String> {
    state::local_get(&row_index.to_string())
}

pub fn set(row_index: u64, image_data_uri: &str) {
    state::local_set(&row_index.to_string(), image_data_uri);
}

/// The image to render for a row: the stored logo or the default.
pub fn logo_or_default(row_index: u64) -> String {
    get(row_index).unwrap_or_else(|| DEFAULT_LOGO.to_string())
}

/// Open a file picker for a row's logo. On selection the file is read as a
/// data URL, stored under the row's key, and the row image swapped in
/// place. The row highlight clears when the picker resolves either way.
pub fn edit_row_logo(row: &Element, img: &Element, row_index: u64) {
    dom::add_class(row, "selected-row");

    let input: HtmlInputElement = dom::create_element("input").unchecked_into();
    input.set_type("file");
    input.set_accept("image/*");

    let row2 = row.clone();
    let img2 = img.clone();
    let input2 = input.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        dom::remove_class(&row2, "selected-row");

        let Some(file) = input2.files().and_then(|l| l.get(0)) else { return };
        let Ok(reader) = FileReader::new() else { return };

        let img3 = img2.clone();
        let reader2 = reader.clone();
        let onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(data_uri) = reader2.result().ok().and_then(|v| v.as_string()) {
                let _ = img3.set_attribute("src", &data_uri);
                set(row_index, &data_uri);
            }
        }) as Box<dyn FnMut(_)>);
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let _ = reader.read_as_data_url(&file);
    }) as Box<dyn FnMut(_)>);
    input
        .add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();

    input.click();
}

/// Ask the wallet to track this token, using the row's logo (or the
/// default, which is then persisted for the row, so the image survives a
/// transfer to another account).
pub async fn add_token_to_wallet(els: &Elements, record: &TokenRecord, row_index: u64) {
    let stored = get(row_index);
    let image = stored.clone().unwrap_or_else(|| DEFAULT_LOGO.to_string());

    match provider::watch_asset(&record.contract_address, &record.symbol, record.decimals, &image)
        .await
    {
        Ok(true) => {
            if stored.is_none() {
                set(row_index, &image);
            }
        }
        Ok(false) => {
            if let Some(status) = &els.table_status {
                dom::set_status(status, "the wallet declined to add the token");
            }
        }
        Err(e) => {
            if let Some(status) = &els.table_status {
                dom::set_status_error(status, &e.to_string());
            }
        }
    }
}
