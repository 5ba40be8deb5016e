//! Page configuration.
//!
//! The factory address is compiled in but can be overridden per deployment
//! with a `data-factory-address` attribute on `<body>`, so the same bundle
//! serves test and production pages.

use alloy_primitives::Address;
use gloo_console::warn;

use crate::dom;

/// The pre-deployed token factory.
pub const DEFAULT_FACTORY_ADDRESS: &str = "0xb13B6FA320304101ee01b7B3599ae3DA3420bDE3";

/// How often to re-poll for a transaction receipt, in milliseconds.
pub const RECEIPT_POLL_INTERVAL_MS: u32 = 2_000;

/// Resolve the factory address: `<body data-factory-address="0x…">`
/// overrides the compiled-in default.
pub fn factory_address() -> Address {
    if let Some(body) = dom::document().body() {
        if let Some(attr) = body.get_attribute("data-factory-address") {
            match attr.parse() {
                Ok(addr) => return addr,
                Err(_) => warn!("ignoring malformed data-factory-address:", attr),
            }
        }
    }
    DEFAULT_FACTORY_ADDRESS
        .parse()
        .expect("default factory address is valid")
}
