//! Deploy-form flow.

use gloo_console::log;
use tf_gateway::{DeployOutcome, GatewayError, TxCheckpoint};
use tf_types::display::strip_separators;
use tf_types::DeploymentRequest;

use crate::dom::{self, Elements};
use crate::provider;
use crate::table;

/// Read the form, submit the deployment, and reflect the outcome.
///
/// On success the four fields are cleared, focus returns to the name
/// field, and the token table (when present on this page) is reloaded.
/// On failure the fields keep their values and the error is shown.
pub async fn on_deploy_token(els: &Elements) {
    let (Some(name_input), Some(symbol_input), Some(decimals_input), Some(supply_input)) = (
        &els.token_name_input,
        &els.token_symbol_input,
        &els.token_decimals_input,
        &els.total_supply_input,
    ) else {
        return;
    };

    let decimals_raw = dom::get_input_value(decimals_input);
    let decimals: u8 = match decimals_raw.parse() {
        Ok(d) => d,
        Err(_) => {
            if let Some(status) = &els.deploy_status {
                dom::set_status_error(status, &format!("decimals must be 0-255, got {decimals_raw:?}"));
            }
            return;
        }
    };
    let req = DeploymentRequest {
        name: dom::get_input_value(name_input),
        symbol: dom::get_input_value(symbol_input),
        decimals,
        total_supply: strip_separators(&dom::get_input_value(supply_input)),
    };

    table::show_loading();
    let result = submit(&req).await;
    table::hide_loading();

    match result {
        Ok(outcome) => {
            name_input.set_value("");
            symbol_input.set_value("");
            decimals_input.set_value("");
            supply_input.set_value("");
            if let Some(status) = &els.deploy_status {
                dom::set_status(
                    status,
                    &format!(
                        "{} deployed at {}",
                        req.symbol,
                        outcome.contract_address.to_checksum(None)
                    ),
                );
            }
            table::load_token_table(els).await;
        }
        Err(e) => {
            if let Some(status) = &els.deploy_status {
                dom::set_status_error(status, &e.to_string());
            }
        }
    }
    let _ = name_input.focus();
}

async fn submit(req: &DeploymentRequest) -> Result<DeployOutcome, GatewayError> {
    let account = provider::active_account().await?;
    let gateway = table::factory_gateway();
    gateway
        .deploy_token(req, account, |cp| match cp {
            TxCheckpoint::HashAssigned(hash) => log!("transaction hash:", hash.clone()),
            TxCheckpoint::ReceiptReceived => log!("transaction receipt received"),
            TxCheckpoint::ConfirmationReceived => log!("transaction confirmed"),
        })
        .await
}
