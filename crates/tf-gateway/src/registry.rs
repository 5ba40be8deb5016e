//! Rebuilds the token table from the factory's on-chain array.

use tf_types::display::display_supply;
use tf_types::TokenRecord;

use crate::{EthereumRpc, FactoryGateway, GatewayError};

/// Page through every deployed token, in factory index order.
///
/// Strictly sequential: deterministic row order, and no burst of parallel
/// requests for the provider to rate-limit. Each record is handed to
/// `on_record` as soon as it is produced, so a renderer can draw rows
/// without waiting for the full pass. Restartable; every call re-fetches.
pub async fn load_all_tokens<R, F>(
    gateway: &FactoryGateway<R>,
    mut on_record: F,
) -> Result<Vec<TokenRecord>, GatewayError>
where
    R: EthereumRpc,
    F: FnMut(&TokenRecord, u64),
{
    let count = gateway.token_count().await?;
    let mut records = Vec::with_capacity(count as usize);
    for index in 0..count {
        let address = gateway.address_at(index).await?;
        let meta = gateway.token_metadata(address).await?;
        let record = TokenRecord {
            total_supply: display_supply(meta.raw_total_supply, meta.decimals),
            raw_total_supply: meta.raw_total_supply.to_string(),
            name: meta.name,
            symbol: meta.symbol,
            decimals: meta.decimals,
            contract_address: address.to_checksum(None),
        };
        on_record(&record, index);
        records.push(record);
    }
    Ok(records)
}
