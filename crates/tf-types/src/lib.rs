use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

pub mod display;

/// One deployed token, read back from the factory.
///
/// Immutable once fetched; identified by its factory index and contract
/// address. `total_supply` is the display value (raw / 10^decimals, f64);
/// `raw_total_supply` keeps the untruncated on-chain amount as a decimal
/// string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenRecord {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: f64,
    pub raw_total_supply: String,
    pub contract_address: String,
}

/// User-supplied deployment form data. `total_supply` is the raw integer
/// string with thousands separators already stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
}

/// The four metadata fields returned by the factory's batched read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub raw_total_supply: U256,
}
