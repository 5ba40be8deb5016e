use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod abi;
pub mod gateway;
pub mod registry;

pub use gateway::{DeployOutcome, FactoryGateway, TxCheckpoint};
pub use registry::load_all_tokens;

/// Everything that can go wrong between the page and the chain.
///
/// Failures propagate as values all the way to the UI layer; nothing is
/// caught-and-logged inside the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no wallet provider is injected into the page")]
    ProviderUnavailable,

    #[error("request rejected by the user")]
    UserRejected,

    #[error("transaction {tx_hash} reverted on-chain")]
    TransactionRejected { tx_hash: String },

    #[error("transaction failed: {0}")]
    TransactionError(String),

    #[error("token index {index} is out of range")]
    IndexOutOfRange { index: u64 },

    #[error("provider error: {0}")]
    Rpc(String),

    #[error("could not decode contract response: {0}")]
    AbiDecode(String),
}

/// Minimal surface of an EIP-1193 provider, as seen by the gateway.
///
/// `request` mirrors `ethereum.request({method, params})`. `sleep_ms` exists
/// so receipt polling stays portable: the wasm implementation uses a browser
/// timer, the test mock returns immediately.
///
/// `?Send` because the only production implementor lives on the
/// single-threaded browser event loop.
#[async_trait(?Send)]
pub trait EthereumRpc {
    async fn request(&self, method: &str, params: Value) -> Result<Value, GatewayError>;

    async fn sleep_ms(&self, ms: u32);
}
