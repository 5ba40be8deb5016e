//! Calls against the pre-deployed token factory.
//!
//! Read paths are single `eth_call`s. The write path
//! (`deploy_token`) submits via `eth_sendTransaction` and then drives the
//! transaction lifecycle to one confirmation, reporting each checkpoint
//! through an observer callback as it happens.

use alloy_primitives::{hex, Address, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use serde_json::{json, Value};
use tf_types::{DeploymentRequest, TokenMetadata};

use crate::abi;
use crate::{EthereumRpc, GatewayError};

/// Observable stages of a deployment transaction, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxCheckpoint {
    HashAssigned(String),
    ReceiptReceived,
    ConfirmationReceived,
}

/// Result of a successful deployment.
///
/// `checkpoints` is the ordered lifecycle record; the same checkpoints were
/// already delivered through the observer while the call was in flight.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub tx_hash: String,
    pub contract_address: Address,
    pub checkpoints: Vec<TxCheckpoint>,
}

pub struct FactoryGateway<R> {
    rpc: R,
    factory: Address,
    poll_interval_ms: u32,
}

impl<R: EthereumRpc> FactoryGateway<R> {
    pub fn new(rpc: R, factory: Address) -> Self {
        Self { rpc, factory, poll_interval_ms: 2_000 }
    }

    pub fn with_poll_interval(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    /// Number of tokens the factory has deployed.
    pub async fn token_count(&self) -> Result<u64, GatewayError> {
        let data = abi::getLengthContractAddressesCall {}.abi_encode();
        let ret = self.eth_call(data).await?;
        let count = abi::getLengthContractAddressesCall::abi_decode_returns(&ret)
            .map_err(|e| GatewayError::AbiDecode(e.to_string()))?;
        u64::try_from(count)
            .map_err(|_| GatewayError::AbiDecode("token count exceeds u64".into()))
    }

    /// Address of the token at `index` in deployment order.
    pub async fn address_at(&self, index: u64) -> Result<Address, GatewayError> {
        let data = abi::getContractAddressCall { id: U256::from(index) }.abi_encode();
        let ret = match self.eth_call(data).await {
            Ok(ret) => ret,
            // The contract reverts past the end of the array.
            Err(GatewayError::Rpc(msg)) if msg.contains("revert") => {
                return Err(GatewayError::IndexOutOfRange { index });
            }
            Err(e) => return Err(e),
        };
        abi::getContractAddressCall::abi_decode_returns(&ret)
            .map_err(|e| GatewayError::AbiDecode(e.to_string()))
    }

    /// All four metadata fields of a deployed token in one round trip.
    pub async fn token_metadata(&self, address: Address) -> Result<TokenMetadata, GatewayError> {
        let data = abi::callMultipleFunctionsCall { contractAddress: address }.abi_encode();
        let ret = self.eth_call(data).await?;
        let fields = abi::callMultipleFunctionsCall::abi_decode_returns(&ret)
            .map_err(|e| GatewayError::AbiDecode(e.to_string()))?;
        Ok(TokenMetadata {
            name: fields._0,
            symbol: fields._1,
            decimals: fields._2,
            raw_total_supply: fields._3,
        })
    }

    /// Submit a deployment and wait for one confirmation.
    ///
    /// `observer` receives each [`TxCheckpoint`] the moment it is reached,
    /// before the final outcome resolves. A receipt with a falsy status
    /// yields [`GatewayError::TransactionRejected`]; the new token's
    /// address comes from the `NewContract` log on the receipt.
    pub async fn deploy_token(
        &self,
        req: &DeploymentRequest,
        from: Address,
        mut observer: impl FnMut(&TxCheckpoint),
    ) -> Result<DeployOutcome, GatewayError> {
        let total_supply: U256 = req
            .total_supply
            .parse()
            .map_err(|_| GatewayError::TransactionError(format!(
                "total supply is not a valid integer: {:?}",
                req.total_supply
            )))?;
        let data = abi::deployContractCall {
            name_: req.name.clone(),
            symbol_: req.symbol.clone(),
            decimals_: req.decimals,
            totalsupply_: total_supply,
        }
        .abi_encode();

        let params = json!([{
            "from": from,
            "to": self.factory,
            "data": hex::encode_prefixed(&data),
        }]);
        let hash = match self.rpc.request("eth_sendTransaction", params).await {
            Ok(v) => v
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| GatewayError::Rpc("eth_sendTransaction returned no hash".into()))?,
            Err(e @ (GatewayError::UserRejected | GatewayError::ProviderUnavailable)) => {
                return Err(e);
            }
            Err(e) => return Err(GatewayError::TransactionError(e.to_string())),
        };

        let mut checkpoints = Vec::new();
        let cp = TxCheckpoint::HashAssigned(hash.clone());
        observer(&cp);
        checkpoints.push(cp);

        // No timeout, matching the page's behavior: a hung provider keeps
        // the caller suspended.
        let receipt = loop {
            let v = self
                .rpc
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if !v.is_null() {
                break v;
            }
            self.rpc.sleep_ms(self.poll_interval_ms).await;
        };
        let cp = TxCheckpoint::ReceiptReceived;
        observer(&cp);
        checkpoints.push(cp);

        if parse_quantity(receipt.get("status")).unwrap_or(0) == 0 {
            return Err(GatewayError::TransactionRejected { tx_hash: hash });
        }
        let contract_address = contract_address_from_receipt(&receipt)?;

        // One confirmation: a block later than the receipt's.
        let receipt_block = parse_quantity(receipt.get("blockNumber"))
            .ok_or_else(|| GatewayError::Rpc("receipt has no block number".into()))?;
        loop {
            let v = self.rpc.request("eth_blockNumber", json!([])).await?;
            let head = parse_quantity(Some(&v))
                .ok_or_else(|| GatewayError::Rpc("eth_blockNumber returned no quantity".into()))?;
            if head > receipt_block {
                break;
            }
            self.rpc.sleep_ms(self.poll_interval_ms).await;
        }
        let cp = TxCheckpoint::ConfirmationReceived;
        observer(&cp);
        checkpoints.push(cp);

        Ok(DeployOutcome { tx_hash: hash, contract_address, checkpoints })
    }

    async fn eth_call(&self, data: Vec<u8>) -> Result<Vec<u8>, GatewayError> {
        let params = json!([{
            "to": self.factory,
            "data": hex::encode_prefixed(&data),
        }, "latest"]);
        let value = self.rpc.request("eth_call", params).await?;
        let ret = value
            .as_str()
            .ok_or_else(|| GatewayError::Rpc("eth_call returned no data".into()))?;
        hex::decode(ret).map_err(|e| GatewayError::AbiDecode(e.to_string()))
    }
}

/// Pull the new token's address out of the receipt's `NewContract` log.
/// The address parameter is indexed, so it sits in topic 1.
fn contract_address_from_receipt(receipt: &Value) -> Result<Address, GatewayError> {
    let logs = receipt
        .get("logs")
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::AbiDecode("receipt has no logs".into()))?;
    for log in logs {
        let topics = match log.get("topics").and_then(Value::as_array) {
            Some(t) => t,
            None => continue,
        };
        let topic0 = topics.first().and_then(Value::as_str).unwrap_or_default();
        if topic0.parse::<B256>().ok() != Some(abi::NewContract::SIGNATURE_HASH) {
            continue;
        }
        let topic1 = topics
            .get(1)
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::AbiDecode("NewContract log has no address topic".into()))?;
        let word: B256 = topic1
            .parse()
            .map_err(|_| GatewayError::AbiDecode("malformed NewContract topic".into()))?;
        return Ok(Address::from_slice(&word[12..]));
    }
    Err(GatewayError::AbiDecode("no NewContract event in receipt".into()))
}

/// Parse a JSON-RPC hex quantity ("0x1a") into a u64.
fn parse_quantity(v: Option<&Value>) -> Option<u64> {
    let s = v?.as_str()?;
    u64::from_str_radix(s.trim_start_matches("0x"), 16).ok()
}
