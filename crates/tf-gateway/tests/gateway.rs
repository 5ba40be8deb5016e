use std::cell::RefCell;
use std::collections::VecDeque;

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::{sol_data, SolCall, SolEvent, SolType, SolValue};
use async_trait::async_trait;
use serde_json::{json, Value};
use tf_gateway::abi;
use tf_gateway::{load_all_tokens, EthereumRpc, FactoryGateway, GatewayError, TxCheckpoint};
use tf_types::DeploymentRequest;

const FACTORY: Address = Address::new([0x11; 20]);
const DEPLOYER: Address = Address::new([0x22; 20]);

/// Scripted provider: responses are consumed in order, and every request is
/// recorded for later assertions.
struct MockRpc {
    script: RefCell<VecDeque<(&'static str, Result<Value, GatewayError>)>>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl MockRpc {
    fn new(script: Vec<(&'static str, Result<Value, GatewayError>)>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn recorded_methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    fn recorded_params(&self, i: usize) -> Value {
        self.calls.borrow()[i].1.clone()
    }
}

#[async_trait(?Send)]
impl EthereumRpc for MockRpc {
    async fn request(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        self.calls.borrow_mut().push((method.to_string(), params));
        let (expected, response) = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {method}"));
        assert_eq!(expected, method, "request out of script order");
        response
    }

    async fn sleep_ms(&self, _ms: u32) {}
}

fn call_result(ret: Vec<u8>) -> Result<Value, GatewayError> {
    Ok(Value::String(hex::encode_prefixed(&ret)))
}

fn metadata_return(name: &str, symbol: &str, decimals: u8, supply: u64) -> Vec<u8> {
    type Meta = (sol_data::String, sol_data::String, sol_data::Uint<8>, sol_data::Uint<256>);
    Meta::abi_encode_params(&(name.to_string(), symbol.to_string(), decimals, U256::from(supply)))
}

#[tokio::test]
async fn token_count_decodes_the_length_call() {
    let rpc = MockRpc::new(vec![("eth_call", call_result(U256::from(3u64).abi_encode()))]);
    let gateway = FactoryGateway::new(rpc, FACTORY);

    assert_eq!(gateway.token_count().await.unwrap(), 3);

    // The call went to the factory with the right selector.
    let params = gateway.rpc().recorded_params(0);
    let data = params[0]["data"].as_str().unwrap();
    let data = hex::decode(data).unwrap();
    assert_eq!(&data[..4], &abi::getLengthContractAddressesCall::SELECTOR[..]);
}

#[tokio::test]
async fn loader_walks_all_indices_in_order() {
    let addr0 = Address::new([0xa0; 20]);
    let addr1 = Address::new([0xa1; 20]);
    let rpc = MockRpc::new(vec![
        ("eth_call", call_result(U256::from(2u64).abi_encode())),
        ("eth_call", call_result(addr0.abi_encode())),
        ("eth_call", call_result(metadata_return("Alpha", "ALP", 2, 1500))),
        ("eth_call", call_result(addr1.abi_encode())),
        ("eth_call", call_result(metadata_return("Beta", "BET", 18, 0))),
    ]);
    let gateway = FactoryGateway::new(rpc, FACTORY);

    let mut seen = Vec::new();
    let records = load_all_tokens(&gateway, |record, index| {
        seen.push((index, record.symbol.clone()));
    })
    .await
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(seen, vec![(0, "ALP".to_string()), (1, "BET".to_string())]);
    assert_eq!(records[0].name, "Alpha");
    assert_eq!(records[0].decimals, 2);
    assert_eq!(records[0].total_supply, 15.0);
    assert_eq!(records[0].raw_total_supply, "1500");
    assert_eq!(records[0].contract_address, addr0.to_checksum(None));
    assert_eq!(records[1].contract_address, addr1.to_checksum(None));

    // count, then address/metadata alternating, strictly sequential.
    assert_eq!(
        gateway.rpc().recorded_methods(),
        vec!["eth_call"; 5],
    );
}

#[tokio::test]
async fn loader_with_zero_tokens_makes_no_further_calls() {
    let rpc = MockRpc::new(vec![("eth_call", call_result(U256::ZERO.abi_encode()))]);
    let gateway = FactoryGateway::new(rpc, FACTORY);

    let mut callbacks = 0;
    let records = load_all_tokens(&gateway, |_, _| callbacks += 1).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(callbacks, 0);
    assert_eq!(gateway.rpc().recorded_methods().len(), 1);
}

#[tokio::test]
async fn revert_on_address_lookup_maps_to_index_out_of_range() {
    let rpc = MockRpc::new(vec![(
        "eth_call",
        Err(GatewayError::Rpc("execution reverted".into())),
    )]);
    let gateway = FactoryGateway::new(rpc, FACTORY);

    match gateway.address_at(7).await {
        Err(GatewayError::IndexOutOfRange { index: 7 }) => {}
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
}

fn new_contract_log(deployed: Address) -> Value {
    json!({
        "topics": [
            hex::encode_prefixed(abi::NewContract::SIGNATURE_HASH),
            hex::encode_prefixed(deployed.into_word()),
        ],
        "data": "0x",
    })
}

#[tokio::test]
async fn deploy_reports_checkpoints_and_extracts_the_new_address() {
    let deployed = Address::new([0xcd; 20]);
    let tx_hash = "0xfeed";
    let receipt = json!({
        "status": "0x1",
        "blockNumber": "0x10",
        "logs": [new_contract_log(deployed)],
    });
    let rpc = MockRpc::new(vec![
        ("eth_sendTransaction", Ok(json!(tx_hash))),
        ("eth_getTransactionReceipt", Ok(Value::Null)),
        ("eth_getTransactionReceipt", Ok(receipt)),
        ("eth_blockNumber", Ok(json!("0x10"))),
        ("eth_blockNumber", Ok(json!("0x11"))),
    ]);
    let gateway = FactoryGateway::new(rpc, FACTORY).with_poll_interval(0);

    let req = DeploymentRequest {
        name: "Coin".into(),
        symbol: "CN".into(),
        decimals: 18,
        total_supply: "1000000".into(),
    };
    let mut observed = Vec::new();
    let outcome = gateway
        .deploy_token(&req, DEPLOYER, |cp| observed.push(cp.clone()))
        .await
        .unwrap();

    assert_eq!(outcome.tx_hash, tx_hash);
    assert_eq!(outcome.contract_address, deployed);
    assert_eq!(
        outcome.checkpoints,
        vec![
            TxCheckpoint::HashAssigned(tx_hash.to_string()),
            TxCheckpoint::ReceiptReceived,
            TxCheckpoint::ConfirmationReceived,
        ],
    );
    // Observer saw the same checkpoints, live and in order.
    assert_eq!(observed, outcome.checkpoints);

    // The submitted calldata round-trips to the request values.
    let params = gateway.rpc().recorded_params(0);
    let data = hex::decode(params[0]["data"].as_str().unwrap()).unwrap();
    let call = abi::deployContractCall::abi_decode(&data).unwrap();
    assert_eq!(call.name_, "Coin");
    assert_eq!(call.symbol_, "CN");
    assert_eq!(call.decimals_, 18);
    assert_eq!(call.totalsupply_, U256::from(1_000_000u64));
}

#[tokio::test]
async fn falsy_receipt_status_is_a_rejection() {
    let receipt = json!({
        "status": "0x0",
        "blockNumber": "0x10",
        "logs": [],
    });
    let rpc = MockRpc::new(vec![
        ("eth_sendTransaction", Ok(json!("0xdead"))),
        ("eth_getTransactionReceipt", Ok(receipt)),
    ]);
    let gateway = FactoryGateway::new(rpc, FACTORY).with_poll_interval(0);

    let req = DeploymentRequest {
        name: "Coin".into(),
        symbol: "CN".into(),
        decimals: 18,
        total_supply: "1".into(),
    };
    match gateway.deploy_token(&req, DEPLOYER, |_| {}).await {
        Err(GatewayError::TransactionRejected { tx_hash }) => assert_eq!(tx_hash, "0xdead"),
        other => panic!("expected TransactionRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn user_rejection_passes_through_unchanged() {
    let rpc = MockRpc::new(vec![("eth_sendTransaction", Err(GatewayError::UserRejected))]);
    let gateway = FactoryGateway::new(rpc, FACTORY);

    let req = DeploymentRequest {
        name: "Coin".into(),
        symbol: "CN".into(),
        decimals: 0,
        total_supply: "10".into(),
    };
    match gateway.deploy_token(&req, DEPLOYER, |_| {}).await {
        Err(GatewayError::UserRejected) => {}
        other => panic!("expected UserRejected, got {other:?}"),
    }
}
