//! JSON-RPC 2.0 node client over HTTP.
//!
//! Each context maps to one API endpoint path (`/ext/info`,
//! `/ext/keystore`, `/ext/bc/X`, `/ext/P`, `/ext/health`); every call is a
//! POST with a JSON-RPC envelope. Timeouts live here, not in the dispatch
//! engine.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ConnectionConfig, NodeClient, PeerInfo, TxStatus, ValidatorInfo};
use crate::error::{ClientError, Result};

const INFO: &str = "/ext/info";
const KEYSTORE: &str = "/ext/keystore";
const XCHAIN: &str = "/ext/bc/X";
const PCHAIN: &str = "/ext/P";
const HEALTH: &str = "/ext/health";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC node client.
#[derive(Debug, Clone)]
pub struct RpcNodeClient {
    http: Client,
    base_url: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcNodeClient {
    /// Build a client for one node endpoint.
    pub fn new(config: &ConnectionConfig) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.endpoint(),
        }
    }

    /// POST one JSON-RPC call and unwrap the result object.
    async fn call(&self, path: &str, method: &str, params: Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, method, "node rpc call");
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response: RpcResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        if let Some(err) = response.error {
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        response
            .result
            .ok_or_else(|| ClientError::InvalidResponse("missing result".to_string()))
    }
}

/// Pull a string field out of a result object.
fn str_field(value: &Value, field: &str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientError::InvalidResponse(format!("missing field `{}`", field)))
}

/// Pull a numeric field that nodes encode either as a number or a decimal
/// string.
fn u64_field(value: &Value, field: &str) -> Result<u64> {
    let v = value
        .get(field)
        .ok_or_else(|| ClientError::InvalidResponse(format!("missing field `{}`", field)))?;
    match v {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| ClientError::InvalidResponse(format!("non-integer `{}`", field))),
        Value::String(s) => s
            .parse::<u64>()
            .map_err(|_| ClientError::InvalidResponse(format!("non-numeric `{}`", field))),
        _ => Err(ClientError::InvalidResponse(format!(
            "unexpected type for `{}`",
            field
        ))),
    }
}

#[async_trait]
impl NodeClient for RpcNodeClient {
    async fn ping(&self) -> Result<()> {
        self.call(INFO, "info.getNetworkID", json!({})).await?;
        Ok(())
    }

    async fn node_id(&self) -> Result<String> {
        let result = self.call(INFO, "info.getNodeID", json!({})).await?;
        str_field(&result, "nodeID")
    }

    async fn node_version(&self) -> Result<String> {
        let result = self.call(INFO, "info.getNodeVersion", json!({})).await?;
        str_field(&result, "version")
    }

    async fn network_id(&self) -> Result<u32> {
        let result = self.call(INFO, "info.getNetworkID", json!({})).await?;
        Ok(u64_field(&result, "networkID")? as u32)
    }

    async fn network_name(&self) -> Result<String> {
        let result = self.call(INFO, "info.getNetworkName", json!({})).await?;
        str_field(&result, "networkName")
    }

    async fn node_ip(&self) -> Result<String> {
        let result = self.call(INFO, "info.getNodeIP", json!({})).await?;
        str_field(&result, "ip")
    }

    async fn peers(&self) -> Result<Vec<PeerInfo>> {
        let result = self.call(INFO, "info.peers", json!({})).await?;
        let peers = result
            .get("peers")
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::InvalidResponse("missing field `peers`".to_string()))?;
        peers
            .iter()
            .map(|p| {
                Ok(PeerInfo {
                    ip: str_field(p, "ip")?,
                    node_id: str_field(p, "nodeID")?,
                    version: str_field(p, "version")?,
                })
            })
            .collect()
    }

    async fn is_bootstrapped(&self, chain: &str) -> Result<bool> {
        let result = self
            .call(INFO, "info.isBootstrapped", json!({ "chain": chain }))
            .await?;
        result
            .get("isBootstrapped")
            .and_then(Value::as_bool)
            .ok_or_else(|| ClientError::InvalidResponse("missing field `isBootstrapped`".into()))
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<()> {
        self.call(
            KEYSTORE,
            "keystore.createUser",
            json!({ "username": username, "password": password }),
        )
        .await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<String>> {
        let result = self.call(KEYSTORE, "keystore.listUsers", json!({})).await?;
        let users = result
            .get("users")
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::InvalidResponse("missing field `users`".to_string()))?;
        Ok(users
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    async fn delete_user(&self, username: &str, password: &str) -> Result<()> {
        self.call(
            KEYSTORE,
            "keystore.deleteUser",
            json!({ "username": username, "password": password }),
        )
        .await?;
        Ok(())
    }

    async fn export_user(&self, username: &str, password: &str) -> Result<String> {
        let result = self
            .call(
                KEYSTORE,
                "keystore.exportUser",
                json!({ "username": username, "password": password }),
            )
            .await?;
        str_field(&result, "user")
    }

    async fn import_user(&self, username: &str, password: &str, user: &str) -> Result<()> {
        self.call(
            KEYSTORE,
            "keystore.importUser",
            json!({ "username": username, "password": password, "user": user }),
        )
        .await?;
        Ok(())
    }

    async fn avm_balance(&self, address: &str, asset_id: &str) -> Result<u64> {
        let result = self
            .call(
                XCHAIN,
                "avm.getBalance",
                json!({ "address": address, "assetID": asset_id }),
            )
            .await?;
        u64_field(&result, "balance")
    }

    async fn avm_all_balances(&self, address: &str) -> Result<Vec<(String, u64)>> {
        let result = self
            .call(XCHAIN, "avm.getAllBalances", json!({ "address": address }))
            .await?;
        let balances = result
            .get("balances")
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::InvalidResponse("missing field `balances`".to_string()))?;
        balances
            .iter()
            .map(|b| Ok((str_field(b, "asset")?, u64_field(b, "balance")?)))
            .collect()
    }

    async fn avm_send(
        &self,
        amount: u64,
        asset_id: &str,
        to: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let result = self
            .call(
                XCHAIN,
                "avm.send",
                json!({
                    "amount": amount,
                    "assetID": asset_id,
                    "to": to,
                    "username": username,
                    "password": password,
                }),
            )
            .await?;
        str_field(&result, "txID")
    }

    async fn tx_status(&self, tx_id: &str) -> Result<TxStatus> {
        let result = self
            .call(XCHAIN, "avm.getTxStatus", json!({ "txID": tx_id }))
            .await?;
        let status = str_field(&result, "status")?;
        Ok(match status.as_str() {
            "Accepted" => TxStatus::Accepted,
            "Rejected" => TxStatus::Rejected,
            "Processing" => TxStatus::Processing,
            _ => TxStatus::Unknown,
        })
    }

    async fn avm_create_address(&self, username: &str, password: &str) -> Result<String> {
        let result = self
            .call(
                XCHAIN,
                "avm.createAddress",
                json!({ "username": username, "password": password }),
            )
            .await?;
        str_field(&result, "address")
    }

    async fn avm_list_addresses(&self, username: &str, password: &str) -> Result<Vec<String>> {
        let result = self
            .call(
                XCHAIN,
                "avm.listAddresses",
                json!({ "username": username, "password": password }),
            )
            .await?;
        let addresses = result
            .get("addresses")
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::InvalidResponse("missing field `addresses`".to_string()))?;
        Ok(addresses
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    async fn create_subnet(
        &self,
        username: &str,
        password: &str,
        threshold: u32,
        control_keys: Vec<String>,
    ) -> Result<String> {
        let result = self
            .call(
                PCHAIN,
                "platform.createSubnet",
                json!({
                    "username": username,
                    "password": password,
                    "threshold": threshold,
                    "controlKeys": control_keys,
                }),
            )
            .await?;
        str_field(&result, "txID")
    }

    async fn add_validator(
        &self,
        node_id: &str,
        start_time: u64,
        end_time: u64,
        stake_amount: u64,
        delegation_fee_rate: u32,
    ) -> Result<String> {
        let result = self
            .call(
                PCHAIN,
                "platform.addValidator",
                json!({
                    "nodeID": node_id,
                    "startTime": start_time,
                    "endTime": end_time,
                    "stakeAmount": stake_amount,
                    "delegationFeeRate": delegation_fee_rate,
                }),
            )
            .await?;
        str_field(&result, "txID")
    }

    async fn current_validators(&self, subnet_id: Option<String>) -> Result<Vec<ValidatorInfo>> {
        let params = match subnet_id {
            Some(id) => json!({ "subnetID": id }),
            None => json!({}),
        };
        let result = self
            .call(PCHAIN, "platform.getCurrentValidators", params)
            .await?;
        let validators = result
            .get("validators")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ClientError::InvalidResponse("missing field `validators`".to_string())
            })?;
        validators
            .iter()
            .map(|v| {
                Ok(ValidatorInfo {
                    node_id: str_field(v, "nodeID")?,
                    stake_amount: u64_field(v, "stakeAmount")?,
                    end_time: u64_field(v, "endTime")?,
                })
            })
            .collect()
    }

    async fn sample_validators(&self, size: u32, subnet_id: Option<String>) -> Result<Vec<String>> {
        let params = match subnet_id {
            Some(id) => json!({ "size": size, "subnetID": id }),
            None => json!({ "size": size }),
        };
        let result = self
            .call(PCHAIN, "platform.sampleValidators", params)
            .await?;
        let validators = result
            .get("validators")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ClientError::InvalidResponse("missing field `validators`".to_string())
            })?;
        Ok(validators
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    async fn platform_balance(&self, address: &str) -> Result<u64> {
        let result = self
            .call(PCHAIN, "platform.getBalance", json!({ "address": address }))
            .await?;
        u64_field(&result, "balance")
    }

    async fn platform_create_address(&self, username: &str, password: &str) -> Result<String> {
        let result = self
            .call(
                PCHAIN,
                "platform.createAddress",
                json!({ "username": username, "password": password }),
            )
            .await?;
        str_field(&result, "address")
    }

    async fn liveness(&self) -> Result<bool> {
        let result = self.call(HEALTH, "health.getLiveness", json!({})).await?;
        result
            .get("healthy")
            .and_then(Value::as_bool)
            .ok_or_else(|| ClientError::InvalidResponse("missing field `healthy`".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_protocol_host_port() {
        let config = ConnectionConfig::default();
        assert_eq!(config.endpoint(), "http://127.0.0.1:9650");
    }

    #[test]
    fn u64_field_accepts_number_and_decimal_string() {
        let v = json!({ "balance": 42 });
        assert_eq!(u64_field(&v, "balance").unwrap(), 42);
        let v = json!({ "balance": "1000000" });
        assert_eq!(u64_field(&v, "balance").unwrap(), 1_000_000);
        let v = json!({ "balance": "not-a-number" });
        assert!(u64_field(&v, "balance").is_err());
    }

    #[test]
    fn str_field_reports_missing_fields() {
        let v = json!({ "other": "x" });
        let err = str_field(&v, "nodeID").unwrap_err();
        assert!(err.to_string().contains("nodeID"));
    }
}
