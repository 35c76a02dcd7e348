//! In-process mock node.
//!
//! Answers every call with canned data and counts invocations per method,
//! so tests can assert both on replies and on whether a handler was ever
//! reached. Also usable interactively via the binary's `--mock` flag.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{NodeClient, PeerInfo, TxStatus, ValidatorInfo};
use crate::error::{ClientError, Result};

/// Mock [`NodeClient`] with per-method invocation counters.
#[derive(Debug, Default)]
pub struct MockNodeClient {
    calls: Mutex<HashMap<String, usize>>,
    fail_ping: Mutex<bool>,
    fail_with: Mutex<Option<String>>,
    tx_statuses: Mutex<HashMap<String, TxStatus>>,
}

impl MockNodeClient {
    /// A mock that answers everything successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `method` was invoked.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().get(method).copied().unwrap_or(0)
    }

    /// Make `ping` fail, i.e. simulate an unreachable node.
    pub fn set_ping_failure(&self, fail: bool) {
        *self.fail_ping.lock() = fail;
    }

    /// Make every domain call fail with this message.
    pub fn set_failure(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    /// Set the status `tx_status` reports for an id.
    pub fn set_tx_status(&self, tx_id: &str, status: TxStatus) {
        self.tx_statuses.lock().insert(tx_id.to_string(), status);
    }

    fn hit(&self, method: &str) -> Result<()> {
        *self.calls.lock().entry(method.to_string()).or_insert(0) += 1;
        match self.fail_with.lock().as_ref() {
            Some(message) => Err(ClientError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn ping(&self) -> Result<()> {
        self.hit("ping")?;
        if *self.fail_ping.lock() {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    async fn node_id(&self) -> Result<String> {
        self.hit("node_id")?;
        Ok("NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg".to_string())
    }

    async fn node_version(&self) -> Result<String> {
        self.hit("node_version")?;
        Ok("snowshell-mock/0.1.0".to_string())
    }

    async fn network_id(&self) -> Result<u32> {
        self.hit("network_id")?;
        Ok(12345)
    }

    async fn network_name(&self) -> Result<String> {
        self.hit("network_name")?;
        Ok("local".to_string())
    }

    async fn node_ip(&self) -> Result<String> {
        self.hit("node_ip")?;
        Ok("127.0.0.1:9651".to_string())
    }

    async fn peers(&self) -> Result<Vec<PeerInfo>> {
        self.hit("peers")?;
        Ok(vec![PeerInfo {
            ip: "10.0.0.2:9651".to_string(),
            node_id: "NodeID-MFrZFVCXPv5iCn6M9K6XduxGTYp891xXZ".to_string(),
            version: "snowshell-mock/0.1.0".to_string(),
        }])
    }

    async fn is_bootstrapped(&self, _chain: &str) -> Result<bool> {
        self.hit("is_bootstrapped")?;
        Ok(true)
    }

    async fn create_user(&self, _username: &str, _password: &str) -> Result<()> {
        self.hit("create_user")
    }

    async fn list_users(&self) -> Result<Vec<String>> {
        self.hit("list_users")?;
        Ok(vec!["alice".to_string(), "bob".to_string()])
    }

    async fn delete_user(&self, _username: &str, _password: &str) -> Result<()> {
        self.hit("delete_user")
    }

    async fn export_user(&self, _username: &str, _password: &str) -> Result<String> {
        self.hit("export_user")?;
        Ok("ex-4CLR9nqJpwGnGhoXCL8Zh7".to_string())
    }

    async fn import_user(&self, _username: &str, _password: &str, _user: &str) -> Result<()> {
        self.hit("import_user")
    }

    async fn avm_balance(&self, _address: &str, _asset_id: &str) -> Result<u64> {
        self.hit("avm_balance")?;
        Ok(1_000_000_000)
    }

    async fn avm_all_balances(&self, _address: &str) -> Result<Vec<(String, u64)>> {
        self.hit("avm_all_balances")?;
        Ok(vec![("AVAX".to_string(), 1_000_000_000)])
    }

    async fn avm_send(
        &self,
        _amount: u64,
        _asset_id: &str,
        _to: &str,
        _username: &str,
        _password: &str,
    ) -> Result<String> {
        self.hit("avm_send")?;
        Ok("2QouvFWUbjuySRxeX5xMbNCuAaKWfbk5FeEa2JmoF85RKLk2dD".to_string())
    }

    async fn tx_status(&self, tx_id: &str) -> Result<TxStatus> {
        self.hit("tx_status")?;
        Ok(self
            .tx_statuses
            .lock()
            .get(tx_id)
            .copied()
            .unwrap_or(TxStatus::Processing))
    }

    async fn avm_create_address(&self, _username: &str, _password: &str) -> Result<String> {
        self.hit("avm_create_address")?;
        Ok("X-local18jma8ppw3nhx5r4ap8clazz0dps7rv5u00z96u".to_string())
    }

    async fn avm_list_addresses(&self, _username: &str, _password: &str) -> Result<Vec<String>> {
        self.hit("avm_list_addresses")?;
        Ok(vec![
            "X-local18jma8ppw3nhx5r4ap8clazz0dps7rv5u00z96u".to_string(),
        ])
    }

    async fn create_subnet(
        &self,
        _username: &str,
        _password: &str,
        _threshold: u32,
        _control_keys: Vec<String>,
    ) -> Result<String> {
        self.hit("create_subnet")?;
        Ok("2TcLPvmFVDA4nFg5qzp5cBBwBnhAbBwhCZxkvAGsUunMfMpRab".to_string())
    }

    async fn add_validator(
        &self,
        _node_id: &str,
        _start_time: u64,
        _end_time: u64,
        _stake_amount: u64,
        _delegation_fee_rate: u32,
    ) -> Result<String> {
        self.hit("add_validator")?;
        Ok("G3BuH6ytQ2averrLxJJugjWZHTRubzCrUZEXoheG5JMqL5ccY".to_string())
    }

    async fn current_validators(&self, _subnet_id: Option<String>) -> Result<Vec<ValidatorInfo>> {
        self.hit("current_validators")?;
        Ok(vec![ValidatorInfo {
            node_id: "NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg".to_string(),
            stake_amount: 2_000_000_000_000,
            end_time: 1_893_456_000,
        }])
    }

    async fn sample_validators(&self, size: u32, _subnet_id: Option<String>) -> Result<Vec<String>> {
        self.hit("sample_validators")?;
        let sample = vec!["NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg".to_string()];
        Ok(sample.into_iter().take(size as usize).collect())
    }

    async fn platform_balance(&self, _address: &str) -> Result<u64> {
        self.hit("platform_balance")?;
        Ok(30_000_000_000)
    }

    async fn platform_create_address(&self, _username: &str, _password: &str) -> Result<String> {
        self.hit("platform_create_address")?;
        Ok("P-local18jma8ppw3nhx5r4ap8clazz0dps7rv5u00z96u".to_string())
    }

    async fn liveness(&self) -> Result<bool> {
        self.hit("liveness")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn counters_track_each_method() {
        let mock = MockNodeClient::new();
        block_on(async {
            mock.node_id().await.unwrap();
            mock.node_id().await.unwrap();
            mock.liveness().await.unwrap();
        });
        assert_eq!(mock.calls("node_id"), 2);
        assert_eq!(mock.calls("liveness"), 1);
        assert_eq!(mock.calls("peers"), 0);
    }

    #[test]
    fn forced_failure_still_counts_the_call() {
        let mock = MockNodeClient::new();
        mock.set_failure("node down");
        let result = block_on(mock.list_users());
        assert!(result.is_err());
        assert_eq!(mock.calls("list_users"), 1);
    }

    #[test]
    fn tx_status_defaults_to_processing() {
        let mock = MockNodeClient::new();
        assert_eq!(block_on(mock.tx_status("tx9")).unwrap(), TxStatus::Processing);
        mock.set_tx_status("tx9", TxStatus::Accepted);
        assert_eq!(block_on(mock.tx_status("tx9")).unwrap(), TxStatus::Accepted);
    }
}
