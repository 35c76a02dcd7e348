//! Node client contract.
//!
//! [`NodeClient`] is the collaborator seam between the dispatch engine and
//! a running node: every domain command resolves to exactly one call here.
//! The engine never interprets domain results beyond rendering them, and
//! treats every error as a per-command recoverable failure.

use async_trait::async_trait;

use crate::error::Result;

/// Where to reach the node. Defaults match a local node's standard port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Node host name or address.
    pub host: String,
    /// API port.
    pub port: u16,
    /// `http` or `https`.
    pub protocol: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9650,
            protocol: "http".to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Base URL for API endpoints.
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// One connected peer, as reported by the info API.
#[derive(Debug, Clone)]
pub struct PeerInfo {
    /// Peer address.
    pub ip: String,
    /// Peer node id.
    pub node_id: String,
    /// Peer software version.
    pub version: String,
}

/// One active validator, as reported by the platform API.
#[derive(Debug, Clone)]
pub struct ValidatorInfo {
    /// Validator node id.
    pub node_id: String,
    /// Staked amount in nano-units.
    pub stake_amount: u64,
    /// End of the staking period (unix seconds).
    pub end_time: u64,
}

/// Terminal or in-flight status of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// Still being processed.
    Processing,
    /// Accepted by the network.
    Accepted,
    /// Rejected by the network.
    Rejected,
    /// Id not known to the node.
    Unknown,
}

/// Async interface to a node's APIs, grouped the way the shell's contexts
/// are. Implementations: [`RpcNodeClient`](crate::rpc::RpcNodeClient) over
/// JSON-RPC, [`MockNodeClient`](crate::mock::MockNodeClient) for tests.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Cheap liveness probe used by `connect`.
    async fn ping(&self) -> Result<()>;

    // ---- info ----

    /// This node's id.
    async fn node_id(&self) -> Result<String>;
    /// Software version string.
    async fn node_version(&self) -> Result<String>;
    /// Numeric network id.
    async fn network_id(&self) -> Result<u32>;
    /// Network name (e.g. mainnet, fuji).
    async fn network_name(&self) -> Result<String>;
    /// This node's advertised address.
    async fn node_ip(&self) -> Result<String>;
    /// Currently connected peers.
    async fn peers(&self) -> Result<Vec<PeerInfo>>;
    /// Whether the named chain has finished bootstrapping.
    async fn is_bootstrapped(&self, chain: &str) -> Result<bool>;

    // ---- keystore ----

    /// Create a keystore user.
    async fn create_user(&self, username: &str, password: &str) -> Result<()>;
    /// Names of all keystore users.
    async fn list_users(&self) -> Result<Vec<String>>;
    /// Delete a keystore user.
    async fn delete_user(&self, username: &str, password: &str) -> Result<()>;
    /// Export a user as an opaque encoded blob.
    async fn export_user(&self, username: &str, password: &str) -> Result<String>;
    /// Import a previously exported user blob.
    async fn import_user(&self, username: &str, password: &str, user: &str) -> Result<()>;

    // ---- avm (asset chain) ----

    /// Balance of one asset at an address.
    async fn avm_balance(&self, address: &str, asset_id: &str) -> Result<u64>;
    /// All asset balances at an address.
    async fn avm_all_balances(&self, address: &str) -> Result<Vec<(String, u64)>>;
    /// Submit an asset transfer; returns the transaction id.
    async fn avm_send(
        &self,
        amount: u64,
        asset_id: &str,
        to: &str,
        username: &str,
        password: &str,
    ) -> Result<String>;
    /// Status of a submitted transaction.
    async fn tx_status(&self, tx_id: &str) -> Result<TxStatus>;
    /// Create a fresh address under a user.
    async fn avm_create_address(&self, username: &str, password: &str) -> Result<String>;
    /// Addresses controlled by a user.
    async fn avm_list_addresses(&self, username: &str, password: &str) -> Result<Vec<String>>;

    // ---- platform (validator chain) ----

    /// Submit subnet creation with a control-key threshold; returns the
    /// transaction id.
    async fn create_subnet(
        &self,
        username: &str,
        password: &str,
        threshold: u32,
        control_keys: Vec<String>,
    ) -> Result<String>;
    /// Submit a validator registration; returns the transaction id.
    async fn add_validator(
        &self,
        node_id: &str,
        start_time: u64,
        end_time: u64,
        stake_amount: u64,
        delegation_fee_rate: u32,
    ) -> Result<String>;
    /// Validators currently active on a subnet (`None` = primary network).
    async fn current_validators(&self, subnet_id: Option<String>) -> Result<Vec<ValidatorInfo>>;
    /// Sample validators from a subnet.
    async fn sample_validators(&self, size: u32, subnet_id: Option<String>) -> Result<Vec<String>>;
    /// Staking-token balance of a platform address.
    async fn platform_balance(&self, address: &str) -> Result<u64>;
    /// Create a fresh platform address under a user.
    async fn platform_create_address(&self, username: &str, password: &str) -> Result<String>;

    // ---- health ----

    /// Overall node health; `Ok(false)` means reachable but failing checks.
    async fn liveness(&self) -> Result<bool>;
}
