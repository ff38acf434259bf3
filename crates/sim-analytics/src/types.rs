//! Snapshot types mirroring the simulation backend's JSON responses.
//!
//! Field names follow the backend's wire format (snake_case). Every type is
//! a point-in-time copy; a refresh replaces it wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display width of a truncated transaction id.
pub const SHORT_TXID_LEN: usize = 16;

/// Display width of a truncated block hash.
pub const SHORT_HASH_LEN: usize = 32;

/// Tunable network parameters of the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Maximum block size in bytes.
    pub block_size_limit: u64,
    /// Number of leading zero hex digits required by proof-of-work.
    pub mining_difficulty: u64,
    /// Default fee attached to a transfer.
    pub transaction_fee: f64,
    /// Target seconds between blocks.
    pub block_time_target: u64,
    /// Maximum number of transactions a block may carry.
    pub max_transactions_per_block: u64,
}

/// Cumulative mining statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiningStats {
    pub total_blocks_mined: u64,
    pub total_transactions_processed: u64,
    pub difficulty_adjustments: u64,
    pub orphaned_blocks: u64,
    /// Average seconds between blocks (>= 0).
    pub average_block_time: f64,
}

/// Reward-distribution inequality measures across miners.
///
/// Extra keys the backend reports (e.g. `node_distribution`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecentralizationMetrics {
    /// Gini coefficient over miner rewards, nominally in `[0, 1]`.
    pub gini_coefficient: f64,
    /// Herfindahl-Hirschman index (sum of squared reward shares).
    pub herfindahl_index: f64,
    /// Share of rewards held by the top three miners, in percent.
    pub top_miners_concentration: f64,
}

/// Per-miner totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinerStats {
    pub blocks_mined: u64,
    pub total_rewards: f64,
    pub hashrate: f64,
}

/// Miner identifier to totals. Ordered so rendering is stable across refreshes.
pub type MinerDistribution = BTreeMap<String, MinerStats>;

/// Account identifier to balance. The console never enforces sign.
pub type Balances = BTreeMap<String, f64>;

/// Aggregate returned by `/analytics`; the input of every dashboard,
/// analytics and decentralization renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub total_blocks: u64,
    pub total_transactions: u64,
    pub mempool_size: u64,
    /// Mean block size in bytes. Fractional because it is an average.
    pub average_block_size: f64,
    pub network_params: NetworkParams,
    pub mining_stats: MiningStats,
    pub decentralization_metrics: DecentralizationMetrics,
    #[serde(default)]
    pub miner_distribution: MinerDistribution,
}

impl AnalyticsSnapshot {
    /// Transactions per block, guarding against an empty chain.
    pub fn throughput(&self) -> f64 {
        self.total_transactions as f64 / self.total_blocks.max(1) as f64
    }

    /// Average block size as a percentage of the configured limit.
    pub fn block_utilization(&self) -> f64 {
        if self.network_params.block_size_limit == 0 {
            return 0.0;
        }
        self.average_block_size / self.network_params.block_size_limit as f64 * 100.0
    }
}

/// A block from `/chain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub hash: String,
    pub previous_hash: String,
    pub nonce: u64,
    /// Only the count is displayed, so entries are kept opaque.
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
    #[serde(default, alias = "size")]
    pub block_size: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl Block {
    /// Number of transactions carried, including the reward transaction.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn short_hash(&self) -> String {
        abbreviate(&self.hash, SHORT_HASH_LEN)
    }

    pub fn short_previous_hash(&self) -> String {
        abbreviate(&self.previous_hash, SHORT_HASH_LEN)
    }
}

/// A transaction from `/mempool` (pending) or `/transactions` (historical).
///
/// Pending entries carry `size`; historical entries carry `block` and
/// `timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub txid: String,
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub block: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl Transaction {
    /// Truncated transaction id, or `N/A` when the backend omitted it.
    pub fn short_txid(&self) -> String {
        if self.txid.is_empty() {
            "N/A".to_string()
        } else {
            abbreviate(&self.txid, SHORT_TXID_LEN)
        }
    }
}

/// Partial parameter update sent to `/update_params`.
///
/// Values are forwarded as the operator typed them; the backend coerces.
/// Absent fields are left untouched on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mining_difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_time_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_transactions_per_block: Option<String>,
}

impl ParamsUpdate {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.block_size_limit.is_none()
            && self.mining_difficulty.is_none()
            && self.transaction_fee.is_none()
            && self.block_time_target.is_none()
            && self.max_transactions_per_block.is_none()
    }
}

/// Body of `/api/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

/// Body of `/api/mine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineRequest {
    pub miner: String,
}

/// Sum of all balances.
pub fn total_supply(balances: &Balances) -> f64 {
    balances.values().sum()
}

/// First `len` characters followed by `...`, or `s` unchanged when shorter.
pub fn abbreviate(s: &str, len: usize) -> String {
    match s.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
