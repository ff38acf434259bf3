//! Analytics: parameters, mining statistics, throughput, and block usage.

use ratatui::style::Color;
use sim_analytics::{format_bytes, AnalyticsSnapshot};

use crate::ui::fragment::{kv, Panel, ViewFragment};

pub fn build(analytics: &AnalyticsSnapshot) -> ViewFragment {
    let params = &analytics.network_params;
    let mining = &analytics.mining_stats;

    let parameters = Panel::new("Network Parameters", Color::Cyan)
        .line(kv("Block Size Limit", format_bytes(params.block_size_limit as f64)))
        .line(kv("Mining Difficulty", params.mining_difficulty.to_string()))
        .line(kv("Transaction Fee", format!("{} SIM", params.transaction_fee)))
        .line(kv("Block Time Target", format!("{}s", params.block_time_target)))
        .line(kv(
            "Max Tx per Block",
            params.max_transactions_per_block.to_string(),
        ));

    let mining_stats = Panel::new("Mining Statistics", Color::Yellow)
        .line(kv("Total Blocks Mined", mining.total_blocks_mined.to_string()))
        .line(kv(
            "Total Transactions",
            mining.total_transactions_processed.to_string(),
        ))
        .line(kv(
            "Difficulty Adjustments",
            mining.difficulty_adjustments.to_string(),
        ))
        .line(kv("Orphaned Blocks", mining.orphaned_blocks.to_string()))
        .line(kv(
            "Average Block Time",
            format!("{:.2}s", mining.average_block_time),
        ));

    let network = Panel::new("Network Metrics", Color::Blue)
        .line(kv("Total Transactions", analytics.total_transactions.to_string()))
        .line(kv("Mempool Size", analytics.mempool_size.to_string()))
        .line(kv("Average Block Size", format_bytes(analytics.average_block_size)))
        .line(kv(
            "Transaction Throughput",
            format!("{:.2} tx/block", analytics.throughput()),
        ));

    let blocks = Panel::new("Block Statistics", Color::Green)
        .line(kv("Total Blocks", analytics.total_blocks.to_string()))
        .line(kv("Average Block Size", format_bytes(analytics.average_block_size)))
        .line(kv(
            "Block Utilization",
            format!("{:.1}%", analytics.block_utilization()),
        ))
        .line(kv("Chain Length", format!("{} blocks", analytics.total_blocks)));

    ViewFragment::grid(2, vec![parameters, mining_stats, network, blocks])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_analytics::NetworkParams;

    #[test]
    fn test_throughput_and_utilization() {
        let analytics = AnalyticsSnapshot {
            total_blocks: 4,
            total_transactions: 10,
            average_block_size: 250.0,
            network_params: NetworkParams {
                block_size_limit: 1000,
                ..Default::default()
            },
            ..Default::default()
        };

        let text = build(&analytics).plain_text();
        assert!(text.contains("Transaction Throughput: 2.50 tx/block"));
        assert!(text.contains("Block Utilization: 25.0%"));
        assert!(text.contains("Chain Length: 4 blocks"));
    }

    #[test]
    fn test_empty_chain_throughput_uses_unit_divisor() {
        let analytics = AnalyticsSnapshot {
            total_transactions: 3,
            ..Default::default()
        };
        assert!(build(&analytics)
            .plain_text()
            .contains("Transaction Throughput: 3.00 tx/block"));
    }
}
