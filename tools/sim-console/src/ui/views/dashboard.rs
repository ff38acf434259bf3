//! Dashboard: network status, statistics, recent activity, and health.

use ratatui::style::Color;
use sim_analytics::{
    format_bytes, health_band, health_label, health_score, total_supply, AnalyticsSnapshot,
    Balances,
};

use crate::ui::fragment::{band_color, gauge, headline, kv, sim, status, Panel, ViewFragment};

pub fn build(analytics: &AnalyticsSnapshot, balances: &Balances) -> ViewFragment {
    ViewFragment::grid(
        2,
        vec![
            network_status(analytics),
            statistics(analytics, balances),
            recent_activity(analytics),
            network_health(analytics),
        ],
    )
}

fn network_status(analytics: &AnalyticsSnapshot) -> Panel {
    let params = &analytics.network_params;
    Panel::new("Network Status", Color::Cyan)
        .lines(headline(analytics.total_blocks.to_string(), "Total Blocks", Color::Cyan))
        .line(status("Network Active", Color::Green))
        .line(kv("Difficulty", params.mining_difficulty.to_string()))
        .line(kv("Block Size", format_bytes(params.block_size_limit as f64)))
        .line(kv("Target Block Time", format!("{}s", params.block_time_target)))
}

fn statistics(analytics: &AnalyticsSnapshot, balances: &Balances) -> Panel {
    Panel::new("Statistics", Color::Blue)
        .lines(headline(
            analytics.total_transactions.to_string(),
            "Total Transactions",
            Color::Blue,
        ))
        .line(kv("Mempool", format!("{} pending", analytics.mempool_size)))
        .line(kv("Total Supply", sim(total_supply(balances))))
        .line(kv("Avg Block Size", format_bytes(analytics.average_block_size)))
        .line(kv(
            "Blocks Mined",
            analytics.mining_stats.total_blocks_mined.to_string(),
        ))
}

fn recent_activity(analytics: &AnalyticsSnapshot) -> Panel {
    let mining = &analytics.mining_stats;
    Panel::new("Recent Activity", Color::Magenta)
        .lines(headline(
            analytics.total_transactions.to_string(),
            "Total Transactions",
            Color::Magenta,
        ))
        .line(kv("Recent Blocks", mining.total_blocks_mined.to_string()))
        .line(kv(
            "Difficulty Adjustments",
            mining.difficulty_adjustments.to_string(),
        ))
        .line(kv("Orphaned Blocks", mining.orphaned_blocks.to_string()))
}

fn network_health(analytics: &AnalyticsSnapshot) -> Panel {
    let score = health_score(analytics);
    let color = band_color(health_band(score));
    let d = &analytics.decentralization_metrics;

    Panel::new("Network Health", color)
        .lines(headline(format!("{score:.1}%"), "Network Health Score", color))
        .line(status(health_label(score), color))
        .line(gauge(score, 30, color))
        .line(kv(
            "Gini Coefficient",
            format!("{:.1}%", d.gini_coefficient * 100.0),
        ))
        .line(kv(
            "Top 3 Concentration",
            format!("{:.1}%", d.top_miners_concentration),
        ))
}
