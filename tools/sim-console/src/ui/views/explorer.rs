//! Block explorer: the chain by ascending index.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sim_analytics::{format_bytes, Block};

use crate::ui::fragment::{kv, local_time, Panel, ViewFragment};

pub const EMPTY: &str = "Blockchain is empty.";

pub fn build(chain: &[Block]) -> ViewFragment {
    if chain.is_empty() {
        return ViewFragment::placeholder("Blockchain", EMPTY);
    }

    let mut panel = Panel::new(format!("Blockchain ({} blocks)", chain.len()), Color::Cyan);
    for block in chain {
        panel = panel
            .line(Line::from(Span::styled(
                format!("  Block #{}", block.index),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )))
            .line(kv("Hash", block.short_hash()))
            .line(kv("Previous", block.short_previous_hash()))
            .line(kv("Nonce", block.nonce.to_string()))
            .line(kv("Transactions", block.tx_count().to_string()))
            .line(kv("Size", format_bytes(block.block_size as f64)))
            .line(kv("Timestamp", local_time(block.timestamp)))
            .line(Line::raw(""));
    }

    ViewFragment::single(panel)
}
