//! Mempool: pending transactions in admission order.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sim_analytics::{format_bytes, Transaction};

use crate::ui::fragment::{kv, sim, Panel, ViewFragment};

pub const EMPTY: &str = "No pending transactions in mempool.";

pub fn build(pending: &[Transaction]) -> ViewFragment {
    if pending.is_empty() {
        return ViewFragment::placeholder("Pending Transactions", EMPTY);
    }

    let total_fees: f64 = pending.iter().map(|tx| tx.fee).sum();
    let summary = Panel::new("Mempool", Color::Yellow)
        .line(kv("Pending", pending.len().to_string()))
        .line(kv("Total Fees", sim(total_fees)));

    let mut list = Panel::new("Pending Transactions", Color::Green);
    for tx in pending {
        list = list.lines(item(tx));
    }

    ViewFragment::grid(1, vec![summary, list])
}

fn item(tx: &Transaction) -> [Line<'static>; 5] {
    [
        Line::from(vec![
            Span::raw("  TXID: "),
            Span::styled(
                tx.short_txid(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("  From: {}  To: {}", tx.sender, tx.recipient)),
        Line::from(format!("  Amount: {} SIM  Fee: {} SIM", tx.amount, tx.fee)),
        Line::from(format!("  Size: {}", format_bytes(tx.size as f64))),
        Line::raw(""),
    ]
}
