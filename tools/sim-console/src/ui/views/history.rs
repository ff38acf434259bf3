//! Transaction history: confirmed transactions in chain order.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sim_analytics::Transaction;

use crate::ui::fragment::{local_time, Panel, ViewFragment};

pub const EMPTY: &str = "No transactions yet.";

pub fn build(history: &[Transaction]) -> ViewFragment {
    if history.is_empty() {
        return ViewFragment::placeholder("Transaction History", EMPTY);
    }

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut panel = Panel::new("Transaction History", Color::Blue);
    for tx in history {
        let block = tx.block.map_or("N/A".to_string(), |b| format!("#{b}"));
        let time = tx.timestamp.map_or("N/A".to_string(), local_time);

        panel = panel
            .line(Line::from(vec![
                Span::raw("  TXID: "),
                Span::styled(tx.short_txid(), Style::default().fg(Color::Cyan)),
            ]))
            .line(Line::from(vec![
                Span::raw("  "),
                Span::styled(tx.sender.clone(), bold),
                Span::raw(" → "),
                Span::styled(tx.recipient.clone(), bold),
                Span::raw(format!(": {} SIM", tx.amount)),
            ]))
            .line(Line::from(format!("  Fee: {} SIM  Block: {block}", tx.fee)))
            .line(Line::from(format!("  Time: {time}")))
            .line(Line::raw(""));
    }

    ViewFragment::single(panel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_placeholder() {
        assert!(build(&[]).plain_text().contains(EMPTY));
    }

    #[test]
    fn test_missing_fields_render_as_na() {
        let tx = Transaction {
            sender: "network".to_string(),
            recipient: "alice".to_string(),
            amount: 50.0,
            ..Default::default()
        };

        let text = build(&[tx]).plain_text();
        assert!(text.contains("TXID: N/A"));
        assert!(text.contains("network → alice: 50 SIM"));
        assert!(text.contains("Fee: 0 SIM  Block: N/A"));
        assert!(text.contains("Time: N/A"));
    }

    #[test]
    fn test_block_number() {
        let tx = Transaction {
            txid: "abc".to_string(),
            block: Some(7),
            ..Default::default()
        };
        assert!(build(&[tx]).plain_text().contains("Block: #7"));
    }
}
