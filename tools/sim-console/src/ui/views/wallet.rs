//! Wallet: account balances, transfer form, and mining.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sim_analytics::{total_supply, Balances};

use super::parameters::field_line;
use crate::domain::{TransferField, TransferForm};
use crate::ui::fragment::{kv, muted, sim, Panel, ViewFragment};

pub const EMPTY: &str = "No balances yet.";

pub fn build(
    balances: &Balances,
    selected: usize,
    form: &TransferForm,
    editing: bool,
) -> ViewFragment {
    if balances.is_empty() {
        return ViewFragment::placeholder("Balances", EMPTY);
    }

    let mut accounts = Panel::new("Balances", Color::Green);
    for (i, (account, balance)) in balances.iter().enumerate() {
        let style = if i == selected {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };
        accounts = accounts.line(Line::from(vec![
            Span::styled(
                format!("  {account}"),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(": {}", sim(*balance)), style),
        ]));
    }
    accounts = accounts
        .line(Line::raw(""))
        .line(kv("Total Supply", sim(total_supply(balances))));

    let sender = balances
        .keys()
        .nth(selected)
        .cloned()
        .unwrap_or_else(|| "-".to_string());

    let accent = if editing { Color::Yellow } else { Color::DarkGray };
    let mut transfer = Panel::new("Send Transaction", accent).line(kv("From", sender));
    for field in TransferField::ALL {
        transfer = transfer.line(field_line(
            field.label(),
            form.value(field),
            editing && form.focused() == field,
        ));
    }
    transfer = transfer.line(Line::raw("")).line(muted(if editing {
        "[Tab] next field  [Enter] send  [Esc] stop editing"
    } else {
        "[↑/↓] account  [i] edit  [s] send  [n] mine block"
    }));

    ViewFragment::grid(2, vec![accounts, transfer])
}
