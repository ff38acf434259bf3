//! Network parameters: current values and the edit form.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sim_analytics::{format_bytes, NetworkParams};

use crate::domain::{ParamField, ParameterForm};
use crate::ui::fragment::{kv, muted, Panel, ViewFragment};

pub fn build(params: &NetworkParams, form: &ParameterForm, editing: bool) -> ViewFragment {
    let current = Panel::new("Current Parameters", Color::Cyan)
        .line(kv("Block Size Limit", format_bytes(params.block_size_limit as f64)))
        .line(kv("Mining Difficulty", params.mining_difficulty.to_string()))
        .line(kv("Transaction Fee", format!("{} SIM", params.transaction_fee)))
        .line(kv("Block Time Target", format!("{}s", params.block_time_target)))
        .line(kv(
            "Max Tx per Block",
            params.max_transactions_per_block.to_string(),
        ));

    let accent = if editing { Color::Yellow } else { Color::DarkGray };
    let mut edit = Panel::new("Update Parameters", accent);
    for field in ParamField::ALL {
        edit = edit.line(field_line(
            field.label(),
            form.value(field),
            editing && form.focused() == field,
        ));
    }
    edit = edit.line(Line::raw("")).line(muted(if editing {
        "[Tab] next field  [Enter] submit  [Esc] stop editing"
    } else {
        "[i] edit  [s] submit  (blank fields are left unchanged)"
    }));

    ViewFragment::grid(2, vec![current, edit])
}

/// Form row; the focused row gets a cursor marker.
pub(crate) fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{label:<26}"), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_shows_edited_values() {
        let params = NetworkParams {
            mining_difficulty: 4,
            ..Default::default()
        };
        let mut form = ParameterForm::default();
        form.populate(&params);
        form.set(ParamField::MiningDifficulty, "6");

        let text = build(&params, &form, true).plain_text();
        assert!(text.contains("Mining Difficulty: 4"));
        assert!(text.contains(&format!("{:<26}6", ParamField::MiningDifficulty.label())));
        assert!(text.contains("▶ "));
    }

    #[test]
    fn test_no_cursor_outside_edit_mode() {
        let form = ParameterForm::default();
        let text = build(&NetworkParams::default(), &form, false).plain_text();
        assert!(!text.contains("▶"));
    }
}
