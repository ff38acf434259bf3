//! Editable forms: network parameters and transfers.

use sim_analytics::{Balances, NetworkParams, ParamsUpdate, TransferRequest};
use thiserror::Error;

/// Editable network parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    BlockSizeLimit,
    MiningDifficulty,
    TransactionFee,
    BlockTimeTarget,
    MaxTransactionsPerBlock,
}

impl ParamField {
    pub const ALL: [ParamField; 5] = [
        ParamField::BlockSizeLimit,
        ParamField::MiningDifficulty,
        ParamField::TransactionFee,
        ParamField::BlockTimeTarget,
        ParamField::MaxTransactionsPerBlock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParamField::BlockSizeLimit => "Block Size Limit (bytes)",
            ParamField::MiningDifficulty => "Mining Difficulty",
            ParamField::TransactionFee => "Transaction Fee",
            ParamField::BlockTimeTarget => "Block Time Target (s)",
            ParamField::MaxTransactionsPerBlock => "Max Transactions / Block",
        }
    }
}

/// Cursor over a fixed set of text fields.
#[derive(Debug, Clone, Default, PartialEq)]
struct FieldCursor {
    focus: usize,
}

impl FieldCursor {
    fn next(&mut self, len: usize) {
        self.focus = (self.focus + 1) % len;
    }

    fn prev(&mut self, len: usize) {
        self.focus = (self.focus + len - 1) % len;
    }
}

/// Network parameter form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterForm {
    values: [String; 5],
    cursor: FieldCursor,
    /// Edited since the last populate or accepted submit.
    dirty: bool,
}

impl ParameterForm {
    /// Fill every field from a freshly loaded snapshot, discarding edits.
    pub fn populate(&mut self, params: &NetworkParams) {
        self.values = [
            params.block_size_limit.to_string(),
            params.mining_difficulty.to_string(),
            params.transaction_fee.to_string(),
            params.block_time_target.to_string(),
            params.max_transactions_per_block.to_string(),
        ];
        self.dirty = false;
    }

    /// True while the form holds edits the backend has not accepted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The backend accepted the values; the next load may overwrite them.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn value(&self, field: ParamField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: ParamField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
        self.dirty = true;
    }

    pub fn focused(&self) -> ParamField {
        ParamField::ALL[self.cursor.focus]
    }

    pub fn focus_next(&mut self) {
        self.cursor.next(ParamField::ALL.len());
    }

    pub fn focus_prev(&mut self) {
        self.cursor.prev(ParamField::ALL.len());
    }

    pub fn push_char(&mut self, c: char) {
        self.values[self.cursor.focus].push(c);
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if self.values[self.cursor.focus].pop().is_some() {
            self.dirty = true;
        }
    }

    /// Partial update carrying only the non-blank fields, trimmed.
    pub fn to_update(&self) -> ParamsUpdate {
        let field = |f: ParamField| {
            let v = self.value(f).trim();
            (!v.is_empty()).then(|| v.to_string())
        };

        ParamsUpdate {
            block_size_limit: field(ParamField::BlockSizeLimit),
            mining_difficulty: field(ParamField::MiningDifficulty),
            transaction_fee: field(ParamField::TransactionFee),
            block_time_target: field(ParamField::BlockTimeTarget),
            max_transactions_per_block: field(ParamField::MaxTransactionsPerBlock),
        }
    }
}

/// Editable transfer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferField {
    Recipient,
    Amount,
    Fee,
}

impl TransferField {
    pub const ALL: [TransferField; 3] = [
        TransferField::Recipient,
        TransferField::Amount,
        TransferField::Fee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransferField::Recipient => "Recipient",
            TransferField::Amount => "Amount",
            TransferField::Fee => "Fee (optional)",
        }
    }
}

/// Transfer rejected before reaching the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Select a sending account")]
    NoSender,

    #[error("Amount must be greater than 0")]
    InvalidAmount,

    #[error("Please enter a recipient")]
    MissingRecipient,

    #[error("Fee must be a non-negative number")]
    InvalidFee,

    #[error("Insufficient balance for this transaction")]
    InsufficientBalance,
}

/// Transfer form on the Wallet view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferForm {
    values: [String; 3],
    cursor: FieldCursor,
}

impl TransferForm {
    pub fn value(&self, field: TransferField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: TransferField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
    }

    pub fn focused(&self) -> TransferField {
        TransferField::ALL[self.cursor.focus]
    }

    pub fn focus_next(&mut self) {
        self.cursor.next(TransferField::ALL.len());
    }

    pub fn focus_prev(&mut self) {
        self.cursor.prev(TransferField::ALL.len());
    }

    pub fn push_char(&mut self, c: char) {
        self.values[self.cursor.focus].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.cursor.focus].pop();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check the form against the balances currently on screen.
    ///
    /// Amount is checked before recipient, and the balance check runs last.
    pub fn validate(
        &self,
        sender: Option<&str>,
        balances: &Balances,
    ) -> Result<TransferRequest, TransferError> {
        let sender = sender.ok_or(TransferError::NoSender)?;

        let amount = self
            .value(TransferField::Amount)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or(TransferError::InvalidAmount)?;

        let recipient = self.value(TransferField::Recipient).trim();
        if recipient.is_empty() {
            return Err(TransferError::MissingRecipient);
        }

        let fee = match self.value(TransferField::Fee).trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .ok_or(TransferError::InvalidFee)?,
            ),
        };

        let balance = balances.get(sender).copied().unwrap_or(0.0);
        if amount > balance {
            return Err(TransferError::InsufficientBalance);
        }

        Ok(TransferRequest {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            fee,
        })
    }
}
