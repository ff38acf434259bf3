//! Console driver: turns [`Action`]s into spawned backend calls and feeds
//! their completions back into [`App`].

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use sim_analytics::{abbreviate, SHORT_TXID_LEN};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{ApiError, SimApi};
use crate::domain::{Action, App, FetchTicket, Severity, ViewData, ViewId};
use crate::pipeline::load_view;
use crate::ui::views;

/// Result of a spawned backend call.
#[derive(Debug)]
pub enum Completion {
    Loaded(FetchTicket, Result<ViewData, ApiError>),
    ParamsUpdated(Result<(), ApiError>),
    TransferSent(Result<Option<String>, ApiError>),
    BlockMined {
        miner: String,
        result: Result<(), ApiError>,
    },
}

/// Owns the application state and dispatches its side effects.
pub struct Console {
    pub app: App,
    api: Arc<dyn SimApi>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl Console {
    /// Create a console; completions of spawned calls are sent to `completions`.
    pub fn new(
        app: App,
        api: Arc<dyn SimApi>,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            app,
            api,
            completions,
        }
    }

    /// Enter the default view.
    pub fn start(&mut self) {
        let ticket = self.app.select(ViewId::DEFAULT);
        self.dispatch(Action::Load(ticket));
    }

    /// Spawn the backend call for `action`. Never blocks.
    pub fn dispatch(&self, action: Action) {
        let api = Arc::clone(&self.api);
        let tx = self.completions.clone();

        tokio::spawn(async move {
            let completion = match action {
                Action::Load(ticket) => {
                    Completion::Loaded(ticket, load_view(api.as_ref(), ticket.view).await)
                }
                Action::SubmitParams(update) => {
                    Completion::ParamsUpdated(api.update_params(&update).await)
                }
                Action::SubmitTransfer(request) => {
                    Completion::TransferSent(api.send_transaction(&request).await)
                }
                Action::Mine(request) => {
                    let result = api.mine_block(&request).await;
                    Completion::BlockMined {
                        miner: request.miner,
                        result,
                    }
                }
            };
            // Receiver gone means the console is shutting down.
            let _ = tx.send(completion);
        });
    }

    pub fn on_key(&mut self, key: KeyCode, now: Instant) {
        if let Some(action) = self.app.on_key(key, now) {
            self.dispatch(action);
        }
        self.clamp_scroll();
    }

    /// Scheduler tick: reload the dashboard if it is showing.
    pub fn on_refresh_tick(&mut self) {
        if let Some(ticket) = self.app.auto_refresh_ticket() {
            self.dispatch(Action::Load(ticket));
        }
    }

    pub fn handle_completion(&mut self, completion: Completion, now: Instant) {
        match completion {
            Completion::Loaded(ticket, result) => {
                self.app.apply(ticket, result);
                self.clamp_scroll();
            }
            Completion::ParamsUpdated(Ok(())) => {
                info!("network parameters updated");
                self.app.params_form.mark_clean();
                self.app
                    .notify("Parameters updated successfully", Severity::Success, now);
                self.reload_if_active(ViewId::Parameters);
            }
            Completion::ParamsUpdated(Err(e)) => {
                warn!(error = %e, "parameter update failed");
                self.app
                    .notify("Failed to update parameters", Severity::Error, now);
                self.app.raise_alert(format!(
                    "Failed to update parameters: {}",
                    e.operator_message()
                ));
            }
            Completion::TransferSent(Ok(txid)) => {
                info!(txid = txid.as_deref().unwrap_or("-"), "transaction submitted");
                let text = match txid {
                    Some(txid) => format!(
                        "Transaction {} added to mempool",
                        abbreviate(&txid, SHORT_TXID_LEN)
                    ),
                    None => "Transaction added to mempool".to_string(),
                };
                self.app.notify(text, Severity::Success, now);
                self.app.transfer_form.clear();
                self.reload_if_active(ViewId::Wallet);
            }
            Completion::TransferSent(Err(e)) => {
                warn!(error = %e, "transaction rejected");
                self.app.notify(e.operator_message(), Severity::Error, now);
            }
            Completion::BlockMined { miner, result: Ok(()) } => {
                info!(%miner, "block mined");
                self.app
                    .notify(format!("Block mined by {miner}"), Severity::Success, now);
                self.reload_if_active(ViewId::Wallet);
            }
            Completion::BlockMined { miner, result: Err(e) } => {
                warn!(%miner, error = %e, "mining failed");
                self.app.notify(
                    format!("Mining failed: {}", e.operator_message()),
                    Severity::Error,
                    now,
                );
            }
        }
    }

    /// Keep the body scroll within the active view's content.
    fn clamp_scroll(&mut self) {
        let limit = views::body(&self.app, self.app.active_view).max_scroll();
        self.app.scroll = self.app.scroll.min(limit);
    }

    fn reload_if_active(&mut self, view: ViewId) {
        if self.app.active_view == view {
            let ticket = self.app.reload();
            self.dispatch(Action::Load(ticket));
        }
    }
}

