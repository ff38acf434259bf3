//! Pure per-view builders: snapshot in, fragment out.

pub mod analytics;
pub mod dashboard;
pub mod decentralization;
pub mod explorer;
pub mod history;
pub mod mempool;
pub mod parameters;
pub mod wallet;

use crate::domain::{App, Container, InputMode, ViewData, ViewId};
use crate::ui::fragment::ViewFragment;

/// Fragment for `view`'s container in its current state.
pub fn body(app: &App, view: ViewId) -> ViewFragment {
    match app.container(view) {
        None | Some(Container::Loading) => {
            ViewFragment::placeholder(view.name(), format!("Loading {}...", view.noun()))
        }
        Some(Container::Failed) => {
            ViewFragment::placeholder(view.name(), format!("Failed to load {}.", view.noun()))
        }
        Some(Container::Ready(data)) => build(app, data),
    }
}

fn build(app: &App, data: &ViewData) -> ViewFragment {
    let editing = app.mode == InputMode::Editing;
    match data {
        ViewData::Dashboard {
            analytics,
            balances,
        } => dashboard::build(analytics, balances),
        ViewData::Analytics(snapshot) => analytics::build(snapshot),
        ViewData::Parameters(params) => parameters::build(params, &app.params_form, editing),
        ViewData::Mempool(pending) => mempool::build(pending),
        ViewData::Decentralization(snapshot) => decentralization::build(snapshot),
        ViewData::Explorer(chain) => explorer::build(chain),
        ViewData::History(txs) => history::build(txs),
        ViewData::Wallet(balances) => {
            wallet::build(balances, app.wallet_selected, &app.transfer_form, editing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::ConsoleConfig;

    #[test]
    fn test_loading_and_failure_placeholders() {
        let mut app = App::new(&ConsoleConfig::default());
        let ticket = app.select(ViewId::Explorer);
        assert!(body(&app, ViewId::Explorer)
            .plain_text()
            .contains("Loading blockchain..."));

        app.apply(ticket, Err(ApiError::Connection("down".to_string())));
        assert!(body(&app, ViewId::Explorer)
            .plain_text()
            .contains("Failed to load blockchain."));
    }

    #[test]
    fn test_ready_container_uses_view_builder() {
        let mut app = App::new(&ConsoleConfig::default());
        let ticket = app.select(ViewId::Mempool);
        app.apply(ticket, Ok(ViewData::Mempool(vec![])));
        assert!(body(&app, ViewId::Mempool)
            .plain_text()
            .contains(mempool::EMPTY));
    }
}
