//! Application state: active view, view containers, forms, and notifications.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;
use sim_analytics::{Balances, MineRequest, ParamsUpdate, TransferRequest};
use tracing::{debug, info, warn};

use super::flash::{FlashQueue, Severity};
use super::forms::{ParameterForm, TransferForm};
use super::view::{Container, FetchTicket, ViewData, ViewId};
use crate::api::ApiError;
use crate::config::ConsoleConfig;

/// Whether key presses drive navigation or edit a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load(FetchTicket),
    SubmitParams(ParamsUpdate),
    SubmitTransfer(TransferRequest),
    Mine(MineRequest),
}

/// What [`App::apply`] did with a pipeline result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    /// The result was stale and left the screen untouched.
    Discarded,
}

/// Console state. Owned by a single driver task.
#[derive(Debug)]
pub struct App {
    /// Current active view. Exactly one view is active at any time.
    pub active_view: ViewId,

    /// Body contents per view; absent means never selected.
    containers: HashMap<ViewId, Container>,

    /// Generation source for fetch tickets.
    next_generation: u64,

    /// Newest generation applied per view.
    applied: HashMap<ViewId, u64>,

    /// Transient notifications.
    pub flash: FlashQueue,

    /// Blocking alert; the next key press dismisses it.
    pub alert: Option<String>,

    pub params_form: ParameterForm,
    pub transfer_form: TransferForm,

    /// Selected account row on the Wallet view.
    pub wallet_selected: usize,

    pub mode: InputMode,
    pub show_help: bool,

    /// Vertical scroll offset of the body.
    pub scroll: u16,

    /// Wall-clock time of the last successful cycle.
    pub last_refresh: Option<DateTime<Local>>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            active_view: ViewId::DEFAULT,
            containers: HashMap::new(),
            next_generation: 0,
            applied: HashMap::new(),
            flash: FlashQueue::new(config.flash_display, config.flash_fade),
            alert: None,
            params_form: ParameterForm::default(),
            transfer_form: TransferForm::default(),
            wallet_selected: 0,
            mode: InputMode::Normal,
            show_help: false,
            scroll: 0,
            last_refresh: None,
            should_quit: false,
        }
    }

    fn issue(&mut self, view: ViewId) -> FetchTicket {
        self.next_generation += 1;
        FetchTicket {
            view,
            generation: self.next_generation,
        }
    }

    /// Activate `view` and request one run of its pipeline.
    ///
    /// Selecting the already active view just reloads it.
    pub fn select(&mut self, view: ViewId) -> FetchTicket {
        if view != self.active_view {
            debug!(from = self.active_view.name(), to = view.name(), "view selected");
            self.active_view = view;
            self.scroll = 0;
            self.mode = InputMode::Normal;
        }
        self.containers.entry(view).or_insert(Container::Loading);
        self.issue(view)
    }

    /// Re-run the active view's pipeline.
    pub fn reload(&mut self) -> FetchTicket {
        self.issue(self.active_view)
    }

    /// Ticket for a scheduler tick: only the default view auto-refreshes.
    pub fn auto_refresh_ticket(&mut self) -> Option<FetchTicket> {
        (self.active_view == ViewId::DEFAULT).then(|| self.issue(ViewId::DEFAULT))
    }

    pub fn container(&self, view: ViewId) -> Option<&Container> {
        self.containers.get(&view)
    }

    /// Body of the active view.
    pub fn active_container(&self) -> Option<&Container> {
        self.container(self.active_view)
    }

    /// Install a pipeline result unless it is stale.
    ///
    /// A result is stale when its view is no longer active, or when a newer
    /// ticket for the same view has already been applied.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ViewData, ApiError>,
    ) -> ApplyOutcome {
        if ticket.view != self.active_view {
            debug!(view = ticket.view.name(), "discarding result for inactive view");
            return ApplyOutcome::Discarded;
        }
        if self
            .applied
            .get(&ticket.view)
            .is_some_and(|&latest| latest > ticket.generation)
        {
            debug!(
                view = ticket.view.name(),
                generation = ticket.generation,
                "discarding out-of-order result"
            );
            return ApplyOutcome::Discarded;
        }
        self.applied.insert(ticket.view, ticket.generation);

        match result {
            Ok(data) => {
                self.absorb(&data);
                self.containers.insert(ticket.view, Container::Ready(data));
                self.last_refresh = Some(Local::now());
                ApplyOutcome::Applied
            }
            Err(e) => {
                warn!(view = ticket.view.name(), error = %e, "failed to load view");
                self.containers.insert(ticket.view, Container::Failed);
                ApplyOutcome::Failed
            }
        }
    }

    /// Sync form state with freshly loaded data. Unsaved parameter edits
    /// are kept.
    fn absorb(&mut self, data: &ViewData) {
        match data {
            ViewData::Parameters(params)
                if self.mode != InputMode::Editing && !self.params_form.is_dirty() =>
            {
                self.params_form.populate(params);
            }
            ViewData::Wallet(balances) => {
                self.wallet_selected = self
                    .wallet_selected
                    .min(balances.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    /// Balances shown on the Wallet view, if loaded.
    pub fn wallet_balances(&self) -> Option<&Balances> {
        match self.container(ViewId::Wallet) {
            Some(Container::Ready(ViewData::Wallet(balances))) => Some(balances),
            _ => None,
        }
    }

    /// Account selected on the Wallet view.
    pub fn selected_account(&self) -> Option<&str> {
        self.wallet_balances()?
            .keys()
            .nth(self.wallet_selected)
            .map(String::as_str)
    }

    pub fn notify(&mut self, text: impl Into<String>, severity: Severity, now: Instant) {
        self.flash.push(text, severity, now);
    }

    /// Show a blocking alert that swallows the next key press.
    pub fn raise_alert(&mut self, text: impl Into<String>) {
        self.alert = Some(text.into());
    }

    /// Handle a key press; returns the side effect to perform, if any.
    pub fn on_key(&mut self, key: KeyCode, now: Instant) -> Option<Action> {
        if self.alert.take().is_some() {
            return None;
        }
        if self.show_help {
            self.show_help = false;
            return None;
        }
        match self.mode {
            InputMode::Editing => self.on_edit_key(key, now),
            InputMode::Normal => self.on_normal_key(key, now),
        }
    }

    fn on_normal_key(&mut self, key: KeyCode, now: Instant) -> Option<Action> {
        let key = match key {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Char('r') => Some(Action::Load(self.reload())),
            KeyCode::Char(c) if ViewId::from_hotkey(c).is_some() => {
                ViewId::from_hotkey(c).map(|v| Action::Load(self.select(v)))
            }
            KeyCode::Right | KeyCode::Tab => {
                let next = ViewId::ALL[(self.active_view.index() + 1) % ViewId::ALL.len()];
                Some(Action::Load(self.select(next)))
            }
            KeyCode::Left | KeyCode::BackTab => {
                let len = ViewId::ALL.len();
                let prev = ViewId::ALL[(self.active_view.index() + len - 1) % len];
                Some(Action::Load(self.select(prev)))
            }
            KeyCode::Up => {
                if self.active_view == ViewId::Wallet {
                    self.wallet_selected = self.wallet_selected.saturating_sub(1);
                } else {
                    self.scroll = self.scroll.saturating_sub(1);
                }
                None
            }
            KeyCode::Down => {
                if self.active_view == ViewId::Wallet {
                    let last = self.wallet_balances().map_or(0, |b| b.len().saturating_sub(1));
                    self.wallet_selected = (self.wallet_selected + 1).min(last);
                } else {
                    self.scroll = self.scroll.saturating_add(1);
                }
                None
            }
            KeyCode::Char('i') | KeyCode::Enter if self.has_form() => {
                self.mode = InputMode::Editing;
                None
            }
            KeyCode::Char('s') if self.has_form() => self.submit(now),
            KeyCode::Char('n') if self.active_view == ViewId::Wallet => self.mine(now),
            _ => None,
        }
    }

    fn on_edit_key(&mut self, key: KeyCode, now: Instant) -> Option<Action> {
        let params = self.active_view == ViewId::Parameters;
        match key {
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                self.submit(now)
            }
            KeyCode::Tab | KeyCode::Down => {
                if params {
                    self.params_form.focus_next();
                } else {
                    self.transfer_form.focus_next();
                }
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                if params {
                    self.params_form.focus_prev();
                } else {
                    self.transfer_form.focus_prev();
                }
                None
            }
            KeyCode::Backspace => {
                if params {
                    self.params_form.backspace();
                } else {
                    self.transfer_form.backspace();
                }
                None
            }
            KeyCode::Char(c) => {
                if params {
                    self.params_form.push_char(c);
                } else {
                    self.transfer_form.push_char(c);
                }
                None
            }
            _ => None,
        }
    }

    fn has_form(&self) -> bool {
        matches!(self.active_view, ViewId::Parameters | ViewId::Wallet)
    }

    fn submit(&mut self, now: Instant) -> Option<Action> {
        match self.active_view {
            ViewId::Parameters => Some(Action::SubmitParams(self.params_form.to_update())),
            ViewId::Wallet => {
                let empty = Balances::new();
                let balances = self.wallet_balances().unwrap_or(&empty);
                match self.transfer_form.validate(self.selected_account(), balances) {
                    Ok(request) => {
                        info!(
                            sender = %request.sender,
                            recipient = %request.recipient,
                            amount = request.amount,
                            "submitting transfer"
                        );
                        Some(Action::SubmitTransfer(request))
                    }
                    Err(e) => {
                        self.notify(e.to_string(), Severity::Error, now);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn mine(&mut self, now: Instant) -> Option<Action> {
        match self.selected_account() {
            Some(miner) => Some(Action::Mine(MineRequest {
                miner: miner.to_string(),
            })),
            None => {
                self.notify("Select a mining account", Severity::Error, now);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransferField;
    use sim_analytics::NetworkParams;

    fn app() -> App {
        App::new(&ConsoleConfig::default())
    }

    fn failure() -> ApiError {
        ApiError::Connection("down".to_string())
    }

    fn wallet(app: &mut App) {
        let ticket = app.select(ViewId::Wallet);
        let balances = Balances::from([("alice".to_string(), 50.0), ("bob".to_string(), 5.0)]);
        assert_eq!(
            app.apply(ticket, Ok(ViewData::Wallet(balances))),
            ApplyOutcome::Applied
        );
    }

    #[test]
    fn test_select_marks_single_active_view() {
        let mut app = app();
        assert_eq!(app.active_view, ViewId::Dashboard);

        let ticket = app.select(ViewId::Mempool);
        assert_eq!(ticket.view, ViewId::Mempool);
        assert_eq!(app.active_view, ViewId::Mempool);
        assert_eq!(app.active_container(), Some(&Container::Loading));
    }

    #[test]
    fn test_reselect_issues_fresh_ticket() {
        let mut app = app();
        let a = app.select(ViewId::Explorer);
        let b = app.select(ViewId::Explorer);
        assert_eq!(a.view, b.view);
        assert!(b.generation > a.generation);
    }

    #[test]
    fn test_result_for_inactive_view_is_discarded() {
        let mut app = app();
        let ticket = app.select(ViewId::Mempool);
        app.select(ViewId::Explorer);

        assert_eq!(
            app.apply(ticket, Ok(ViewData::Mempool(vec![]))),
            ApplyOutcome::Discarded
        );
        assert_eq!(app.active_container(), Some(&Container::Loading));
    }

    #[test]
    fn test_out_of_order_result_is_discarded() {
        let mut app = app();
        let older = app.select(ViewId::History);
        let newer = app.reload();

        assert_eq!(
            app.apply(newer, Ok(ViewData::History(vec![]))),
            ApplyOutcome::Applied
        );
        assert_eq!(app.apply(older, Err(failure())), ApplyOutcome::Discarded);
        assert!(matches!(app.active_container(), Some(Container::Ready(_))));
    }

    #[test]
    fn test_failure_replaces_container() {
        let mut app = app();
        let ticket = app.select(ViewId::Explorer);
        app.apply(ticket, Ok(ViewData::Explorer(vec![])));

        let ticket = app.reload();
        assert_eq!(app.apply(ticket, Err(failure())), ApplyOutcome::Failed);
        assert_eq!(app.active_container(), Some(&Container::Failed));
    }

    #[test]
    fn test_auto_refresh_only_on_default_view() {
        let mut app = app();
        assert!(app.auto_refresh_ticket().is_some());

        app.select(ViewId::Analytics);
        assert!(app.auto_refresh_ticket().is_none());
    }

    #[test]
    fn test_parameters_load_populates_form_unless_editing() {
        let mut app = app();
        let params = NetworkParams {
            mining_difficulty: 4,
            ..Default::default()
        };

        let ticket = app.select(ViewId::Parameters);
        app.apply(ticket, Ok(ViewData::Parameters(params.clone())));
        assert_eq!(app.params_form.to_update().mining_difficulty.as_deref(), Some("4"));

        app.on_key(KeyCode::Char('i'), Instant::now());
        app.on_key(KeyCode::Tab, Instant::now());
        app.on_key(KeyCode::Char('9'), Instant::now());

        let ticket = app.reload();
        app.apply(ticket, Ok(ViewData::Parameters(params.clone())));
        assert_eq!(app.params_form.to_update().mining_difficulty.as_deref(), Some("49"));

        // Leaving edit mode does not hand the fields back to the loader.
        app.on_key(KeyCode::Esc, Instant::now());
        assert_eq!(app.mode, InputMode::Normal);
        let ticket = app.select(ViewId::Parameters);
        app.apply(ticket, Ok(ViewData::Parameters(params.clone())));
        assert_eq!(app.params_form.to_update().mining_difficulty.as_deref(), Some("49"));

        app.params_form.mark_clean();
        let ticket = app.reload();
        app.apply(ticket, Ok(ViewData::Parameters(params)));
        assert_eq!(app.params_form.to_update().mining_difficulty.as_deref(), Some("4"));
    }

    #[test]
    fn test_alert_swallows_next_key() {
        let mut app = app();
        app.raise_alert("Failed to update parameters");

        assert_eq!(app.on_key(KeyCode::Char('q'), Instant::now()), None);
        assert!(app.alert.is_none());
        assert!(!app.should_quit);

        app.on_key(KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_hotkey_selects_view() {
        let mut app = app();
        let action = app.on_key(KeyCode::Char('4'), Instant::now());
        assert!(matches!(
            action,
            Some(Action::Load(FetchTicket { view: ViewId::Mempool, .. }))
        ));
    }

    #[test]
    fn test_invalid_transfer_flashes_and_stays_local() {
        let mut app = app();
        wallet(&mut app);

        let now = Instant::now();
        app.transfer_form.set(TransferField::Amount, "0");
        assert_eq!(app.on_key(KeyCode::Char('s'), now), None);

        let message = app.flash.messages().next().unwrap();
        assert_eq!(message.text, "Amount must be greater than 0");
        assert_eq!(message.severity, Severity::Error);
    }

    #[test]
    fn test_mine_uses_selected_account() {
        let mut app = app();
        wallet(&mut app);
        app.on_key(KeyCode::Down, Instant::now());

        let action = app.on_key(KeyCode::Char('n'), Instant::now());
        assert_eq!(
            action,
            Some(Action::Mine(MineRequest {
                miner: "bob".to_string()
            }))
        );
    }
}
