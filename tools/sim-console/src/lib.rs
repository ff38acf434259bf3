//! SIM-Console: operator console for the blockchain simulation backend.
//!
//! Polls the backend's read-only endpoints, derives health and
//! decentralization indicators from the raw statistics, and renders them
//! into tabbed views that keep themselves fresh while visible.
//!
//! ## Architecture
//!
//! ```text
//!  key press ──┐
//!              ├──► App (tab controller) ──► FetchTicket ──► pipeline::load_view
//!  refresh ────┘         ▲                                      │ (spawned, HTTP)
//!  scheduler             │                                      ▼
//!                        └──────── App::apply ◄──── Completion over mpsc
//!                                      │
//!                                      ▼
//!                     ui::views::<view>::build (pure) ──► terminal frame
//! ```
//!
//! One driver task owns [`App`]; network reads are the only suspension
//! points and their completions are funnelled back to the driver, so no UI
//! state is shared across threads.

pub mod api;
pub mod config;
pub mod console;
pub mod domain;
pub mod logging;
pub mod pipeline;
pub mod scheduler;
pub mod ui;

pub use api::{ApiError, SimApi, SimApiClient};
pub use config::{ConfigError, ConsoleConfig};
pub use console::{Completion, Console};
pub use domain::{
    Action, App, Container, FetchTicket, FlashQueue, InputMode, Severity, ViewData, ViewId,
};
pub use scheduler::{RefreshScheduler, RefreshTick};
