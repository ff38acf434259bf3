//! Domain models for the console.

mod app;
mod flash;
mod forms;
mod view;

pub use app::{Action, App, ApplyOutcome, InputMode};
pub use flash::{FlashMessage, FlashPhase, FlashQueue, Severity};
pub use forms::{ParamField, ParameterForm, TransferError, TransferField, TransferForm};
pub use view::{Container, FetchTicket, ViewData, ViewId};
