//! Reusable UI widgets.

mod overlay;

pub use overlay::{render_alert, render_help};
