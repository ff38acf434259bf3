//! # Simulation Analytics
//!
//! Read-only snapshot types for the simulation backend and the pure
//! functions that turn raw network statistics into bounded scores and
//! qualitative labels.
//!
//! ## Design Principles
//!
//! - **Snapshots are immutable**: the console never mutates backend data,
//!   it only derives from it.
//! - **Total derivations**: every function in [`metrics`] is defined for any
//!   finite input and never panics.
//! - **One policy table**: band boundaries live in [`Thresholds`] rather than
//!   being scattered across the derivation functions.

pub mod metrics;
pub mod thresholds;
pub mod types;

pub use metrics::*;
pub use thresholds::{ConcentrationLevel, HealthBand, Thresholds};
pub use types::*;
