//! API client module for the simulation backend's HTTP endpoints.
//!
//! Every call is a single fresh round trip: no retry, no caching.

mod client;

pub use client::{ApiError, SimApi, SimApiClient};

/// Read endpoints.
pub mod endpoints {
    pub const ANALYTICS: &str = "/analytics";
    pub const BALANCES: &str = "/balances";
    pub const MEMPOOL: &str = "/mempool";
    pub const CHAIN: &str = "/chain";
    pub const TRANSACTIONS: &str = "/transactions";

    pub const UPDATE_PARAMS: &str = "/update_params";
    pub const SEND: &str = "/api/send";
    pub const MINE: &str = "/api/mine";
}
