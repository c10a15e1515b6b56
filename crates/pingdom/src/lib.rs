//! Pingdom - client for the Pingdom checks REST API
//!
//! Lists, creates, reads, updates and deletes uptime checks. Requests carry
//! HTTP Basic Auth plus the `App-Key` header; non-2xx responses surface as
//! structured [`ApiError`]s.

pub mod check;
pub mod cli;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod io;

pub use check::{Check, CheckParams, CheckStatus};
pub use client::{validate_response, PingdomClient};
pub use config::{load_config, ClientConfig};
pub use envelope::{ApiError, MessageResponse};
pub use error::{PingdomError, Result};
