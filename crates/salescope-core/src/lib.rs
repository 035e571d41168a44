//! `salescope-core` — shared types, configuration, and errors.

pub mod config;
pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Frequency, Sale, SalesSummary};
