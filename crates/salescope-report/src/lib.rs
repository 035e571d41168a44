//! `salescope-report` — the report rendering pipeline.
//!
//! One firing turns a dataset snapshot into a multi-chart PDF:
//! [`aggregate`] builds the summary views, [`chart`] rasterizes each one,
//! [`document`] lays the images out across pages, and [`job::ReportJob`]
//! ties the stages together with fire-and-forget error handling.

pub mod aggregate;
pub mod chart;
pub mod document;
pub mod error;
pub mod job;

pub use error::{ReportError, Result};
pub use job::{ReportConfig, ReportJob};
