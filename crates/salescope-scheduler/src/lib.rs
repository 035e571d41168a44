//! `salescope-scheduler` — single-trigger recurring job scheduling.
//!
//! # Overview
//!
//! At most one trigger is active at any time. [`engine::SchedulerHandle`]
//! installs and cancels it; [`engine::SchedulerEngine`] polls once a second,
//! resolves the concrete next-fire time, and dispatches due firings on a
//! blocking task. [`countdown::Countdown`] derives seconds-remaining for
//! display and never triggers work itself.
//!
//! # Trigger kinds
//!
//! | Frequency | Kind              | Firing rule                  |
//! |-----------|-------------------|------------------------------|
//! | minute    | fixed interval    | every minute from install    |
//! | hour      | fixed interval    | every hour from install      |
//! | day       | fixed interval    | every day from install       |
//! | month     | calendar anchored | 00:00 on day 1 of each month |
//! | year      | calendar anchored | 00:00 on January 1           |

pub mod countdown;
pub mod engine;
pub mod schedule;
pub mod types;

pub use countdown::Countdown;
pub use engine::{JobFn, SchedulerEngine, SchedulerHandle};
pub use types::Trigger;
