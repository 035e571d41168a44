use chrono::Duration;

use salescope_core::Frequency;

/// The scheduler's internal representation of the one active schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Fires every `every` from the install instant.
    Interval { every: Duration },
    /// Fires at 00:00 on day 1 of every month.
    MonthStart,
    /// Fires at 00:00 on January 1 every year.
    YearStart,
}

impl Trigger {
    /// Map a report frequency onto its trigger kind. The mapping is fixed at
    /// design time, not configurable per instance.
    pub fn from_frequency(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Minute => Trigger::Interval {
                every: Duration::minutes(1),
            },
            Frequency::Hour => Trigger::Interval {
                every: Duration::hours(1),
            },
            Frequency::Day => Trigger::Interval {
                every: Duration::days(1),
            },
            Frequency::Month => Trigger::MonthStart,
            Frequency::Year => Trigger::YearStart,
        }
    }
}
