use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::types::Trigger;

/// Compute the next fire time for `trigger` strictly after `after`.
///
/// Interval triggers advance by their period; calendar triggers snap to the
/// next month/year anchor. All arithmetic is naive local time — the
/// countdown on the other side does no timezone conversion either.
pub fn next_fire(trigger: &Trigger, after: NaiveDateTime) -> NaiveDateTime {
    match trigger {
        Trigger::Interval { every } => after + *every,

        Trigger::MonthStart => {
            // Build this month's candidate at 00:00 on day 1, then advance a
            // month if it has already passed.
            let candidate = month_anchor(after.year(), after.month());
            if candidate > after {
                candidate
            } else if after.month() == 12 {
                month_anchor(after.year() + 1, 1)
            } else {
                month_anchor(after.year(), after.month() + 1)
            }
        }

        Trigger::YearStart => {
            let candidate = month_anchor(after.year(), 1);
            if candidate > after {
                candidate
            } else {
                month_anchor(after.year() + 1, 1)
            }
        }
    }
}

/// Midnight on day 1 of (year, month). Day 1 exists in every month, so this
/// cannot fail for the values `next_fire` produces.
fn month_anchor(year: i32, month: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("day 1 of a valid month")
        .and_hms_opt(0, 0, 0)
        .expect("midnight")
}
