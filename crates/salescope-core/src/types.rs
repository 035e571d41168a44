use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of the sales dataset.
///
/// `total` is trusted as stored — the report pipeline never re-derives it
/// from `quantity * unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique sale identifier — primary key.
    pub sale_id: i64,
    /// Calendar date of the sale.
    pub sale_date: NaiveDate,
    pub customer_id: i64,
    pub customer_name: String,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

/// Dataset-wide aggregates served by the analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_quantity: u64,
    pub average_sale: f64,
}

/// How often the report job fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Frequency {
    /// Nominal interval used as the countdown fallback before the engine
    /// has resolved a concrete next-fire time.
    ///
    /// Calendar frequencies use the 30-day / 365-day approximations — a
    /// month or year trigger has no single fixed interval.
    pub fn nominal_interval(&self) -> Duration {
        match self {
            Frequency::Minute => Duration::minutes(1),
            Frequency::Hour => Duration::hours(1),
            Frequency::Day => Duration::days(1),
            Frequency::Month => Duration::days(30),
            Frequency::Year => Duration::days(365),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::Minute => "minute",
            Frequency::Hour => "hour",
            Frequency::Day => "day",
            Frequency::Month => "month",
            Frequency::Year => "year",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Frequency {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Frequency::Minute),
            "hour" => Ok(Frequency::Hour),
            "day" => Ok(Frequency::Day),
            "month" => Ok(Frequency::Month),
            "year" => Ok(Frequency::Year),
            other => Err(crate::error::CoreError::InvalidFrequency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_round_trips_through_str() {
        for s in ["minute", "hour", "day", "month", "year"] {
            let f: Frequency = s.parse().unwrap();
            assert_eq!(f.to_string(), s);
        }
    }

    #[test]
    fn unsupported_frequency_is_rejected() {
        let err = "weekly".parse::<Frequency>().unwrap_err();
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn nominal_intervals_in_seconds() {
        assert_eq!(Frequency::Minute.nominal_interval().num_seconds(), 60);
        assert_eq!(Frequency::Hour.nominal_interval().num_seconds(), 3_600);
        assert_eq!(Frequency::Day.nominal_interval().num_seconds(), 86_400);
        assert_eq!(Frequency::Month.nominal_interval().num_seconds(), 30 * 86_400);
        assert_eq!(Frequency::Year.nominal_interval().num_seconds(), 365 * 86_400);
    }
}
