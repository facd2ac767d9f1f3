//! Timeframe tokens and their lookback windows

use chrono::{DateTime, Duration, Months, Utc};

/// Lookback window selected by the `timeframe` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timeframe {
    Weekly,
    Monthly,
    Yearly,
    All,
    /// Missing, empty or unknown token; windows exactly like [`Timeframe::All`]
    Unrecognized(String),
}

impl Timeframe {
    /// Map a raw query token to a timeframe. Never fails.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("weekly") => Timeframe::Weekly,
            Some("monthly") => Timeframe::Monthly,
            Some("yearly") => Timeframe::Yearly,
            Some("all") => Timeframe::All,
            Some(other) => Timeframe::Unrecognized(other.to_string()),
            None => Timeframe::Unrecognized(String::new()),
        }
    }

    /// Inclusive lower bound for activity `createdAt` values
    ///
    /// Calendar arithmetic clamps to the last day of the target month
    /// (31 March minus one month is the end of February).
    pub fn start_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            Timeframe::Weekly => now.checked_sub_signed(Duration::days(7)),
            Timeframe::Monthly => now.checked_sub_months(Months::new(1)),
            Timeframe::Yearly => now.checked_sub_months(Months::new(12)),
            Timeframe::All | Timeframe::Unrecognized(_) => Some(DateTime::UNIX_EPOCH),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl From<&str> for Timeframe {
    fn from(raw: &str) -> Self {
        Timeframe::parse(Some(raw))
    }
}
