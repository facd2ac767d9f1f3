//! Patient sentiment pagination
//!
//! `page` and `limit` are echoed back exactly as requested; they only drive
//! the slice arithmetic. Any combination that does not describe a valid
//! window (non-numeric, non-positive limit, negative offset, overflow)
//! produces an empty page rather than an error.

use std::ops::Range;

use clinidash_common::{Dataset, RosterEntry};
use serde::{Serialize, Serializer};

/// Default page when the query omits `page`
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size when the query omits `limit`
pub const DEFAULT_LIMIT: i64 = 10;

/// Numeric query parameter with an explicit not-a-number state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryNumber {
    Number(i64),
    /// Present but without a leading integer
    NotANumber,
}

impl QueryNumber {
    /// Convert a raw query value, using `default` when the parameter is absent
    pub fn from_param(raw: Option<&str>, default: i64) -> Self {
        match raw {
            Some(raw) => Self::parse(raw),
            None => QueryNumber::Number(default),
        }
    }

    /// Parse the leading integer of `raw`.
    ///
    /// Leading whitespace and a single sign are accepted, parsing stops at the
    /// first non-digit (`"1.5"` is 1, `"5abc"` is 5) and out-of-range values
    /// saturate. Input without leading digits is [`QueryNumber::NotANumber`].
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let digits: Vec<i64> = digits
            .bytes()
            .take_while(u8::is_ascii_digit)
            .map(|b| i64::from(b - b'0'))
            .collect();
        if digits.is_empty() {
            return QueryNumber::NotANumber;
        }

        let value = digits.into_iter().fold(0i64, |acc, d| {
            let shifted = acc.saturating_mul(10);
            if negative {
                shifted.saturating_sub(d)
            } else {
                shifted.saturating_add(d)
            }
        });
        QueryNumber::Number(value)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryNumber::Number(n) => Some(*n),
            QueryNumber::NotANumber => None,
        }
    }
}

impl Serialize for QueryNumber {
    // JSON has no NaN; it goes over the wire as null
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryNumber::Number(n) => serializer.serialize_i64(*n),
            QueryNumber::NotANumber => serializer.serialize_none(),
        }
    }
}

/// Paginated patient sentiment response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientPage {
    pub data: Vec<RosterEntry>,
    /// Number of patients matching the sentiment filter
    pub total: usize,
    pub page: QueryNumber,
    pub limit: QueryNumber,
}

/// Index range of the requested page within a roster of `len` entries
///
/// Page `n` (1-indexed) covers `[(n - 1) * limit, n * limit)`, clamped to the
/// roster. Returns `None` when the window is empty or undefined.
pub fn page_bounds(page: QueryNumber, limit: QueryNumber, len: usize) -> Option<Range<usize>> {
    let (page, limit) = (page.as_i64()?, limit.as_i64()?);
    if limit <= 0 {
        return None;
    }

    let offset = page.checked_sub(1)?.checked_mul(limit)?;
    let start = usize::try_from(offset).ok()?;
    if start >= len {
        return None;
    }

    let size = usize::try_from(limit).unwrap_or(usize::MAX);
    Some(start..start.saturating_add(size).min(len))
}

/// Filter the patient roster by `sentiment` and cut out the requested page
///
/// The filter is an exact, case-sensitive match on the satisfaction value;
/// `None` or an empty string disables it.
pub fn get_patient_sentiment(
    dataset: &Dataset,
    page: QueryNumber,
    limit: QueryNumber,
    sentiment: Option<&str>,
) -> PatientPage {
    let filtered: Vec<&RosterEntry> = match sentiment.filter(|s| !s.is_empty()) {
        Some(sentiment) => dataset
            .patients()
            .iter()
            .filter(|p| p.satisfaction.as_str() == sentiment)
            .collect(),
        None => dataset.patients().iter().collect(),
    };

    let data = page_bounds(page, limit, filtered.len())
        .map(|range| filtered[range].iter().copied().cloned().collect())
        .unwrap_or_default();

    PatientPage {
        data,
        total: filtered.len(),
        page,
        limit,
    }
}
