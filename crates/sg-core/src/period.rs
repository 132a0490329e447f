//! Year-month reporting periods used to partition cost records.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month in `YYYY-MM` form.
///
/// Ordering is chronological because the string form is zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey(String);

/// Error returned for strings that are not a valid `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPeriodKey(pub String);

impl fmt::Display for InvalidPeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid period '{}': expected YYYY-MM", self.0)
    }
}

impl std::error::Error for InvalidPeriodKey {}

impl PeriodKey {
    /// Period containing the given instant (UTC calendar).
    pub fn from_timestamp(ts: &DateTime<Utc>) -> Self {
        Self(format!("{:04}-{:02}", ts.year(), ts.month()))
    }

    /// Parse a `YYYY-MM` string, rejecting anything that is not a real month.
    pub fn parse(s: &str) -> Result<Self, InvalidPeriodKey> {
        let s = s.trim();
        let valid = s.len() == 7
            && s.as_bytes()[4] == b'-'
            && NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok();
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidPeriodKey(s.to_string()))
        }
    }

    /// Return the period as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PeriodKey {
    type Err = InvalidPeriodKey;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = InvalidPeriodKey;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PeriodKey> for String {
    fn from(p: PeriodKey) -> String {
        p.0
    }
}

impl PartialEq<&str> for PeriodKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
