//! Tagged result for analyses that may have nothing to report.

use serde::Serialize;
use sg_core::PeriodKey;

/// Why an analysis produced no metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoDataReason {
    /// The dataset was empty
    NoRecords,
    /// Records exist, but none fall in the selected period
    NoRecordsForPeriod { period: PeriodKey },
}

/// Either computed metrics or an explicit "no data" marker.
///
/// Every analysis returns this instead of panicking or inventing zeros, so
/// consumers handle the empty case in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    NoData { reason: NoDataReason },
    Ready(T),
}

impl<T> Outcome<T> {
    /// Shorthand for an empty dataset
    pub fn no_records() -> Self {
        Outcome::NoData {
            reason: NoDataReason::NoRecords,
        }
    }

    /// Borrow the metrics, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::NoData { .. } => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::NoData { .. } => None,
        }
    }
}

impl<T: Default> Outcome<T> {
    /// The metrics, or their zero value when there was no data
    pub fn ready_or_default(self) -> T {
        self.into_ready().unwrap_or_default()
    }
}
