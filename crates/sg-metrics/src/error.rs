//! Error types for sg-metrics

use sg_core::{ModelName, RecordKind, RecordViolation};
use thiserror::Error;

/// Failure to derive metrics from a dataset.
///
/// Empty datasets are not errors (see [`Outcome`](crate::Outcome)); the
/// only failure is a record that breaks its field constraints.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// M001: A record failed validation
    #[error("[M001] Invalid {dataset} record #{index} for model '{model}': {violation}")]
    InvalidRecord {
        dataset: RecordKind,
        /// Zero-based position in the input slice
        index: usize,
        model: ModelName,
        #[source]
        violation: RecordViolation,
    },
}

/// Result type alias for MetricsError
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Validate every record, failing on the first violation in input order.
pub(crate) fn check_records<T>(
    dataset: RecordKind,
    records: &[T],
    model: impl Fn(&T) -> &ModelName,
    check: impl Fn(&T) -> Result<(), RecordViolation>,
) -> MetricsResult<()> {
    for (index, record) in records.iter().enumerate() {
        if let Err(violation) = check(record) {
            log::debug!("Rejecting {} record #{}: {}", dataset, index, violation);
            return Err(MetricsError::InvalidRecord {
                dataset,
                index,
                model: model(record).clone(),
                violation,
            });
        }
    }
    Ok(())
}
