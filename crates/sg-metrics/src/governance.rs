//! Documentation coverage and ownership analysis

use crate::outcome::Outcome;
use serde::Serialize;
use sg_core::{GovernanceRecord, OwnerName};

/// Documentation ratio below which governance is flagged
pub const DOCUMENTATION_TARGET: f64 = 0.80;

/// Governance figures for one schema.
///
/// The default value describes an empty schema: no models, a ratio of 0,
/// and nothing missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GovernanceMetrics {
    pub total_models: usize,
    pub documented_count: usize,

    /// documented_count / total_models, always within [0, 1]
    pub documentation_ratio: f64,

    /// Undocumented models in input order
    pub missing_docs: Vec<GovernanceRecord>,

    /// Owners in order of first appearance
    pub owners: Vec<OwnerSummary>,
}

impl GovernanceMetrics {
    pub fn undocumented_count(&self) -> usize {
        self.missing_docs.len()
    }

    pub fn meets_documentation_target(&self) -> bool {
        self.documentation_ratio >= DOCUMENTATION_TARGET
    }
}

/// Models attributed to a single owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub owner: OwnerName,
    pub model_count: usize,
    pub undocumented_count: usize,
}

/// Share of records with documentation; 0 for an empty slice.
pub fn documentation_ratio(records: &[GovernanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let documented = records.iter().filter(|r| r.has_documentation).count();
    documented as f64 / records.len() as f64
}

fn owner_roster(records: &[GovernanceRecord]) -> Vec<OwnerSummary> {
    let mut owners: Vec<OwnerSummary> = Vec::new();
    for record in records {
        let idx = match owners.iter().position(|o| o.owner == record.owner) {
            Some(idx) => idx,
            None => {
                owners.push(OwnerSummary {
                    owner: record.owner.clone(),
                    model_count: 0,
                    undocumented_count: 0,
                });
                owners.len() - 1
            }
        };
        owners[idx].model_count += 1;
        if !record.has_documentation {
            owners[idx].undocumented_count += 1;
        }
    }
    owners
}

/// Analyze documentation coverage.
pub fn analyze_governance(records: &[GovernanceRecord]) -> Outcome<GovernanceMetrics> {
    if records.is_empty() {
        return Outcome::no_records();
    }

    let missing_docs: Vec<GovernanceRecord> = records
        .iter()
        .filter(|r| !r.has_documentation)
        .cloned()
        .collect();

    Outcome::Ready(GovernanceMetrics {
        total_models: records.len(),
        documented_count: records.len() - missing_docs.len(),
        documentation_ratio: documentation_ratio(records),
        missing_docs,
        owners: owner_roster(records),
    })
}

#[cfg(test)]
#[path = "governance_test.rs"]
mod tests;
