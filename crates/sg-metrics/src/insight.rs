//! Recommendation records produced by summary synthesis.

use serde::Serialize;
use std::fmt;

/// Metric domain an insight speaks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Cost,
    Usage,
    Governance,
    Performance,
    Quality,
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightCategory::Cost => write!(f, "cost"),
            InsightCategory::Usage => write!(f, "usage"),
            InsightCategory::Governance => write!(f, "governance"),
            InsightCategory::Performance => write!(f, "performance"),
            InsightCategory::Quality => write!(f, "quality"),
        }
    }
}

/// How much attention an insight calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Success => write!(f, "success"),
        }
    }
}

/// A single observation or recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryInsight {
    pub category: InsightCategory,
    pub severity: Severity,
    pub text: String,
}

impl SummaryInsight {
    pub fn new(category: InsightCategory, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            text: text.into(),
        }
    }

    pub fn info(category: InsightCategory, text: impl Into<String>) -> Self {
        Self::new(category, Severity::Info, text)
    }

    pub fn warning(category: InsightCategory, text: impl Into<String>) -> Self {
        Self::new(category, Severity::Warning, text)
    }

    pub fn success(category: InsightCategory, text: impl Into<String>) -> Self {
        Self::new(category, Severity::Success, text)
    }
}
