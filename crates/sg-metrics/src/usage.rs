//! Query usage analysis
//!
//! Daily volume is reported as a continuous series: every calendar day (UTC)
//! from the first to the last day with activity appears, days without
//! queries carrying a zero count. Days outside that span are never added.
//!
//! The series length is the number of days in that span, not the number of
//! records. A single stray timestamp years away from the rest yields one
//! entry per day in between, so callers should reject implausible
//! timestamps before analysis if the output size matters.

use crate::outcome::Outcome;
use chrono::NaiveDate;
use serde::Serialize;
use sg_core::{ModelName, QueryType, UsageRecord};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Number of models kept in [`UsageMetrics::top_models`]
pub const TOP_MODELS_LIMIT: usize = 5;

/// Query usage figures for one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageMetrics {
    pub query_count: usize,
    pub unique_user_count: usize,
    pub distinct_model_count: usize,
    pub daily_volume: Vec<DailyVolume>,

    /// Every model with its query count, most queried first
    pub model_query_counts: Vec<TopModelRanking>,

    /// Most queried models, at most [`TOP_MODELS_LIMIT`]
    pub top_models: Vec<TopModelRanking>,

    /// One entry per query type, zero counts included
    pub query_types: Vec<QueryTypeCount>,
}

/// Queries issued on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyVolume {
    pub day: NaiveDate,
    pub query_count: usize,
}

/// A model and how often it was queried
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopModelRanking {
    pub model_name: ModelName,
    pub query_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryTypeCount {
    pub query_type: QueryType,
    pub query_count: usize,
}

/// Count queries per model, most queried first.
///
/// Ties keep the order in which models first appear in `records`.
pub fn rank_models(records: &[UsageRecord]) -> Vec<TopModelRanking> {
    let mut ranking: Vec<TopModelRanking> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match position.get(record.model_name.as_str()) {
            Some(&idx) => ranking[idx].query_count += 1,
            None => {
                position.insert(record.model_name.as_str(), ranking.len());
                ranking.push(TopModelRanking {
                    model_name: record.model_name.clone(),
                    query_count: 1,
                });
            }
        }
    }

    // stable sort: equal counts stay in first-seen order
    ranking.sort_by(|a, b| b.query_count.cmp(&a.query_count));
    ranking
}

/// Per-day query counts, zero-filled between the first and last active day.
///
/// Returns `(last - first).num_days() + 1` entries regardless of how many
/// records fall inside the span.
pub fn daily_volume(records: &[UsageRecord]) -> Vec<DailyVolume> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.timestamp.date_naive()).or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (per_day.keys().next(), per_day.keys().next_back()) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| DailyVolume {
            day,
            query_count: per_day.get(&day).copied().unwrap_or(0),
        })
        .collect()
}

/// Analyze query usage.
pub fn analyze_usage(records: &[UsageRecord]) -> Outcome<UsageMetrics> {
    if records.is_empty() {
        return Outcome::no_records();
    }

    let unique_users: HashSet<&str> = records.iter().map(|r| r.user.as_str()).collect();
    let model_query_counts = rank_models(records);
    let top_models = model_query_counts
        .iter()
        .take(TOP_MODELS_LIMIT)
        .cloned()
        .collect();

    let query_types = QueryType::ALL
        .iter()
        .map(|qt| QueryTypeCount {
            query_type: *qt,
            query_count: records.iter().filter(|r| r.query_type == *qt).count(),
        })
        .collect();

    Outcome::Ready(UsageMetrics {
        query_count: records.len(),
        unique_user_count: unique_users.len(),
        distinct_model_count: model_query_counts.len(),
        daily_volume: daily_volume(records),
        model_query_counts,
        top_models,
        query_types,
    })
}

#[cfg(test)]
#[path = "usage_test.rs"]
mod tests;
