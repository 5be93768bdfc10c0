//! Pure read-only queries over the cleaned employee table.
//!
//! Every function here is a projection: the table is never mutated, and
//! each derived structure is computed independently. All of them behave
//! sensibly on an empty table (empty sequences, zero counts, tiers with
//! no rate) instead of panicking.

use crate::models::{
    AttritionCounts, DashboardData, DepartmentDepartures, EmployeeRecord, EvaluationTier,
    FeatureSplit, SatisfactionSplit, TierAttrition,
};
use std::collections::HashMap;

/// The raw tenure sequence, in table order.
pub fn tenure_distribution(records: &[EmployeeRecord]) -> Vec<u32> {
    records.iter().map(|r| r.tenure).collect()
}

/// Frequency count of the left flag.
pub fn attrition_counts(records: &[EmployeeRecord]) -> AttritionCounts {
    let left = records.iter().filter(|r| r.left).count();
    AttritionCounts {
        stayed: records.len() - left,
        left,
    }
}

/// Stayed/left value splits for the five histogram features.
pub fn feature_splits(records: &[EmployeeRecord]) -> Vec<FeatureSplit> {
    const FEATURES: [(&str, &str, fn(&EmployeeRecord) -> f64); 5] = [
        ("satisfaction_level", "Histogram of Satisfaction Level", |r| {
            r.satisfaction_level
        }),
        ("last_evaluation", "Histogram of Last Evaluation", |r| {
            r.last_evaluation
        }),
        ("number_project", "Histogram of Number of Projects", |r| {
            r.number_project as f64
        }),
        (
            "average_monthly_hours",
            "Histogram of Average Monthly Hours",
            |r| r.average_monthly_hours as f64,
        ),
        ("tenure", "Histogram of Tenure", |r| r.tenure as f64),
    ];

    let (left, stayed): (Vec<&EmployeeRecord>, Vec<&EmployeeRecord>) =
        records.iter().partition(|r| r.left);

    FEATURES
        .iter()
        .map(|&(feature, label, extract)| FeatureSplit {
            feature,
            label,
            stayed: stayed.iter().map(|&r| extract(r)).collect(),
            left: left.iter().map(|&r| extract(r)).collect(),
        })
        .collect()
}

/// Round to 4 decimal places.
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Mean attrition rate per evaluation tier, as a percentage.
///
/// The fractional rate is rounded to 4 decimals and then scaled by 100,
/// in that order; the two do not commute. All three tiers are always
/// present; an empty tier carries no rate. Scores outside (0, 1] are
/// excluded from every tier.
pub fn attrition_by_evaluation_tier(records: &[EmployeeRecord]) -> Vec<TierAttrition> {
    let mut headcount: HashMap<EvaluationTier, usize> = HashMap::new();
    let mut departures: HashMap<EvaluationTier, usize> = HashMap::new();

    for record in records {
        if let Some(tier) = EvaluationTier::from_score(record.last_evaluation) {
            *headcount.entry(tier).or_default() += 1;
            if record.left {
                *departures.entry(tier).or_default() += 1;
            }
        }
    }

    EvaluationTier::ALL
        .iter()
        .map(|&tier| {
            let count = headcount.get(&tier).copied().unwrap_or(0);
            let rate_pct = if count > 0 {
                let left = departures.get(&tier).copied().unwrap_or(0);
                Some(round4(left as f64 / count as f64) * 100.0)
            } else {
                None
            };
            TierAttrition {
                tier,
                headcount: count,
                rate_pct,
            }
        })
        .collect()
}

/// Satisfaction-level values split by the left flag.
pub fn satisfaction_by_left(records: &[EmployeeRecord]) -> SatisfactionSplit {
    let mut split = SatisfactionSplit::default();
    for record in records {
        if record.left {
            split.left.push(record.satisfaction_level);
        } else {
            split.stayed.push(record.satisfaction_level);
        }
    }
    split
}

/// Per-department counts of employees who left, sorted descending.
/// Ties keep first-seen department order (the sort is stable).
pub fn departures_by_department(records: &[EmployeeRecord]) -> Vec<DepartmentDepartures> {
    let mut counts: Vec<DepartmentDepartures> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.left) {
        match index.get(&record.department) {
            Some(&i) => counts[i].departures += 1,
            None => {
                index.insert(record.department.clone(), counts.len());
                counts.push(DepartmentDepartures {
                    department: record.department.clone(),
                    departures: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.departures.cmp(&a.departures));
    counts
}

/// Compute all six derived views in one pass over the table.
pub fn build_dashboard_data(records: &[EmployeeRecord]) -> DashboardData {
    DashboardData {
        tenure_distribution: tenure_distribution(records),
        attrition_counts: attrition_counts(records),
        feature_splits: feature_splits(records),
        attrition_by_tier: attrition_by_evaluation_tier(records),
        satisfaction_split: satisfaction_by_left(records),
        departures_by_department: departures_by_department(records),
    }
}
