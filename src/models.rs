//! Data models for the dashboard pipeline.
//!
//! This module contains the typed employee record deserialized from the
//! cleaned CSV table, plus the derived structures the aggregator produces
//! for presentation.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One employee snapshot from the cleaned table.
///
/// Field names match the corrected column names, so rows deserialize
/// directly against the renamed header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Self-reported satisfaction, 0–1.
    pub satisfaction_level: f64,
    /// Most recent evaluation score, 0–1.
    pub last_evaluation: f64,
    /// Number of projects assigned.
    pub number_project: u32,
    /// Average hours worked per month.
    pub average_monthly_hours: u32,
    /// Years at the company.
    pub tenure: u32,
    /// Whether the employee had a workplace accident (CSV 0/1).
    #[serde(deserialize_with = "bool_from_int")]
    pub work_accident: bool,
    /// Whether the employee left the company (CSV 0/1).
    #[serde(deserialize_with = "bool_from_int")]
    pub left: bool,
    /// Whether the employee was promoted in the last 5 years (CSV 0/1).
    #[serde(deserialize_with = "bool_from_int")]
    pub promotion_last_5_years: bool,
    /// Department name.
    pub department: String,
    /// Salary tier (low/medium/high). Present in the source data but not
    /// used by any of the derived views.
    pub salary: String,
}

/// Deserialize a 0/1 CSV cell into a bool.
fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match u8::deserialize(deserializer)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(de::Error::invalid_value(
            Unexpected::Unsigned(other as u64),
            &"0 or 1",
        )),
    }
}

/// Evaluation-score tier used for the attrition-rate breakdown.
///
/// Tiers are half-open on the left: (0, 0.5], (0.5, 0.75], (0.75, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationTier {
    Low,
    Medium,
    High,
}

impl EvaluationTier {
    /// All tiers in ascending score order.
    pub const ALL: [EvaluationTier; 3] = [
        EvaluationTier::Low,
        EvaluationTier::Medium,
        EvaluationTier::High,
    ];

    /// Classify an evaluation score. Scores outside (0, 1] fall in no tier.
    pub fn from_score(score: f64) -> Option<Self> {
        if score > 0.0 && score <= 0.5 {
            Some(EvaluationTier::Low)
        } else if score > 0.5 && score <= 0.75 {
            Some(EvaluationTier::Medium)
        } else if score > 0.75 && score <= 1.0 {
            Some(EvaluationTier::High)
        } else {
            None
        }
    }
}

impl fmt::Display for EvaluationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationTier::Low => write!(f, "Low"),
            EvaluationTier::Medium => write!(f, "Medium"),
            EvaluationTier::High => write!(f, "High"),
        }
    }
}

/// Frequency count of the left flag over the whole table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttritionCounts {
    /// Employees still at the company.
    pub stayed: usize,
    /// Employees who left.
    pub left: usize,
}

impl AttritionCounts {
    /// Labeled counts in descending frequency order. On a tie, stayed
    /// comes first.
    pub fn ordered(&self) -> Vec<(&'static str, usize)> {
        let mut pairs = vec![("Stayed", self.stayed), ("Left", self.left)];
        pairs.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        pairs
    }

    /// Total number of rows counted.
    pub fn total(&self) -> usize {
        self.stayed + self.left
    }
}

/// One numeric feature's values partitioned by the left flag, feeding a
/// pair of overlay histogram traces.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSplit {
    /// Column name of the feature.
    pub feature: &'static str,
    /// Panel title for the feature's histogram.
    pub label: &'static str,
    /// Values from rows where the employee stayed.
    pub stayed: Vec<f64>,
    /// Values from rows where the employee left.
    pub left: Vec<f64>,
}

/// Satisfaction-level values partitioned by the left flag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SatisfactionSplit {
    pub stayed: Vec<f64>,
    pub left: Vec<f64>,
}

/// Attrition rate for one evaluation tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierAttrition {
    /// The evaluation tier.
    pub tier: EvaluationTier,
    /// Number of rows in the tier.
    pub headcount: usize,
    /// Attrition rate as a percentage. The fractional rate is rounded to
    /// 4 decimals before scaling by 100. None for an empty tier.
    pub rate_pct: Option<f64>,
}

/// Left-employee count for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentDepartures {
    pub department: String,
    pub departures: usize,
}

/// All six derived views, computed once from the cleaned table.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    /// Raw tenure sequence for the distribution box plot.
    pub tenure_distribution: Vec<u32>,
    /// Stayed/left frequency counts.
    pub attrition_counts: AttritionCounts,
    /// Per-feature stayed/left value splits for the histogram grid.
    pub feature_splits: Vec<FeatureSplit>,
    /// Attrition rate per evaluation tier, Low/Medium/High.
    pub attrition_by_tier: Vec<TierAttrition>,
    /// Satisfaction values split by left flag.
    pub satisfaction_split: SatisfactionSplit,
    /// Per-department departure counts, descending.
    pub departures_by_department: Vec<DepartmentDepartures>,
}

/// Metadata about one dashboard run.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    /// Where the dataset came from (URL, cache path, or local file).
    pub source: String,
    /// When the dashboard was generated.
    pub generated_at: DateTime<Utc>,
    /// Rows in the raw table before deduplication.
    pub rows_loaded: usize,
    /// Exact-duplicate rows removed.
    pub duplicates_removed: usize,
    /// Rows in the cleaned table.
    pub rows_analyzed: usize,
    /// Wall-clock duration of the run in seconds.
    pub duration_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(EvaluationTier::from_score(0.0), None);
        assert_eq!(EvaluationTier::from_score(0.3), Some(EvaluationTier::Low));
        assert_eq!(EvaluationTier::from_score(0.5), Some(EvaluationTier::Low));
        assert_eq!(
            EvaluationTier::from_score(0.51),
            Some(EvaluationTier::Medium)
        );
        assert_eq!(
            EvaluationTier::from_score(0.75),
            Some(EvaluationTier::Medium)
        );
        assert_eq!(EvaluationTier::from_score(0.76), Some(EvaluationTier::High));
        assert_eq!(EvaluationTier::from_score(1.0), Some(EvaluationTier::High));
        assert_eq!(EvaluationTier::from_score(1.01), None);
        assert_eq!(EvaluationTier::from_score(-0.1), None);
    }

    #[test]
    fn test_attrition_counts_ordered() {
        let counts = AttritionCounts { stayed: 3, left: 5 };
        assert_eq!(counts.ordered(), vec![("Left", 5), ("Stayed", 3)]);

        // Stayed first on a tie.
        let tied = AttritionCounts { stayed: 3, left: 3 };
        assert_eq!(tied.ordered(), vec![("Stayed", 3), ("Left", 3)]);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(EvaluationTier::Low.to_string(), "Low");
        assert_eq!(EvaluationTier::Medium.to_string(), "Medium");
        assert_eq!(EvaluationTier::High.to_string(), "High");
    }
}
