//! Derived-view computation over the cleaned table.

pub mod aggregator;

pub use aggregator::{
    attrition_by_evaluation_tier, attrition_counts, build_dashboard_data,
    departures_by_department, feature_splits, satisfaction_by_left, tenure_distribution,
};
