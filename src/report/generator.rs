//! Dashboard page generation.
//!
//! This module assembles the derived views into a single-page HTML
//! dashboard (headings and charts in a fixed order), or serializes them
//! as a JSON export.

use crate::models::{DashboardData, RunMetadata};
use crate::report::charts::{self, ChartStyle};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Everything needed to render one dashboard: run metadata plus the six
/// derived views.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub metadata: RunMetadata,
    pub data: DashboardData,
}

/// Plotly.js bundle loaded once in the page head.
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Generate the complete HTML dashboard page.
///
/// Panels are emitted in a fixed order, each preceded by its heading:
/// tenure box plot, left-vs-stayed pie, histogram grid, attrition by
/// evaluation tier, satisfaction by left, departures by department.
pub fn generate_html_dashboard(dashboard: &Dashboard, style: ChartStyle) -> String {
    let data = &dashboard.data;

    let panels = [
        (
            "Distribution of Tenure",
            charts::tenure_box(&data.tenure_distribution).to_inline_html(Some("tenure-box")),
        ),
        (
            "Number of Employees that Left vs Stayed",
            charts::attrition_pie(&data.attrition_counts).to_inline_html(Some("attrition-pie")),
        ),
        (
            "Histograms of Various Features",
            charts::feature_histograms(&data.feature_splits, style)
                .to_inline_html(Some("feature-histograms")),
        ),
        (
            "Attrition Rate by Last Evaluation Score",
            charts::attrition_tier_bar(&data.attrition_by_tier)
                .to_inline_html(Some("attrition-tiers")),
        ),
        (
            "Satisfaction Level by Left",
            charts::satisfaction_box(&data.satisfaction_split)
                .to_inline_html(Some("satisfaction-box")),
        ),
        (
            "Number of Employees that Left by Department",
            charts::department_bar(&data.departures_by_department)
                .to_inline_html(Some("department-bar")),
        ),
    ];

    let mut page = String::new();

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<title>Human Resource Analysis</title>\n");
    page.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_CDN));
    page.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2rem auto; max-width: 1260px; }\n\
         h2 { margin-top: 2.5rem; }\n\
         footer { margin-top: 3rem; color: #666; font-size: 0.85rem; }\n\
         </style>\n",
    );
    page.push_str("</head>\n<body>\n");
    page.push_str("<h1>Human Resource Analysis</h1>\n");

    for (heading, chart_div) in &panels {
        page.push_str(&format!("<h2>{}</h2>\n", heading));
        page.push_str(chart_div);
        page.push('\n');
    }

    page.push_str(&generate_footer(&dashboard.metadata));
    page.push_str("</body>\n</html>\n");

    page
}

/// Generate the metadata footer.
fn generate_footer(metadata: &RunMetadata) -> String {
    format!(
        "<footer>Generated {} from {} | {} rows loaded, {} duplicates removed, \
         {} rows analyzed | {:.1}s</footer>\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        metadata.source,
        metadata.rows_loaded,
        metadata.duplicates_removed,
        metadata.rows_analyzed,
        metadata.duration_seconds,
    )
}

/// Serialize the derived views and metadata as pretty JSON.
pub fn generate_json_export(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).context("Failed to serialize dashboard data")
}

/// Write dashboard output to a file.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_dashboard_data;
    use crate::models::EmployeeRecord;
    use chrono::Utc;

    fn sample_dashboard() -> Dashboard {
        let records = vec![
            EmployeeRecord {
                satisfaction_level: 0.4,
                last_evaluation: 0.45,
                number_project: 2,
                average_monthly_hours: 150,
                tenure: 3,
                work_accident: false,
                left: true,
                promotion_last_5_years: false,
                department: "sales".to_string(),
                salary: "low".to_string(),
            },
            EmployeeRecord {
                satisfaction_level: 0.9,
                last_evaluation: 0.85,
                number_project: 5,
                average_monthly_hours: 230,
                tenure: 5,
                work_accident: false,
                left: false,
                promotion_last_5_years: true,
                department: "technical".to_string(),
                salary: "medium".to_string(),
            },
        ];

        Dashboard {
            metadata: RunMetadata {
                source: "fixtures/hr_sample.csv".to_string(),
                generated_at: Utc::now(),
                rows_loaded: 3,
                duplicates_removed: 1,
                rows_analyzed: 2,
                duration_seconds: 0.1,
            },
            data: build_dashboard_data(&records),
        }
    }

    #[test]
    fn test_html_has_headings_in_order() {
        let html = generate_html_dashboard(&sample_dashboard(), ChartStyle::default());

        let headings = [
            "Distribution of Tenure",
            "Number of Employees that Left vs Stayed",
            "Histograms of Various Features",
            "Attrition Rate by Last Evaluation Score",
            "Satisfaction Level by Left",
            "Number of Employees that Left by Department",
        ];

        let mut last = 0;
        for heading in headings {
            let needle = format!("<h2>{}</h2>", heading);
            let pos = html[last..]
                .find(&needle)
                .unwrap_or_else(|| panic!("heading '{}' missing or out of order", heading));
            last += pos;
        }
    }

    #[test]
    fn test_html_loads_plotly_once() {
        let html = generate_html_dashboard(&sample_dashboard(), ChartStyle::default());
        assert_eq!(html.matches(PLOTLY_CDN).count(), 1);
    }

    #[test]
    fn test_html_footer_metadata() {
        let html = generate_html_dashboard(&sample_dashboard(), ChartStyle::default());
        assert!(html.contains("1 duplicates removed"));
        assert!(html.contains("2 rows analyzed"));
    }

    #[test]
    fn test_json_export_round_trips() {
        let json = generate_json_export(&sample_dashboard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["rows_analyzed"], 2);
        assert_eq!(value["data"]["attrition_counts"]["left"], 1);
        assert_eq!(value["data"]["attrition_by_tier"].as_array().unwrap().len(), 3);
        assert_eq!(
            value["data"]["departures_by_department"][0]["department"],
            "sales"
        );
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        write_output(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_empty_table_still_renders() {
        let dashboard = Dashboard {
            metadata: RunMetadata {
                source: "empty".to_string(),
                generated_at: Utc::now(),
                rows_loaded: 0,
                duplicates_removed: 0,
                rows_analyzed: 0,
                duration_seconds: 0.0,
            },
            data: build_dashboard_data(&[]),
        };
        let html = generate_html_dashboard(&dashboard, ChartStyle::default());
        assert!(html.contains("Distribution of Tenure"));
    }
}
