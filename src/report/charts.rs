//! Plotly chart specifications for the six derived views.
//!
//! Each function shapes one already-aggregated view into a `Plot`. No
//! computation happens here beyond pulling values into trace inputs.

use crate::models::{
    AttritionCounts, DepartmentDepartures, FeatureSplit, SatisfactionSplit, TierAttrition,
};
use plotly::common::Title;
use plotly::layout::{Axis, BarMode, GridPattern, Layout, LayoutGrid};
use plotly::{Bar, BoxPlot, Histogram, Pie, Plot};

/// Chart canvas and styling settings, sourced from the report config.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    /// Canvas width in logical units for the histogram grid.
    pub width: usize,
    /// Canvas height in logical units for the histogram grid.
    pub height: usize,
    /// Opacity of the overlaid histogram bars.
    pub opacity: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            opacity: 0.75,
        }
    }
}

/// Box plot of the raw tenure sequence.
pub fn tenure_box(values: &[u32]) -> Plot {
    let mut plot = Plot::new();
    plot.add_trace(BoxPlot::new(values.to_vec()).name("tenure"));
    plot.set_layout(Layout::new().title(Title::with_text("Distribution of Tenure")));
    plot
}

/// Pie chart of left-vs-stayed counts, slices in descending frequency
/// order.
pub fn attrition_pie(counts: &AttritionCounts) -> Plot {
    let ordered = counts.ordered();
    let values: Vec<usize> = ordered.iter().map(|(_, count)| *count).collect();
    let labels: Vec<String> = ordered.iter().map(|(label, _)| label.to_string()).collect();

    let mut plot = Plot::new();
    plot.add_trace(Pie::new(values).labels(labels));
    plot.set_layout(
        Layout::new().title(Title::with_text("Number of Employees that Left vs Stayed")),
    );
    plot
}

/// 2x3 grid of overlay histograms, one panel per feature, with
/// semi-transparent Stayed/Left bars sharing each panel's axes.
pub fn feature_histograms(splits: &[FeatureSplit], style: ChartStyle) -> Plot {
    let mut plot = Plot::new();

    let mut layout = Layout::new()
        .grid(
            LayoutGrid::new()
                .rows(2)
                .columns(3)
                .pattern(GridPattern::Independent),
        )
        .bar_mode(BarMode::Overlay)
        .width(style.width)
        .height(style.height)
        .show_legend(true)
        .title(Title::with_text("Histograms of Various Features"));

    for (i, split) in splits.iter().enumerate() {
        // Grid axes are assigned row-major: x, x2, ... x6.
        let x_axis = if i == 0 {
            "x".to_string()
        } else {
            format!("x{}", i + 1)
        };
        let y_axis = if i == 0 {
            "y".to_string()
        } else {
            format!("y{}", i + 1)
        };

        plot.add_trace(
            Histogram::new(split.stayed.clone())
                .name("Stayed")
                .opacity(style.opacity)
                .x_axis(x_axis.as_str())
                .y_axis(y_axis.as_str()),
        );
        plot.add_trace(
            Histogram::new(split.left.clone())
                .name("Left")
                .opacity(style.opacity)
                .x_axis(x_axis.as_str())
                .y_axis(y_axis.as_str()),
        );

        let axis = Axis::new().title(Title::with_text(split.label));
        layout = match i {
            0 => layout.x_axis(axis),
            1 => layout.x_axis2(axis),
            2 => layout.x_axis3(axis),
            3 => layout.x_axis4(axis),
            4 => layout.x_axis5(axis),
            _ => layout.x_axis6(axis),
        };
    }

    plot.set_layout(layout);
    plot
}

/// Bar chart of attrition rate per evaluation tier. An empty tier is
/// drawn as a zero-height bar.
pub fn attrition_tier_bar(tiers: &[TierAttrition]) -> Plot {
    let labels: Vec<String> = tiers.iter().map(|t| t.tier.to_string()).collect();
    let rates: Vec<f64> = tiers.iter().map(|t| t.rate_pct.unwrap_or(0.0)).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(labels, rates));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Attrition Rate by Last Evaluation Score"))
            .x_axis(Axis::new().title(Title::with_text("Last Evaluation Score")))
            .y_axis(Axis::new().title(Title::with_text("Attrition Rate (%)"))),
    );
    plot
}

/// Box plots of satisfaction level, one per left-flag category.
pub fn satisfaction_box(split: &SatisfactionSplit) -> Plot {
    let mut plot = Plot::new();
    plot.add_trace(BoxPlot::new(split.stayed.clone()).name("Stayed"));
    plot.add_trace(BoxPlot::new(split.left.clone()).name("Left"));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Satisfaction Level by Left"))
            .y_axis(Axis::new().title(Title::with_text("Satisfaction Level"))),
    );
    plot
}

/// Bar chart of per-department departure counts, descending.
pub fn department_bar(departures: &[DepartmentDepartures]) -> Plot {
    let departments: Vec<String> = departures.iter().map(|d| d.department.clone()).collect();
    let counts: Vec<usize> = departures.iter().map(|d| d.departures).collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(departments, counts));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Number of Employees that Left by Department"))
            .x_axis(Axis::new().title(Title::with_text("Department")))
            .y_axis(Axis::new().title(Title::with_text("Employees Left"))),
    );
    plot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvaluationTier;

    #[test]
    fn test_tenure_box_renders() {
        let plot = tenure_box(&[2, 3, 3, 5, 6]);
        let html = plot.to_inline_html(Some("tenure"));
        assert!(html.contains("tenure"));
    }

    #[test]
    fn test_attrition_pie_orders_slices() {
        let plot = attrition_pie(&AttritionCounts { stayed: 10, left: 4 });
        let html = plot.to_inline_html(Some("pie"));
        assert!(html.contains("Stayed"));
        assert!(html.contains("Left"));
    }

    #[test]
    fn test_histogram_grid_has_five_panels() {
        let splits: Vec<FeatureSplit> = vec![
            ("satisfaction_level", "Histogram of Satisfaction Level"),
            ("last_evaluation", "Histogram of Last Evaluation"),
            ("number_project", "Histogram of Number of Projects"),
            ("average_monthly_hours", "Histogram of Average Monthly Hours"),
            ("tenure", "Histogram of Tenure"),
        ]
        .into_iter()
        .map(|(feature, label)| FeatureSplit {
            feature,
            label,
            stayed: vec![1.0, 2.0],
            left: vec![3.0],
        })
        .collect();

        let plot = feature_histograms(&splits, ChartStyle::default());
        let html = plot.to_inline_html(Some("grid"));
        assert!(html.contains("Stayed"));
        assert!(html.contains("Left"));
        assert!(html.contains("Histogram of Tenure"));
    }

    #[test]
    fn test_tier_bar_handles_empty_tier() {
        let tiers = vec![
            TierAttrition {
                tier: EvaluationTier::Low,
                headcount: 2,
                rate_pct: Some(50.0),
            },
            TierAttrition {
                tier: EvaluationTier::Medium,
                headcount: 0,
                rate_pct: None,
            },
            TierAttrition {
                tier: EvaluationTier::High,
                headcount: 0,
                rate_pct: None,
            },
        ];
        let plot = attrition_tier_bar(&tiers);
        let html = plot.to_inline_html(Some("tiers"));
        assert!(html.contains("Attrition Rate"));
    }

    #[test]
    fn test_department_bar_on_empty_input() {
        let plot = department_bar(&[]);
        let html = plot.to_inline_html(Some("departments"));
        assert!(html.contains("Department"));
    }
}
