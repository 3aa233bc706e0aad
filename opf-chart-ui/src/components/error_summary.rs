//! Mean squared error summary shown after a fit.

use dioxus::prelude::*;
use opf_dashboard::fit::format_mse;
use opf_dashboard::FitReport;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorSummaryProps {
    pub report: FitReport,
}

/// Three-column MSE summary (oil, water, BSW), two decimals each.
#[component]
pub fn ErrorSummary(props: ErrorSummaryProps) -> Element {
    let colors = ["#FF6384", "#4BC0C0", "#9966FF"];
    let rows: Vec<(&str, String, &str)> = props
        .report
        .entries()
        .into_iter()
        .zip(colors)
        .map(|((name, value), color)| (name, format_mse(value), color))
        .collect();

    rsx! {
        div {
            style: "margin: 12px 0;",
            h3 { style: "color: #1B4965; margin: 0 0 8px 0;", "Error Metrics" }
            div {
                style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 1em;",
                for (name, mse, color) in rows {
                    div {
                        style: "color: {color};",
                        strong { "{name}" }
                        br {}
                        "MSE: {mse}"
                    }
                }
            }
        }
    }
}
