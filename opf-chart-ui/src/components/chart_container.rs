//! Canvas container for one Chart.js widget.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id of the canvas (Chart.js binds to it)
    pub id: String,
    /// Optional minimum height in pixels
    #[props(default = 320)]
    pub min_height: u32,
}

/// A fixed-height box holding a canvas for Chart.js.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%; margin-bottom: 16px;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            canvas { id: "{props.id}" }
        }
    }
}
