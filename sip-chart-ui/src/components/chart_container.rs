//! Chart container with a busy overlay.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id the Chart.js canvas is mounted into
    pub id: String,
    /// Dim the chart and show a message while a request is in flight
    #[props(default = false)]
    pub busy: bool,
    /// Chart height in pixels
    #[props(default = 420)]
    pub height: u32,
}

/// Fixed-height box for the irradiance chart. Chart.js runs with
/// `maintainAspectRatio: false`, so the container sets the height.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%; opacity: {};",
        props.height,
        if props.busy { "0.5" } else { "1" }
    );

    rsx! {
        div {
            style: "position: relative;",
            if props.busy {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666; z-index: 1;",
                    "Processing..."
                }
            }
            div {
                id: "{props.id}",
                style: "{style}",
            }
        }
    }
}
