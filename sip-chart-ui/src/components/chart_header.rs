//! Page title and a summary of the current request.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// One-line summary, e.g. "NASA POWER · Daily · 0.3117°, 32.5974°"
    #[props(default = String::new())]
    pub summary: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.summary.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.summary}"
                }
            }
        }
    }
}
