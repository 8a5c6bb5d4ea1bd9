//! Inline busy indicator for buttons.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Processing...".to_string())]
    pub label: String,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        span {
            style: "display: inline-flex; align-items: center; gap: 6px; color: #666;",
            span {
                style: "display: inline-block; width: 10px; height: 10px; border: 2px solid #4e73df; border-top-color: transparent; border-radius: 50%;",
            }
            "{props.label}"
        }
    }
}
