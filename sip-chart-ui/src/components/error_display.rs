//! Error banner.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    /// May span several lines (one per validation problem).
    pub message: String,
    pub on_dismiss: EventHandler<()>,
}

/// Dismissable error box. Multi-line messages keep their line breaks.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; white-space: pre-line; display: flex; justify-content: space-between; gap: 12px;",
            div {
                strong { "Error: " }
                "{props.message}"
            }
            button {
                style: "background: none; border: none; color: #C62828; cursor: pointer; font-size: 16px;",
                onclick: move |_| props.on_dismiss.call(()),
                "×"
            }
        }
    }
}
