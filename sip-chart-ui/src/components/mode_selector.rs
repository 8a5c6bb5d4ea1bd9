//! Date-range / year-range toggle.

use crate::state::AppState;
use dioxus::prelude::*;
use sip_core::granularity::PlotMode;

#[component]
pub fn ModeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.mode)();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            span { style: "font-weight: bold;", "Plot: " }
            for mode in [PlotMode::DateRange, PlotMode::YearRange] {
                label {
                    input {
                        r#type: "radio",
                        name: "plot-mode",
                        value: mode.wire_name(),
                        checked: mode.wire_name() == current,
                        onchange: move |_| state.mode.set(mode.wire_name().to_string()),
                    }
                    " {mode}"
                }
            }
        }
    }
}
