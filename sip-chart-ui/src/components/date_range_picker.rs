//! Start and end date inputs for a date-range plot.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let start = (state.start_date)();
    let end = (state.end_date)();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Start date: "
                input {
                    r#type: "date",
                    value: "{start}",
                    max: "{end}",
                    onchange: move |evt: Event<FormData>| state.start_date.set(evt.value()),
                }
            }
            label {
                style: "font-weight: bold;",
                "End date: "
                input {
                    r#type: "date",
                    value: "{end}",
                    min: "{start}",
                    onchange: move |evt: Event<FormData>| state.end_date.set(evt.value()),
                }
            }
        }
    }
}
