//! Start and end year inputs for the multi-year average.

use crate::state::AppState;
use chrono::{Datelike, Local};
use dioxus::prelude::*;
use sip_core::request::EARLIEST_YEAR;

#[component]
pub fn YearRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let start = (state.start_year)();
    let end = (state.end_year)();
    let latest = Local::now().year();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From year: "
                input {
                    r#type: "number",
                    min: "{EARLIEST_YEAR}",
                    max: "{latest}",
                    style: "width: 80px;",
                    value: "{start}",
                    onchange: move |evt: Event<FormData>| state.start_year.set(evt.value()),
                }
            }
            label {
                style: "font-weight: bold;",
                "To year: "
                input {
                    r#type: "number",
                    min: "{EARLIEST_YEAR}",
                    max: "{latest}",
                    style: "width: 80px;",
                    value: "{end}",
                    onchange: move |evt: Event<FormData>| state.end_year.set(evt.value()),
                }
            }
        }
    }
}
