//! Data source and time granularity dropdowns.

use crate::state::AppState;
use dioxus::prelude::*;
use sip_core::granularity::Granularity;
use sip_core::source::DataSource;

/// Dropdowns for the backend and the temporal resolution.
#[component]
pub fn SourceSelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected_source = (state.data_source)();
    let selected_granularity = (state.granularity)();
    let sources: Vec<(&'static str, String)> = DataSource::ALL
        .iter()
        .map(|s| (s.wire_name(), s.to_string()))
        .collect();
    let granularities: Vec<&'static str> = Granularity::ALL.iter().map(|g| g.wire_name()).collect();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Data source: "
                select {
                    onchange: move |evt: Event<FormData>| state.data_source.set(evt.value()),
                    for (value, name) in sources {
                        option {
                            value: value,
                            selected: value == selected_source,
                            "{name}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "Granularity: "
                select {
                    onchange: move |evt: Event<FormData>| state.granularity.set(evt.value()),
                    for value in granularities {
                        option {
                            value: value,
                            selected: value == selected_granularity,
                            "{value}"
                        }
                    }
                }
            }
        }
    }
}
