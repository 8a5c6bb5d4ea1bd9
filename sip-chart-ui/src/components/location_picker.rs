//! Latitude/longitude inputs with a place search box.

use crate::fetch;
use crate::state::AppState;
use dioxus::prelude::*;

/// Coordinates entry plus a Nominatim search that fills them in.
#[component]
pub fn LocationPicker() -> Element {
    let mut state = use_context::<AppState>();
    let mut searching = use_signal(|| false);
    let latitude = (state.latitude)();
    let longitude = (state.longitude)();
    let query = (state.search_query)();

    let on_search = move |_: Event<MouseData>| {
        let query = (state.search_query)();
        if query.trim().is_empty() {
            return;
        }
        searching.set(true);
        spawn(async move {
            match fetch::geocode(&query).await {
                Ok(Some(location)) => {
                    state.latitude.set(format!("{:.4}", location.latitude));
                    state.longitude.set(format!("{:.4}", location.longitude));
                    state.error_msg.set(None);
                }
                Ok(None) => {
                    state.error_msg.set(Some(format!("No place found for '{}'.", query)));
                }
                Err(e) => {
                    log::warn!("Geocoding failed: {}", e);
                    state.error_msg.set(Some(e.user_message()));
                }
            }
            searching.set(false);
        });
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Search: "
                input {
                    r#type: "text",
                    placeholder: "City, region or address",
                    value: "{query}",
                    oninput: move |evt: Event<FormData>| state.search_query.set(evt.value()),
                }
            }
            button {
                disabled: searching(),
                onclick: on_search,
                if searching() { "Searching..." } else { "Search" }
            }
            label {
                style: "font-weight: bold;",
                "Latitude: "
                input {
                    r#type: "number",
                    step: "0.0001",
                    min: "-90",
                    max: "90",
                    style: "width: 110px;",
                    value: "{latitude}",
                    onchange: move |evt: Event<FormData>| state.latitude.set(evt.value()),
                }
            }
            label {
                style: "font-weight: bold;",
                "Longitude: "
                input {
                    r#type: "number",
                    step: "0.0001",
                    min: "-180",
                    max: "180",
                    style: "width: 110px;",
                    value: "{longitude}",
                    onchange: move |evt: Event<FormData>| state.longitude.set(evt.value()),
                }
            }
        }
    }
}
