//! Global tilted irradiance toggle and tilt angle input.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn GtiControls() -> Element {
    let mut state = use_context::<AppState>();
    let gti = (state.gti)();
    let tilt = (state.tilt_angle)();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                input {
                    r#type: "checkbox",
                    checked: gti,
                    onchange: move |evt: Event<FormData>| state.gti.set(evt.checked()),
                }
                " GTI (tilted surface)"
            }
            if gti {
                label {
                    style: "font-weight: bold;",
                    "Tilt angle (°): "
                    input {
                        r#type: "number",
                        min: "-90",
                        max: "90",
                        style: "width: 70px;",
                        value: "{tilt}",
                        onchange: move |evt: Event<FormData>| state.tilt_angle.set(evt.value()),
                    }
                }
            }
        }
    }
}
