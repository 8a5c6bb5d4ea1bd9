//! Solar Irradiance Portal
//!
//! A single page where the user picks a location, a data source and a time
//! range, then either plots the irradiance or downloads it.
//!
//! - Date range: one chronological line per irradiance component (GHI, DHI,
//!   DNI), or a single generic line for the model backend.
//! - Year range: the day-of-year average across the selected years with a
//!   shaded ±1 standard deviation band.
//!
//! Data flow:
//! 1. The form fields live in `AppState` signals.
//! 2. Visualize assembles a `VisualizeRequest` (collecting every validation
//!    problem), POSTs it to the source's endpoint, and decodes the samples.
//! 3. `sip_chart::pipeline::visualize` shapes and renders them into a
//!    descriptor, which the `ChartController` hands to Chart.js.
//! 4. Download POSTs the same request to the export endpoint and saves the
//!    returned file.
//! 5. Save chart downloads the drawn chart as a PNG.

use chrono::Local;
use dioxus::prelude::*;
use sip_chart::pipeline;
use sip_chart_ui::components::{
    ChartContainer, ChartHeader, DateRangePicker, ErrorDisplay, GtiControls, LoadingSpinner,
    LocationPicker, ModeSelector, SourceSelector, YearRangePicker,
};
use sip_chart_ui::fetch;
use sip_chart_ui::js_bridge;
use sip_chart_ui::state::{AppState, CHART_ID};
use sip_core::request::{TimeRange, VisualizeRequest};
use sip_core::source::{chart_image_file_name, ExportFormat};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("irradiance-root"))
        .launch(App);
}

/// "NASA POWER · Hourly · 0.3117°, 32.5974° · 2023-01-01 to 2023-01-31"
fn summarize(request: &VisualizeRequest) -> String {
    let range = match request.range {
        TimeRange::Dates { start, end } => format!("{} to {}", start, end),
        TimeRange::Years { start, end } => format!("average of {}-{}", start, end),
    };
    format!(
        "{} · {} · {:.4}°, {:.4}° · {}",
        request.data_source, request.granularity, request.latitude, request.longitude, range
    )
}

/// Validate the form, or put the collected problems in the error banner.
fn assemble(mut state: AppState) -> Option<VisualizeRequest> {
    match state.form().assemble(Local::now().date_naive()) {
        Ok(request) => Some(request),
        Err(errors) => {
            state
                .error_msg
                .set(Some(format!("Please fix the following:\n{}", errors)));
            None
        }
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut summary = use_signal(String::new);
    let mut export_format = use_signal(|| ExportFormat::Csv);

    // Load the Chart.js adapter once
    use_effect(move || {
        js_bridge::init_charts();
    });

    let on_visualize = move |_: Event<MouseData>| {
        if (state.loading)() {
            return;
        }
        state.error_msg.set(None);
        let Some(request) = assemble(state) else {
            return;
        };
        state.loading.set(true);
        spawn(async move {
            match fetch::fetch_samples(&request).await {
                Ok(samples) => match pipeline::visualize(&request, &samples) {
                    Ok(descriptor) => {
                        summary.set(summarize(&request));
                        state.chart.write().apply(descriptor);
                    }
                    Err(e) => {
                        log::error!("Visualization failed: {}", e);
                        state.chart.write().show_error(&e.user_message());
                    }
                },
                Err(e) => {
                    log::error!("Data request failed: {}", e);
                    state.chart.write().show_error(&e.user_message());
                }
            }
            state.loading.set(false);
        });
    };

    let on_download = move |_: Event<MouseData>| {
        if (state.downloading)() {
            return;
        }
        state.error_msg.set(None);
        let Some(request) = assemble(state) else {
            return;
        };
        let format = export_format();
        state.downloading.set(true);
        spawn(async move {
            let saved = match fetch::fetch_export(&request, format).await {
                Ok(blob) => {
                    let file_name = format.file_name(request.data_source, Local::now().date_naive());
                    fetch::save_blob(&blob, &file_name).map(|_| file_name)
                }
                Err(e) => Err(e),
            };
            match saved {
                Ok(file_name) => log::info!("Downloaded {}", file_name),
                Err(e) => {
                    log::error!("Download failed: {}", e);
                    state
                        .error_msg
                        .set(Some(format!("Download failed: {}", e.user_message())));
                }
            }
            state.downloading.set(false);
        });
    };

    let on_save_chart = move |_: Event<MouseData>| {
        let file_name = chart_image_file_name(Local::now().date_naive());
        if js_bridge::save_chart_image(CHART_ID, &file_name) {
            log::info!("Saved {}", file_name);
        } else {
            state
                .error_msg
                .set(Some("Please generate a chart first".to_string()));
        }
    };

    let on_reset = move |_: Event<MouseData>| {
        state.reset();
        summary.set(String::new());
    };

    let on_format_change = move |evt: Event<FormData>| match evt.value().parse::<ExportFormat>() {
        Ok(format) => export_format.set(format),
        Err(e) => log::warn!("{}", e),
    };

    let loading = (state.loading)();
    let downloading = (state.downloading)();
    let format_value = export_format().extension();
    let has_chart = state.chart.read().has_chart();

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Solar Irradiance Portal".to_string(),
                summary: summary(),
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay {
                    message: err,
                    on_dismiss: move |_| state.error_msg.set(None),
                }
            }

            LocationPicker {}
            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end;",
                SourceSelector {}
                ModeSelector {}
            }
            if state.is_year_mode() {
                YearRangePicker {}
            } else {
                DateRangePicker {}
            }
            GtiControls {}

            div {
                style: "margin: 12px 0; display: flex; gap: 8px; align-items: center;",
                button {
                    disabled: loading,
                    onclick: on_visualize,
                    if loading { LoadingSpinner {} } else { "Visualize" }
                }
                select {
                    value: format_value,
                    onchange: on_format_change,
                    option { value: "csv", "CSV" }
                    option { value: "json", "JSON" }
                }
                button {
                    disabled: downloading,
                    onclick: on_download,
                    if downloading { LoadingSpinner { label: "Downloading...".to_string() } } else { "Download" }
                }
                button {
                    disabled: !has_chart,
                    onclick: on_save_chart,
                    "Save chart"
                }
                button {
                    onclick: on_reset,
                    "Reset"
                }
            }

            ChartContainer {
                id: CHART_ID.to_string(),
                busy: loading,
                height: 450,
            }
        }
    }
}
