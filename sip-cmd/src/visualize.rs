//! `visualize`: fetch, shape and render a request.

use crate::RequestArgs;
use chrono::Local;
use log::{info, warn};
use sip_chart::chartjs::to_chart_config;
use sip_chart::descriptor::ChartPayload;
use sip_chart::pipeline::shape_payload;
use sip_chart::present::render;
use sip_core::client::BackendClient;
use sip_data::export::write_series_csv;
use sip_data::series::ChartSeries;
use std::fs::File;
use std::io::{self, Write};

/// The series a payload plots, in the layout the CSV writer expects.
pub fn payload_series(payload: &ChartPayload) -> Vec<ChartSeries> {
    match payload {
        ChartPayload::Series(series) => series.clone(),
        ChartPayload::Band(band) => band.to_series(),
    }
}

/// Fetch the request's data, build the chart, and write its Chart.js
/// configuration to `output` (stdout when `None`).
///
/// An empty result still writes a configuration: the "no data" state.
pub async fn run_visualize(
    base_url: &str,
    args: &RequestArgs,
    output: Option<&str>,
    series_csv: Option<&str>,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let request = args
        .to_form()
        .assemble(today)
        .map_err(|e| anyhow::anyhow!("Invalid request:\n{}", e))?;

    let client = BackendClient::new(base_url)?;
    let samples = client
        .fetch_samples(&request)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    let payload = shape_payload(&request, &samples).map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    if let Some(path) = series_csv {
        let series = payload_series(&payload);
        write_series_csv(&series, File::create(path)?)?;
        info!("Wrote {} series to {}", series.len(), path);
    }

    let descriptor = render(&payload, request.mode())?;
    if descriptor.is_empty() {
        warn!("No data returned for {} at ({}, {})", request.data_source, request.latitude, request.longitude);
    }

    let config = serde_json::to_string_pretty(&to_chart_config(&descriptor))?;
    match output {
        Some(path) => {
            std::fs::write(path, &config)?;
            info!("Chart configuration written to {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", config)?;
        }
    }
    Ok(())
}
