//! Command implementations for the solar irradiance portal CLI.
//!
//! Each subcommand assembles the same request the web form would, talks to
//! the backend through [`sip_core::client::BackendClient`], and writes its
//! result to a file or stdout.

use clap::{Args, Subcommand};
use sip_core::request::FormInput;
use sip_core::source::ExportFormat;

pub mod export;
pub mod geocode;
pub mod visualize;

/// Location, source and time range of a request, as command-line flags.
///
/// Values are passed through as text and validated by
/// [`FormInput::assemble`], so the CLI reports the same problems the web
/// form does.
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,

    /// Data source: model, CAMS_RAD or NASA
    #[arg(short = 's', long, default_value = "model")]
    pub source: String,

    /// Time granularity: Hourly, Daily or Monthly
    #[arg(short = 'g', long, default_value = "Daily")]
    pub granularity: String,

    /// Plot mode: "date" for a date range, "year" for a multi-year average
    #[arg(short = 'm', long, default_value = "date")]
    pub mode: String,

    /// First day of a date range (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of a date range (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// First year of a year range
    #[arg(long)]
    pub start_year: Option<String>,

    /// Last year of a year range
    #[arg(long)]
    pub end_year: Option<String>,

    /// Request global tilted irradiance
    #[arg(long)]
    pub gti: bool,

    /// Panel tilt angle in degrees, required with --gti
    #[arg(long, allow_hyphen_values = true)]
    pub tilt_angle: Option<String>,
}

impl RequestArgs {
    pub fn to_form(&self) -> FormInput {
        FormInput {
            latitude: self.lat.clone(),
            longitude: self.lon.clone(),
            data_source: self.source.clone(),
            granularity: self.granularity.clone(),
            mode: self.mode.clone(),
            start_date: self.start_date.clone().unwrap_or_default(),
            end_date: self.end_date.clone().unwrap_or_default(),
            start_year: self.start_year.clone().unwrap_or_default(),
            end_year: self.end_year.clone().unwrap_or_default(),
            gti: self.gti,
            tilt_angle: self.tilt_angle.clone().unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch data and write the Chart.js configuration for it
    Visualize {
        #[command(flatten)]
        request: RequestArgs,

        /// Output path for the chart configuration JSON (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Also write the plotted series as CSV to this path
        #[arg(long)]
        series_csv: Option<String>,
    },

    /// Download the backend's export file for a request
    Export {
        #[command(flatten)]
        request: RequestArgs,

        /// Export format: csv or json
        #[arg(short = 'f', long, default_value = "csv")]
        format: String,

        /// Output path (defaults to solar_data_<source>_<YYYYMMDD>.<ext>)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Look up the coordinates of a place name
    Geocode {
        /// Free-text place name, e.g. "Kampala"
        query: String,
    },
}

pub async fn run(command: Command, base_url: &str) -> anyhow::Result<()> {
    match command {
        Command::Visualize {
            request,
            output,
            series_csv,
        } => {
            visualize::run_visualize(base_url, &request, output.as_deref(), series_csv.as_deref()).await
        }
        Command::Export {
            request,
            format,
            output,
        } => {
            let format = format
                .parse::<ExportFormat>()
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            export::run_export(base_url, &request, format, output.as_deref()).await
        }
        Command::Geocode { query } => geocode::run_geocode(&query).await,
    }
}
