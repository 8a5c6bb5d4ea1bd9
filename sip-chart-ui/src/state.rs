//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::view::JsChartView;
use dioxus::prelude::*;
use sip_chart::controller::ChartController;
use sip_core::granularity::{Granularity, PlotMode};
use sip_core::request::FormInput;
use sip_core::source::DataSource;

/// DOM id of the chart container.
pub const CHART_ID: &str = "irradiance-chart";

/// Map centre and initial coordinates (Kampala).
pub const DEFAULT_LATITUDE: &str = "0.3117";
pub const DEFAULT_LONGITUDE: &str = "32.5974";

/// Shared state of the portal page.
#[derive(Clone, Copy)]
pub struct AppState {
    pub latitude: Signal<String>,
    pub longitude: Signal<String>,
    /// Free text for the place search box
    pub search_query: Signal<String>,
    pub data_source: Signal<String>,
    pub granularity: Signal<String>,
    /// "date" or "year"
    pub mode: Signal<String>,
    pub start_date: Signal<String>,
    pub end_date: Signal<String>,
    pub start_year: Signal<String>,
    pub end_year: Signal<String>,
    pub gti: Signal<bool>,
    pub tilt_angle: Signal<String>,
    /// A visualize request is in flight
    pub loading: Signal<bool>,
    /// A download is in flight
    pub downloading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// The one chart on the page
    pub chart: Signal<ChartController<JsChartView>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        let error_msg = Signal::new(None);
        Self {
            latitude: Signal::new(DEFAULT_LATITUDE.to_string()),
            longitude: Signal::new(DEFAULT_LONGITUDE.to_string()),
            search_query: Signal::new(String::new()),
            data_source: Signal::new(DataSource::Model.wire_name().to_string()),
            granularity: Signal::new(Granularity::Daily.wire_name().to_string()),
            mode: Signal::new(PlotMode::DateRange.wire_name().to_string()),
            start_date: Signal::new(String::new()),
            end_date: Signal::new(String::new()),
            start_year: Signal::new(String::new()),
            end_year: Signal::new(String::new()),
            gti: Signal::new(false),
            tilt_angle: Signal::new(String::new()),
            loading: Signal::new(false),
            downloading: Signal::new(false),
            error_msg,
            chart: Signal::new(ChartController::new(JsChartView::new(CHART_ID, error_msg))),
        }
    }

    /// Snapshot of the form fields.
    pub fn form(&self) -> FormInput {
        FormInput {
            latitude: (self.latitude)(),
            longitude: (self.longitude)(),
            data_source: (self.data_source)(),
            granularity: (self.granularity)(),
            mode: (self.mode)(),
            start_date: (self.start_date)(),
            end_date: (self.end_date)(),
            start_year: (self.start_year)(),
            end_year: (self.end_year)(),
            gti: (self.gti)(),
            tilt_angle: (self.tilt_angle)(),
        }
    }

    pub fn is_year_mode(&self) -> bool {
        (self.mode)() == PlotMode::YearRange.wire_name()
    }

    /// Restore every field to its default and destroy the chart.
    pub fn reset(&mut self) {
        self.latitude.set(DEFAULT_LATITUDE.to_string());
        self.longitude.set(DEFAULT_LONGITUDE.to_string());
        self.search_query.set(String::new());
        self.data_source.set(DataSource::Model.wire_name().to_string());
        self.granularity.set(Granularity::Daily.wire_name().to_string());
        self.mode.set(PlotMode::DateRange.wire_name().to_string());
        self.start_date.set(String::new());
        self.end_date.set(String::new());
        self.start_year.set(String::new());
        self.end_year.set(String::new());
        self.gti.set(false);
        self.tilt_angle.set(String::new());
        self.error_msg.set(None);
        self.chart.write().reset();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
