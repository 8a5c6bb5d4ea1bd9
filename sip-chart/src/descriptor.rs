//! Immutable descriptions of what a chart should show.
//!
//! A [`RenderDescriptor`] is built from scratch for every render and carries
//! the full axis configuration, so nothing set up for one plot mode can
//! survive into the next.

use serde::Serialize;
use sip_core::granularity::{PlotMode, TimeUnit};
use sip_data::aggregate::ClimatologyBand;
use sip_data::series::{ChartPoint, ChartSeries};

/// Shaped data handed to the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPayload {
    /// Chronological series for a date-range plot.
    Series(Vec<ChartSeries>),
    /// Day-of-year climatology for a year-range plot.
    Band(ClimatologyBand),
}

impl ChartPayload {
    /// The plot mode this payload belongs to.
    pub fn mode(&self) -> PlotMode {
        match self {
            ChartPayload::Series(_) => PlotMode::DateRange,
            ChartPayload::Band(_) => PlotMode::YearRange,
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartPayload::Series(series) => series.iter().all(ChartSeries::is_empty),
            ChartPayload::Band(band) => band.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RenderDescriptor {
    /// Nothing to plot; the view shows `message` instead of axes.
    Empty { mode: PlotMode, message: String },
    Chart(ChartDescriptor),
}

impl RenderDescriptor {
    pub fn mode(&self) -> PlotMode {
        match self {
            RenderDescriptor::Empty { mode, .. } => *mode,
            RenderDescriptor::Chart(chart) => chart.mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderDescriptor::Empty { .. })
    }

    pub fn as_chart(&self) -> Option<&ChartDescriptor> {
        match self {
            RenderDescriptor::Chart(chart) => Some(chart),
            RenderDescriptor::Empty { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub mode: PlotMode,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    /// Datasets in draw-list order.
    pub datasets: Vec<Dataset>,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum XAxis {
    /// Continuous time scale ticking in `unit`.
    Time { unit: TimeUnit, title: String },
    /// Discrete "MM-DD" labels.
    Category { labels: Vec<String>, title: String },
}

impl XAxis {
    pub fn title(&self) -> &str {
        match self {
            XAxis::Time { title, .. } | XAxis::Category { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub title: String,
    pub begin_at_zero: bool,
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
}

/// Area fill beneath a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    None,
    /// Fill down to the next dataset in the draw list.
    ToNext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub points: Vec<ChartPoint>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: f64,
    pub point_radius: f64,
    pub tension: f64,
    pub fill: Fill,
    /// Stacking order; lower draws on top.
    pub order: u32,
    pub show_in_legend: bool,
}
