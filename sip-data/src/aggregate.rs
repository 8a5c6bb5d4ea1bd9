//! Day-of-year climatology across a span of years.
//!
//! Samples are keyed by calendar (month, day) regardless of year, so every
//! March 14th in the span lands in the same group. Each group reduces to a
//! mean and a population standard deviation, from which the ±1σ band is
//! drawn. Irradiance is never negative, so the lower edge is clamped at 0.

use crate::series::{AxisKind, ChartPoint, ChartSeries, SeriesRole, XValue};
use crate::stats::{mean, population_std_dev};
use chrono::Datelike;
use log::{debug, warn};
use serde::Serialize;
use sip_core::granularity::IRRADIANCE_UNIT;
use sip_core::sample::RawSample;
use std::collections::BTreeMap;
use std::fmt;

/// Readings collected for one calendar day across all qualifying years.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub month: u32,
    pub day: u32,
    pub values: Vec<f64>,
}

/// Summary of one [`DayGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPoint {
    /// "MM-DD"
    pub label: String,
    pub mean: f64,
    pub std_dev: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AggregateError {
    InvalidYearRange { start_year: i32, end_year: i32 },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::InvalidYearRange {
                start_year,
                end_year,
            } => write!(
                f,
                "start year {} is after end year {}",
                start_year, end_year
            ),
        }
    }
}

impl std::error::Error for AggregateError {}

impl DayGroup {
    /// Zero-padded "MM-DD" key.
    pub fn label(&self) -> String {
        format!("{:02}-{:02}", self.month, self.day)
    }

    pub fn summarize(&self) -> AggregatedPoint {
        let mean = mean(&self.values);
        let std_dev = population_std_dev(&self.values, mean);
        AggregatedPoint {
            label: self.label(),
            mean,
            std_dev,
            upper_band: mean + std_dev,
            lower_band: (mean - std_dev).max(0.0),
        }
    }
}

/// Group samples from `[start_year, end_year]` by calendar day, in
/// chronological (month, day) order.
///
/// Samples without a parseable absolute timestamp or without a reading are
/// skipped and logged; they never fail the batch.
pub fn group_by_day_of_year(
    samples: &[RawSample],
    start_year: i32,
    end_year: i32,
) -> Result<Vec<DayGroup>, AggregateError> {
    if start_year > end_year {
        return Err(AggregateError::InvalidYearRange {
            start_year,
            end_year,
        });
    }

    let mut groups: BTreeMap<(u32, u32), Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;
    for (index, sample) in samples.iter().enumerate() {
        let Some(ts) = sample.timestamp() else {
            debug!("Skipping sample {}: no parseable timestamp", index);
            skipped += 1;
            continue;
        };
        if ts.year() < start_year || ts.year() > end_year {
            continue;
        }
        let Some(value) = sample.primary_value() else {
            debug!("Skipping sample {}: no irradiance value", index);
            skipped += 1;
            continue;
        };
        groups.entry((ts.month(), ts.day())).or_default().push(value);
    }
    if skipped > 0 {
        warn!(
            "Skipped {} of {} samples while aggregating {}-{}",
            skipped,
            samples.len(),
            start_year,
            end_year
        );
    }

    Ok(groups
        .into_iter()
        .map(|((month, day), values)| DayGroup { month, day, values })
        .collect())
}

/// Mean and ±1σ band per calendar day across `[start_year, end_year]`.
///
/// An empty result means nothing fell in range; callers show a "no data"
/// state rather than an empty chart.
pub fn aggregate_by_day_of_year(
    samples: &[RawSample],
    start_year: i32,
    end_year: i32,
) -> Result<Vec<AggregatedPoint>, AggregateError> {
    let groups = group_by_day_of_year(samples, start_year, end_year)?;
    Ok(groups.iter().map(DayGroup::summarize).collect())
}

/// Column-oriented climatology, ready for the year-range chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatologyBand {
    pub labels: Vec<String>,
    pub mean: Vec<f64>,
    pub upper_band: Vec<f64>,
    pub lower_band: Vec<f64>,
    pub start_year: i32,
    pub end_year: i32,
}

impl ClimatologyBand {
    pub fn from_points(points: &[AggregatedPoint], start_year: i32, end_year: i32) -> Self {
        ClimatologyBand {
            labels: points.iter().map(|p| p.label.clone()).collect(),
            mean: points.iter().map(|p| p.mean).collect(),
            upper_band: points.iter().map(|p| p.upper_band).collect(),
            lower_band: points.iter().map(|p| p.lower_band).collect(),
            start_year,
            end_year,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// "Average (2015-2020)"
    pub fn mean_label(&self) -> String {
        format!("Average ({}-{})", self.start_year, self.end_year)
    }

    /// The band as category-axis series: mean line, upper edge, lower edge.
    pub fn to_series(&self) -> Vec<ChartSeries> {
        let series = |label: String, role: SeriesRole, values: &[f64]| ChartSeries {
            label,
            unit: IRRADIANCE_UNIT.to_string(),
            axis: AxisKind::Category,
            role,
            component: None,
            points: self
                .labels
                .iter()
                .zip(values)
                .map(|(label, value)| ChartPoint {
                    x: XValue::Category(label.clone()),
                    y: Some(*value),
                })
                .collect(),
        };
        vec![
            series(self.mean_label(), SeriesRole::Line, &self.mean),
            series("+1 Standard Deviation".to_string(), SeriesRole::BandUpper, &self.upper_band),
            series("-1 Standard Deviation".to_string(), SeriesRole::BandLower, &self.lower_band),
        ]
    }
}
