//! Chronological chart series for date-range plots.

use crate::downsample::downsample;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use serde::Serialize;
use sip_core::granularity::{Granularity, TimeUnit, IRRADIANCE_UNIT};
use sip_core::sample::{Component, RawSample};
use sip_core::shape::{BatchShape, ValueShape};
use std::fmt;

/// X coordinate of a chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Time(DateTime<Utc>),
    Category(String),
}

impl XValue {
    /// Text form used in CSV output and category axes.
    pub fn to_label(&self) -> String {
        match self {
            XValue::Time(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            XValue::Category(label) => label.clone(),
        }
    }
}

/// One (x, y) pair. A `None` y is a gap, not a zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: XValue,
    pub y: Option<f64>,
}

/// Kind of x axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AxisKind {
    Time { unit: TimeUnit },
    Category,
}

/// What a series contributes to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Line,
    /// Upper edge of a shaded band, filled down to the matching lower edge.
    BandUpper,
    /// Lower edge of a shaded band; drawn invisible.
    BandLower,
}

/// An ordered series of points plus the metadata needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub unit: String,
    pub axis: AxisKind,
    pub role: SeriesRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// Errors raised while building series.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SeriesError {
    /// No sample in a non-empty batch could be placed in time.
    Format { total: usize },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::Format { total } => write!(
                f,
                "none of the {} samples has a parseable timestamp",
                total
            ),
        }
    }
}

impl std::error::Error for SeriesError {}

/// Build one chronological series per present irradiance component, or a
/// single generic `irradiance` series when the batch has no components.
///
/// Samples are stably sorted by time, then downsampled to the
/// granularity's point budget (first and last samples always kept). An
/// empty batch yields no series. Samples that cannot be placed in time are
/// dropped; if that is every sample, the batch is a format error.
pub fn build_series(samples: &[RawSample], granularity: Granularity) -> Result<Vec<ChartSeries>, SeriesError> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let shape = BatchShape::classify(samples, granularity);
    let mut placed: Vec<(DateTime<Utc>, &RawSample)> = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        match shape.resolve_time(sample) {
            Some(ts) => placed.push((ts, sample)),
            None => debug!("Sample {} has no usable timestamp: {:?}", index, sample.datetime),
        }
    }
    if placed.is_empty() {
        return Err(SeriesError::Format {
            total: samples.len(),
        });
    }
    let dropped = samples.len() - placed.len();
    if dropped > 0 {
        warn!(
            "Dropped {} of {} samples with unparseable timestamps",
            dropped,
            samples.len()
        );
    }

    placed.sort_by_key(|(ts, _)| *ts);

    let budget = granularity.point_budget();
    let kept = downsample(&placed, budget);
    if kept.len() < placed.len() {
        debug!(
            "Downsampled {} {} samples to {} (budget {})",
            placed.len(),
            granularity,
            kept.len(),
            budget
        );
    }

    let axis = AxisKind::Time {
        unit: granularity.time_unit(),
    };
    let series = match &shape.values {
        ValueShape::Components(components) => components
            .iter()
            .map(|component| ChartSeries {
                label: component.label(),
                unit: IRRADIANCE_UNIT.to_string(),
                axis,
                role: SeriesRole::Line,
                component: Some(*component),
                points: time_points(&kept, |s| s.component(*component)),
            })
            .collect(),
        ValueShape::Generic => vec![ChartSeries {
            label: granularity.value_label(),
            unit: IRRADIANCE_UNIT.to_string(),
            axis,
            role: SeriesRole::Line,
            component: None,
            points: time_points(&kept, |s| s.irradiance),
        }],
    };
    Ok(series)
}

fn time_points<F>(placed: &[(DateTime<Utc>, &RawSample)], value: F) -> Vec<ChartPoint>
where
    F: Fn(&RawSample) -> Option<f64>,
{
    placed
        .iter()
        .map(|(ts, sample)| ChartPoint {
            x: XValue::Time(*ts),
            y: value(sample),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn hourly(n: usize) -> Vec<RawSample> {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let ts = start + Duration::hours(i as i64);
                RawSample::generic(&ts.to_rfc3339(), Some(i as f64))
            })
            .collect()
    }

    #[test]
    fn test_empty_batch_gives_no_series() {
        assert_eq!(build_series(&[], Granularity::Daily).unwrap(), Vec::new());
    }

    #[test]
    fn test_generic_fallback_series() {
        let samples = hourly(24);
        let series = build_series(&samples, Granularity::Hourly).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "Hourly Irradiance (W/m²)");
        assert_eq!(series[0].component, None);
        assert_eq!(series[0].len(), 24);
        assert_eq!(
            series[0].axis,
            AxisKind::Time {
                unit: TimeUnit::Hour
            }
        );
    }

    #[test]
    fn test_one_series_per_component_with_gaps() {
        let samples = vec![
            RawSample {
                datetime: Some("2023-01-01T06:00:00Z".into()),
                ghi: Some(10.0),
                dhi: Some(5.0),
                ..Default::default()
            },
            RawSample {
                datetime: Some("2023-01-01T07:00:00Z".into()),
                ghi: None,
                dhi: Some(20.0),
                ..Default::default()
            },
            RawSample::generic("2023-01-01T08:00:00Z", Some(99.0)),
        ];
        let series = build_series(&samples, Granularity::Hourly).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].component, Some(Component::Ghi));
        assert_eq!(series[1].component, Some(Component::Dhi));
        assert_eq!(series[0].values(), vec![Some(10.0), None, None]);
        assert_eq!(series[1].values(), vec![Some(5.0), Some(20.0), None]);
    }

    #[test]
    fn test_sorted_chronologically() {
        let samples = vec![
            RawSample::generic("2023-03-03", Some(3.0)),
            RawSample::generic("2023-03-01", Some(1.0)),
            RawSample::generic("2023-03-02", Some(2.0)),
        ];
        let series = build_series(&samples, Granularity::Daily).unwrap();
        assert_eq!(series[0].values(), vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_stable_sort_for_equal_timestamps() {
        let samples = vec![
            RawSample::generic("2023-03-02", Some(1.0)),
            RawSample::generic("2023-03-01", Some(0.0)),
            RawSample::generic("2023-03-02", Some(2.0)),
        ];
        let series = build_series(&samples, Granularity::Daily).unwrap();
        assert_eq!(series[0].values(), vec![Some(0.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_monthly_year_month_uses_utc_month_start() {
        let samples = vec![
            RawSample::monthly(2022, 2, Some(200.0)),
            RawSample::monthly(2022, 1, Some(100.0)),
        ];
        let series = build_series(&samples, Granularity::Monthly).unwrap();
        let xs: Vec<XValue> = series[0].points.iter().map(|p| p.x.clone()).collect();
        assert_eq!(
            xs,
            vec![
                XValue::Time(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()),
                XValue::Time(Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap()),
            ]
        );
        assert_eq!(series[0].label, "Monthly Avg Irradiance (W/m²)");
    }

    #[test]
    fn test_downsampling_keeps_first_and_last() {
        let samples = hourly(2000);
        let series = build_series(&samples, Granularity::Hourly).unwrap();
        let values = series[0].values();
        assert!(values.len() <= 1001);
        assert_eq!(values[0], Some(0.0));
        assert_eq!(*values.last().unwrap(), Some(1999.0));
    }

    #[test]
    fn test_single_bad_timestamp_is_tolerated() {
        let mut samples = hourly(3);
        samples.insert(1, RawSample::generic("not a date", Some(5.0)));
        let series = build_series(&samples, Granularity::Hourly).unwrap();
        assert_eq!(series[0].values(), vec![Some(0.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_all_bad_timestamps_is_a_format_error() {
        let samples = vec![
            RawSample::generic("soon", Some(1.0)),
            RawSample::default(),
        ];
        assert_eq!(
            build_series(&samples, Granularity::Daily),
            Err(SeriesError::Format { total: 2 })
        );
    }

    #[test]
    fn test_idempotent() {
        let samples = hourly(1500);
        let first = build_series(&samples, Granularity::Hourly).unwrap();
        let second = build_series(&samples, Granularity::Hourly).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_time_points_as_rfc3339() {
        let series = build_series(&hourly(1), Granularity::Hourly).unwrap();
        let json = serde_json::to_value(&series[0]).unwrap();
        assert_eq!(json["points"][0]["x"], "2022-01-01T00:00:00Z");
        assert_eq!(json["axis"]["type"], "time");
        assert_eq!(json["axis"]["unit"], "hour");
        assert_eq!(json["role"], "line");
    }
}
