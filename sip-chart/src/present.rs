//! Payload + plot mode → render descriptor.

use crate::descriptor::{ChartDescriptor, ChartPayload, Dataset, Fill, RenderDescriptor, XAxis, YAxis};
use log::debug;
use sip_core::granularity::{Granularity, PlotMode, TimeUnit, IRRADIANCE_UNIT};
use sip_core::sample::Component;
use sip_data::aggregate::ClimatologyBand;
use sip_data::series::{AxisKind, ChartSeries, SeriesRole};
use std::fmt;

/// Shown in place of a date-range chart with no points.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected parameters.";

/// Title of the continuous time axis.
pub const TIME_AXIS_TITLE: &str = "Time";

/// Title of the "MM-DD" category axis.
pub const DAY_OF_YEAR_AXIS_TITLE: &str = "Day of Year (Month-Day)";

/// Legend text of the shaded band.
pub const BAND_LABEL: &str = "±1 Standard Deviation";

/// Label of the invisible lower edge of the band. Never shown in the legend.
pub const BAND_LOWER_LABEL: &str = "-1 Standard Deviation";

/// Above this many points, markers are hidden and only the line is drawn.
pub const POINT_MARKER_LIMIT: usize = 200;

const PRIMARY_COLOR: &str = "#4e73df";
const LINE_FILL_COLOR: &str = "rgba(78, 115, 223, 0.05)";
const BAND_FILL_COLOR: &str = "rgba(78, 115, 223, 0.15)";
const TRANSPARENT: &str = "transparent";
/// Share of the band's extent added above and below it on the y axis.
const BAND_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentError {
    /// The payload was shaped for a different plot mode than requested.
    ModeMismatch { requested: PlotMode, payload: PlotMode },
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::ModeMismatch { requested, payload } => write!(
                f,
                "cannot draw {} data as a {} chart",
                payload, requested
            ),
        }
    }
}

impl std::error::Error for PresentError {}

/// Line and fill colors for a series.
fn series_colors(component: Option<Component>) -> (&'static str, &'static str) {
    match component {
        Some(Component::Ghi) | None => (PRIMARY_COLOR, LINE_FILL_COLOR),
        Some(Component::Dhi) => ("#1cc88a", "rgba(28, 200, 138, 0.05)"),
        Some(Component::Dni) => ("#f6c23e", "rgba(246, 194, 62, 0.05)"),
    }
}

fn granularity_for(unit: TimeUnit) -> Granularity {
    match unit {
        TimeUnit::Hour => Granularity::Hourly,
        TimeUnit::Day => Granularity::Daily,
        TimeUnit::Month => Granularity::Monthly,
    }
}

/// Build the render descriptor for `payload` drawn in `mode`.
///
/// This is a pure function: the same inputs always produce the same
/// descriptor, and the descriptor depends on nothing rendered before. An
/// empty payload yields [`RenderDescriptor::Empty`], never an empty chart.
pub fn render(payload: &ChartPayload, mode: PlotMode) -> Result<RenderDescriptor, PresentError> {
    if payload.mode() != mode {
        return Err(PresentError::ModeMismatch {
            requested: mode,
            payload: payload.mode(),
        });
    }
    if payload.is_empty() {
        let message = match payload {
            ChartPayload::Band(band) => format!(
                "No data available for average between {} and {}.",
                band.start_year, band.end_year
            ),
            ChartPayload::Series(_) => NO_DATA_MESSAGE.to_string(),
        };
        debug!("Nothing to draw in {} mode: {}", mode, message);
        return Ok(RenderDescriptor::Empty { mode, message });
    }

    match payload {
        ChartPayload::Series(series) => render_series(series),
        ChartPayload::Band(band) => Ok(render_band(band)),
    }
}

fn render_series(series: &[ChartSeries]) -> Result<RenderDescriptor, PresentError> {
    let Some(unit) = series.iter().find_map(|s| match s.axis {
        AxisKind::Time { unit } => Some(unit),
        AxisKind::Category => None,
    }) else {
        return Err(PresentError::ModeMismatch {
            requested: PlotMode::DateRange,
            payload: PlotMode::YearRange,
        });
    };

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let (border, background) = series_colors(s.component);
            Dataset {
                label: s.label.clone(),
                points: s.points.clone(),
                border_color: border.to_string(),
                background_color: background.to_string(),
                border_width: 1.0,
                point_radius: if s.len() > POINT_MARKER_LIMIT { 0.0 } else { 2.0 },
                tension: 0.1,
                fill: Fill::None,
                order: index as u32 + 1,
                show_in_legend: true,
            }
        })
        .collect();

    Ok(RenderDescriptor::Chart(ChartDescriptor {
        mode: PlotMode::DateRange,
        x_axis: XAxis::Time {
            unit,
            title: TIME_AXIS_TITLE.to_string(),
        },
        y_axis: YAxis {
            title: granularity_for(unit).value_label(),
            begin_at_zero: true,
            suggested_min: None,
            suggested_max: None,
        },
        show_legend: datasets.len() > 1,
        datasets,
    }))
}

/// Suggested y range: the band's extent padded by 10% each way, never
/// below zero.
fn band_y_range(band: &ClimatologyBand) -> (f64, f64) {
    let min = band.lower_band.iter().copied().fold(f64::INFINITY, f64::min);
    let max = band.upper_band.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let padding = (max - min) * BAND_PADDING;
    ((min - padding).max(0.0), max + padding)
}

fn band_dataset(band: &ClimatologyBand, layer: ChartSeries) -> Dataset {
    let base = Dataset {
        label: String::new(),
        points: layer.points,
        border_color: TRANSPARENT.to_string(),
        background_color: BAND_FILL_COLOR.to_string(),
        border_width: 0.0,
        point_radius: 0.0,
        tension: 0.1,
        fill: Fill::None,
        order: 0,
        show_in_legend: true,
    };
    // Mean on top, band behind it, invisible lower edge last.
    match layer.role {
        SeriesRole::Line => Dataset {
            label: band.mean_label(),
            border_color: PRIMARY_COLOR.to_string(),
            background_color: PRIMARY_COLOR.to_string(),
            border_width: 2.0,
            order: 1,
            ..base
        },
        SeriesRole::BandUpper => Dataset {
            label: BAND_LABEL.to_string(),
            fill: Fill::ToNext,
            order: 2,
            ..base
        },
        SeriesRole::BandLower => Dataset {
            label: BAND_LOWER_LABEL.to_string(),
            order: 3,
            show_in_legend: false,
            ..base
        },
    }
}

fn render_band(band: &ClimatologyBand) -> RenderDescriptor {
    let (suggested_min, suggested_max) = band_y_range(band);
    let datasets = band
        .to_series()
        .into_iter()
        .map(|layer| band_dataset(band, layer))
        .collect();

    RenderDescriptor::Chart(ChartDescriptor {
        mode: PlotMode::YearRange,
        x_axis: XAxis::Category {
            labels: band.labels.clone(),
            title: DAY_OF_YEAR_AXIS_TITLE.to_string(),
        },
        y_axis: YAxis {
            title: format!(
                "Avg Daily Irradiance ({}-{}) ({})",
                band.start_year, band.end_year, IRRADIANCE_UNIT
            ),
            begin_at_zero: true,
            suggested_min: Some(suggested_min),
            suggested_max: Some(suggested_max),
        },
        datasets,
        show_legend: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sip_core::sample::RawSample;
    use sip_data::aggregate::aggregate_by_day_of_year;
    use sip_data::series::build_series;

    fn daily_series(n: usize) -> Vec<ChartSeries> {
        let samples: Vec<RawSample> = (0..n)
            .map(|i| {
                RawSample::generic(
                    &format!("2023-{:02}-{:02}", 1 + i / 28, 1 + i % 28),
                    Some(i as f64),
                )
            })
            .collect();
        build_series(&samples, Granularity::Daily).unwrap()
    }

    fn band() -> ClimatologyBand {
        let samples = vec![
            RawSample::generic("2020-01-01T00:00:00Z", Some(100.0)),
            RawSample::generic("2021-01-01T00:00:00Z", Some(200.0)),
            RawSample::generic("2020-01-02T00:00:00Z", Some(300.0)),
        ];
        let points = aggregate_by_day_of_year(&samples, 2020, 2021).unwrap();
        ClimatologyBand::from_points(&points, 2020, 2021)
    }

    #[test]
    fn test_empty_series_is_no_data_state() {
        let descriptor = render(&ChartPayload::Series(Vec::new()), PlotMode::DateRange).unwrap();
        assert_eq!(
            descriptor,
            RenderDescriptor::Empty {
                mode: PlotMode::DateRange,
                message: NO_DATA_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn test_empty_band_is_no_data_state() {
        let empty = ClimatologyBand::from_points(&[], 2001, 2003);
        let descriptor = render(&ChartPayload::Band(empty), PlotMode::YearRange).unwrap();
        assert!(descriptor.is_empty());
        assert!(matches!(
            descriptor,
            RenderDescriptor::Empty { ref message, .. } if message.contains("2001 and 2003")
        ));
    }

    #[test]
    fn test_mode_mismatch() {
        let err = render(&ChartPayload::Band(band()), PlotMode::DateRange).unwrap_err();
        assert_eq!(
            err,
            PresentError::ModeMismatch {
                requested: PlotMode::DateRange,
                payload: PlotMode::YearRange,
            }
        );
    }

    #[test]
    fn test_single_series_time_axis() {
        let descriptor = render(&ChartPayload::Series(daily_series(10)), PlotMode::DateRange).unwrap();
        let chart = descriptor.as_chart().unwrap();
        assert_eq!(
            chart.x_axis,
            XAxis::Time {
                unit: TimeUnit::Day,
                title: "Time".to_string()
            }
        );
        assert_eq!(chart.y_axis.title, "Daily Avg Irradiance (W/m²)");
        assert_eq!(chart.y_axis.suggested_min, None);
        assert!(chart.y_axis.begin_at_zero);
        assert_eq!(chart.datasets.len(), 1);
        assert!(!chart.show_legend);
        assert_eq!(chart.datasets[0].point_radius, 2.0);
        assert_eq!(chart.datasets[0].fill, Fill::None);
    }

    #[test]
    fn test_dense_series_hides_markers() {
        let descriptor = render(&ChartPayload::Series(daily_series(300)), PlotMode::DateRange).unwrap();
        assert_eq!(descriptor.as_chart().unwrap().datasets[0].point_radius, 0.0);
    }

    #[test]
    fn test_component_series_show_legend() {
        let samples = vec![RawSample {
            datetime: Some("2023-01-01T06:00:00Z".into()),
            ghi: Some(1.0),
            dni: Some(2.0),
            ..Default::default()
        }];
        let series = build_series(&samples, Granularity::Hourly).unwrap();
        let descriptor = render(&ChartPayload::Series(series), PlotMode::DateRange).unwrap();
        let chart = descriptor.as_chart().unwrap();
        assert!(chart.show_legend);
        assert_eq!(chart.datasets[0].border_color, "#4e73df");
        assert_eq!(chart.datasets[1].border_color, "#f6c23e");
        assert_eq!(chart.y_axis.title, "Hourly Irradiance (W/m²)");
    }

    #[test]
    fn test_band_layers() {
        let descriptor = render(&ChartPayload::Band(band()), PlotMode::YearRange).unwrap();
        let chart = descriptor.as_chart().unwrap();
        assert_eq!(
            chart.x_axis,
            XAxis::Category {
                labels: vec!["01-01".to_string(), "01-02".to_string()],
                title: DAY_OF_YEAR_AXIS_TITLE.to_string(),
            }
        );
        assert_eq!(chart.y_axis.title, "Avg Daily Irradiance (2020-2021) (W/m²)");

        let [mean, upper, lower] = chart.datasets.as_slice() else {
            panic!("expected three datasets");
        };
        assert_eq!(mean.label, "Average (2020-2021)");
        assert!(mean.order < upper.order && upper.order < lower.order);
        assert_eq!(upper.fill, Fill::ToNext);
        assert_eq!(upper.label, BAND_LABEL);
        assert!(!lower.show_in_legend);
        assert_eq!(lower.border_color, TRANSPARENT);
        assert_eq!(lower.points[0].y, Some(100.0));
    }

    #[test]
    fn test_band_y_range_is_padded_and_clamped() {
        // lower: [100, 300], upper: [200, 300] -> extent 100..300, padding 20
        let chart = render(&ChartPayload::Band(band()), PlotMode::YearRange).unwrap();
        let y = &chart.as_chart().unwrap().y_axis;
        assert_eq!(y.suggested_min, Some(80.0));
        assert_eq!(y.suggested_max, Some(320.0));

        let near_zero = ClimatologyBand {
            labels: vec!["06-01".into()],
            mean: vec![5.0],
            upper_band: vec![50.0],
            lower_band: vec![0.0],
            start_year: 2000,
            end_year: 2001,
        };
        let chart = render(&ChartPayload::Band(near_zero), PlotMode::YearRange).unwrap();
        assert_eq!(chart.as_chart().unwrap().y_axis.suggested_min, Some(0.0));
    }

    #[test]
    fn test_switching_modes_does_not_leak_axes() {
        let band_chart = render(&ChartPayload::Band(band()), PlotMode::YearRange).unwrap();
        let series_chart = render(&ChartPayload::Series(daily_series(5)), PlotMode::DateRange).unwrap();
        let fresh_series_chart =
            render(&ChartPayload::Series(daily_series(5)), PlotMode::DateRange).unwrap();
        assert_eq!(series_chart, fresh_series_chart);

        let y = &series_chart.as_chart().unwrap().y_axis;
        assert_eq!(y.suggested_min, None);
        assert_eq!(y.suggested_max, None);
        assert!(matches!(series_chart.as_chart().unwrap().x_axis, XAxis::Time { .. }));
        assert!(band_chart.as_chart().unwrap().y_axis.suggested_max.is_some());
    }
}
