//! Request + response body → render descriptor, in one call.

use crate::descriptor::{ChartPayload, RenderDescriptor};
use crate::present::{render, PresentError};
use log::info;
use sip_core::error::ApiError;
use sip_core::request::{TimeRange, VisualizeRequest};
use sip_core::sample::{decode_response, RawSample};
use sip_data::aggregate::{aggregate_by_day_of_year, AggregateError, ClimatologyBand};
use sip_data::series::{build_series, SeriesError};
use std::fmt;

/// Anything that can stop a visualize request between the HTTP response and
/// the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualizeError {
    Api(ApiError),
    Series(SeriesError),
    Aggregate(AggregateError),
    Present(PresentError),
}

impl VisualizeError {
    /// Text suitable for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            VisualizeError::Api(e) => e.user_message(),
            VisualizeError::Series(e) => format!("Could not process data format for charting: {}", e),
            VisualizeError::Aggregate(e) => format!("Invalid year range: {}", e),
            VisualizeError::Present(e) => e.to_string(),
        }
    }
}

impl fmt::Display for VisualizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualizeError::Api(e) => write!(f, "{}", e),
            VisualizeError::Series(e) => write!(f, "{}", e),
            VisualizeError::Aggregate(e) => write!(f, "{}", e),
            VisualizeError::Present(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for VisualizeError {}

impl From<ApiError> for VisualizeError {
    fn from(e: ApiError) -> Self {
        VisualizeError::Api(e)
    }
}

impl From<SeriesError> for VisualizeError {
    fn from(e: SeriesError) -> Self {
        VisualizeError::Series(e)
    }
}

impl From<AggregateError> for VisualizeError {
    fn from(e: AggregateError) -> Self {
        VisualizeError::Aggregate(e)
    }
}

impl From<PresentError> for VisualizeError {
    fn from(e: PresentError) -> Self {
        VisualizeError::Present(e)
    }
}

/// Shape decoded samples for the request's plot mode: chronological series
/// for a date range, a day-of-year band for a year range.
pub fn shape_payload(request: &VisualizeRequest, samples: &[RawSample]) -> Result<ChartPayload, VisualizeError> {
    match request.range {
        TimeRange::Dates { .. } => Ok(ChartPayload::Series(build_series(samples, request.granularity)?)),
        TimeRange::Years { start, end } => {
            let points = aggregate_by_day_of_year(samples, start, end)?;
            Ok(ChartPayload::Band(ClimatologyBand::from_points(&points, start, end)))
        }
    }
}

/// Shape and render decoded samples.
pub fn visualize(request: &VisualizeRequest, samples: &[RawSample]) -> Result<RenderDescriptor, VisualizeError> {
    let payload = shape_payload(request, samples)?;
    let descriptor = render(&payload, request.mode())?;
    info!(
        "Rendered {} samples from {} as a {} chart",
        samples.len(),
        request.data_source,
        request.mode()
    );
    Ok(descriptor)
}

/// Decode a raw response body, then shape and render it.
///
/// A body that is not `{"data": [...]}` fails here, before any chart is
/// touched.
pub fn visualize_body(request: &VisualizeRequest, body: &str) -> Result<RenderDescriptor, VisualizeError> {
    let samples = decode_response(body)?;
    visualize(request, &samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::XAxis;
    use chrono::NaiveDate;
    use sip_core::granularity::{Granularity, PlotMode};
    use sip_core::source::DataSource;

    fn request(range: TimeRange, granularity: Granularity) -> VisualizeRequest {
        VisualizeRequest {
            latitude: 0.3117,
            longitude: 32.5974,
            data_source: DataSource::Nasa,
            granularity,
            range,
            tilt_angle: None,
        }
    }

    fn date_range() -> TimeRange {
        TimeRange::Dates {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        }
    }

    #[test]
    fn test_body_to_time_series_chart() {
        let body = r#"{"data": [
            {"datetime": "2023-01-01T07:00:00", "GHI": 20.0, "DNI": 41.0, "DHI": 9.0},
            {"datetime": "2023-01-01T06:00:00", "GHI": 12.5, "DNI": -999, "DHI": 8.25}
        ]}"#;
        let descriptor = visualize_body(&request(date_range(), Granularity::Hourly), body).unwrap();
        let chart = descriptor.as_chart().unwrap();
        assert_eq!(chart.mode, PlotMode::DateRange);
        assert_eq!(chart.datasets.len(), 3);
        assert_eq!(chart.datasets[0].points[0].y, Some(12.5));
        assert_eq!(chart.datasets[2].points[0].y, None);
        assert!(chart.show_legend);
    }

    #[test]
    fn test_body_to_band_chart() {
        let body = r#"{"data": [
            {"datetime": "2020-01-01T00:00:00Z", "GHI": 100},
            {"datetime": "2021-01-01T00:00:00Z", "GHI": 200}
        ]}"#;
        let range = TimeRange::Years { start: 2020, end: 2021 };
        let descriptor = visualize_body(&request(range, Granularity::Daily), body).unwrap();
        let chart = descriptor.as_chart().unwrap();
        assert!(matches!(chart.x_axis, XAxis::Category { .. }));
        assert_eq!(chart.datasets[0].points[0].y, Some(150.0));
        assert_eq!(chart.datasets[1].points[0].y, Some(200.0));
        assert_eq!(chart.datasets[2].points[0].y, Some(100.0));
    }

    #[test]
    fn test_empty_data_is_no_data_state() {
        let descriptor =
            visualize_body(&request(date_range(), Granularity::Daily), r#"{"data": []}"#).unwrap();
        assert!(descriptor.is_empty());
    }

    #[test]
    fn test_malformed_body_is_format_error() {
        let err = visualize_body(&request(date_range(), Granularity::Daily), r#"{"rows": []}"#)
            .unwrap_err();
        assert!(matches!(err, VisualizeError::Api(ApiError::Format(_))));
        assert!(err.user_message().starts_with("Invalid data format"));
    }

    #[test]
    fn test_unplaceable_batch_is_series_error() {
        let body = r#"{"data": [{"datetime": "later", "irradiance": 3}]}"#;
        let err = visualize_body(&request(date_range(), Granularity::Daily), body).unwrap_err();
        assert_eq!(err, VisualizeError::Series(SeriesError::Format { total: 1 }));
    }
}
