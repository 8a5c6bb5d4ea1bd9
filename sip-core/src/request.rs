//! Form inputs → validated request payload.

use crate::granularity::{Granularity, PlotMode};
use crate::source::DataSource;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use sip_utils::dates::{format_date, parse_date};
use std::fmt;

/// Earliest year accepted in year-range mode.
pub const EARLIEST_YEAR: i32 = 1980;

/// Raw values as typed or selected in the form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub latitude: String,
    pub longitude: String,
    pub data_source: String,
    /// Empty means "Daily".
    pub granularity: String,
    /// Empty means date-range mode.
    pub mode: String,
    pub start_date: String,
    pub end_date: String,
    pub start_year: String,
    pub end_year: String,
    /// Global tilted irradiance requested; requires `tilt_angle`.
    pub gti: bool,
    pub tilt_angle: String,
}

/// The time window of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Dates { start: NaiveDate, end: NaiveDate },
    Years { start: i32, end: i32 },
}

/// A validated visualize/export request.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizeRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub data_source: DataSource,
    pub granularity: Granularity,
    pub range: TimeRange,
    pub tilt_angle: Option<f64>,
}

/// Every problem found in a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|e| format!("• {}", e)).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

fn parse_bounded(raw: &str, bound: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (-bound..=bound).contains(v))
}

fn parse_optional_date(raw: &str, label: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(format!("{} date is required for 'Date Range' mode.", label));
        return None;
    }
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            errors.push(format!("{} date is invalid: {}", label, e));
            None
        }
    }
}

fn parse_optional_year(raw: &str, label: &str, errors: &mut Vec<String>) -> Option<i32> {
    match raw.trim().parse::<i32>() {
        Ok(year) => Some(year),
        Err(_) => {
            errors.push(format!(
                "{} year is required and must be a number for 'Year Range' mode.",
                label
            ));
            None
        }
    }
}

impl FormInput {
    /// Validate the form and build the request payload.
    ///
    /// `today` bounds the latest year accepted in year-range mode.
    pub fn assemble(&self, today: NaiveDate) -> Result<VisualizeRequest, ValidationErrors> {
        let mut errors = Vec::new();

        let latitude = parse_bounded(&self.latitude, 90.0);
        if latitude.is_none() {
            errors.push("Latitude must be a number between -90 and 90.".to_string());
        }
        let longitude = parse_bounded(&self.longitude, 180.0);
        if longitude.is_none() {
            errors.push("Longitude must be a number between -180 and 180.".to_string());
        }

        let data_source = if self.data_source.trim().is_empty() {
            errors.push("Please select a data source.".to_string());
            None
        } else {
            self.data_source
                .parse::<DataSource>()
                .map_err(|e| errors.push(e.to_string()))
                .ok()
        };

        let granularity = if self.granularity.trim().is_empty() {
            Some(Granularity::Daily)
        } else {
            self.granularity
                .parse::<Granularity>()
                .map_err(|e| errors.push(e.to_string()))
                .ok()
        };

        let mode = if self.mode.trim().is_empty() {
            Some(PlotMode::DateRange)
        } else {
            self.mode
                .parse::<PlotMode>()
                .map_err(|e| errors.push(e.to_string()))
                .ok()
        };

        let range = match mode {
            Some(PlotMode::DateRange) => {
                let start = parse_optional_date(&self.start_date, "Start", &mut errors);
                let end = parse_optional_date(&self.end_date, "End", &mut errors);
                match (start, end) {
                    (Some(start), Some(end)) if start > end => {
                        errors.push("Start date cannot be after end date.".to_string());
                        None
                    }
                    (Some(start), Some(end)) => Some(TimeRange::Dates { start, end }),
                    _ => None,
                }
            }
            Some(PlotMode::YearRange) => {
                let start = parse_optional_year(&self.start_year, "Start", &mut errors);
                let end = parse_optional_year(&self.end_year, "End", &mut errors);
                match (start, end) {
                    (Some(start), Some(end)) => {
                        let mut ok = true;
                        if start > end {
                            errors.push("Start year cannot be after end year.".to_string());
                            ok = false;
                        }
                        if start < EARLIEST_YEAR || end > today.year() {
                            errors.push(format!(
                                "Years must be between {} and {}.",
                                EARLIEST_YEAR,
                                today.year()
                            ));
                            ok = false;
                        }
                        ok.then_some(TimeRange::Years { start, end })
                    }
                    _ => None,
                }
            }
            None => None,
        };

        let tilt_angle = if self.gti {
            let tilt = parse_bounded(&self.tilt_angle, 90.0);
            if tilt.is_none() {
                errors.push(
                    "Tilt angle must be a number between -90 and 90 when GTI is selected."
                        .to_string(),
                );
            }
            tilt
        } else {
            None
        };

        match (latitude, longitude, data_source, granularity, range) {
            (Some(latitude), Some(longitude), Some(data_source), Some(granularity), Some(range))
                if errors.is_empty() =>
            {
                Ok(VisualizeRequest {
                    latitude,
                    longitude,
                    data_source,
                    granularity,
                    range,
                    tilt_angle,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

impl VisualizeRequest {
    pub fn mode(&self) -> PlotMode {
        match self.range {
            TimeRange::Dates { .. } => PlotMode::DateRange,
            TimeRange::Years { .. } => PlotMode::YearRange,
        }
    }

    /// Path of the data endpoint for the selected source.
    pub fn endpoint(&self) -> &'static str {
        self.data_source.endpoint()
    }

    /// The year span of a year-range request.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        match self.range {
            TimeRange::Years { start, end } => Some((start, end)),
            TimeRange::Dates { .. } => None,
        }
    }

    /// JSON body text for the data and export endpoints.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Wire layout of the request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody {
    latitude: f64,
    longitude: f64,
    data_source: DataSource,
    time_granularity: Granularity,
    mode: PlotMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_year: Option<i32>,
    gti: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tilt_angle: Option<f64>,
}

impl From<&VisualizeRequest> for RequestBody {
    fn from(request: &VisualizeRequest) -> Self {
        let (start_date, end_date, start_year, end_year) = match request.range {
            TimeRange::Dates { start, end } => {
                (Some(format_date(&start)), Some(format_date(&end)), None, None)
            }
            TimeRange::Years { start, end } => (None, None, Some(start), Some(end)),
        };
        RequestBody {
            latitude: request.latitude,
            longitude: request.longitude,
            data_source: request.data_source,
            time_granularity: request.granularity,
            mode: request.mode(),
            start_date,
            end_date,
            start_year,
            end_year,
            gti: request.tilt_angle.is_some(),
            tilt_angle: request.tilt_angle,
        }
    }
}

impl Serialize for VisualizeRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RequestBody::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn date_form() -> FormInput {
        FormInput {
            latitude: "0.3117".into(),
            longitude: "32.5974".into(),
            data_source: "NASA".into(),
            granularity: "Hourly".into(),
            mode: "date".into(),
            start_date: "2023-01-01".into(),
            end_date: "2023-01-31".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_date_range_body() {
        let request = date_form().assemble(today()).unwrap();
        assert_eq!(request.mode(), PlotMode::DateRange);
        assert_eq!(request.endpoint(), "/api/nasa");
        let body: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "latitude": 0.3117,
                "longitude": 32.5974,
                "dataSource": "NASA",
                "timeGranularity": "Hourly",
                "mode": "date",
                "startDate": "2023-01-01",
                "endDate": "2023-01-31",
                "gti": false
            })
        );
    }

    #[test]
    fn test_assemble_year_range_with_tilt() {
        let form = FormInput {
            mode: "year".into(),
            data_source: "model".into(),
            start_year: "2015".into(),
            end_year: "2020".into(),
            gti: true,
            tilt_angle: "25".into(),
            ..date_form()
        };
        let request = form.assemble(today()).unwrap();
        assert_eq!(request.year_span(), Some((2015, 2020)));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["mode"], "year");
        assert_eq!(body["startYear"], 2015);
        assert_eq!(body["tiltAngle"], 25.0);
        assert_eq!(body["gti"], true);
        assert!(body.get("startDate").is_none());
    }

    #[test]
    fn test_defaults_for_blank_granularity_and_mode() {
        let form = FormInput {
            granularity: String::new(),
            mode: String::new(),
            ..date_form()
        };
        let request = form.assemble(today()).unwrap();
        assert_eq!(request.granularity, Granularity::Daily);
        assert_eq!(request.mode(), PlotMode::DateRange);
    }

    #[test]
    fn test_collects_every_error() {
        let form = FormInput {
            latitude: "91".into(),
            longitude: "abc".into(),
            data_source: String::new(),
            start_date: "2023-02-01".into(),
            end_date: "2023-01-01".into(),
            gti: true,
            tilt_angle: "95".into(),
            ..date_form()
        };
        let errors = form.assemble(today()).unwrap_err();
        assert_eq!(errors.0.len(), 5);
        assert!(errors.to_string().starts_with("• Latitude"));
        assert!(errors.0.contains(&"Start date cannot be after end date.".to_string()));
    }

    #[test]
    fn test_year_bounds() {
        let form = FormInput {
            mode: "year".into(),
            start_year: "1975".into(),
            end_year: "2030".into(),
            ..date_form()
        };
        let errors = form.assemble(today()).unwrap_err();
        assert_eq!(errors.0, vec!["Years must be between 1980 and 2025.".to_string()]);

        let reversed = FormInput {
            mode: "year".into(),
            start_year: "2020".into(),
            end_year: "2010".into(),
            ..date_form()
        };
        let errors = reversed.assemble(today()).unwrap_err();
        assert_eq!(errors.0, vec!["Start year cannot be after end year.".to_string()]);
    }

    #[test]
    fn test_missing_dates() {
        let form = FormInput {
            start_date: String::new(),
            end_date: "31/01/2023".into(),
            ..date_form()
        };
        let errors = form.assemble(today()).unwrap_err();
        assert_eq!(errors.0.len(), 2);
        assert!(errors.0[0].contains("required"));
        assert!(errors.0[1].starts_with("End date is invalid"));
    }
}
