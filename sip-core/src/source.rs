use crate::error::UnknownVariant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sip_utils::dates::{format_date, format_date_compact};
use std::{fmt, str::FromStr};

/// The backend a visualize request is routed to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum DataSource {
    /// Clear-sky model computed by the portal backend itself.
    #[serde(rename = "model")]
    Model,
    /// Copernicus CAMS radiation service.
    #[serde(rename = "CAMS_RAD")]
    CamsRad,
    /// NASA POWER hourly GHI/DNI/DHI products.
    #[serde(rename = "NASA")]
    Nasa,
}

/// File format offered by the export endpoint.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl DataSource {
    pub const ALL: [DataSource; 3] = [DataSource::Model, DataSource::CamsRad, DataSource::Nasa];

    pub fn wire_name(&self) -> &'static str {
        match self {
            DataSource::Model => "model",
            DataSource::CamsRad => "CAMS_RAD",
            DataSource::Nasa => "NASA",
        }
    }

    /// Path of the data endpoint, relative to the backend base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            DataSource::Model => "/api/model",
            DataSource::CamsRad => "/api/cams",
            DataSource::Nasa => "/api/nasa",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DataSource::Model => "Solar Model",
            DataSource::CamsRad => "CAMS Radiation Service",
            DataSource::Nasa => "NASA POWER",
        }
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Path and query string of the export endpoint for this format.
    pub fn endpoint(&self) -> String {
        format!("/api/export?format={}", self.extension())
    }

    /// Conventional download file name, e.g. `solar_data_NASA_20240131.csv`.
    pub fn file_name(&self, source: DataSource, today: NaiveDate) -> String {
        format!(
            "solar_data_{}_{}.{}",
            source.wire_name(),
            format_date_compact(&today),
            self.extension()
        )
    }
}

/// File name for a saved chart image, e.g. `solar_irradiance_chart_2024-01-31.png`.
pub fn chart_image_file_name(today: NaiveDate) -> String {
    format!("solar_irradiance_chart_{}.png", format_date(&today))
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DataSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" => Ok(DataSource::Model),
            "cams_rad" | "cams" => Ok(DataSource::CamsRad),
            "nasa" => Ok(DataSource::Nasa),
            _ => Err(UnknownVariant {
                kind: "data source",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(UnknownVariant {
                kind: "export format",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(DataSource::Model.endpoint(), "/api/model");
        assert_eq!(DataSource::CamsRad.endpoint(), "/api/cams");
        assert_eq!(DataSource::Nasa.endpoint(), "/api/nasa");
        assert_eq!(ExportFormat::Json.endpoint(), "/api/export?format=json");
    }

    #[test]
    fn test_parse_data_source() {
        assert_eq!("CAMS_RAD".parse::<DataSource>().unwrap(), DataSource::CamsRad);
        assert_eq!("nasa".parse::<DataSource>().unwrap(), DataSource::Nasa);
        assert!("pvgis".parse::<DataSource>().is_err());
    }

    #[test]
    fn test_export_file_name() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            ExportFormat::Csv.file_name(DataSource::Nasa, today),
            "solar_data_NASA_20240131.csv"
        );
    }

    #[test]
    fn test_chart_image_file_name() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(chart_image_file_name(today), "solar_irradiance_chart_2024-01-31.png");
    }
}
