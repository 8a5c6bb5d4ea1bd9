use crate::error::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unit used for irradiance values on every chart.
pub const IRRADIANCE_UNIT: &str = "W/m²";

/// Temporal resolution of the samples returned by a backend.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
}

/// Display unit of a continuous time axis.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Day,
    Month,
}

/// How the user asked for the time range to be plotted.
///
/// - `DateRange`: one chronological series between two dates
/// - `YearRange`: a day-of-year climatology averaged over several years
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PlotMode {
    #[serde(rename = "date")]
    DateRange,
    #[serde(rename = "year")]
    YearRange,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Hourly, Granularity::Daily, Granularity::Monthly];

    /// Name used in request bodies and form values.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Granularity::Hourly => "Hourly",
            Granularity::Daily => "Daily",
            Granularity::Monthly => "Monthly",
        }
    }

    pub fn time_unit(&self) -> TimeUnit {
        match self {
            Granularity::Hourly => TimeUnit::Hour,
            Granularity::Daily => TimeUnit::Day,
            Granularity::Monthly => TimeUnit::Month,
        }
    }

    /// Maximum number of points plotted before the series is downsampled.
    pub fn point_budget(&self) -> usize {
        match self {
            Granularity::Hourly => 1000,
            Granularity::Daily => 730,
            Granularity::Monthly => 240,
        }
    }

    /// Generic value label, used for the y-axis title and for the
    /// fallback `irradiance` series.
    pub fn value_label(&self) -> String {
        match self {
            Granularity::Hourly => format!("Hourly Irradiance ({})", IRRADIANCE_UNIT),
            Granularity::Daily => format!("Daily Avg Irradiance ({})", IRRADIANCE_UNIT),
            Granularity::Monthly => format!("Monthly Avg Irradiance ({})", IRRADIANCE_UNIT),
        }
    }
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
        }
    }
}

impl PlotMode {
    pub fn wire_name(&self) -> &'static str {
        match self {
            PlotMode::DateRange => "date",
            PlotMode::YearRange => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotMode::DateRange => f.write_str("Date Range"),
            PlotMode::YearRange => f.write_str("Year Range"),
        }
    }
}

impl FromStr for Granularity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" | "hour" => Ok(Granularity::Hourly),
            "daily" | "day" => Ok(Granularity::Daily),
            "monthly" | "month" => Ok(Granularity::Monthly),
            _ => Err(UnknownVariant {
                kind: "time granularity",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for PlotMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" | "date-range" | "daterange" => Ok(PlotMode::DateRange),
            "year" | "year-range" | "yearrange" => Ok(PlotMode::YearRange),
            _ => Err(UnknownVariant {
                kind: "plot mode",
                value: s.to_string(),
            }),
        }
    }
}
