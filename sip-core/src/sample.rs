use crate::error::ApiError;
use crate::granularity::IRRADIANCE_UNIT;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use sip_utils::dates::{month_start, parse_timestamp};

/// NASA POWER marks missing hours with this fill value.
pub const NASA_FILL_VALUE: f64 = -999.0;

/// An irradiance component reported by the CAMS and NASA backends.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "GHI")]
    Ghi,
    #[serde(rename = "DHI")]
    Dhi,
    #[serde(rename = "DNI")]
    Dni,
}

impl Component {
    /// Components in the order their series are emitted.
    pub const ALL: [Component; 3] = [Component::Ghi, Component::Dhi, Component::Dni];

    pub fn key(&self) -> &'static str {
        match self {
            Component::Ghi => "GHI",
            Component::Dhi => "DHI",
            Component::Dni => "DNI",
        }
    }

    pub fn label(&self) -> String {
        let name = match self {
            Component::Ghi => "Global Horizontal Irradiance",
            Component::Dhi => "Diffuse Horizontal Irradiance",
            Component::Dni => "Direct Normal Irradiance",
        };
        format!("{} - {} ({})", self.key(), name, IRRADIANCE_UNIT)
    }
}

/// One observation as returned in the `data` array of a backend response.
///
/// Every field is optional: the model backend sends `datetime` (or
/// `year`/`month` for monthly data) plus `irradiance`, while CAMS and NASA
/// send `GHI`/`DHI`/`DNI`. Fields of the wrong JSON type decode as `None`
/// so one odd value never rejects the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(
        default,
        alias = "timestamp",
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(rename = "GHI", default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub ghi: Option<f64>,
    #[serde(rename = "DHI", default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub dhi: Option<f64>,
    #[serde(rename = "DNI", default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub dni: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub irradiance: Option<f64>,
}

impl RawSample {
    /// A sample carrying an absolute timestamp and a generic irradiance value.
    pub fn generic(datetime: &str, irradiance: Option<f64>) -> Self {
        RawSample {
            datetime: Some(datetime.to_string()),
            irradiance,
            ..Default::default()
        }
    }

    /// A monthly sample keyed by year and month.
    pub fn monthly(year: i32, month: u32, irradiance: Option<f64>) -> Self {
        RawSample {
            year: Some(year),
            month: Some(month),
            irradiance,
            ..Default::default()
        }
    }

    /// The absolute timestamp, if present and parseable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.datetime.as_deref().and_then(parse_timestamp)
    }

    /// True when the sample carries an explicit `{year, month}` pair.
    pub fn has_year_month(&self) -> bool {
        self.year.is_some() && self.month.is_some()
    }

    /// First day of the sample's `{year, month}` at 00:00 UTC.
    pub fn month_start(&self) -> Option<DateTime<Utc>> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => month_start(year, month),
            _ => None,
        }
    }

    pub fn component(&self, component: Component) -> Option<f64> {
        match component {
            Component::Ghi => self.ghi,
            Component::Dhi => self.dhi,
            Component::Dni => self.dni,
        }
    }

    pub fn has_any_component(&self) -> bool {
        Component::ALL.iter().any(|c| self.component(*c).is_some())
    }

    /// The single reading used when a sample must be reduced to one value:
    /// the first present component (GHI, DHI, DNI), else `irradiance`.
    pub fn primary_value(&self) -> Option<f64> {
        Component::ALL
            .iter()
            .find_map(|c| self.component(*c))
            .or(self.irradiance)
    }
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    data: Vec<serde_json::Value>,
}

/// Decode a backend response body of the form `{"data": [...]}`.
///
/// A body without a `data` array is a format error. Individual entries that
/// are not JSON objects are kept as empty samples so positions stay aligned;
/// later stages drop them as unparseable.
pub fn decode_response(body: &str) -> Result<Vec<RawSample>, ApiError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body).map_err(|e| {
        ApiError::Format(format!("expected {{\"data\": [...]}} ({})", e))
    })?;
    let samples = envelope
        .data
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<RawSample>(value).unwrap_or_else(|e| {
                warn!("Sample {} is not an object, keeping it empty: {}", index, e);
                RawSample::default()
            })
        })
        .collect();
    Ok(samples)
}

/// Field deserializers that map wrong-typed values to `None` instead of
/// failing the whole sample.
mod lenient {
    use super::NASA_FILL_VALUE;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(value.filter(|v| v.is_finite() && *v != NASA_FILL_VALUE))
    }

    pub fn integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        let value = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        Ok(value.and_then(|v| T::try_from(v).ok()))
    }
}
