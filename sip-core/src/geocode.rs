use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Nominatim free-text search endpoint.
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: Option<String>,
}

/// Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Parse a Nominatim `format=json` result list. Only the first candidate
/// is used; an empty list means "not found".
pub fn parse_search_results(body: &str) -> Result<Option<Location>, ApiError> {
    let places: Vec<Place> = serde_json::from_str(body)
        .map_err(|e| ApiError::Format(format!("unexpected geocoding response ({})", e)))?;
    let Some(first) = places.into_iter().next() else {
        return Ok(None);
    };
    let latitude = first.lat.trim().parse::<f64>();
    let longitude = first.lon.trim().parse::<f64>();
    match (latitude, longitude) {
        (Ok(latitude), Ok(longitude)) => Ok(Some(Location {
            latitude,
            longitude,
            display_name: first.display_name,
        })),
        _ => Err(ApiError::Format(format!(
            "geocoding result has invalid coordinates: {}, {}",
            first.lat, first.lon
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_result_wins() {
        let body = r#"[
            {"place_id": 1, "lat": "0.3177", "lon": "32.5813", "display_name": "Kampala, Uganda"},
            {"place_id": 2, "lat": "10.0", "lon": "10.0", "display_name": "Elsewhere"}
        ]"#;
        let location = parse_search_results(body).unwrap().unwrap();
        assert!((location.latitude - 0.3177).abs() < f64::EPSILON);
        assert!((location.longitude - 32.5813).abs() < f64::EPSILON);
        assert_eq!(location.display_name.as_deref(), Some("Kampala, Uganda"));
    }

    #[test]
    fn test_no_results() {
        assert_eq!(parse_search_results("[]").unwrap(), None);
    }

    #[test]
    fn test_bad_payloads() {
        assert!(parse_search_results(r#"{"error": "rate limited"}"#).is_err());
        assert!(parse_search_results(r#"[{"lat": "north", "lon": "1"}]"#).is_err());
    }
}
