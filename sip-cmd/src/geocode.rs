//! `geocode`: place name → coordinates.

use sip_core::client::{BackendClient, DEFAULT_BASE_URL};
use sip_core::geocode::Location;

/// One line of output: `latitude,longitude` at four decimals, then the
/// display name when Nominatim sent one.
pub fn format_location(location: &Location) -> String {
    let coords = format!("{:.4},{:.4}", location.latitude, location.longitude);
    match &location.display_name {
        Some(name) => format!("{}\t{}", coords, name),
        None => coords,
    }
}

pub async fn run_geocode(query: &str) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("Please enter a place to search for");
    }
    // Geocoding goes straight to Nominatim; the base URL is unused.
    let client = BackendClient::new(DEFAULT_BASE_URL)?;
    match client
        .geocode(query)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?
    {
        Some(location) => {
            println!("{}", format_location(&location));
            Ok(())
        }
        None => anyhow::bail!("No results for '{}'", query),
    }
}
