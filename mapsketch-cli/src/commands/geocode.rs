//! `mapsketch lookup` and `mapsketch search`: one-shot geocoding.

use mapsketch::coord::LatLng;
use mapsketch::geocode::Geocoder;
use mapsketch::store::LocationStatus;
use mapsketch::view::SearchError;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Reverse geocode a single point.
pub fn run_lookup(runner: &CliRunner, point: LatLng) -> Result<(), CliError> {
    runner.log_startup("lookup");
    let runtime = runner.create_runtime()?;
    let geocoder = runner.create_geocoder()?;

    let address = runtime.block_on(geocoder.reverse(point))?;
    info!(lat = point.lat, lng = point.lng, found = address.is_some(), "Lookup finished");

    let status = address.map_or(LocationStatus::NotFound, LocationStatus::Resolved);
    println!("{}: {}", point, status);
    Ok(())
}

/// Resolve a place name to a coordinate.
pub fn run_search(runner: &CliRunner, query: &str) -> Result<(), CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::Config("Search query is empty".to_string()));
    }

    runner.log_startup("search");
    let runtime = runner.create_runtime()?;
    let geocoder = runner.create_geocoder()?;

    let location = runtime
        .block_on(geocoder.search(query))
        .map_err(SearchError::from)?
        .ok_or_else(|| SearchError::NotFound {
            query: query.to_string(),
        })?;

    info!(query, lat = location.lat, lng = location.lng, "Search finished");
    println!("{}", location);
    Ok(())
}
