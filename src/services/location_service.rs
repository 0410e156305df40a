use tracing::{debug, warn};

use crate::models::Location;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationUnavailable {
    #[error("positioning is not supported on this host")]
    Unsupported,
    #[error("positioning failed: {0}")]
    Positioning(String),
}

/// Source of the user's current position (device GPS, browser, env, ...).
pub trait LocationProvider {
    fn current_location(&self) -> Result<Location, LocationUnavailable>;
}

/// Reads `USER_LATITUDE` / `USER_LONGITUDE`. Unset means the host cannot position.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvLocationProvider;

impl LocationProvider for EnvLocationProvider {
    fn current_location(&self) -> Result<Location, LocationUnavailable> {
        location_from_lookup(|key| std::env::var(key).ok())
    }
}

/// Always answers with the same reading; handy for tests and kiosks.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider(pub Result<Location, LocationUnavailable>);

impl LocationProvider for FixedLocationProvider {
    fn current_location(&self) -> Result<Location, LocationUnavailable> {
        self.0.clone()
    }
}

fn location_from_lookup<F>(lookup: F) -> Result<Location, LocationUnavailable>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(lat), Some(lon)) = (lookup("USER_LATITUDE"), lookup("USER_LONGITUDE")) else {
        return Err(LocationUnavailable::Unsupported);
    };

    let parse = |key: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| LocationUnavailable::Positioning(format!("{} {:?}: {}", key, raw, e)))
    };
    let location = Location::new(parse("USER_LATITUDE", &lat)?, parse("USER_LONGITUDE", &lon)?);

    if !location.is_valid() {
        return Err(LocationUnavailable::Positioning(format!(
            "reading {}, {} is out of range",
            location.latitude, location.longitude
        )));
    }
    Ok(location)
}

/// The provider's reading, or `fallback` when positioning is unavailable.
pub fn resolve_location(provider: &dyn LocationProvider, fallback: Location) -> Location {
    match provider.current_location() {
        Ok(location) => {
            debug!(
                "📍 Using device location {:.5}, {:.5}",
                location.latitude, location.longitude
            );
            location
        }
        Err(e) => {
            warn!(
                "📍 Location unavailable ({}), falling back to {:.5}, {:.5}",
                e, fallback.latitude, fallback.longitude
            );
            fallback
        }
    }
}
