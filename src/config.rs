use std::env;

use crate::error::{AppError, AppResult};
use crate::models::Location;

const DEFAULT_NEARBY_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Used whenever the user's own position cannot be determined.
    pub fallback_location: Location,
    pub seed_on_empty: bool,
    pub nearby_limit: usize,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".into()))?;

        let latitude = required_f64(&lookup, "FALLBACK_LATITUDE")?;
        let longitude = required_f64(&lookup, "FALLBACK_LONGITUDE")?;
        let fallback_location = Location::new(latitude, longitude);
        if !fallback_location.is_valid() {
            return Err(AppError::Config(format!(
                "fallback location {}, {} is out of range",
                latitude, longitude
            )));
        }

        let seed_on_empty = lookup("SEED_ON_EMPTY")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        let nearby_limit = lookup("NEARBY_LIMIT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_NEARBY_LIMIT)
            .clamp(1, 100);

        Ok(AppConfig {
            database_url,
            fallback_location,
            seed_on_empty,
            nearby_limit,
        })
    }
}

fn required_f64<F>(lookup: &F, key: &str) -> AppResult<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| AppError::Config(format!("{} is not a number ({}): {}", key, raw, e)))
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
