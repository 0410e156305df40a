use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::restroom_repo;
use crate::error::{AppError, AppResult};
use crate::models::{Location, NewRestroom, Restroom, RestroomStatus, RestroomUpdate};

pub const DEFAULT_RESTROOM_NAME: &str = "Main Restroom";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub closed: usize,
    pub cleaning: usize,
    pub blocked: usize,
}

/// Validates the add form and turns it into a fresh, open restroom.
pub fn build_restroom(form: NewRestroom) -> AppResult<Restroom> {
    let mut restroom = Restroom {
        id: Uuid::new_v4().to_string(),
        name: String::new(),
        building_name: String::new(),
        floor: String::new(),
        location: Location::new(0.0, 0.0),
        is_wheelchair_accessible: false,
        is_gender_neutral: false,
        requires_wildcard: false,
        photo_urls: Vec::new(),
        accessibility_notes: None,
        hours: None,
        wildcard_hours: None,
        indoor_directions: None,
        status: RestroomStatus::Open,
        last_updated: Utc::now(),
    };
    apply_form(&mut restroom, form)?;
    Ok(restroom)
}

/// Applies the edit form to a copy of `current`, keeping its id and photos.
pub fn build_restroom_update(current: &Restroom, update: RestroomUpdate) -> AppResult<Restroom> {
    let mut restroom = current.clone();
    apply_form(&mut restroom, update.fields)?;
    restroom.status = update.status;
    restroom.last_updated = Utc::now();
    Ok(restroom)
}

pub async fn create_restroom(pool: &SqlitePool, form: NewRestroom) -> AppResult<Restroom> {
    let restroom = build_restroom(form)?;
    restroom_repo::insert_restroom(pool, &restroom).await?;
    info!(
        "🚻 Added restroom {} ({}, {})",
        restroom.id, restroom.building_name, restroom.floor
    );
    Ok(restroom)
}

pub async fn update_restroom(
    pool: &SqlitePool,
    restroom_id: &str,
    update: RestroomUpdate,
) -> AppResult<Restroom> {
    let Some(current) = restroom_repo::load_restroom(pool, restroom_id).await? else {
        return Err(AppError::RestroomNotFound(restroom_id.to_string()));
    };
    let restroom = build_restroom_update(&current, update)?;
    if restroom_repo::update_restroom(pool, &restroom).await? == 0 {
        return Err(AppError::RestroomNotFound(restroom_id.to_string()));
    }
    Ok(restroom)
}

pub fn status_counts(restrooms: &[Restroom]) -> StatusCounts {
    restrooms
        .iter()
        .fold(StatusCounts::default(), |mut acc, restroom| {
            match restroom.status {
                RestroomStatus::Open => acc.open += 1,
                RestroomStatus::Closed => acc.closed += 1,
                RestroomStatus::Cleaning => acc.cleaning += 1,
                RestroomStatus::Blocked => acc.blocked += 1,
            }
            acc
        })
}

fn apply_form(restroom: &mut Restroom, form: NewRestroom) -> AppResult<()> {
    let building_name = form.building_name.trim();
    if building_name.is_empty() {
        return Err(AppError::Validation("building name is required".into()));
    }
    let floor = form.floor.trim();
    if floor.is_empty() {
        return Err(AppError::Validation("floor is required".into()));
    }
    let Some(location) = form.location else {
        return Err(AppError::Validation("location is required".into()));
    };
    if !location.is_valid() {
        return Err(AppError::Validation(format!(
            "location {}, {} is not a valid coordinate",
            location.latitude, location.longitude
        )));
    }

    let name = form.name.trim();
    restroom.name = if name.is_empty() {
        DEFAULT_RESTROOM_NAME.to_string()
    } else {
        name.to_string()
    };
    restroom.building_name = building_name.to_string();
    restroom.floor = floor.to_string();
    restroom.location = location;
    restroom.is_wheelchair_accessible = form.is_wheelchair_accessible;
    restroom.is_gender_neutral = form.is_gender_neutral;
    restroom.requires_wildcard = form.requires_wildcard;
    restroom.accessibility_notes = non_blank(form.accessibility_notes);
    restroom.hours = non_blank(form.hours);
    restroom.wildcard_hours = non_blank(form.wildcard_hours);
    restroom.indoor_directions = non_blank(form.indoor_directions);
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
