use sqlx::SqlitePool;

use crate::models::{Restroom, RestroomRow};

const SQL_RESTROOM_COLUMNS: &str = r#"
  id,
  name,
  building_name,
  floor,
  latitude,
  longitude,
  is_wheelchair_accessible,
  is_gender_neutral,
  requires_wildcard,
  photo_urls,
  accessibility_notes,
  hours,
  wildcard_hours,
  indoor_directions,
  status,
  last_updated
"#;

const SQL_INSERT_RESTROOM: &str = r#"
INSERT INTO restrooms (
  id,
  name,
  building_name,
  floor,
  latitude,
  longitude,
  is_wheelchair_accessible,
  is_gender_neutral,
  requires_wildcard,
  photo_urls,
  accessibility_notes,
  hours,
  wildcard_hours,
  indoor_directions,
  status,
  last_updated
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
"#;

const SQL_UPDATE_RESTROOM: &str = r#"
UPDATE restrooms
SET name = ?2,
    building_name = ?3,
    floor = ?4,
    latitude = ?5,
    longitude = ?6,
    is_wheelchair_accessible = ?7,
    is_gender_neutral = ?8,
    requires_wildcard = ?9,
    photo_urls = ?10,
    accessibility_notes = ?11,
    hours = ?12,
    wildcard_hours = ?13,
    indoor_directions = ?14,
    status = ?15,
    last_updated = ?16
WHERE id = ?1
"#;

const SQL_COUNT_RESTROOMS: &str = "SELECT COUNT(*) FROM restrooms";

/// All restrooms in insertion order.
pub async fn list_restrooms(pool: &SqlitePool) -> sqlx::Result<Vec<Restroom>> {
    let sql = format!(
        "SELECT {} FROM restrooms ORDER BY rowid ASC",
        SQL_RESTROOM_COLUMNS
    );
    let rows = sqlx::query_as::<_, RestroomRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Restroom::from).collect())
}

pub async fn load_restroom(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Restroom>> {
    let sql = format!(
        "SELECT {} FROM restrooms WHERE id = ?1",
        SQL_RESTROOM_COLUMNS
    );
    let row = sqlx::query_as::<_, RestroomRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Restroom::from))
}

pub async fn insert_restroom(pool: &SqlitePool, restroom: &Restroom) -> sqlx::Result<()> {
    write_restroom(pool, SQL_INSERT_RESTROOM, restroom).await?;
    Ok(())
}

/// Overwrites every column of the row with `restroom.id`; returns rows affected.
pub async fn update_restroom(pool: &SqlitePool, restroom: &Restroom) -> sqlx::Result<u64> {
    write_restroom(pool, SQL_UPDATE_RESTROOM, restroom).await
}

pub async fn count_restrooms(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_RESTROOMS)
        .fetch_one(pool)
        .await
}

async fn write_restroom(pool: &SqlitePool, sql: &str, restroom: &Restroom) -> sqlx::Result<u64> {
    let photo_urls = serde_json::to_string(&restroom.photo_urls)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    let res = sqlx::query(sql)
        .bind(&restroom.id)
        .bind(&restroom.name)
        .bind(&restroom.building_name)
        .bind(&restroom.floor)
        .bind(restroom.location.latitude)
        .bind(restroom.location.longitude)
        .bind(restroom.is_wheelchair_accessible as i64)
        .bind(restroom.is_gender_neutral as i64)
        .bind(restroom.requires_wildcard as i64)
        .bind(photo_urls)
        .bind(restroom.accessibility_notes.as_deref())
        .bind(restroom.hours.as_deref())
        .bind(restroom.wildcard_hours.as_deref())
        .bind(restroom.indoor_directions.as_deref())
        .bind(restroom.status.as_str())
        .bind(restroom.last_updated)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
