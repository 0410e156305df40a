use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestroomStatus {
    Open,
    Closed,
    Cleaning,
    Blocked,
}

impl RestroomStatus {
    pub const ALL: [RestroomStatus; 4] = [
        RestroomStatus::Open,
        RestroomStatus::Closed,
        RestroomStatus::Cleaning,
        RestroomStatus::Blocked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RestroomStatus::Open => "open",
            RestroomStatus::Closed => "closed",
            RestroomStatus::Cleaning => "cleaning",
            RestroomStatus::Blocked => "blocked",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "open" => Some(RestroomStatus::Open),
            "closed" => Some(RestroomStatus::Closed),
            "cleaning" => Some(RestroomStatus::Cleaning),
            "blocked" => Some(RestroomStatus::Blocked),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RestroomStatus::Open => "Open",
            RestroomStatus::Closed => "Closed",
            RestroomStatus::Cleaning => "Closed for Cleaning",
            RestroomStatus::Blocked => "Temporarily Blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restroom {
    pub id: String,
    pub name: String,
    pub building_name: String,
    pub floor: String,
    pub location: Location,
    pub is_wheelchair_accessible: bool,
    pub is_gender_neutral: bool,
    pub requires_wildcard: bool,
    pub photo_urls: Vec<String>,
    pub accessibility_notes: Option<String>,
    pub hours: Option<String>,
    pub wildcard_hours: Option<String>,
    pub indoor_directions: Option<String>,
    pub status: RestroomStatus,
    pub last_updated: DateTime<Utc>,
}

/// Raw `restrooms` row as stored; flags are 0/1 and photos a JSON array.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RestroomRow {
    pub id: String,
    pub name: String,
    pub building_name: String,
    pub floor: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_wheelchair_accessible: i64,
    pub is_gender_neutral: i64,
    pub requires_wildcard: i64,
    pub photo_urls: Option<String>,
    pub accessibility_notes: Option<String>,
    pub hours: Option<String>,
    pub wildcard_hours: Option<String>,
    pub indoor_directions: Option<String>,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}

impl From<RestroomRow> for Restroom {
    fn from(row: RestroomRow) -> Self {
        let photo_urls = serde_json::from_str::<Vec<String>>(row.photo_urls.as_deref().unwrap_or("[]"))
            .unwrap_or_default()
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        Restroom {
            id: row.id,
            name: row.name,
            building_name: row.building_name,
            floor: row.floor,
            location: Location::new(row.latitude, row.longitude),
            is_wheelchair_accessible: row.is_wheelchair_accessible == 1,
            is_gender_neutral: row.is_gender_neutral == 1,
            requires_wildcard: row.requires_wildcard == 1,
            photo_urls,
            accessibility_notes: row.accessibility_notes,
            hours: row.hours,
            wildcard_hours: row.wildcard_hours,
            indoor_directions: row.indoor_directions,
            status: RestroomStatus::parse(&row.status).unwrap_or(RestroomStatus::Closed),
            last_updated: row.last_updated,
        }
    }
}

/// A restroom ranked relative to the user. Only ever produced by the filter pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestroomWithDistance {
    #[serde(flatten)]
    pub restroom: Restroom,
    /// Meters from the user.
    pub distance: f64,
    /// Whole minutes at walking pace, rounded up.
    pub estimated_walk_time: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub wheelchair_accessible: bool,
    pub gender_neutral: bool,
    /// Require `requires_wildcard == false`.
    pub wildcard_free: bool,
    pub sort_by_distance: bool,
}

impl FilterOptions {
    /// Every requirement on, nearest first.
    pub fn quick_find() -> Self {
        FilterOptions {
            wheelchair_accessible: true,
            gender_neutral: true,
            wildcard_free: true,
            sort_by_distance: true,
        }
    }
}

/// Fields collected by the add/edit restroom forms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestroom {
    pub name: String,
    pub building_name: String,
    pub floor: String,
    pub location: Option<Location>,
    pub is_wheelchair_accessible: bool,
    pub is_gender_neutral: bool,
    pub requires_wildcard: bool,
    pub accessibility_notes: Option<String>,
    pub hours: Option<String>,
    pub wildcard_hours: Option<String>,
    pub indoor_directions: Option<String>,
}

/// Edit flow payload: the form fields plus the operational status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestroomUpdate {
    #[serde(flatten)]
    pub fields: NewRestroom,
    pub status: RestroomStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RestroomRow {
        RestroomRow {
            id: "r1".into(),
            name: "First Floor".into(),
            building_name: "Tech".into(),
            floor: "1".into(),
            latitude: 42.0,
            longitude: -87.0,
            is_wheelchair_accessible: 1,
            is_gender_neutral: 0,
            requires_wildcard: 1,
            photo_urls: Some(r#"["a.jpg", " ", "b.jpg"]"#.into()),
            accessibility_notes: None,
            hours: None,
            wildcard_hours: None,
            indoor_directions: None,
            status: "cleaning".into(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn maps_row_flags_and_photos() {
        let restroom = Restroom::from(row());
        assert!(restroom.is_wheelchair_accessible);
        assert!(!restroom.is_gender_neutral);
        assert!(restroom.requires_wildcard);
        assert_eq!(restroom.photo_urls, vec!["a.jpg", "b.jpg"]);
        assert_eq!(restroom.status, RestroomStatus::Cleaning);
        assert_eq!(restroom.location, Location::new(42.0, -87.0));
    }

    #[test]
    fn tolerates_bad_status_and_photo_json() {
        let mut raw = row();
        raw.status = "haunted".into();
        raw.photo_urls = Some("not json".into());
        let restroom = Restroom::from(raw);
        assert_eq!(restroom.status, RestroomStatus::Closed);
        assert!(restroom.photo_urls.is_empty());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in RestroomStatus::ALL {
            assert_eq!(RestroomStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RestroomStatus::Cleaning.label(), "Closed for Cleaning");
    }
}
