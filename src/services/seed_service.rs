use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::restroom_repo;
use crate::models::{Location, Restroom, RestroomStatus};

#[derive(Debug, Default)]
pub struct SeedReport {
    pub existing: i64,
    pub inserted: usize,
}

struct SampleRestroom {
    id: &'static str,
    name: &'static str,
    building_name: &'static str,
    floor: &'static str,
    latitude: f64,
    longitude: f64,
    wheelchair: bool,
    gender_neutral: bool,
    wildcard: bool,
    notes: Option<&'static str>,
}

const SAMPLES: [SampleRestroom; 7] = [
    SampleRestroom {
        id: "1",
        name: "First Floor Restroom",
        building_name: "Technological Institute",
        floor: "1st Floor",
        latitude: 42.057849751535045,
        longitude: -87.6758684427529,
        wheelchair: true,
        gender_neutral: false,
        wildcard: false,
        notes: Some("Wide entrance, grab bars available"),
    },
    SampleRestroom {
        id: "2",
        name: "Main Level Gender Neutral",
        building_name: "Norris University Center",
        floor: "Ground Floor",
        latitude: 42.0538565198848,
        longitude: -87.67286112088877,
        wheelchair: true,
        gender_neutral: true,
        wildcard: false,
        notes: Some("Single-stall, accessible fixtures"),
    },
    SampleRestroom {
        id: "3",
        name: "Library 2nd Floor",
        building_name: "Main Library",
        floor: "2nd Floor",
        latitude: 42.053437095890374,
        longitude: -87.6741069441599,
        wheelchair: true,
        gender_neutral: false,
        wildcard: true,
        notes: Some("Accessible, requires wildcard after 10pm"),
    },
    SampleRestroom {
        id: "4",
        name: "Basement Restroom",
        building_name: "Kresge Centennial Hall",
        floor: "Basement",
        latitude: 42.05201366755738,
        longitude: -87.67508484415995,
        wheelchair: false,
        gender_neutral: false,
        wildcard: false,
        notes: None,
    },
    SampleRestroom {
        id: "5",
        name: "Gender Neutral 3rd Floor",
        building_name: "Mudd Library",
        floor: "3rd Floor",
        latitude: 42.05840729057804,
        longitude: -87.6743465481133,
        wheelchair: true,
        gender_neutral: true,
        wildcard: false,
        notes: Some("Single-occupancy, fully accessible"),
    },
    SampleRestroom {
        id: "6",
        name: "West Wing Ground Floor",
        building_name: "Blomquist Recreation Center",
        floor: "Ground Floor",
        latitude: 42.05464061881015,
        longitude: -87.6780409404497,
        wheelchair: true,
        gender_neutral: true,
        wildcard: false,
        notes: Some("Locker room accessible restrooms"),
    },
    SampleRestroom {
        id: "7",
        name: "Second Floor East",
        building_name: "Frances Searle Building",
        floor: "2nd Floor",
        latitude: 42.0586482730594,
        longitude: -87.67355831887622,
        wheelchair: true,
        gender_neutral: false,
        wildcard: false,
        notes: None,
    },
];

/// Development dataset: seven restrooms on the Evanston campus.
pub fn sample_restrooms() -> Vec<Restroom> {
    let now = Utc::now();
    SAMPLES
        .iter()
        .map(|s| Restroom {
            id: s.id.to_string(),
            name: s.name.to_string(),
            building_name: s.building_name.to_string(),
            floor: s.floor.to_string(),
            location: Location::new(s.latitude, s.longitude),
            is_wheelchair_accessible: s.wheelchair,
            is_gender_neutral: s.gender_neutral,
            requires_wildcard: s.wildcard,
            photo_urls: Vec::new(),
            accessibility_notes: s.notes.map(str::to_string),
            hours: None,
            wildcard_hours: None,
            indoor_directions: None,
            status: RestroomStatus::Open,
            last_updated: now,
        })
        .collect()
}

/// Inserts the sample dataset, but only into an empty `restrooms` table.
pub async fn seed_if_empty(pool: &SqlitePool) -> sqlx::Result<SeedReport> {
    let existing = restroom_repo::count_restrooms(pool).await?;
    let mut report = SeedReport {
        existing,
        ..Default::default()
    };
    if existing > 0 {
        info!("🌱 Skipping seed, {} restrooms already stored", existing);
        return Ok(report);
    }

    for restroom in sample_restrooms() {
        restroom_repo::insert_restroom(pool, &restroom).await?;
        report.inserted += 1;
    }

    info!("🌱 Seeded {} sample restrooms", report.inserted);
    Ok(report)
}
