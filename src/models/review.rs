use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Up => "up",
            Rating::Down => "down",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "up" => Some(Rating::Up),
            "down" => Some(Rating::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub restroom_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Moderation reports against this review.
    pub flags: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: String,
    pub restroom_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub flags: i64,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            restroom_id: row.restroom_id,
            user_id: row.user_id,
            user_name: row.user_name,
            // Anything other than an explicit thumbs-up counts against the restroom.
            rating: Rating::parse(&row.rating).unwrap_or(Rating::Down),
            comment: row.comment.filter(|c| !c.trim().is_empty()),
            created_at: row.created_at,
            flags: row.flags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub restroom_id: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub rating: Rating,
    pub comment: Option<String>,
}
