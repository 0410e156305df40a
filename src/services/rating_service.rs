use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Rating, RestroomWithDistance, Review};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingSummary {
    pub up: u32,
    pub down: u32,
}

impl RatingSummary {
    pub fn total(&self) -> u32 {
        self.up + self.down
    }

    /// Share of thumbs-up in `[0, 1]`; unrated restrooms score 0.
    pub fn score(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.up) / f64::from(total),
        }
    }

    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Up => self.up += 1,
            Rating::Down => self.down += 1,
        }
    }
}

/// Tally per restroom id.
pub fn summarize(reviews: &[Review]) -> HashMap<String, RatingSummary> {
    let mut summaries: HashMap<String, RatingSummary> = HashMap::new();
    for review in reviews {
        summaries
            .entry(review.restroom_id.clone())
            .or_default()
            .record(review.rating);
    }
    summaries
}

pub fn summary_for(reviews: &[Review], restroom_id: &str) -> RatingSummary {
    let mut summary = RatingSummary::default();
    for review in reviews.iter().filter(|r| r.restroom_id == restroom_id) {
        summary.record(review.rating);
    }
    summary
}

/// Best rated first. Layered on an already distance-sorted list: the sort is
/// stable, so equal scores stay nearest first.
pub fn sort_by_rating(
    ranked: &mut [RestroomWithDistance],
    summaries: &HashMap<String, RatingSummary>,
) {
    let score = |item: &RestroomWithDistance| {
        summaries
            .get(&item.restroom.id)
            .map(RatingSummary::score)
            .unwrap_or(0.0)
    };
    ranked.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Restroom, RestroomStatus};
    use chrono::Utc;

    fn review(restroom_id: &str, rating: Rating) -> Review {
        Review {
            id: format!("{}-{:?}", restroom_id, rating),
            restroom_id: restroom_id.to_string(),
            user_id: "guest-user".into(),
            user_name: "Guest User".into(),
            rating,
            comment: None,
            created_at: Utc::now(),
            flags: 0,
        }
    }

    fn ranked(id: &str, distance: f64) -> RestroomWithDistance {
        RestroomWithDistance {
            restroom: Restroom {
                id: id.to_string(),
                name: id.to_string(),
                building_name: "B".into(),
                floor: "1".into(),
                location: Location::new(0.0, 0.0),
                is_wheelchair_accessible: false,
                is_gender_neutral: false,
                requires_wildcard: false,
                photo_urls: vec![],
                accessibility_notes: None,
                hours: None,
                wildcard_hours: None,
                indoor_directions: None,
                status: RestroomStatus::Open,
                last_updated: Utc::now(),
            },
            distance,
            estimated_walk_time: 1,
        }
    }

    #[test]
    fn tallies_per_restroom() {
        let reviews = vec![
            review("a", Rating::Up),
            review("a", Rating::Down),
            review("a", Rating::Up),
            review("b", Rating::Down),
        ];
        let summaries = summarize(&reviews);
        assert_eq!(summaries["a"], RatingSummary { up: 2, down: 1 });
        assert_eq!(summaries["b"], RatingSummary { up: 0, down: 1 });
        assert_eq!(summary_for(&reviews, "a"), summaries["a"]);
        assert_eq!(summary_for(&reviews, "zzz").total(), 0);
        assert_eq!(RatingSummary::default().score(), 0.0);
    }

    #[test]
    fn rating_order_keeps_distance_order_for_ties() {
        let reviews = vec![
            review("far-good", Rating::Up),
            review("mid-bad", Rating::Down),
        ];
        let summaries = summarize(&reviews);
        let mut list = vec![
            ranked("near-unrated", 10.0),
            ranked("mid-bad", 20.0),
            ranked("mid-unrated", 30.0),
            ranked("far-good", 40.0),
        ];
        sort_by_rating(&mut list, &summaries);
        let ids: Vec<&str> = list.iter().map(|r| r.restroom.id.as_str()).collect();
        assert_eq!(ids, vec!["far-good", "near-unrated", "mid-bad", "mid-unrated"]);
    }
}
