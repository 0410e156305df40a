use crate::models::{FilterOptions, Location, Restroom, RestroomWithDistance};
use crate::services::geo_service::{distance_meters, walk_time_minutes};

/// Keeps restrooms meeting every requirement switched on in `options`, in input order.
pub fn apply_filters(restrooms: &[Restroom], options: &FilterOptions) -> Vec<Restroom> {
    restrooms
        .iter()
        .filter(|restroom| matches_filters(restroom, options))
        .cloned()
        .collect()
}

pub fn matches_filters(restroom: &Restroom, options: &FilterOptions) -> bool {
    if options.wheelchair_accessible && !restroom.is_wheelchair_accessible {
        return false;
    }
    if options.gender_neutral && !restroom.is_gender_neutral {
        return false;
    }
    if options.wildcard_free && restroom.requires_wildcard {
        return false;
    }
    true
}

/// Attaches distance and walk time from `user_location`, nearest first.
///
/// The sort is stable, so equal distances keep their input order. Output is
/// always distance ordered; `sort_by_distance` is not consulted here.
pub fn annotate_and_sort(
    restrooms: Vec<Restroom>,
    user_location: Location,
) -> Vec<RestroomWithDistance> {
    let mut annotated: Vec<RestroomWithDistance> = restrooms
        .into_iter()
        .map(|restroom| {
            let distance = distance_meters(user_location, restroom.location);
            RestroomWithDistance {
                restroom,
                distance,
                estimated_walk_time: walk_time_minutes(distance),
            }
        })
        .collect();

    // total_cmp keeps the order total; NaN distances from bad coordinates sink to the end.
    annotated.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    annotated
}

/// Filters, ranks and returns the closest match, if any survives.
pub fn find_nearest(
    restrooms: &[Restroom],
    user_location: Location,
    options: &FilterOptions,
) -> Option<RestroomWithDistance> {
    annotate_and_sort(apply_filters(restrooms, options), user_location)
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RestroomStatus;
    use chrono::Utc;

    fn restroom(id: &str, lat: f64, lon: f64, wheelchair: bool, neutral: bool, wildcard: bool) -> Restroom {
        Restroom {
            id: id.to_string(),
            name: format!("Restroom {}", id),
            building_name: "Building".into(),
            floor: "1".into(),
            location: Location::new(lat, lon),
            is_wheelchair_accessible: wheelchair,
            is_gender_neutral: neutral,
            requires_wildcard: wildcard,
            photo_urls: vec![],
            accessibility_notes: None,
            hours: None,
            wildcard_hours: None,
            indoor_directions: None,
            status: RestroomStatus::Open,
            last_updated: Utc::now(),
        }
    }

    fn fixture() -> Vec<Restroom> {
        vec![
            restroom("1", 42.0578, -87.6758, true, false, false),
            restroom("2", 42.0538, -87.6728, true, true, false),
            restroom("3", 42.0534, -87.6741, true, false, true),
            restroom("4", 42.0520, -87.6750, false, false, false),
            restroom("5", 42.0584, -87.6743, false, true, true),
        ]
    }

    fn ids<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        items.into_iter().collect()
    }

    #[test]
    fn no_options_keeps_everything_in_order() {
        let input = fixture();
        let out = apply_filters(&input, &FilterOptions::default());
        assert_eq!(out, input);
    }

    #[test]
    fn wheelchair_filter_keeps_only_accessible() {
        let options = FilterOptions {
            wheelchair_accessible: true,
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &options);
        assert!(out.iter().all(|r| r.is_wheelchair_accessible));
        assert_eq!(ids(out.iter().map(|r| r.id.as_str())), vec!["1", "2", "3"]);
    }

    #[test]
    fn requirements_are_anded() {
        let options = FilterOptions {
            gender_neutral: true,
            wildcard_free: true,
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &options);
        assert_eq!(ids(out.iter().map(|r| r.id.as_str())), vec!["2"]);

        let out = apply_filters(&fixture(), &FilterOptions::quick_find());
        assert_eq!(ids(out.iter().map(|r| r.id.as_str())), vec!["2"]);
    }

    #[test]
    fn wildcard_free_drops_card_only_restrooms() {
        let options = FilterOptions {
            wildcard_free: true,
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &options);
        assert_eq!(ids(out.iter().map(|r| r.id.as_str())), vec!["1", "2", "4"]);
    }

    #[test]
    fn sorted_output_is_non_decreasing() {
        let user = Location::new(42.0551, -87.6750);
        let out = annotate_and_sort(fixture(), user);
        assert_eq!(out.len(), 5);
        assert!(out.windows(2).all(|w| w[0].distance <= w[1].distance));
        for item in &out {
            assert_eq!(item.estimated_walk_time, walk_time_minutes(item.distance));
        }
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let user = Location::new(42.0551, -87.6750);
        let input = vec![
            restroom("far", 42.0600, -87.6750, true, true, true),
            restroom("twin-b", 42.0560, -87.6750, true, true, true),
            restroom("twin-a", 42.0560, -87.6750, true, true, true),
            restroom("here", 42.0551, -87.6750, true, true, true),
        ];
        let out = annotate_and_sort(input, user);
        assert_eq!(
            ids(out.iter().map(|r| r.restroom.id.as_str())),
            vec!["here", "twin-b", "twin-a", "far"]
        );
    }

    #[test]
    fn nan_coordinates_sink_to_the_end() {
        let user = Location::new(42.0551, -87.6750);
        let input = vec![
            restroom("broken", f64::NAN, -87.6750, true, true, true),
            restroom("ok", 42.0560, -87.6750, true, true, true),
        ];
        let out = annotate_and_sort(input, user);
        assert_eq!(out[0].restroom.id, "ok");
        assert!(out[1].distance.is_nan());
    }

    #[test]
    fn same_spot_and_nearby_campus_building() {
        let user = Location::new(42.0551, -87.6750);
        let input = vec![
            restroom("B", 42.0586, -87.6736, true, true, false),
            restroom("A", 42.0551, -87.6750, true, true, false),
        ];
        let out = annotate_and_sort(input, user);

        assert_eq!(out[0].restroom.id, "A");
        assert_eq!(out[0].distance, 0.0);
        assert_eq!(out[0].estimated_walk_time, 0);
        assert_eq!(crate::services::geo_service::format_distance(out[0].distance), "0m");

        assert_eq!(out[1].restroom.id, "B");
        assert!(out[1].distance > 0.0);
        assert!(out[1].estimated_walk_time >= 1);
        assert_eq!(crate::services::geo_service::format_distance(out[1].distance), "406m");
    }

    #[test]
    fn nearest_respects_filters() {
        let user = Location::new(42.0520, -87.6750);
        let nearest = find_nearest(&fixture(), user, &FilterOptions::default()).unwrap();
        assert_eq!(nearest.restroom.id, "4");

        let options = FilterOptions {
            wheelchair_accessible: true,
            ..Default::default()
        };
        let nearest = find_nearest(&fixture(), user, &options).unwrap();
        assert!(nearest.restroom.is_wheelchair_accessible);
    }

    #[test]
    fn nearest_of_nothing_is_none() {
        let user = Location::new(42.0551, -87.6750);
        assert!(find_nearest(&[], user, &FilterOptions::default()).is_none());

        let only_inaccessible = vec![restroom("x", 42.0, -87.0, false, false, true)];
        assert!(find_nearest(&only_inaccessible, user, &FilterOptions::quick_find()).is_none());
        assert!(apply_filters(&only_inaccessible, &FilterOptions::quick_find()).is_empty());
        assert!(annotate_and_sort(vec![], user).is_empty());
    }
}
