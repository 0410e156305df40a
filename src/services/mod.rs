pub mod filter_service;
pub mod geo_service;
pub mod issue_service;
pub mod locator_state;
pub mod location_service;
pub mod rating_service;
pub mod restroom_service;
pub mod review_service;
pub mod seed_service;
