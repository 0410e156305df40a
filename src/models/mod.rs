pub mod issue;
pub mod location;
pub mod restroom;
pub mod review;

pub use issue::{Issue, IssueRow, NewIssue};
pub use location::Location;
pub use restroom::{
    FilterOptions, NewRestroom, Restroom, RestroomRow, RestroomStatus, RestroomUpdate,
    RestroomWithDistance,
};
pub use review::{NewReview, Rating, Review, ReviewRow};
