use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::{issue_repo, restroom_repo, review_repo};
use crate::error::{AppError, AppResult};
use crate::models::{
    FilterOptions, Issue, Location, NewIssue, NewRestroom, NewReview, Restroom,
    RestroomStatus, RestroomUpdate, RestroomWithDistance, Review,
};
use crate::services::filter_service::{annotate_and_sort, apply_filters, find_nearest};
use crate::services::rating_service::{self, RatingSummary};
use crate::services::restroom_service::{self, StatusCounts};
use crate::services::{issue_service, review_service};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortMode {
    #[default]
    Distance,
    /// Thumbs-up share first, distance as the tie-break.
    Rating,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestroomDetail {
    pub restroom: RestroomWithDistance,
    pub reviews: Vec<Review>,
    pub issues: Vec<Issue>,
    pub rating: RatingSummary,
    pub directions_url: String,
}

/// Everything the views render from, passed around explicitly.
///
/// Collections are read once by [`LocatorState::load`]; afterwards writes
/// update the local lists first and roll back if the store rejects them.
#[derive(Debug, Clone)]
pub struct LocatorState {
    pub restrooms: Vec<Restroom>,
    /// Newest first.
    pub reviews: Vec<Review>,
    /// Newest first.
    pub issues: Vec<Issue>,
    pub filters: FilterOptions,
    pub sort_mode: SortMode,
    /// Only `open` restrooms are ranked. Applied before the accessibility filters.
    pub open_now: bool,
    pub user_location: Location,
    selected_id: Option<String>,
}

impl LocatorState {
    pub fn new(user_location: Location) -> Self {
        LocatorState {
            restrooms: Vec::new(),
            reviews: Vec::new(),
            issues: Vec::new(),
            filters: FilterOptions {
                sort_by_distance: true,
                ..Default::default()
            },
            sort_mode: SortMode::Distance,
            open_now: false,
            user_location,
            selected_id: None,
        }
    }

    pub async fn load(pool: &SqlitePool, user_location: Location) -> AppResult<Self> {
        let mut state = Self::new(user_location);
        state.restrooms = restroom_repo::list_restrooms(pool).await?;
        state.reviews = review_repo::list_reviews(pool).await?;
        state.issues = issue_repo::list_issues(pool).await?;
        info!(
            "🚻 Loaded {} restrooms, {} reviews, {} issues",
            state.restrooms.len(),
            state.reviews.len(),
            state.issues.len()
        );
        Ok(state)
    }

    pub fn set_user_location(&mut self, location: Location) {
        self.user_location = location;
    }

    /// Filtered restrooms, nearest first unless rating order was asked for.
    pub fn ranked(&self) -> Vec<RestroomWithDistance> {
        let mut ranked = annotate_and_sort(
            apply_filters(&self.candidates(), &self.filters),
            self.user_location,
        );
        if self.sort_mode == SortMode::Rating {
            let summaries = rating_service::summarize(&self.reviews);
            rating_service::sort_by_rating(&mut ranked, &summaries);
        }
        ranked
    }

    pub fn nearest(&self) -> Option<RestroomWithDistance> {
        find_nearest(&self.candidates(), self.user_location, &self.filters)
    }

    fn candidates(&self) -> Vec<Restroom> {
        self.restrooms
            .iter()
            .filter(|r| !self.open_now || r.status == RestroomStatus::Open)
            .cloned()
            .collect()
    }

    pub fn toggle_open_now(&mut self) {
        self.open_now = !self.open_now;
    }

    pub fn toggle_wheelchair_accessible(&mut self) {
        self.filters.wheelchair_accessible = !self.filters.wheelchair_accessible;
    }

    pub fn toggle_gender_neutral(&mut self) {
        self.filters.gender_neutral = !self.filters.gender_neutral;
    }

    pub fn toggle_wildcard_free(&mut self) {
        self.filters.wildcard_free = !self.filters.wildcard_free;
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.filters.sort_by_distance = mode == SortMode::Distance;
    }

    /// Turns every requirement on, open now included, and selects the closest match.
    pub fn apply_quick_find(&mut self) -> Option<RestroomWithDistance> {
        self.filters = FilterOptions::quick_find();
        self.open_now = true;
        self.sort_mode = SortMode::Distance;
        let nearest = self.nearest();
        if let Some(found) = &nearest {
            self.selected_id = Some(found.restroom.id.clone());
        }
        nearest
    }

    pub fn select(&mut self, restroom_id: &str) {
        self.selected_id = Some(restroom_id.to_string());
    }

    /// The selection if it survives the current filters, else the top ranked restroom.
    pub fn selected(&self) -> Option<RestroomWithDistance> {
        let mut ranked = self.ranked();
        let position = self
            .selected_id
            .as_deref()
            .and_then(|id| ranked.iter().position(|r| r.restroom.id == id))
            .unwrap_or(0);
        if position < ranked.len() {
            Some(ranked.swap_remove(position))
        } else {
            None
        }
    }

    pub fn detail(&self, restroom_id: &str) -> Option<RestroomDetail> {
        let restroom = self.restrooms.iter().find(|r| r.id == restroom_id)?.clone();
        let directions_url = restroom.location.directions_url();
        let restroom = annotate_and_sort(vec![restroom], self.user_location).pop()?;

        let reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.restroom_id == restroom_id)
            .cloned()
            .collect();
        let issues = self
            .issues
            .iter()
            .filter(|i| i.restroom_id == restroom_id)
            .cloned()
            .collect();

        Some(RestroomDetail {
            restroom,
            rating: rating_service::summary_for(&reviews, restroom_id),
            reviews,
            issues,
            directions_url,
        })
    }

    pub fn status_counts(&self) -> StatusCounts {
        restroom_service::status_counts(&self.restrooms)
    }

    pub async fn add_restroom(&mut self, pool: &SqlitePool, form: NewRestroom) -> AppResult<Restroom> {
        let restroom = restroom_service::build_restroom(form)?;
        self.restrooms.push(restroom.clone());

        if let Err(e) = restroom_repo::insert_restroom(pool, &restroom).await {
            warn!("🚻 Saving restroom {} failed, rolling back: {}", restroom.id, e);
            self.restrooms.retain(|r| r.id != restroom.id);
            return Err(e.into());
        }
        Ok(restroom)
    }

    pub async fn edit_restroom(
        &mut self,
        pool: &SqlitePool,
        restroom_id: &str,
        update: RestroomUpdate,
    ) -> AppResult<Restroom> {
        let Some(index) = self.restrooms.iter().position(|r| r.id == restroom_id) else {
            return Err(AppError::RestroomNotFound(restroom_id.to_string()));
        };
        let updated = restroom_service::build_restroom_update(&self.restrooms[index], update)?;
        let previous = std::mem::replace(&mut self.restrooms[index], updated.clone());

        let outcome = match restroom_repo::update_restroom(pool, &updated).await {
            Ok(0) => Err(AppError::RestroomNotFound(restroom_id.to_string())),
            Ok(_) => Ok(()),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = outcome {
            warn!("🚻 Saving edit of {} failed, rolling back: {}", restroom_id, e);
            self.restrooms[index] = previous;
            return Err(e);
        }
        Ok(updated)
    }

    pub async fn add_review(&mut self, pool: &SqlitePool, form: NewReview) -> AppResult<Review> {
        self.require_restroom(&form.restroom_id)?;
        let review = review_service::build_review(form)?;
        self.reviews.insert(0, review.clone());

        if let Err(e) = review_repo::insert_review(pool, &review).await {
            warn!("⭐ Saving review {} failed, rolling back: {}", review.id, e);
            self.reviews.retain(|r| r.id != review.id);
            return Err(e.into());
        }
        Ok(review)
    }

    pub async fn flag_review(&mut self, pool: &SqlitePool, review_id: &str) -> AppResult<()> {
        let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) else {
            return Err(AppError::ReviewNotFound(review_id.to_string()));
        };
        review.flags += 1;

        if let Err(e) = review_service::flag_review(pool, review_id).await {
            warn!("⭐ Flagging review {} failed, rolling back: {}", review_id, e);
            if let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) {
                review.flags -= 1;
            }
            return Err(e);
        }
        Ok(())
    }

    pub async fn report_issue(&mut self, pool: &SqlitePool, form: NewIssue) -> AppResult<Issue> {
        self.require_restroom(&form.restroom_id)?;
        let issue = issue_service::build_issue(form)?;
        self.issues.insert(0, issue.clone());

        if let Err(e) = issue_repo::insert_issue(pool, &issue).await {
            warn!("🚩 Saving issue {} failed, rolling back: {}", issue.id, e);
            self.issues.retain(|i| i.id != issue.id);
            return Err(e.into());
        }
        Ok(issue)
    }

    pub async fn resolve_issue(&mut self, pool: &SqlitePool, issue_id: &str) -> AppResult<()> {
        let Some(issue) = self.issues.iter_mut().find(|i| i.id == issue_id) else {
            return Err(AppError::IssueNotFound(issue_id.to_string()));
        };
        if issue.is_resolved {
            return Err(AppError::IssueAlreadyResolved(issue_id.to_string()));
        }
        issue.is_resolved = true;

        if let Err(e) = issue_service::resolve_issue(pool, issue_id).await {
            warn!("🚩 Resolving issue {} failed, rolling back: {}", issue_id, e);
            if let Some(issue) = self.issues.iter_mut().find(|i| i.id == issue_id) {
                issue.is_resolved = false;
            }
            return Err(e);
        }
        Ok(())
    }

    fn require_restroom(&self, restroom_id: &str) -> AppResult<()> {
        if self.restrooms.iter().any(|r| r.id == restroom_id) {
            Ok(())
        } else {
            Err(AppError::RestroomNotFound(restroom_id.to_string()))
        }
    }
}
