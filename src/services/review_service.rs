use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{restroom_repo, review_repo};
use crate::error::{AppError, AppResult};
use crate::models::{NewReview, Review};

pub const GUEST_USER_ID: &str = "guest-user";
pub const GUEST_USER_NAME: &str = "Guest User";
pub const MAX_COMMENT_CHARS: usize = 500;

/// Validates a submission; authorless reviews are attributed to the guest user.
pub fn build_review(form: NewReview) -> AppResult<Review> {
    let comment = form
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(comment) = &comment {
        if comment.chars().count() > MAX_COMMENT_CHARS {
            return Err(AppError::Validation(format!(
                "comment is longer than {} characters",
                MAX_COMMENT_CHARS
            )));
        }
    }

    let user_id = form
        .user_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| GUEST_USER_ID.to_string());
    let user_name = form
        .user_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| GUEST_USER_NAME.to_string());

    Ok(Review {
        id: Uuid::new_v4().to_string(),
        restroom_id: form.restroom_id,
        user_id,
        user_name,
        rating: form.rating,
        comment,
        created_at: Utc::now(),
        flags: 0,
    })
}

pub async fn submit_review(pool: &SqlitePool, form: NewReview) -> AppResult<Review> {
    let review = build_review(form)?;
    if restroom_repo::load_restroom(pool, &review.restroom_id)
        .await?
        .is_none()
    {
        return Err(AppError::RestroomNotFound(review.restroom_id));
    }
    review_repo::insert_review(pool, &review).await?;
    Ok(review)
}

pub async fn flag_review(pool: &SqlitePool, review_id: &str) -> AppResult<()> {
    if review_repo::increment_review_flags(pool, review_id).await? == 0 {
        return Err(AppError::ReviewNotFound(review_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::models::Rating;
    use crate::services::seed_service;

    fn form(restroom_id: &str, comment: Option<&str>) -> NewReview {
        NewReview {
            restroom_id: restroom_id.to_string(),
            user_id: None,
            user_name: None,
            rating: Rating::Up,
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn blank_comment_becomes_none_and_guest_is_author() {
        let review = build_review(form("1", Some("   "))).unwrap();
        assert_eq!(review.comment, None);
        assert_eq!(review.user_id, GUEST_USER_ID);
        assert_eq!(review.user_name, GUEST_USER_NAME);
        assert_eq!(review.flags, 0);
    }

    #[test]
    fn long_comment_is_rejected() {
        let long = "a".repeat(MAX_COMMENT_CHARS + 1);
        assert!(matches!(
            build_review(form("1", Some(&long))),
            Err(AppError::Validation(_))
        ));
        let exact = "b".repeat(MAX_COMMENT_CHARS);
        assert!(build_review(form("1", Some(&exact))).is_ok());
    }

    #[tokio::test]
    async fn submit_and_flag() {
        let pool = test_pool().await;
        seed_service::seed_if_empty(&pool).await.unwrap();

        let review = submit_review(&pool, form("2", Some(" No scan needed. ")))
            .await
            .unwrap();
        assert_eq!(review.comment.as_deref(), Some("No scan needed."));

        flag_review(&pool, &review.id).await.unwrap();
        flag_review(&pool, &review.id).await.unwrap();
        let stored = review_repo::list_reviews_for_restroom(&pool, "2")
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].flags, 2);

        assert!(matches!(
            flag_review(&pool, "missing").await,
            Err(AppError::ReviewNotFound(_))
        ));
    }

    #[tokio::test]
    async fn review_for_unknown_restroom_fails() {
        let pool = test_pool().await;
        let err = submit_review(&pool, form("ghost", None)).await.unwrap_err();
        assert!(matches!(err, AppError::RestroomNotFound(id) if id == "ghost"));
    }
}
