use sqlx::SqlitePool;

use crate::models::{Review, ReviewRow};

const SQL_LIST_REVIEWS: &str = r#"
SELECT
  id,
  restroom_id,
  user_id,
  user_name,
  rating,
  comment,
  created_at,
  flags
FROM reviews
ORDER BY created_at DESC, rowid DESC
"#;

const SQL_LIST_REVIEWS_FOR_RESTROOM: &str = r#"
SELECT
  id,
  restroom_id,
  user_id,
  user_name,
  rating,
  comment,
  created_at,
  flags
FROM reviews
WHERE restroom_id = ?1
ORDER BY created_at DESC, rowid DESC
"#;

const SQL_INSERT_REVIEW: &str = r#"
INSERT INTO reviews (
  id,
  restroom_id,
  user_id,
  user_name,
  rating,
  comment,
  created_at,
  flags
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

const SQL_INCREMENT_REVIEW_FLAGS: &str = r#"
UPDATE reviews
SET flags = flags + 1
WHERE id = ?1
"#;

/// Newest first.
pub async fn list_reviews(pool: &SqlitePool) -> sqlx::Result<Vec<Review>> {
    let rows = sqlx::query_as::<_, ReviewRow>(SQL_LIST_REVIEWS)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Review::from).collect())
}

pub async fn list_reviews_for_restroom(
    pool: &SqlitePool,
    restroom_id: &str,
) -> sqlx::Result<Vec<Review>> {
    let rows = sqlx::query_as::<_, ReviewRow>(SQL_LIST_REVIEWS_FOR_RESTROOM)
        .bind(restroom_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Review::from).collect())
}

pub async fn insert_review(pool: &SqlitePool, review: &Review) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_REVIEW)
        .bind(&review.id)
        .bind(&review.restroom_id)
        .bind(&review.user_id)
        .bind(&review.user_name)
        .bind(review.rating.as_str())
        .bind(review.comment.as_deref())
        .bind(review.created_at)
        .bind(review.flags)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn increment_review_flags(pool: &SqlitePool, review_id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INCREMENT_REVIEW_FLAGS)
        .bind(review_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
