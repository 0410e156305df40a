use sqlx::SqlitePool;

use crate::models::{Issue, IssueRow};

const SQL_LIST_ISSUES: &str = r#"
SELECT
  id,
  restroom_id,
  description,
  is_resolved,
  created_at
FROM issues
ORDER BY created_at DESC, rowid DESC
"#;

const SQL_LIST_ISSUES_FOR_RESTROOM: &str = r#"
SELECT
  id,
  restroom_id,
  description,
  is_resolved,
  created_at
FROM issues
WHERE restroom_id = ?1
ORDER BY created_at DESC, rowid DESC
"#;

const SQL_LOAD_ISSUE: &str = r#"
SELECT
  id,
  restroom_id,
  description,
  is_resolved,
  created_at
FROM issues
WHERE id = ?1
"#;

const SQL_INSERT_ISSUE: &str = r#"
INSERT INTO issues (
  id,
  restroom_id,
  description,
  is_resolved,
  created_at
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

// Resolution is one-way; resolved rows are left untouched.
const SQL_MARK_ISSUE_RESOLVED: &str = r#"
UPDATE issues
SET is_resolved = 1
WHERE id = ?1
  AND is_resolved = 0
"#;

pub async fn list_issues(pool: &SqlitePool) -> sqlx::Result<Vec<Issue>> {
    let rows = sqlx::query_as::<_, IssueRow>(SQL_LIST_ISSUES)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Issue::from).collect())
}

pub async fn list_issues_for_restroom(
    pool: &SqlitePool,
    restroom_id: &str,
) -> sqlx::Result<Vec<Issue>> {
    let rows = sqlx::query_as::<_, IssueRow>(SQL_LIST_ISSUES_FOR_RESTROOM)
        .bind(restroom_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Issue::from).collect())
}

pub async fn load_issue(pool: &SqlitePool, issue_id: &str) -> sqlx::Result<Option<Issue>> {
    let row = sqlx::query_as::<_, IssueRow>(SQL_LOAD_ISSUE)
        .bind(issue_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Issue::from))
}

pub async fn insert_issue(pool: &SqlitePool, issue: &Issue) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_ISSUE)
        .bind(&issue.id)
        .bind(&issue.restroom_id)
        .bind(&issue.description)
        .bind(issue.is_resolved as i64)
        .bind(issue.created_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn mark_issue_resolved(pool: &SqlitePool, issue_id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_MARK_ISSUE_RESOLVED)
        .bind(issue_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
