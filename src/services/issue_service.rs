use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::{issue_repo, restroom_repo};
use crate::error::{AppError, AppResult};
use crate::models::{Issue, NewIssue};

pub const MAX_DESCRIPTION_CHARS: usize = 500;

pub fn build_issue(form: NewIssue) -> AppResult<Issue> {
    let description = form.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation("describe the issue".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "description is longer than {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }

    Ok(Issue {
        id: Uuid::new_v4().to_string(),
        restroom_id: form.restroom_id,
        description: description.to_string(),
        is_resolved: false,
        created_at: Utc::now(),
    })
}

pub async fn report_issue(pool: &SqlitePool, form: NewIssue) -> AppResult<Issue> {
    let issue = build_issue(form)?;
    if restroom_repo::load_restroom(pool, &issue.restroom_id)
        .await?
        .is_none()
    {
        return Err(AppError::RestroomNotFound(issue.restroom_id));
    }
    issue_repo::insert_issue(pool, &issue).await?;
    info!("🚩 Issue {} reported for restroom {}", issue.id, issue.restroom_id);
    Ok(issue)
}

/// Open -> resolved, once. A second resolve is an error, not a no-op.
pub async fn resolve_issue(pool: &SqlitePool, issue_id: &str) -> AppResult<()> {
    if issue_repo::mark_issue_resolved(pool, issue_id).await? > 0 {
        return Ok(());
    }
    match issue_repo::load_issue(pool, issue_id).await? {
        Some(_) => Err(AppError::IssueAlreadyResolved(issue_id.to_string())),
        None => Err(AppError::IssueNotFound(issue_id.to_string())),
    }
}
