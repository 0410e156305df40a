#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("database error {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid submission: {0}")]
    Validation(String),
    #[error("restroom {0} not found")]
    RestroomNotFound(String),
    #[error("review {0} not found")]
    ReviewNotFound(String),
    #[error("issue {0} not found")]
    IssueNotFound(String),
    #[error("issue {0} is already resolved")]
    IssueAlreadyResolved(String),
    #[error("config error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
