#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}
