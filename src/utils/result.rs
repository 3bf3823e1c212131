use crate::utils::AppError;

/// Result alias used across services, repositories and HTTP handlers.
pub type AppResult<T> = Result<T, AppError>;
