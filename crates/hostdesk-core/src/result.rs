//! Convenience result type alias for HostDesk.

use crate::error::AppError;

/// A specialized `Result` type for HostDesk operations.
pub type AppResult<T> = Result<T, AppError>;
