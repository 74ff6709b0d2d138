//! Repository error type.

use roomspec_core::error::CoreError;

/// Error returned by repository methods that apply domain rules on top of
/// SQL (transition guards, target validation, coverage checks).
///
/// Plain row-level CRUD methods return `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
