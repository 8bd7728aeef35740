//! Errors returned by the repository layer.
//!
//! Only two store outcomes are translated: "no rows" becomes
//! [`RepoError::RecordNotFound`] or [`RepoError::EditConflict`] depending on
//! the call. Everything else is passed through as [`RepoError::Database`].

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The requested row does not exist.
    #[error("record not found")]
    RecordNotFound,

    /// The version supplied with an update no longer matches the stored row.
    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,

    /// The call did not finish within its deadline and was cancelled.
    #[error("database call exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
