//! Movie entity model and DTOs.

use reel_core::error::CoreError;
use reel_core::movie::validate_movie;
use reel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A movie row from the `movies` table.
///
/// `id`, `created_at` and `version` are assigned by the database. `version`
/// starts at 1 and is bumped on every successful update; callers send back
/// the value they last read so concurrent edits can be detected.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub year: i32,
    pub runtime: i32,
    pub genres: Vec<String>,
    pub version: i32,
}

impl Movie {
    /// Check the caller-editable fields against the catalogue rules.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_movie(&self.title, self.year, self.runtime, &self.genres)
    }

    /// Overwrite the caller-editable fields, leaving identity and version alone.
    pub fn apply(&mut self, input: CreateMovie) {
        self.title = input.title;
        self.year = input.year;
        self.runtime = input.runtime;
        self.genres = input.genres;
    }
}

/// DTO for creating a new movie.
///
/// Carries no identity fields, so the database alone assigns them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub year: i32,
    pub runtime: i32,
    pub genres: Vec<String>,
}

impl CreateMovie {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_movie(&self.title, self.year, self.runtime, &self.genres)
    }
}

/// A search result row carrying the window count of all matches.
#[derive(Debug, FromRow)]
pub(crate) struct CountedMovie {
    #[sqlx(flatten)]
    pub movie: Movie,
    pub total_records: i64,
}
