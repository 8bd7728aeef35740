//! Field rules for the `movies` entity.
//!
//! The repository never validates on its own; callers run these checks
//! before handing a movie to it.

use std::collections::HashSet;

use chrono::Datelike;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum title length in bytes.
pub const MAX_TITLE_BYTES: usize = 500;

/// Earliest plausible release year.
pub const MIN_YEAR: i32 = 1888;

/// Minimum number of genre tags on a movie.
pub const MIN_GENRES: usize = 1;

/// Maximum number of genre tags on a movie.
pub const MAX_GENRES: usize = 5;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a title is present and within [`MAX_TITLE_BYTES`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must be provided".to_string()));
    }
    if title.len() > MAX_TITLE_BYTES {
        return Err(CoreError::Validation(format!(
            "title must not be more than {MAX_TITLE_BYTES} bytes long"
        )));
    }
    Ok(())
}

/// Validate that a release year lies between [`MIN_YEAR`] and the current year.
pub fn validate_year(year: i32) -> Result<(), CoreError> {
    let current = chrono::Utc::now().year();
    if year < MIN_YEAR {
        return Err(CoreError::Validation(format!(
            "year must be >= {MIN_YEAR}, got {year}"
        )));
    }
    if year > current {
        return Err(CoreError::Validation(format!(
            "year must not be in the future, got {year}"
        )));
    }
    Ok(())
}

/// Validate that a runtime (minutes) is a positive integer.
pub fn validate_runtime(runtime: i32) -> Result<(), CoreError> {
    if runtime <= 0 {
        return Err(CoreError::Validation(format!(
            "runtime must be a positive integer, got {runtime}"
        )));
    }
    Ok(())
}

/// Validate the genre list: between [`MIN_GENRES`] and [`MAX_GENRES`]
/// non-empty tags with no duplicates.
pub fn validate_genres(genres: &[String]) -> Result<(), CoreError> {
    if genres.len() < MIN_GENRES {
        return Err(CoreError::Validation(format!(
            "must contain at least {MIN_GENRES} genre"
        )));
    }
    if genres.len() > MAX_GENRES {
        return Err(CoreError::Validation(format!(
            "must not contain more than {MAX_GENRES} genres"
        )));
    }
    if genres.iter().any(|g| g.trim().is_empty()) {
        return Err(CoreError::Validation(
            "genres must not contain empty values".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(genres.len());
    for genre in genres {
        if !seen.insert(genre.as_str()) {
            return Err(CoreError::Validation(format!(
                "genres must not contain duplicate values, got '{genre}' twice"
            )));
        }
    }
    Ok(())
}

/// Run every field rule for a movie, stopping at the first failure.
pub fn validate_movie(
    title: &str,
    year: i32,
    runtime: i32,
    genres: &[String],
) -> Result<(), CoreError> {
    validate_title(title)?;
    validate_year(year)?;
    validate_runtime(runtime)?;
    validate_genres(genres)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
