//! Repository for the `movies` table.
//!
//! Every method issues exactly one statement and is bounded by
//! [`QUERY_TIMEOUT`].

use reel_core::filters::{Filters, PaginationMetadata};
use reel_core::timeouts::QUERY_TIMEOUT;
use reel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::deadline::with_deadline;
use crate::error::{RepoError, RepoResult};
use crate::models::movie::{CountedMovie, CreateMovie, Movie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, year, runtime, genres, version";

/// Title and genre predicate for listings. An empty title or an empty genre
/// array disables the respective filter.
const SEARCH_PREDICATE: &str = "\
    (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
    AND (genres @> $2 OR $2 = '{}')";

/// Provides CRUD and search operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row with its
    /// database-assigned `id`, `created_at` and `version`.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> RepoResult<Movie> {
        let query = format!(
            "INSERT INTO movies (title, year, runtime, genres) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Movie>(&query)
                .bind(&input.title)
                .bind(input.year)
                .bind(input.runtime)
                .bind(&input.genres)
                .fetch_one(pool),
        )
        .await
    }

    /// Insert `movie` and hydrate it in place.
    ///
    /// Whatever `id`, `created_at` and `version` the value carried are
    /// ignored and overwritten with the values the database assigned.
    pub async fn insert(pool: &PgPool, movie: &mut Movie) -> RepoResult<()> {
        let (id, created_at, version) = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, (DbId, Timestamp, i32)>(
                "INSERT INTO movies (title, year, runtime, genres) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, created_at, version",
            )
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .fetch_one(pool),
        )
        .await?;

        movie.id = id;
        movie.created_at = created_at;
        movie.version = version;
        Ok(())
    }

    /// Find a movie by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> RepoResult<Option<Movie>> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Movie>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await
    }

    /// Fetch a movie by its primary key, failing with
    /// [`RepoError::RecordNotFound`] when no row matches.
    pub async fn get(pool: &PgPool, id: DbId) -> RepoResult<Movie> {
        Self::find_by_id(pool, id).await?.ok_or_else(|| {
            tracing::debug!(movie_id = id, "Movie not found");
            RepoError::RecordNotFound
        })
    }

    /// Write the editable fields of `movie` if its `version` still matches
    /// the stored row.
    ///
    /// The check and the write are one conditional statement. On success the
    /// bumped version is written back onto `movie` and returned. If another
    /// writer got there first the predicate matches nothing and
    /// [`RepoError::EditConflict`] is returned; callers are expected to have
    /// confirmed the row exists beforehand.
    pub async fn update(pool: &PgPool, movie: &mut Movie) -> RepoResult<i32> {
        let version = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_scalar::<_, i32>(
                "UPDATE movies SET \
                    title = $1, \
                    year = $2, \
                    runtime = $3, \
                    genres = $4, \
                    version = version + 1 \
                 WHERE id = $5 AND version = $6 \
                 RETURNING version",
            )
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .bind(movie.id)
            .bind(movie.version)
            .fetch_optional(pool),
        )
        .await?;

        match version {
            Some(version) => {
                movie.version = version;
                Ok(version)
            }
            None => {
                tracing::debug!(
                    movie_id = movie.id,
                    expected_version = movie.version,
                    "Movie update lost a version race"
                );
                Err(RepoError::EditConflict)
            }
        }
    }

    /// Permanently delete a movie by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> RepoResult<()> {
        let result = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query("DELETE FROM movies WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(movie_id = id, "Movie not found for delete");
            return Err(RepoError::RecordNotFound);
        }
        Ok(())
    }

    /// List movies matching a title search and a set of required genres.
    ///
    /// The title is matched with the `simple` text-search configuration, so
    /// words match regardless of case and order. A movie matches the genre
    /// filter when its genres contain every requested genre. Ties on the
    /// sort column are broken by ascending `id` so pages never overlap.
    /// No matches is an empty `Vec`, not an error.
    pub async fn search(
        pool: &PgPool,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> RepoResult<Vec<Movie>> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies \
             WHERE {SEARCH_PREDICATE} \
             ORDER BY {} {}, id ASC \
             LIMIT $3 OFFSET $4",
            filters.sort_column(),
            filters.sort_direction(),
        );
        tracing::debug!(
            title,
            genre_count = genres.len(),
            sort = %filters.sort(),
            page = filters.page(),
            page_size = filters.page_size(),
            "Searching movies"
        );
        with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Movie>(&query)
                .bind(title)
                .bind(genres)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(pool),
        )
        .await
    }

    /// Like [`MovieRepo::search`], but also reports where the page sits in
    /// the full result set.
    ///
    /// The total comes from a window count on the returned rows, so a page
    /// past the end yields empty metadata.
    pub async fn search_with_metadata(
        pool: &PgPool,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> RepoResult<(PaginationMetadata, Vec<Movie>)> {
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS} FROM movies \
             WHERE {SEARCH_PREDICATE} \
             ORDER BY {} {}, id ASC \
             LIMIT $3 OFFSET $4",
            filters.sort_column(),
            filters.sort_direction(),
        );
        let rows = with_deadline(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, CountedMovie>(&query)
                .bind(title)
                .bind(genres)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(pool),
        )
        .await?;

        let total = rows.first().map_or(0, |row| row.total_records);
        let metadata = PaginationMetadata::calculate(total, filters.page(), filters.page_size());
        let movies = rows.into_iter().map(|row| row.movie).collect();
        Ok((metadata, movies))
    }
}
