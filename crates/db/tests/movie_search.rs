//! Integration tests for movie search, sorting and pagination.
//!
//! Exercises `MovieRepo::search` and `MovieRepo::search_with_metadata`:
//! - Empty filters return every row in id order
//! - Genre containment and full-text title matching
//! - Sort direction with id tie-break
//! - Consecutive pages do not overlap and keep global order

use sqlx::PgPool;
use reel_core::filters::{Filters, PaginationMetadata};
use reel_db::models::movie::{CreateMovie, Movie};
use reel_db::repositories::MovieRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_movie(title: &str, year: i32, runtime: i32, genres: &[&str]) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        year,
        runtime,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn genres(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn ids(movies: &[Movie]) -> Vec<i64> {
    movies.iter().map(|m| m.id).collect()
}

/// Insert a small catalogue and return the created rows in insertion order.
async fn seed(pool: &PgPool) -> Vec<Movie> {
    let inputs = [
        new_movie("Moana", 2016, 107, &["animation", "adventure"]),
        new_movie("Black Panther", 2018, 134, &["action", "adventure"]),
        new_movie("Deadpool", 2016, 108, &["action", "comedy"]),
        new_movie("The Breakfast Club", 1985, 96, &["drama"]),
        new_movie("The Godfather", 1972, 175, &["crime", "drama"]),
        new_movie("Heat", 1995, 170, &["crime", "drama", "action"]),
    ];

    let mut created = Vec::with_capacity(inputs.len());
    for input in &inputs {
        created.push(MovieRepo::create(pool, input).await.unwrap());
    }
    created
}

// ---------------------------------------------------------------------------
// Test: Filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_filters_return_all_by_id(pool: PgPool) {
    let created = seed(&pool).await;

    let filters = Filters::new(1, 20, "id").unwrap();
    let movies = MovieRepo::search(&pool, "", &[], &filters).await.unwrap();

    assert_eq!(movies, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_table_returns_empty_vec(pool: PgPool) {
    let movies = MovieRepo::search(&pool, "", &[], &Filters::default())
        .await
        .unwrap();
    assert!(movies.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_genre_filter_is_containment(pool: PgPool) {
    seed(&pool).await;

    let drama = MovieRepo::search(&pool, "", &genres(&["drama"]), &Filters::default())
        .await
        .unwrap();
    let titles: Vec<&str> = drama.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Breakfast Club", "The Godfather", "Heat"]);
    assert!(drama.iter().all(|m| m.genres.contains(&"drama".to_string())));

    let crime_drama = MovieRepo::search(
        &pool,
        "",
        &genres(&["drama", "crime"]),
        &Filters::default(),
    )
    .await
    .unwrap();
    let titles: Vec<&str> = crime_drama.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Godfather", "Heat"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_title_uses_full_text_matching(pool: PgPool) {
    seed(&pool).await;

    let movies = MovieRepo::search(&pool, "panther BLACK", &[], &Filters::default())
        .await
        .unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Black Panther");

    // Whole words only: a fragment is not a substring match.
    let movies = MovieRepo::search(&pool, "panth", &[], &Filters::default())
        .await
        .unwrap();
    assert!(movies.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_title_and_genre_filters_combine(pool: PgPool) {
    seed(&pool).await;

    let movies = MovieRepo::search(&pool, "the", &genres(&["crime"]), &Filters::default())
        .await
        .unwrap();
    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Godfather"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_match_is_empty_not_error(pool: PgPool) {
    seed(&pool).await;

    let movies = MovieRepo::search(&pool, "", &genres(&["western"]), &Filters::default())
        .await
        .unwrap();
    assert!(movies.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Sorting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_descending_sort_breaks_ties_by_id(pool: PgPool) {
    let created = seed(&pool).await;

    let filters = Filters::new(1, 20, "-year").unwrap();
    let movies = MovieRepo::search(&pool, "", &[], &filters).await.unwrap();

    let years: Vec<i32> = movies.iter().map(|m| m.year).collect();
    assert_eq!(years, vec![2018, 2016, 2016, 1995, 1985, 1972]);

    // Moana and Deadpool share 2016; the lower id comes first.
    assert_eq!(movies[1].id, created[0].id);
    assert_eq!(movies[2].id, created[2].id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ascending_title_sort(pool: PgPool) {
    seed(&pool).await;

    let filters = Filters::new(1, 20, "title").unwrap();
    let movies = MovieRepo::search(&pool, "", &[], &filters).await.unwrap();
    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();

    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

// ---------------------------------------------------------------------------
// Test: Pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pages_do_not_overlap(pool: PgPool) {
    seed(&pool).await;

    let all = MovieRepo::search(&pool, "", &[], &Filters::new(1, 20, "-year").unwrap())
        .await
        .unwrap();
    let page_one = MovieRepo::search(&pool, "", &[], &Filters::new(1, 3, "-year").unwrap())
        .await
        .unwrap();
    let page_two = MovieRepo::search(&pool, "", &[], &Filters::new(2, 3, "-year").unwrap())
        .await
        .unwrap();

    assert_eq!(page_one.len(), 3);
    assert_eq!(page_two.len(), 3);

    let mut joined = ids(&page_one);
    joined.extend(ids(&page_two));
    assert_eq!(joined, ids(&all));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_past_end_is_empty(pool: PgPool) {
    seed(&pool).await;

    let movies = MovieRepo::search(&pool, "", &[], &Filters::new(5, 3, "id").unwrap())
        .await
        .unwrap();
    assert!(movies.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_with_metadata_reports_totals(pool: PgPool) {
    seed(&pool).await;

    let filters = Filters::new(2, 4, "id").unwrap();
    let (metadata, movies) = MovieRepo::search_with_metadata(&pool, "", &[], &filters)
        .await
        .unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(
        metadata,
        PaginationMetadata {
            current_page: 2,
            page_size: 4,
            first_page: 1,
            last_page: 2,
            total_records: 6,
        }
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_with_metadata_empty_when_nothing_matches(pool: PgPool) {
    seed(&pool).await;

    let (metadata, movies) =
        MovieRepo::search_with_metadata(&pool, "nonexistent", &[], &Filters::default())
            .await
            .unwrap();
    assert!(movies.is_empty());
    assert_eq!(metadata, PaginationMetadata::default());
}
