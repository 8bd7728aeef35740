//! Pagination and sorting parameters for movie listings.
//!
//! Sort keys arrive as caller text (`"year"`, `"-title"`) and are parsed
//! into [`SortColumn`] / [`SortDirection`] before any SQL is built. Only the
//! `&'static str` fragments returned by those enums ever reach the query
//! string.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Largest accepted page number.
pub const MAX_PAGE: i64 = 10_000_000;

/// Default number of movies per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of movies per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Every accepted spelling of the `sort` parameter.
pub const SORT_SAFELIST: &[&str] = &[
    "id", "title", "year", "runtime", "-id", "-title", "-year", "-runtime",
];

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// Columns a movie listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Id,
    Title,
    Year,
    Runtime,
}

impl SortColumn {
    /// The column name as it appears in SQL.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Year => "year",
            SortColumn::Runtime => "runtime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated sort key. A leading `-` selects descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl FromStr for Sort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, name) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, s),
        };
        let column = match name {
            "id" => SortColumn::Id,
            "title" => SortColumn::Title,
            "year" => SortColumn::Year,
            "runtime" => SortColumn::Runtime,
            _ => {
                return Err(CoreError::Validation(format!(
                    "invalid sort value '{s}', expected one of: {}",
                    SORT_SAFELIST.join(", ")
                )))
            }
        };
        Ok(Sort { column, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.column.as_sql()),
            SortDirection::Desc => write!(f, "-{}", self.column.as_sql()),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Page, page size and sort key for a listing query.
///
/// Construct through [`Filters::new`] so the ranges are checked; the fields
/// are private to keep an unchecked value from reaching the repository.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Filters {
    #[validate(range(min = 1, max = 10_000_000))]
    page: i64,
    #[validate(range(min = 1, max = 100))]
    page_size: i64,
    sort: Sort,
}

impl Filters {
    /// Parse and validate raw listing parameters.
    pub fn new(page: i64, page_size: i64, sort: &str) -> Result<Self, CoreError> {
        Self::from_parts(page, page_size, sort.parse()?)
    }

    /// Validate an already-parsed sort key together with the page bounds.
    pub fn from_parts(page: i64, page_size: i64, sort: Sort) -> Result<Self, CoreError> {
        let filters = Filters {
            page,
            page_size,
            sort,
        };
        filters
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(filters)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// SQL column for `ORDER BY`.
    pub fn sort_column(&self) -> &'static str {
        self.sort.column.as_sql()
    }

    /// SQL direction keyword for `ORDER BY`.
    pub fn sort_direction(&self) -> &'static str {
        self.sort.direction.as_sql()
    }

    /// Value for `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Value for `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination metadata
// ---------------------------------------------------------------------------

/// Summary of where a page sits within the full result set.
///
/// All fields are zero when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PaginationMetadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl PaginationMetadata {
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 {
            return Self::default();
        }
        PaginationMetadata {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
