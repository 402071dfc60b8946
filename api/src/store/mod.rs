//! Persistence boundary for blog records.
//!
//! Handlers only ever see [`BlogStore`] and [`StoreError`]; whether a failure
//! was a uniqueness violation is decided here, once, instead of in every
//! handler.

use async_trait::async_trait;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;
use uuid::Uuid;

use crate::blog::models::{Blog, BlogChangeset, NewBlog};

pub mod memory;
pub mod postgres;

pub use memory::MemoryBlogStore;
pub use postgres::PgBlogStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert or update collided with a unique column (e.g. `title`).
    #[error("{message}")]
    UniqueViolation { message: String },

    /// The store could not be reached (pool exhausted, connect failure...).
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Query(#[source] diesel::result::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::UniqueViolation {
                    message: info.message().to_string(),
                }
            }
            e => StoreError::Query(e),
        }
    }
}

/// Record lifecycle operations over the `blogs` table.
///
/// Listing is always ordered by `created_at` descending. Update and delete
/// report the number of affected rows rather than the row itself.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    async fn insert(&self, blog: NewBlog) -> StoreResult<Blog>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Blog>>;

    async fn find_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Blog>>;

    async fn update_where_id(&self, id: Uuid, changes: BlogChangeset) -> StoreResult<usize>;

    async fn delete_where_id(&self, id: Uuid) -> StoreResult<usize>;

    async fn count(&self) -> StoreResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_classified_from_diesel_error() {
        let e = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from(
                "duplicate key value violates unique constraint \"blogs_title_key\"",
            )),
        );

        match StoreError::from(e) {
            StoreError::UniqueViolation { message } => {
                assert!(message.contains("blogs_title_key"))
            }
            other => panic!("expected a unique violation, got {other:?}"),
        }
    }

    #[test]
    fn other_database_errors_stay_generic() {
        let e = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::NotNullViolation,
            Box::new(String::from("null value in column \"description\"")),
        );
        assert!(matches!(StoreError::from(e), StoreError::Query(_)));

        let e = diesel::result::Error::NotFound;
        assert!(matches!(StoreError::from(e), StoreError::Query(_)));
    }
}
