//! Database errors for listings operations

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum ListingsDatabaseError {
    #[error("Property {0} not found")]
    PropertyNotFound(Uuid),

    #[error("Image {0} not found")]
    ImageNotFound(Uuid),

    #[error("Availability window {0} not found")]
    AvailabilityNotFound(Uuid),

    #[error("Review {0} not found")]
    ReviewNotFound(Uuid),

    #[error("User {user_id} already reviewed property {property_id}")]
    DuplicateReview { property_id: Uuid, user_id: Uuid },

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

impl ListingsDatabaseError {
    /// True when the database itself could not be reached, as opposed to a
    /// query failing. Callers use this to answer 503 instead of 500.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ListingsDatabaseError::Query(
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
            )
        )
    }
}

/// Postgres unique_violation, used to detect duplicate-review inserts.
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| code == UNIQUE_VIOLATION)
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_class_errors_are_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(ListingsDatabaseError::Query(sqlx::Error::Io(io)).is_unavailable());
        assert!(ListingsDatabaseError::Query(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(ListingsDatabaseError::Query(sqlx::Error::PoolClosed).is_unavailable());
    }

    #[test]
    fn query_failures_are_not_unavailable() {
        assert!(!ListingsDatabaseError::Query(sqlx::Error::RowNotFound).is_unavailable());
        assert!(!ListingsDatabaseError::PropertyNotFound(uuid::Uuid::now_v7()).is_unavailable());
    }
}
