//! Shared classification of Diesel failures.
//!
//! Each repository turns a [`DieselFailure`] into its own port error, so the
//! matching on Diesel's error kinds lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse category of a failed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-statement.
    Connection(&'static str),
    /// A foreign-key constraint rejected the write.
    ForeignKey(String),
    /// A unique constraint rejected the write.
    Unique(String),
    /// Anything else.
    Query(&'static str),
}

/// Classify a Diesel error, logging the database detail at debug level.
pub(crate) fn classify(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKey(
                info.constraint_name()
                    .unwrap_or("foreign key violation")
                    .to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::Unique(
                info.constraint_name()
                    .unwrap_or("unique violation")
                    .to_owned(),
            )
        }
        _ => DieselFailure::Query("database error"),
    }
}
