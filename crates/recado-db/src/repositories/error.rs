//! Error handling utilities for repositories

use recado_core::error::DomainError;
use recado_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// True when the error means the backing table has not been provisioned.
/// Read paths that feed the inbox summary treat this as "no data yet".
pub fn is_missing_relation(e: &SqlxError) -> bool {
    // Postgres undefined_table
    matches!(e.as_database_error().and_then(|d| d.code()), Some(code) if code == "42P01")
}

/// Create an "invitation not found" error
pub fn invitation_not_found(id: Snowflake) -> DomainError {
    DomainError::InvitationNotFound(id)
}

/// Create an "invite group not found" error
pub fn invite_group_not_found(id: Snowflake) -> DomainError {
    DomainError::InviteGroupNotFound(id)
}
