//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts to
//! `DomainError` here (via `From<DbErr>`), and handlers then map
//! `DomainError` to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Translate a `DbErr` into a `DomainError` with a sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return DomainError::conflict(ConflictKind::Unique, "Unique constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

/// Flag an unparseable stored value (e.g. a move string that is not one
/// of the three valid moves) as corruption rather than user error.
pub fn corrupt(detail: impl Into<String>) -> DomainError {
    let detail = detail.into();
    error!(trace_id = %trace_ctx::trace_id(), detail = %detail, "Stored data failed to parse");
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}
