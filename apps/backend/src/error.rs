use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// RFC 9457 problem-details body emitted for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail.clone(),
            AppError::DbUnavailable => "Database unavailable".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. }
            | AppError::DbUnavailable
            | AppError::Internal { .. }
            | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::Validation {
                code: ErrorCode::ValidationError,
                detail,
            },
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Participant => ErrorCode::ParticipantNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::MoveAlreadySubmitted => ErrorCode::MoveAlreadySubmitted,
                    ConflictKind::Unique => ErrorCode::UniqueViolation,
                    _ => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable,
                InfraErrorKind::Timeout => AppError::Db { detail },
                InfraErrorKind::DataCorruption => AppError::Internal { detail },
                _ => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().to_string();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://roshambo.dev/errors/{code}"),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_maps_to_404_code() {
        let err = AppError::from(DomainError::not_found(NotFoundKind::Match, "gone"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), ErrorCode::MatchNotFound);
    }

    #[test]
    fn domain_conflict_maps_to_409_code() {
        let err = AppError::from(DomainError::conflict(
            ConflictKind::MoveAlreadySubmitted,
            "already moved",
        ));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), ErrorCode::MoveAlreadySubmitted);
    }

    #[test]
    fn humanize_turns_codes_into_titles() {
        assert_eq!(AppError::humanize_code("MATCH_NOT_FOUND"), "Match Not Found");
        assert_eq!(AppError::humanize_code("DB_ERROR"), "Db Error");
    }
}
