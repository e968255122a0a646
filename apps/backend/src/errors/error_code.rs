//! Error codes for the Roshambo backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses. Add new codes here; never pass ad-hoc
//! strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Missing or empty required field
    MissingField,
    /// Move is not rock, paper or scissors
    InvalidMove,
    /// Winner value is not player1, player2 or tie
    InvalidWinner,
    /// Unknown action in a match request
    InvalidAction,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Match does not exist or is not joinable
    MatchNotFound,
    /// Player not found
    PlayerNotFound,
    /// Player is not a participant of the match
    ParticipantNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Participant already submitted a move for this match
    MoveAlreadySubmitted,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Unique constraint violation
    UniqueViolation,
    /// Foreign key constraint violation
    FkViolation,
    /// Check constraint violation
    CheckViolation,
    /// Record not found (DB-driven not-found)
    RecordNotFound,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected (unparseable stored value)
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidMove => "INVALID_MOVE",
            Self::InvalidWinner => "INVALID_WINNER",
            Self::InvalidAction => "INVALID_ACTION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::MoveAlreadySubmitted => "MOVE_ALREADY_SUBMITTED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::MissingField.as_str(), "MISSING_FIELD");
        assert_eq!(ErrorCode::InvalidMove.as_str(), "INVALID_MOVE");
        assert_eq!(ErrorCode::MatchNotFound.as_str(), "MATCH_NOT_FOUND");
        assert_eq!(
            ErrorCode::MoveAlreadySubmitted.as_str(),
            "MOVE_ALREADY_SUBMITTED"
        );
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
        assert_eq!(ErrorCode::DataCorruption.as_str(), "DATA_CORRUPTION");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::InvalidMove), "INVALID_MOVE");
        assert_eq!(format!("{}", ErrorCode::RecordNotFound), "RECORD_NOT_FOUND");
    }
}
