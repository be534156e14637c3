use thiserror::Error;

/// Errors raised when attendance inputs or policy settings are out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttendanceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
