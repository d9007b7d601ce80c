//! # AppError
//!
//! Centralized error handling for the Ventboard ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all vb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Vent, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty vent text)
    #[error("validation error: {0}")]
    Validation(String),

    /// Security failure (e.g., non-admin pressing a decision button)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Durable-store failure (e.g., DB down, timeout)
    #[error("storage error: {0}")]
    Storage(String),

    /// Delivery failure from the chat transport. Always best-effort:
    /// callers log this and move on, state transitions never depend on it.
    #[error("transport error: {0}")]
    Transport(String),
}

impl AppError {
    /// Shorthand for the common "unknown vent id" case.
    pub fn vent_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound("Vent".into(), id.to_string())
    }
}

/// A specialized Result type for Ventboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
