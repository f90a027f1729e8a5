// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy shared by every SEM crate.

/// Common error type for SEM signal, layer and learner operations.
///
/// All failures are detected synchronously at the point of violation and are
/// never retried internally. Callers decide whether to abort the run or skip
/// the tick.
///
/// # Examples
/// ```
/// use sem_structures::SemError;
///
/// fn require_columns(cols: usize) -> Result<(), SemError> {
///     if cols % 3 != 0 {
///         return Err(SemError::Shape(format!("{} columns is not a multiple of 3", cols)));
///     }
///     Ok(())
/// }
///
/// assert!(require_columns(4).is_err());
/// assert!(require_columns(6).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemError {
    /// Missing signal series, wiring key or required parameter
    #[error("Key error: {0}")]
    Key(String),

    /// Dimension or count mismatch
    #[error("Shape error: {0}")]
    Shape(String),

    /// Unregistered layer type or unsupported representation
    #[error("Type error: {0}")]
    Type(String),

    /// Parameter present but unusable, or a numerically degenerate state
    #[error("Value error: {0}")]
    Value(String),
}

impl SemError {
    pub fn key(msg: impl Into<String>) -> Self {
        SemError::Key(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        SemError::Shape(msg.into())
    }

    pub fn type_error(msg: impl Into<String>) -> Self {
        SemError::Type(msg.into())
    }

    pub fn value(msg: impl Into<String>) -> Self {
        SemError::Value(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SemError>;
