/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the utils module

use thiserror::Error;

/// Errors that can occur in the utils module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    /// The function has the same sign at both ends of the bracket
    #[error(
        "No sign change in [{lower}, {upper}]: f(lower) = {f_lower:e}, f(upper) = {f_upper:e}"
    )]
    NoSignChange {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    /// Bisection did not shrink the bracket below the tolerance
    #[error("Bisection did not converge after {iterations} iterations (bracket [{lower}, {upper}])")]
    NotConverged {
        iterations: usize,
        lower: f64,
        upper: f64,
    },

    /// Math-related errors
    #[error("Math error: {0}")]
    Math(String),
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
