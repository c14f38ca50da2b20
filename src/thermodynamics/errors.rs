/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the thermodynamics module

use crate::analysis::AnalysisError;
use thiserror::Error;

/// Result type for thermodynamic sweeps
pub type Result<T> = std::result::Result<T, ThermoError>;

/// Errors raised by sweeps, conductivity and result handling
#[derive(Error, Debug)]
pub enum ThermoError {
    /// No mobility for a carrier or defect species
    #[error("Missing mobility for {0}")]
    MissingMobility(String),

    /// Neither the call nor the reservoirs provide a temperature
    #[error("No temperature given and the reservoirs carry none")]
    MissingTemperature,

    /// Result series of different lengths
    #[error("Series {series} has {found} points, expected {expected}")]
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    /// NaN or infinite value, which JSON cannot carry
    #[error("Series {series} holds a non-finite value at point {index}")]
    NonFiniteValue { series: String, index: usize },

    /// Other invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure at one point of a sweep
    #[error("Sweep failed at control value {control}: {source}")]
    Point {
        control: f64,
        #[source]
        source: AnalysisError,
    },

    /// Propagation of error from analysis module
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// JSON (de)serialisation
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThermoError {
    /// Underlying analysis error, if any
    pub fn analysis_error(&self) -> Option<&AnalysisError> {
        match self {
            ThermoError::Point { source, .. } => Some(source),
            ThermoError::Analysis(err) => Some(err),
            _ => None,
        }
    }
}
