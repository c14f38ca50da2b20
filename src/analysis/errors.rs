/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the analysis module

use crate::defects::DefectError;
use crate::utils::UtilsError;
use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by the equilibrium analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No entries for the requested species
    #[error("No defect entries for species {0}")]
    EmptySpecies(String),

    /// Net charge has the same sign over the whole Fermi-level bracket
    #[error(
        "Fermi level not found in [{lower}, {upper}] eV: net charge {residual_lower:e} at lower end, {residual_upper:e} at upper end"
    )]
    FermiLevelNotFound {
        lower: f64,
        upper: f64,
        residual_lower: f64,
        residual_upper: f64,
    },

    /// The root finder ran out of iterations
    #[error("Fermi level did not converge after {iterations} iterations (bracket [{lower}, {upper}] eV)")]
    NotConverged {
        iterations: usize,
        lower: f64,
        upper: f64,
    },

    /// Unknown concentration output mode
    #[error("Invalid concentrations output {0:?}: must be one of \"all\", \"total\", \"stable\"")]
    InvalidOutputMode(String),

    /// Malformed density of states
    #[error("Invalid density of states: {0}")]
    InvalidDos(String),

    /// Temperature must be positive and finite
    #[error("Invalid temperature: {0} K")]
    InvalidTemperature(f64),

    /// Other invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical failure
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// Propagation of error from defects module
    #[error("Defect error: {0}")]
    Defect(#[from] DefectError),
}

impl From<UtilsError> for AnalysisError {
    fn from(err: UtilsError) -> Self {
        match err {
            UtilsError::NoSignChange {
                lower,
                upper,
                f_lower,
                f_upper,
            } => AnalysisError::FermiLevelNotFound {
                lower,
                upper,
                residual_lower: f_lower,
                residual_upper: f_upper,
            },
            UtilsError::NotConverged {
                iterations,
                lower,
                upper,
            } => AnalysisError::NotConverged {
                iterations,
                lower,
                upper,
            },
            UtilsError::Math(msg) => AnalysisError::Numerical(msg),
        }
    }
}
