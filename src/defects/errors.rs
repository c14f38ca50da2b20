/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the defects module

use thiserror::Error;

/// Errors raised while building or evaluating defect entries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefectError {
    /// A non-polaron defect with no change in particle numbers
    #[error("Defect {0} has an empty composition delta")]
    EmptyComposition(String),

    /// Substituting an element with itself
    #[error("Invalid substitution: {species} on {host}")]
    InvalidSubstitution { species: String, host: String },

    /// Malformed defect complex
    #[error("Invalid defect complex: {0}")]
    InvalidComplex(String),

    /// Missing or empty element symbol
    #[error("Invalid element symbol: {0:?}")]
    InvalidElement(String),

    /// Site multiplicity must be at least one
    #[error("Invalid multiplicity {multiplicity} for {name}")]
    InvalidMultiplicity { name: String, multiplicity: u32 },

    /// Degeneracy must be positive and finite
    #[error("Invalid degeneracy {degeneracy} for {name}")]
    InvalidDegeneracy { name: String, degeneracy: f64 },

    /// The chemical potentials do not cover an element exchanged by the defect
    #[error("Missing chemical potential for element {element} (needed by {name})")]
    MissingChemicalPotential { name: String, element: String },
}

/// Result type for defect operations
pub type Result<T> = std::result::Result<T, DefectError>;
