/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions for defect thermodynamics
//!
//! This module provides the physical constants, unit conversions, occupation
//! statistics and the bracketed root finder shared by the analysis modules.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod naming;
pub mod root_finding;
pub mod statistics;

pub use conversions::{angstrom3_to_cm3, per_cm3_to_per_m3, sites_per_cm3};
pub use errors::{Result, UtilsError};
pub use naming::{names_match, strip_multiplicity};
pub use root_finding::{bisect, BisectionSettings, Root};
pub use statistics::{boltzmann_factor, fermi_dirac, hole_occupation, thermal_energy};
