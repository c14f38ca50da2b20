/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # defect-thermo
//!
//! Point-defect thermodynamics for semiconductors and insulators.
//!
//! Given defect formation-energy entries and the density of states of the
//! host, this crate finds the Fermi level that makes the crystal neutral and
//! derives defect and carrier concentrations, conductivities and their
//! non-equilibrium variants (frozen defects, external dopants, quenching
//! between two temperatures) along a sweep of chemical potentials or oxygen
//! partial pressures.
//!
//! Formation energies are inputs; the ab-initio calculations producing them
//! live elsewhere.

pub mod analysis;
pub mod defects;
pub mod thermodynamics;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use analysis::{
    ConcentrationOutput, DefectConcentration, DefectsAnalysis, DensityOfStates, SolverConfig,
};
pub use defects::{ChemicalPotentials, Defect, DefectEntry, DefectName};
pub use thermodynamics::{Conductivity, PressureAnalysis, Reservoirs, ThermoData};
