/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Defect equilibrium analysis
//!
//! Formation energies, Boltzmann defect populations, band carriers from the
//! bulk density of states and the charge-neutrality solve for the Fermi
//! level, at one set of chemical potentials and one temperature.

mod concentrations;
mod config;
mod defects_analysis;
mod dos;
pub mod errors;

pub use concentrations::{
    totals_by_species, ConcentrationOutput, DefectConcentration, DefectConcentrations,
    FrozenConcentrations,
};
pub use config::{ChargeCounting, SolverConfig};
pub use defects_analysis::{DefectsAnalysis, FormationEnergy, TransitionLevel};
pub use dos::{CarrierStatistics, DensityOfStates};
pub use errors::{AnalysisError, Result};
