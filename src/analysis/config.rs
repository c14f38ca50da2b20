/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Solver configuration

use crate::utils::BisectionSettings;
use serde::{Deserialize, Serialize};

/// Which defect charge states enter the charge balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCounting {
    /// Only the lowest-energy charge state of each species. A frozen
    /// species counts its whole supplied total at the stable charge.
    #[default]
    StableOnly,
    /// Every charge state of every species; a frozen total is split over
    /// the charge states with Boltzmann weights
    AllChargeStates,
}

/// Settings of the Fermi-level solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Width of the final Fermi-level bracket in eV
    pub tolerance: f64,
    /// Maximum number of bisection steps
    pub max_iterations: usize,
    /// How far beyond the band edges the bracket extends, in eV.
    /// Clamped to the energy window of the density of states.
    pub energy_margin: f64,
    /// Charge states counted in the neutrality residual
    pub charge_counting: ChargeCounting,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
            energy_margin: 1.0,
            charge_counting: ChargeCounting::StableOnly,
        }
    }
}

impl SolverConfig {
    /// Root-finder settings
    pub fn bisection_settings(&self) -> BisectionSettings {
        BisectionSettings {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}
