/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Bulk density of states and band-carrier statistics

use super::errors::{AnalysisError, Result};
use crate::utils::{fermi_dirac, hole_occupation, sites_per_cm3};
use serde::{Deserialize, Serialize};

/// Source of free-carrier concentrations.
///
/// Fermi levels are referenced to the valence-band maximum.
pub trait CarrierStatistics: Send + Sync {
    /// Band gap in eV
    fn band_gap(&self) -> f64;

    /// Lowest and highest Fermi level (relative to the VBM) the states cover
    fn energy_window(&self) -> (f64, f64);

    /// Hole and electron concentrations in cm⁻³
    fn carrier_concentrations(&self, fermi_level: f64, temperature: f64) -> (f64, f64);
}

/// Tabulated total density of states of the bulk cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityOfStates {
    /// Absolute energies in eV, strictly increasing
    energies: Vec<f64>,
    /// States per eV per cell, spin summed
    densities: Vec<f64>,
    /// Valence-band maximum in eV, same reference as `energies`
    vbm: f64,
    /// Band gap in eV
    band_gap: f64,
    /// Cell volume in Å³
    volume: f64,
}

impl DensityOfStates {
    /// Create a density of states, checking the grid
    pub fn new(
        energies: Vec<f64>,
        densities: Vec<f64>,
        vbm: f64,
        band_gap: f64,
        volume: f64,
    ) -> Result<Self> {
        let dos = Self {
            energies,
            densities,
            vbm,
            band_gap,
            volume,
        };
        dos.validate()?;
        Ok(dos)
    }

    /// Check the invariants of the grid
    pub fn validate(&self) -> Result<()> {
        if self.energies.len() != self.densities.len() {
            return Err(AnalysisError::InvalidDos(format!(
                "{} energies but {} densities",
                self.energies.len(),
                self.densities.len()
            )));
        }
        if self.energies.len() < 2 {
            return Err(AnalysisError::InvalidDos(
                "at least two energy points are required".to_string(),
            ));
        }
        if self.energies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(AnalysisError::InvalidDos(
                "energies must be strictly increasing".to_string(),
            ));
        }
        if self.densities.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(AnalysisError::InvalidDos(
                "densities must be finite and non-negative".to_string(),
            ));
        }
        if !(self.volume.is_finite() && self.volume > 0.0) {
            return Err(AnalysisError::InvalidDos(format!(
                "cell volume must be positive, got {}",
                self.volume
            )));
        }
        if !(self.band_gap.is_finite() && self.band_gap >= 0.0) {
            return Err(AnalysisError::InvalidDos(format!(
                "band gap must be non-negative, got {}",
                self.band_gap
            )));
        }
        Ok(())
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn vbm(&self) -> f64 {
        self.vbm
    }

    /// Conduction-band minimum
    pub fn cbm(&self) -> f64 {
        self.vbm + self.band_gap
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Trapezoidal integration weight of grid point `i`
    fn weight(&self, i: usize) -> f64 {
        let n = self.energies.len();
        let left = if i == 0 { self.energies[0] } else { self.energies[i - 1] };
        let right = if i + 1 == n { self.energies[n - 1] } else { self.energies[i + 1] };
        0.5 * (right - left)
    }
}

impl CarrierStatistics for DensityOfStates {
    fn band_gap(&self) -> f64 {
        self.band_gap
    }

    fn energy_window(&self) -> (f64, f64) {
        let first = self.energies.first().copied().unwrap_or(self.vbm);
        let last = self.energies.last().copied().unwrap_or(self.vbm);
        (first - self.vbm, last - self.vbm)
    }

    fn carrier_concentrations(&self, fermi_level: f64, temperature: f64) -> (f64, f64) {
        let fermi_abs = self.vbm + fermi_level;
        let cbm = self.cbm();

        let mut holes = 0.0;
        let mut electrons = 0.0;
        for (i, (&energy, &density)) in self.energies.iter().zip(&self.densities).enumerate() {
            if energy <= self.vbm {
                holes += density * self.weight(i) * hole_occupation(energy, fermi_abs, temperature);
            } else if energy >= cbm {
                electrons += density * self.weight(i) * fermi_dirac(energy, fermi_abs, temperature);
            }
        }

        (
            sites_per_cm3(holes, self.volume),
            sites_per_cm3(electrons, self.volume),
        )
    }
}
