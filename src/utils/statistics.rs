/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Occupation statistics
//!
//! Fermi-Dirac occupations for band carriers and Boltzmann factors for
//! defect populations. Energies in eV, temperatures in K.

use super::constants::BOLTZMANN;

/// Thermal energy k_B·T in eV
pub fn thermal_energy(temperature: f64) -> f64 {
    BOLTZMANN * temperature
}

/// Fermi-Dirac occupation of a state at `energy` for a given Fermi level
pub fn fermi_dirac(energy: f64, fermi_level: f64, temperature: f64) -> f64 {
    let x = (energy - fermi_level) / thermal_energy(temperature);
    1.0 / (x.exp() + 1.0)
}

/// Probability that a state at `energy` is empty (1 - f).
///
/// Evaluated directly rather than as `1 - fermi_dirac` so deep valence states
/// keep their precision.
pub fn hole_occupation(energy: f64, fermi_level: f64, temperature: f64) -> f64 {
    let x = (fermi_level - energy) / thermal_energy(temperature);
    1.0 / (x.exp() + 1.0)
}

/// Boltzmann factor exp(-E / k_B·T)
pub fn boltzmann_factor(energy: f64, temperature: f64) -> f64 {
    (-energy / thermal_energy(temperature)).exp()
}
