/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in defect thermodynamics

/// Boltzmann constant in eV/K
pub const BOLTZMANN: f64 = 8.6173324e-5;

/// Elementary charge in Coulomb
pub const ELEMENTARY_CHARGE: f64 = 1.60217662e-19;

/// Cubic Angstrom to cubic centimetre
pub const ANGSTROM3_TO_CM3: f64 = 1e-24;

/// Inverse cubic centimetre to inverse cubic metre
pub const PER_CM3_TO_PER_M3: f64 = 1e6;
