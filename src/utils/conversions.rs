/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit conversion utilities

use super::constants;

/// Convert a volume from cubic Angstroms to cubic centimetres
pub fn angstrom3_to_cm3(volume: f64) -> f64 {
    volume * constants::ANGSTROM3_TO_CM3
}

/// Convert a concentration from cm⁻³ to m⁻³
pub fn per_cm3_to_per_m3(concentration: f64) -> f64 {
    concentration * constants::PER_CM3_TO_PER_M3
}

/// Number density (cm⁻³) of `count` sites in a cell of `volume` Å³
pub fn sites_per_cm3(count: f64, volume: f64) -> f64 {
    count / angstrom3_to_cm3(volume)
}
