/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Shared fixtures for the integration tests

#![allow(dead_code)]

use defect_thermo::analysis::{DefectsAnalysis, DensityOfStates};
use defect_thermo::defects::{ChemicalPotentials, Defect, DefectEntry};
use defect_thermo::thermodynamics::Reservoirs;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Flat bands on a uniform 10 meV grid, valence below 0 and conduction above `gap`
pub fn flat_dos(gap: f64, volume: f64) -> DensityOfStates {
    let n = ((gap + 6.0) * 100.0).round() as usize;
    let energies: Vec<f64> = (0..=n).map(|i| i as f64 / 100.0 - 3.0).collect();
    let densities = energies
        .iter()
        .map(|&e| if e <= 0.0 || e >= gap { 1.0 } else { 0.0 })
        .collect();
    DensityOfStates::new(energies, densities, 0.0, gap, volume).unwrap()
}

/// ZnO-like defect set: donor oxygen vacancies and acceptor zinc vacancies
pub fn zno_entries() -> Vec<DefectEntry> {
    vec![
        DefectEntry::new(Defect::vacancy("O"), 1.0, 2.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("O"), 2.5, 1.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("O"), 3.5, 0.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("Zn"), 5.0, 0.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("Zn"), 5.8, -1.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("Zn"), 6.9, -2.0, 1).unwrap(),
    ]
}

pub fn zno_analysis() -> DefectsAnalysis {
    DefectsAnalysis::new(zno_entries(), 47.6).unwrap()
}

/// Oxygen-poor to oxygen-rich along the ZnO stability line
pub fn zno_reservoirs(npoints: usize) -> Reservoirs {
    let step = 3.0 / (npoints.max(2) - 1) as f64;
    Reservoirs::from_pairs((0..npoints).map(|i| {
        let mu_o = -3.0 + step * i as f64;
        (
            10f64.powf(-30.0 + 30.0 * i as f64 / (npoints.max(2) - 1) as f64),
            ChemicalPotentials::from([
                ("O".to_string(), mu_o),
                ("Zn".to_string(), -3.5 - mu_o),
            ]),
        )
    }))
}
