/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Oxygen partial-pressure sweep for a ZnO-like oxide
//!
//! Solves the equilibrium Fermi level at 1000 K across 25 decades of oxygen
//! pressure, quenches the defects to room temperature, and writes both
//! result sets as JSON.
//!
//! Run with `RUST_LOG=info cargo run --example oxygen_sweep`.

use anyhow::{Context, Result};
use defect_thermo::analysis::{ConcentrationOutput, DefectsAnalysis, DensityOfStates};
use defect_thermo::defects::{ChemicalPotentials, Defect, DefectEntry};
use defect_thermo::thermodynamics::{
    partial_pressure_range, BinaryOxideReservoirs, Conductivity, Mobilities, PressureAnalysis,
    ReservoirGenerator,
};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let analysis = DefectsAnalysis::new(defect_entries()?, 47.6)?;
    let dos = parabolic_dos(3.4, 47.6)?;

    let references = ChemicalPotentials::from([("Zn".to_string(), -1.26), ("O".to_string(), -4.95)]);
    let generator = BinaryOxideReservoirs::new("Zn", 1, 1, -3.6, references)?;
    let reservoirs = generator.reservoirs(1000.0, &partial_pressure_range(-20.0, 5.0, 26))?;

    let sweep = PressureAnalysis::new(&analysis, &dos);
    let equilibrium = sweep
        .get_concentrations(&reservoirs, ConcentrationOutput::Total, None)?
        .with_name("ZnO 1000 K");

    println!("{:>12} {:>10} {:>12} {:>12}", "pO2 (atm)", "E_F (eV)", "V_O (cm-3)", "n (cm-3)");
    let fermi_levels = equilibrium.fermi_levels().unwrap_or_default();
    let defects = equilibrium.defect_concentrations().unwrap_or_default();
    let carriers = equilibrium.carrier_concentrations().unwrap_or_default();
    for (i, p) in equilibrium.partial_pressures().iter().enumerate() {
        println!(
            "{:>12.3e} {:>10.4} {:>12.3e} {:>12.3e}",
            p,
            fermi_levels[i],
            defects[i].total("Vac_O").unwrap_or(0.0),
            carriers[i].1
        );
    }

    let quenched = sweep
        .get_quenched_fermi_levels(&reservoirs, None, 300.0, None, false)?
        .with_name("ZnO quenched 1000 K -> 300 K");

    let conductivity = Conductivity::new(Mobilities::from([
        ("holes".to_string(), 1e-4),
        ("electrons".to_string(), 1e-2),
        ("Vac_O".to_string(), 1e-12),
        ("Vac_Zn".to_string(), 1e-14),
    ]));
    let sigma = sweep.get_conductivities(&reservoirs, &conductivity, None, false)?;
    if let Some(values) = sigma.conductivities() {
        info!("conductivity range {:.3e} .. {:.3e} S/m", values[0], values[values.len() - 1]);
    }

    equilibrium
        .to_file("zno_equilibrium.json")
        .context("writing equilibrium results")?;
    quenched
        .to_file("zno_quenched.json")
        .context("writing quenched results")?;
    println!("Results written to zno_equilibrium.json and zno_quenched.json");

    Ok(())
}

fn defect_entries() -> Result<Vec<DefectEntry>> {
    Ok(vec![
        DefectEntry::new(Defect::vacancy("O"), 1.0, 2.0, 1)?,
        DefectEntry::new(Defect::vacancy("O"), 2.5, 1.0, 1)?,
        DefectEntry::new(Defect::vacancy("O"), 3.5, 0.0, 1)?,
        DefectEntry::new(Defect::vacancy("Zn"), 5.0, 0.0, 1)?,
        DefectEntry::new(Defect::vacancy("Zn"), 5.8, -1.0, 1)?,
        DefectEntry::new(Defect::vacancy("Zn"), 6.9, -2.0, 1)?,
    ])
}

/// Square-root band edges on a 5 meV grid
fn parabolic_dos(gap: f64, volume: f64) -> Result<DensityOfStates> {
    let energies: Vec<f64> = (0..=2000).map(|i| i as f64 * 0.005 - 3.0).collect();
    let densities = energies
        .iter()
        .map(|&e| {
            if e <= 0.0 {
                0.8 * (-e).sqrt()
            } else if e >= gap {
                0.3 * (e - gap).sqrt()
            } else {
                0.0
            }
        })
        .collect();
    Ok(DensityOfStates::new(energies, densities, 0.0, gap, volume)?)
}
