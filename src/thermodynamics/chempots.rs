/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Chemical potentials from oxygen partial pressure
//!
//! Ideal-gas oxygen chemical potential and a simple two-component reservoir
//! generator. Multi-component phase-diagram analysis is left to external
//! tooling behind the [`ReservoirGenerator`] trait.

use super::errors::{Result, ThermoError};
use super::reservoirs::{ReservoirPoint, Reservoirs};
use crate::defects::ChemicalPotentials;
use crate::utils::thermal_energy;
use log::debug;

/// Standard-pressure oxygen chemical potential Δμ_O(T, p0) in eV
/// (Reuter and Scheffler, Phys. Rev. B 65, 035406)
const OXYGEN_STANDARD_TABLE: [(f64, f64); 10] = [
    (100.0, -0.08),
    (200.0, -0.17),
    (300.0, -0.27),
    (400.0, -0.38),
    (500.0, -0.50),
    (600.0, -0.61),
    (700.0, -0.73),
    (800.0, -0.85),
    (900.0, -0.98),
    (1000.0, -1.10),
];

/// Chemical potential of an ideal diatomic gas per atom:
/// `mu0 + 1/2 k_B T ln(p / p0)`
pub fn chempot_ideal_gas(mu0: f64, temperature: f64, partial_pressure: f64) -> f64 {
    mu0 + 0.5 * thermal_energy(temperature) * partial_pressure.ln()
}

/// Standard oxygen chemical potential at a temperature, from a linear
/// least-squares fit of the tabulated values
pub fn oxygen_standard_chempot(temperature: f64) -> f64 {
    let n = OXYGEN_STANDARD_TABLE.len() as f64;
    let mean_t = OXYGEN_STANDARD_TABLE.iter().map(|(t, _)| t).sum::<f64>() / n;
    let mean_mu = OXYGEN_STANDARD_TABLE.iter().map(|(_, mu)| mu).sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (t, mu) in OXYGEN_STANDARD_TABLE {
        sxy += (t - mean_t) * (mu - mean_mu);
        sxx += (t - mean_t) * (t - mean_t);
    }
    let slope = sxy / sxx;

    mean_mu + slope * (temperature - mean_t)
}

/// Log-spaced partial pressures from 10^low to 10^high
pub fn partial_pressure_range(low_exponent: f64, high_exponent: f64, npoints: usize) -> Vec<f64> {
    match npoints {
        0 => Vec::new(),
        1 => vec![10f64.powf(low_exponent)],
        _ => {
            let step = (high_exponent - low_exponent) / (npoints - 1) as f64;
            (0..npoints)
                .map(|i| 10f64.powf(low_exponent + step * i as f64))
                .collect()
        }
    }
}

/// Source of reservoirs for a partial-pressure sweep
pub trait ReservoirGenerator {
    /// Reservoirs at the given temperature, one per partial pressure, in order
    fn reservoirs(&self, temperature: f64, partial_pressures: &[f64]) -> Result<Reservoirs>;
}

/// Reservoirs of a binary oxide M_xO_y in equilibrium with an oxygen atmosphere.
///
/// The oxygen chemical potential follows the ideal gas, the metal takes
/// whatever keeps the oxide stable: `Δμ_M = (ΔH_f - y Δμ_O) / x`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOxideReservoirs {
    metal: String,
    metal_count: u32,
    oxygen_count: u32,
    /// Formation energy per formula unit in eV
    formation_energy: f64,
    /// Elemental reference energies per atom in eV
    references: ChemicalPotentials,
}

impl BinaryOxideReservoirs {
    /// Create a generator for M_xO_y.
    ///
    /// `references` must hold the elemental energies of the metal and of
    /// oxygen.
    pub fn new(
        metal: &str,
        metal_count: u32,
        oxygen_count: u32,
        formation_energy: f64,
        references: ChemicalPotentials,
    ) -> Result<Self> {
        if metal_count == 0 || oxygen_count == 0 {
            return Err(ThermoError::InvalidInput(format!(
                "{}{}O{} is not a binary oxide",
                metal, metal_count, oxygen_count
            )));
        }
        for element in [metal, "O"] {
            if !references.contains_key(element) {
                return Err(ThermoError::InvalidInput(format!(
                    "missing reference energy for {}",
                    element
                )));
            }
        }
        Ok(Self {
            metal: metal.to_string(),
            metal_count,
            oxygen_count,
            formation_energy,
            references,
        })
    }

    /// Chemical potentials relative to the elemental references
    pub fn delta_chempots(&self, temperature: f64, partial_pressure: f64) -> ChemicalPotentials {
        let mu_o = chempot_ideal_gas(
            oxygen_standard_chempot(temperature),
            temperature,
            partial_pressure,
        );
        let mu_metal =
            (self.formation_energy - self.oxygen_count as f64 * mu_o) / self.metal_count as f64;
        ChemicalPotentials::from([("O".to_string(), mu_o), (self.metal.clone(), mu_metal)])
    }
}

impl ReservoirGenerator for BinaryOxideReservoirs {
    fn reservoirs(&self, temperature: f64, partial_pressures: &[f64]) -> Result<Reservoirs> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ThermoError::InvalidInput(format!(
                "invalid temperature {} K",
                temperature
            )));
        }

        let mut points = Vec::with_capacity(partial_pressures.len());
        for &p in partial_pressures {
            if !(p.is_finite() && p > 0.0) {
                return Err(ThermoError::InvalidInput(format!(
                    "partial pressure must be positive, got {}",
                    p
                )));
            }
            let chempots: ChemicalPotentials = self
                .delta_chempots(temperature, p)
                .into_iter()
                .map(|(el, delta)| {
                    let reference = self.references.get(&el).copied().unwrap_or(0.0);
                    (el, reference + delta)
                })
                .collect();
            debug!("p = {:e} atm: {:?}", p, chempots);
            points.push(ReservoirPoint {
                control: p,
                chempots,
            });
        }

        Ok(Reservoirs::new(points).with_temperature(temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ideal_gas_at_standard_pressure() {
        assert_relative_eq!(chempot_ideal_gas(-0.5, 800.0, 1.0), -0.5, epsilon = 1e-12);
        let lower = chempot_ideal_gas(-0.5, 800.0, 1e-10);
        assert_relative_eq!(
            lower,
            -0.5 + 0.5 * thermal_energy(800.0) * (1e-10f64).ln(),
            epsilon = 1e-12
        );
        assert!(lower < -0.5);
    }

    #[test]
    fn test_oxygen_standard_chempot_follows_table() {
        assert_relative_eq!(oxygen_standard_chempot(300.0), -0.27, epsilon = 0.03);
        assert_relative_eq!(oxygen_standard_chempot(1000.0), -1.10, epsilon = 0.03);
        assert!(oxygen_standard_chempot(600.0) < oxygen_standard_chempot(500.0));
    }

    #[test]
    fn test_partial_pressure_range() {
        let p = partial_pressure_range(-20.0, 10.0, 4);
        assert_eq!(p.len(), 4);
        assert_relative_eq!(p[0], 1e-20, max_relative = 1e-12);
        assert_relative_eq!(p[1], 1e-10, max_relative = 1e-12);
        assert_relative_eq!(p[3], 1e10, max_relative = 1e-12);
        assert!(partial_pressure_range(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_binary_oxide_keeps_formation_energy() {
        let refs = ChemicalPotentials::from([("Zn".to_string(), -1.26), ("O".to_string(), -4.95)]);
        let gen = BinaryOxideReservoirs::new("Zn", 1, 1, -3.6, refs).unwrap();
        let res = gen.reservoirs(1000.0, &[1e-10, 1.0]).unwrap();

        assert_eq!(res.temperature(), Some(1000.0));
        for point in res.points() {
            let d_zn = point.chempots["Zn"] + 1.26;
            let d_o = point.chempots["O"] + 4.95;
            assert_relative_eq!(d_zn + d_o, -3.6, epsilon = 1e-10);
        }
        // Reducing conditions make the metal richer
        assert!(res.points()[0].chempots["Zn"] > res.points()[1].chempots["Zn"]);
    }

    #[test]
    fn test_binary_oxide_validation() {
        let refs = ChemicalPotentials::from([("Zn".to_string(), -1.26)]);
        assert!(BinaryOxideReservoirs::new("Zn", 1, 1, -3.6, refs.clone()).is_err());
        let mut refs = refs;
        refs.insert("O".to_string(), -4.95);
        assert!(BinaryOxideReservoirs::new("Zn", 0, 1, -3.6, refs.clone()).is_err());
        let gen = BinaryOxideReservoirs::new("Zn", 1, 1, -3.6, refs).unwrap();
        assert!(gen.reservoirs(1000.0, &[0.0]).is_err());
    }
}
