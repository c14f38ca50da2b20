/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Charge-neutrality solve and concentrations for a set of defect entries

use super::concentrations::{
    totals_by_species, ConcentrationOutput, DefectConcentration, DefectConcentrations,
    FrozenConcentrations,
};
use super::config::{ChargeCounting, SolverConfig};
use super::dos::CarrierStatistics;
use super::errors::{AnalysisError, Result};
use crate::defects::{ChemicalPotentials, DefectEntry};
use crate::utils::{bisect, boltzmann_factor, sites_per_cm3, strip_multiplicity};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Formation energy of one entry
#[derive(Debug, Clone, PartialEq)]
pub struct FormationEnergy {
    pub name: String,
    pub charge: f64,
    pub energy: f64,
}

/// Fermi level (eV above the VBM) where the stable charge changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionLevel {
    /// Charge stable below the level
    pub upper_charge: f64,
    /// Charge stable above the level
    pub lower_charge: f64,
    /// Position of the level
    pub fermi_level: f64,
}

/// Defect equilibrium analysis for one host material.
///
/// Holds the defect entries grouped by species, the bulk cell volume used to
/// turn site multiplicities into densities, and the solver settings. Every
/// method is a pure function of its arguments, so one analysis can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct DefectsAnalysis {
    entries: Vec<DefectEntry>,
    /// Bulk cell volume in Å³
    bulk_volume: f64,
    config: SolverConfig,
    /// Species name and indices of its entries, in order of first appearance
    species: Vec<(String, Vec<usize>)>,
    /// Species index of every entry
    entry_species: Vec<usize>,
}

/// Formation energies and concentrations of every entry at one point
struct Evaluation {
    energies: Vec<f64>,
    concentrations: Vec<f64>,
    /// Supplied total of every species, `None` when it is free
    frozen: Vec<Option<f64>>,
}

impl DefectsAnalysis {
    /// Create an analysis from defect entries and the bulk cell volume (Å³)
    pub fn new(entries: Vec<DefectEntry>, bulk_volume: f64) -> Result<Self> {
        if !(bulk_volume.is_finite() && bulk_volume > 0.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "bulk volume must be positive, got {}",
                bulk_volume
            )));
        }

        let mut species: Vec<(String, Vec<usize>)> = Vec::new();
        let mut entry_species = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            entry.validate()?;
            let name = entry.name().to_string();
            match species.iter().position(|(n, _)| *n == name) {
                Some(k) => {
                    species[k].1.push(i);
                    entry_species.push(k);
                }
                None => {
                    species.push((name, vec![i]));
                    entry_species.push(species.len() - 1);
                }
            }
        }

        for (name, indices) in &species {
            let sites = |i: usize| entries[i].multiplicity() as f64 * entries[i].degeneracy();
            if indices.iter().any(|&i| sites(i) != sites(indices[0])) {
                warn!(
                    "Charge states of {} differ in multiplicity or degeneracy; \
                     the stable-state charge balance is not monotone for it",
                    name
                );
            }
        }

        Ok(Self {
            entries,
            bulk_volume,
            config: SolverConfig::default(),
            species,
            entry_species,
        })
    }

    /// Replace the solver settings
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn entries(&self) -> &[DefectEntry] {
        &self.entries
    }

    pub fn bulk_volume(&self) -> f64 {
        self.bulk_volume
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Species names in order of first appearance
    pub fn species_names(&self) -> Vec<&str> {
        self.species.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Entries of one species
    pub fn entries_for(&self, species: &str) -> Vec<&DefectEntry> {
        self.species_indices(species)
            .map(|indices| indices.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    fn species_indices(&self, species: &str) -> Option<&[usize]> {
        self.species
            .iter()
            .find(|(name, _)| name == species)
            .map(|(_, indices)| indices.as_slice())
    }

    /// Sites per cm³ available to an entry
    fn site_density(&self, entry: &DefectEntry) -> f64 {
        sites_per_cm3(
            entry.multiplicity() as f64 * entry.degeneracy(),
            self.bulk_volume,
        )
    }

    /// Index of the lowest-energy entry; equal energies go to the smaller charge
    fn stable_index(&self, indices: &[usize], energies: &[f64]) -> Option<usize> {
        indices.iter().copied().reduce(|best, i| {
            let (e, q) = (energies[i], self.entries[i].charge());
            let (e_best, q_best) = (energies[best], self.entries[best].charge());
            if e < e_best || (e == e_best && q < q_best) {
                i
            } else {
                best
            }
        })
    }

    fn formation_energy_values(&self, chempots: &ChemicalPotentials, fermi_level: f64) -> Result<Vec<f64>> {
        self.entries
            .iter()
            .map(|entry| entry.formation_energy(fermi_level, chempots).map_err(AnalysisError::from))
            .collect()
    }

    /// Stable charge state of a species.
    ///
    /// Returns the entry with the lowest formation energy at the given Fermi
    /// level and chemical potentials. On an exact tie the entry with the
    /// smaller charge wins.
    pub fn stable_charge_state(
        &self,
        species: &str,
        fermi_level: f64,
        chempots: &ChemicalPotentials,
    ) -> Result<&DefectEntry> {
        let indices = self
            .species_indices(species)
            .ok_or_else(|| AnalysisError::EmptySpecies(species.to_string()))?;

        let mut energies = vec![0.0; self.entries.len()];
        for &i in indices {
            energies[i] = self.entries[i].formation_energy(fermi_level, chempots)?;
        }

        self.stable_index(indices, &energies)
            .map(|i| &self.entries[i])
            .ok_or_else(|| AnalysisError::EmptySpecies(species.to_string()))
    }

    /// Formation energy of every entry
    pub fn formation_energies(
        &self,
        chempots: &ChemicalPotentials,
        fermi_level: f64,
    ) -> Result<Vec<FormationEnergy>> {
        let energies = self.formation_energy_values(chempots, fermi_level)?;
        Ok(self
            .entries
            .iter()
            .zip(energies)
            .enumerate()
            .map(|(i, (entry, energy))| FormationEnergy {
                name: self.species[self.entry_species[i]].0.clone(),
                charge: entry.charge(),
                energy,
            })
            .collect())
    }

    /// Charge transition levels of a species.
    ///
    /// Walks the lower envelope of the formation-energy lines from the most
    /// positive charge down; charge states that are never stable are skipped.
    /// Chemical potentials shift every charge state equally and drop out.
    pub fn charge_transition_levels(&self, species: &str) -> Result<Vec<TransitionLevel>> {
        let indices = self
            .species_indices(species)
            .ok_or_else(|| AnalysisError::EmptySpecies(species.to_string()))?;

        // Lowest reference energy per charge
        let mut lines: Vec<(f64, f64)> = Vec::new();
        for &i in indices {
            let entry = &self.entries[i];
            match lines.iter_mut().find(|(q, _)| *q == entry.charge()) {
                Some(line) => line.1 = line.1.min(entry.energy()),
                None => lines.push((entry.charge(), entry.energy())),
            }
        }
        lines.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut levels = Vec::new();
        let mut current = 0;
        while current + 1 < lines.len() {
            let (q1, e1) = lines[current];
            // Next line to cross the current one, i.e. the lowest crossing point
            let mut next: Option<(usize, f64)> = None;
            for (j, &(q2, e2)) in lines.iter().enumerate().skip(current + 1) {
                let level = (e2 - e1) / (q1 - q2);
                match next {
                    Some((_, best)) if level >= best => {}
                    _ => next = Some((j, level)),
                }
            }
            match next {
                Some((j, level)) => {
                    levels.push(TransitionLevel {
                        upper_charge: q1,
                        lower_charge: lines[j].0,
                        fermi_level: level,
                    });
                    current = j;
                }
                None => break,
            }
        }

        Ok(levels)
    }

    /// Formation energies and concentrations of all entries.
    ///
    /// Species listed in `frozen` keep their supplied total concentration,
    /// distributed over their charge states with the Boltzmann weights of the
    /// current Fermi level.
    fn evaluate(
        &self,
        chempots: &ChemicalPotentials,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
    ) -> Result<Evaluation> {
        check_temperature(temperature)?;
        let energies = self.formation_energy_values(chempots, fermi_level)?;
        let mut concentrations = vec![0.0; self.entries.len()];
        let mut frozen_totals = Vec::with_capacity(self.species.len());

        for (name, indices) in &self.species {
            let supplied = frozen.and_then(|f| frozen_total(f, name));
            frozen_totals.push(supplied);
            match supplied {
                Some(total) => {
                    let e_min = indices
                        .iter()
                        .map(|&i| energies[i])
                        .fold(f64::INFINITY, f64::min);
                    let weights: Vec<f64> = indices
                        .iter()
                        .map(|&i| {
                            self.site_density(&self.entries[i])
                                * boltzmann_factor(energies[i] - e_min, temperature)
                        })
                        .collect();
                    let sum: f64 = weights.iter().sum();
                    for (&i, weight) in indices.iter().zip(weights) {
                        concentrations[i] = total * weight / sum;
                    }
                }
                None => {
                    for &i in indices {
                        let conc = self.site_density(&self.entries[i])
                            * boltzmann_factor(energies[i], temperature);
                        if !conc.is_finite() {
                            warn!(
                                "Concentration of {} (q={}) overflows at E_f = {:.3} eV, T = {} K",
                                name,
                                self.entries[i].charge(),
                                energies[i],
                                temperature
                            );
                        }
                        concentrations[i] = conc;
                    }
                }
            }
        }

        Ok(Evaluation {
            energies,
            concentrations,
            frozen: frozen_totals,
        })
    }

    fn records(&self, concentrations: &[f64]) -> Vec<DefectConcentration> {
        self.entries
            .iter()
            .zip(concentrations)
            .enumerate()
            .map(|(i, (entry, &conc))| DefectConcentration {
                name: self.species[self.entry_species[i]].0.clone(),
                charge: entry.charge(),
                conc,
            })
            .collect()
    }

    /// Concentration of every defect entry in cm⁻³.
    ///
    /// `multiplicity * degeneracy / V * exp(-E_f / k_B T)`, except for frozen
    /// species whose supplied total is shared among their charge states.
    pub fn defect_concentrations(
        &self,
        chempots: &ChemicalPotentials,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
    ) -> Result<Vec<DefectConcentration>> {
        let eval = self.evaluate(chempots, temperature, fermi_level, frozen)?;
        Ok(self.records(&eval.concentrations))
    }

    /// Concentration per species, summed over charge states
    pub fn defect_concentrations_total(
        &self,
        chempots: &ChemicalPotentials,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
    ) -> Result<BTreeMap<String, f64>> {
        let records = self.defect_concentrations(chempots, temperature, fermi_level, frozen)?;
        Ok(totals_by_species(&records))
    }

    /// Concentration of the stable charge state of each species
    pub fn defect_concentrations_stable(
        &self,
        chempots: &ChemicalPotentials,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
    ) -> Result<Vec<DefectConcentration>> {
        let eval = self.evaluate(chempots, temperature, fermi_level, frozen)?;
        Ok(self
            .species
            .iter()
            .filter_map(|(name, indices)| {
                self.stable_index(indices, &eval.energies).map(|i| DefectConcentration {
                    name: name.clone(),
                    charge: self.entries[i].charge(),
                    conc: eval.concentrations[i],
                })
            })
            .collect())
    }

    /// Defect concentrations in the requested reporting form
    pub fn concentrations(
        &self,
        chempots: &ChemicalPotentials,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
        output: ConcentrationOutput,
    ) -> Result<DefectConcentrations> {
        Ok(match output {
            ConcentrationOutput::All => DefectConcentrations::Entries(
                self.defect_concentrations(chempots, temperature, fermi_level, frozen)?,
            ),
            ConcentrationOutput::Total => DefectConcentrations::Totals(
                self.defect_concentrations_total(chempots, temperature, fermi_level, frozen)?,
            ),
            ConcentrationOutput::Stable => DefectConcentrations::Entries(
                self.defect_concentrations_stable(chempots, temperature, fermi_level, frozen)?,
            ),
        })
    }

    /// Concentration of each species as it enters the charge balance.
    ///
    /// Frozen species report their supplied total. Free species report the
    /// stable charge state's concentration under
    /// [`ChargeCounting::StableOnly`] and the sum over charge states under
    /// [`ChargeCounting::AllChargeStates`]. Freezing these values and
    /// re-solving at the same temperature gives back the same Fermi level.
    pub fn neutrality_concentrations(
        &self,
        chempots: &ChemicalPotentials,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
    ) -> Result<BTreeMap<String, f64>> {
        let eval = self.evaluate(chempots, temperature, fermi_level, frozen)?;
        Ok(self
            .species
            .iter()
            .zip(&eval.frozen)
            .map(|((name, indices), supplied)| {
                let conc = match (supplied, self.config.charge_counting) {
                    (Some(total), _) => *total,
                    (None, ChargeCounting::AllChargeStates) => {
                        indices.iter().map(|&i| eval.concentrations[i]).sum()
                    }
                    (None, ChargeCounting::StableOnly) => self
                        .stable_index(indices, &eval.energies)
                        .map(|i| eval.concentrations[i])
                        .unwrap_or(0.0),
                };
                (name.clone(), conc)
            })
            .collect())
    }

    /// Frozen keys that match none of the species, multiplicity qualifiers ignored
    pub fn unmatched_frozen<'f>(&self, frozen: &'f FrozenConcentrations) -> Vec<&'f str> {
        frozen
            .keys()
            .filter(|key| {
                let key = strip_multiplicity(key);
                !self
                    .species
                    .iter()
                    .any(|(name, _)| strip_multiplicity(name) == key)
            })
            .map(String::as_str)
            .collect()
    }

    /// Hole and electron concentrations (cm⁻³) at a Fermi level
    pub fn carrier_concentrations(
        &self,
        dos: &dyn CarrierStatistics,
        temperature: f64,
        fermi_level: f64,
    ) -> Result<(f64, f64)> {
        check_temperature(temperature)?;
        Ok(dos.carrier_concentrations(fermi_level, temperature))
    }

    /// Net charge density (e·cm⁻³) at a Fermi level.
    ///
    /// `holes - electrons + Σ q·c` plus `Σ q·c` of the external defects.
    /// With [`ChargeCounting::StableOnly`] each free species adds the stable
    /// charge state's `q·c` and each frozen species adds its supplied total
    /// times the stable charge. With [`ChargeCounting::AllChargeStates`]
    /// every entry adds its own `q·c`. Zero at neutrality and non-increasing
    /// in the Fermi level as long as the charge states of a species share
    /// their multiplicity and degeneracy.
    pub fn charge_neutrality_residual(
        &self,
        chempots: &ChemicalPotentials,
        dos: &dyn CarrierStatistics,
        temperature: f64,
        fermi_level: f64,
        frozen: Option<&FrozenConcentrations>,
        external: &[DefectConcentration],
    ) -> Result<f64> {
        let eval = self.evaluate(chempots, temperature, fermi_level, frozen)?;

        let defect_charge: f64 = match self.config.charge_counting {
            ChargeCounting::AllChargeStates => self
                .entries
                .iter()
                .zip(&eval.concentrations)
                .map(|(entry, conc)| entry.charge() * conc)
                .sum(),
            ChargeCounting::StableOnly => self
                .species
                .iter()
                .zip(&eval.frozen)
                .filter_map(|((_, indices), supplied)| {
                    self.stable_index(indices, &eval.energies).map(|i| {
                        self.entries[i].charge() * supplied.unwrap_or(eval.concentrations[i])
                    })
                })
                .sum(),
        };
        let external_charge: f64 = external.iter().map(|d| d.charge * d.conc).sum();
        let (holes, electrons) = dos.carrier_concentrations(fermi_level, temperature);

        Ok(holes - electrons + defect_charge + external_charge)
    }

    /// Fermi-level bracket: band edges widened by the margin, clipped to the DOS window
    fn fermi_level_bracket(&self, dos: &dyn CarrierStatistics) -> Result<(f64, f64)> {
        let (window_low, window_high) = dos.energy_window();
        let lower = (-self.config.energy_margin).max(window_low);
        let upper = (dos.band_gap() + self.config.energy_margin).min(window_high);
        if lower >= upper {
            return Err(AnalysisError::InvalidDos(format!(
                "empty Fermi-level bracket [{}, {}]",
                lower, upper
            )));
        }
        Ok((lower, upper))
    }

    /// Equilibrium Fermi level (eV above the VBM) from charge neutrality
    pub fn equilibrium_fermi_level(
        &self,
        chempots: &ChemicalPotentials,
        dos: &dyn CarrierStatistics,
        temperature: f64,
    ) -> Result<f64> {
        self.solve_fermi_level(chempots, dos, temperature, None, &[])
    }

    /// Fermi level with frozen species concentrations and external defects.
    ///
    /// Frozen species keep their supplied totals whatever the chemical
    /// potentials and temperature; external defects add a constant charge.
    pub fn non_equilibrium_fermi_level(
        &self,
        frozen: Option<&FrozenConcentrations>,
        chempots: &ChemicalPotentials,
        dos: &dyn CarrierStatistics,
        external: &[DefectConcentration],
        temperature: f64,
    ) -> Result<f64> {
        if let Some(frozen) = frozen {
            for key in self.unmatched_frozen(frozen) {
                warn!("Frozen concentration for {} matches no defect species, ignored", key);
            }
        }
        self.solve_fermi_level(chempots, dos, temperature, frozen, external)
    }

    fn solve_fermi_level(
        &self,
        chempots: &ChemicalPotentials,
        dos: &dyn CarrierStatistics,
        temperature: f64,
        frozen: Option<&FrozenConcentrations>,
        external: &[DefectConcentration],
    ) -> Result<f64> {
        check_temperature(temperature)?;
        let (lower, upper) = self.fermi_level_bracket(dos)?;

        let root = bisect(
            |fermi_level| {
                self.charge_neutrality_residual(
                    chempots,
                    dos,
                    temperature,
                    fermi_level,
                    frozen,
                    external,
                )
            },
            lower,
            upper,
            &self.config.bisection_settings(),
        )?;

        debug!(
            "Fermi level {:.6} eV at T = {} K after {} iterations",
            root.value, temperature, root.iterations
        );
        Ok(root.value)
    }
}

fn check_temperature(temperature: f64) -> Result<()> {
    if temperature.is_finite() && temperature > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidTemperature(temperature))
    }
}

/// Frozen total for a species, matching names without multiplicity qualifiers
fn frozen_total(frozen: &FrozenConcentrations, species: &str) -> Option<f64> {
    let species = strip_multiplicity(species);
    frozen
        .iter()
        .find(|(name, _)| strip_multiplicity(name) == species)
        .map(|(_, &conc)| conc)
}
