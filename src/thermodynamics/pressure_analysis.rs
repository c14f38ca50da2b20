/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Sweeps of a defect analysis over ordered reservoirs

use super::conductivity::Conductivity;
use super::errors::{Result, ThermoError};
use super::reservoirs::{ReservoirPoint, Reservoirs};
use super::thermodata::{Temperature, ThermoData, ThermoSeries};
use crate::analysis::{
    self, CarrierStatistics, ConcentrationOutput, DefectConcentration, DefectConcentrations,
    DefectsAnalysis, FrozenConcentrations,
};
use crate::defects::ChemicalPotentials;
use crate::utils::{names_match, strip_multiplicity};
use log::{debug, info, warn};
use rayon::prelude::*;

/// What a sweep does with a point whose Fermi level cannot be found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPolicy {
    /// Abort with the first failing point, in sweep order
    #[default]
    FailFast,
    /// Drop the point from every series and continue
    SkipFailed,
}

/// Per-point state of a quench, at the final temperature
struct QuenchedPoint {
    fermi_level: f64,
    frozen: FrozenConcentrations,
}

/// Drives a [`DefectsAnalysis`] across reservoirs.
///
/// Points are solved in parallel; results keep the reservoir order. When
/// frozen or external defects are configured every solve is a
/// non-equilibrium one.
pub struct PressureAnalysis<'a> {
    analysis: &'a DefectsAnalysis,
    dos: &'a dyn CarrierStatistics,
    frozen: Option<FrozenConcentrations>,
    external: Vec<DefectConcentration>,
    policy: SweepPolicy,
}

impl<'a> PressureAnalysis<'a> {
    pub fn new(analysis: &'a DefectsAnalysis, dos: &'a dyn CarrierStatistics) -> Self {
        Self {
            analysis,
            dos,
            frozen: None,
            external: Vec::new(),
            policy: SweepPolicy::default(),
        }
    }

    /// Fix the total concentration of some species
    pub fn with_frozen(mut self, frozen: FrozenConcentrations) -> Self {
        self.frozen = Some(frozen);
        self
    }

    /// Add defects outside the entry set as constant charges
    pub fn with_external(mut self, external: Vec<DefectConcentration>) -> Self {
        self.external = external;
        self
    }

    pub fn with_policy(mut self, policy: SweepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn analysis(&self) -> &DefectsAnalysis {
        self.analysis
    }

    pub fn frozen(&self) -> Option<&FrozenConcentrations> {
        self.frozen.as_ref()
    }

    pub fn external(&self) -> &[DefectConcentration] {
        &self.external
    }

    pub fn policy(&self) -> SweepPolicy {
        self.policy
    }

    fn is_equilibrium(&self) -> bool {
        self.frozen.is_none() && self.external.is_empty()
    }

    /// Explicit temperature first, then the one carried by the reservoirs
    fn resolve_temperature(&self, reservoirs: &Reservoirs, temperature: Option<f64>) -> Result<f64> {
        temperature
            .or_else(|| reservoirs.temperature())
            .ok_or(ThermoError::MissingTemperature)
    }

    fn fermi_level(&self, chempots: &ChemicalPotentials, temperature: f64) -> analysis::Result<f64> {
        if self.is_equilibrium() {
            self.analysis
                .equilibrium_fermi_level(chempots, self.dos, temperature)
        } else {
            self.analysis.non_equilibrium_fermi_level(
                self.frozen.as_ref(),
                chempots,
                self.dos,
                &self.external,
                temperature,
            )
        }
    }

    /// Evaluate every point in parallel and collect the successful ones in order
    fn sweep<T, F>(&self, reservoirs: &Reservoirs, solve: F) -> Result<(Vec<f64>, Vec<T>)>
    where
        T: Send,
        F: Fn(&ReservoirPoint) -> analysis::Result<T> + Sync,
    {
        info!(
            "Sweeping {} points ({:?})",
            reservoirs.len(),
            self.policy
        );
        let results: Vec<analysis::Result<T>> =
            reservoirs.points().par_iter().map(|point| solve(point)).collect();

        let mut controls = Vec::with_capacity(results.len());
        let mut values = Vec::with_capacity(results.len());
        for (point, result) in reservoirs.points().iter().zip(results) {
            match result {
                Ok(value) => {
                    controls.push(point.control);
                    values.push(value);
                }
                Err(source) => match self.policy {
                    SweepPolicy::FailFast => {
                        return Err(ThermoError::Point {
                            control: point.control,
                            source,
                        })
                    }
                    SweepPolicy::SkipFailed => {
                        warn!("Skipping control value {:e}: {}", point.control, source);
                    }
                },
            }
        }

        info!("Sweep done, {} of {} points solved", values.len(), reservoirs.len());
        Ok((controls, values))
    }

    /// Fermi level, defect and carrier concentrations at every point
    pub fn get_concentrations(
        &self,
        reservoirs: &Reservoirs,
        output: ConcentrationOutput,
        temperature: Option<f64>,
    ) -> Result<ThermoData> {
        let temperature = self.resolve_temperature(reservoirs, temperature)?;

        let (controls, points) = self.sweep(reservoirs, |point| {
            let fermi_level = self.fermi_level(&point.chempots, temperature)?;
            let defects = self.analysis.concentrations(
                &point.chempots,
                temperature,
                fermi_level,
                self.frozen.as_ref(),
                output,
            )?;
            let carriers = self
                .analysis
                .carrier_concentrations(self.dos, temperature, fermi_level)?;
            debug!("{:e}: E_F = {:.4} eV", point.control, fermi_level);
            Ok((fermi_level, defects, carriers))
        })?;

        let mut fermi_levels = Vec::with_capacity(points.len());
        let mut defect_concentrations = Vec::with_capacity(points.len());
        let mut carrier_concentrations = Vec::with_capacity(points.len());
        for (fermi_level, defects, carriers) in points {
            fermi_levels.push(fermi_level);
            defect_concentrations.push(defects);
            carrier_concentrations.push(carriers);
        }

        ThermoData::new(
            ThermoSeries {
                partial_pressures: controls,
                defect_concentrations: Some(defect_concentrations),
                carrier_concentrations: Some(carrier_concentrations),
                conductivities: None,
                fermi_levels: Some(fermi_levels),
            },
            Some(Temperature::Single(temperature)),
            None,
        )
    }

    /// Conductivity at every point, from the charge-state concentrations
    pub fn get_conductivities(
        &self,
        reservoirs: &Reservoirs,
        conductivity: &Conductivity,
        temperature: Option<f64>,
        ignore_multiplicity: bool,
    ) -> Result<ThermoData> {
        let temperature = self.resolve_temperature(reservoirs, temperature)?;

        let (controls, points) = self.sweep(reservoirs, |point| {
            let fermi_level = self.fermi_level(&point.chempots, temperature)?;
            let defects = self.analysis.defect_concentrations(
                &point.chempots,
                temperature,
                fermi_level,
                self.frozen.as_ref(),
            )?;
            let carriers = self
                .analysis
                .carrier_concentrations(self.dos, temperature, fermi_level)?;
            Ok((fermi_level, defects, carriers))
        })?;

        let mut fermi_levels = Vec::with_capacity(points.len());
        let mut conductivities = Vec::with_capacity(points.len());
        for (fermi_level, defects, carriers) in points {
            conductivities.push(conductivity.get_conductivity(
                carriers,
                &defects,
                ignore_multiplicity,
            )?);
            fermi_levels.push(fermi_level);
        }

        ThermoData::new(
            ThermoSeries {
                partial_pressures: controls,
                conductivities: Some(conductivities),
                fermi_levels: Some(fermi_levels),
                ..Default::default()
            },
            Some(Temperature::Single(temperature)),
            None,
        )
    }

    /// Fermi level at every point
    pub fn get_fermi_levels(
        &self,
        reservoirs: &Reservoirs,
        temperature: Option<f64>,
    ) -> Result<ThermoData> {
        let temperature = self.resolve_temperature(reservoirs, temperature)?;
        let (controls, fermi_levels) =
            self.sweep(reservoirs, |point| self.fermi_level(&point.chempots, temperature))?;

        ThermoData::new(
            ThermoSeries {
                partial_pressures: controls,
                fermi_levels: Some(fermi_levels),
                ..Default::default()
            },
            Some(Temperature::Single(temperature)),
            None,
        )
    }

    /// Equilibrate at `t_initial`, freeze, re-solve the electrons at `t_final`
    fn quench_point(
        &self,
        chempots: &ChemicalPotentials,
        t_initial: f64,
        t_final: f64,
        quenched_species: Option<&[String]>,
        ignore_multiplicity: bool,
    ) -> analysis::Result<QuenchedPoint> {
        let fermi_initial = self.fermi_level(chempots, t_initial)?;
        let totals = self.analysis.neutrality_concentrations(
            chempots,
            t_initial,
            fermi_initial,
            self.frozen.as_ref(),
        )?;

        let mut frozen = self.frozen.clone().unwrap_or_default();
        for (name, conc) in totals {
            let quenched = match quenched_species {
                None => true,
                Some(list) => list
                    .iter()
                    .any(|species| names_match(species, &name, ignore_multiplicity)),
            };
            if quenched {
                let key = strip_multiplicity(&name);
                frozen.retain(|existing, _| strip_multiplicity(existing) != key);
                frozen.insert(name, conc);
            }
        }

        let fermi_level = self.analysis.non_equilibrium_fermi_level(
            Some(&frozen),
            chempots,
            self.dos,
            &self.external,
            t_final,
        )?;
        debug!(
            "quench {} K -> {} K: E_F {:.4} -> {:.4} eV",
            t_initial, t_final, fermi_initial, fermi_level
        );

        Ok(QuenchedPoint {
            fermi_level,
            frozen,
        })
    }

    /// Fermi levels after quenching from `t_initial` to `t_final`.
    ///
    /// At each point the defects equilibrate at `t_initial`; then either all
    /// species or only `quenched_species` keep the concentration they carry
    /// in the charge balance (see
    /// [`DefectsAnalysis::neutrality_concentrations`]) while the carriers
    /// re-equilibrate at `t_final`. `t_initial` falls back to the reservoir
    /// temperature.
    pub fn get_quenched_fermi_levels(
        &self,
        reservoirs: &Reservoirs,
        t_initial: Option<f64>,
        t_final: f64,
        quenched_species: Option<&[String]>,
        ignore_multiplicity: bool,
    ) -> Result<ThermoData> {
        let t_initial = self.resolve_temperature(reservoirs, t_initial)?;
        let (controls, points) = self.sweep(reservoirs, |point| {
            self.quench_point(
                &point.chempots,
                t_initial,
                t_final,
                quenched_species,
                ignore_multiplicity,
            )
        })?;

        ThermoData::new(
            ThermoSeries {
                partial_pressures: controls,
                fermi_levels: Some(points.iter().map(|p| p.fermi_level).collect()),
                ..Default::default()
            },
            Some(Temperature::Quench(t_initial, t_final)),
            None,
        )
    }

    /// Defect and carrier concentrations at `t_final` after a quench
    pub fn get_quenched_concentrations(
        &self,
        reservoirs: &Reservoirs,
        t_initial: Option<f64>,
        t_final: f64,
        quenched_species: Option<&[String]>,
        ignore_multiplicity: bool,
        output: ConcentrationOutput,
    ) -> Result<ThermoData> {
        let t_initial = self.resolve_temperature(reservoirs, t_initial)?;
        let (controls, points) = self.sweep(reservoirs, |point| {
            let quenched = self.quench_point(
                &point.chempots,
                t_initial,
                t_final,
                quenched_species,
                ignore_multiplicity,
            )?;
            let defects = self.analysis.concentrations(
                &point.chempots,
                t_final,
                quenched.fermi_level,
                Some(&quenched.frozen),
                output,
            )?;
            let carriers =
                self.analysis
                    .carrier_concentrations(self.dos, t_final, quenched.fermi_level)?;
            Ok((quenched.fermi_level, defects, carriers))
        })?;

        let mut fermi_levels = Vec::with_capacity(points.len());
        let mut defect_concentrations: Vec<DefectConcentrations> = Vec::with_capacity(points.len());
        let mut carrier_concentrations = Vec::with_capacity(points.len());
        for (fermi_level, defects, carriers) in points {
            fermi_levels.push(fermi_level);
            defect_concentrations.push(defects);
            carrier_concentrations.push(carriers);
        }

        ThermoData::new(
            ThermoSeries {
                partial_pressures: controls,
                defect_concentrations: Some(defect_concentrations),
                carrier_concentrations: Some(carrier_concentrations),
                conductivities: None,
                fermi_levels: Some(fermi_levels),
            },
            Some(Temperature::Quench(t_initial, t_final)),
            None,
        )
    }
}
