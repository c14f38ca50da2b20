/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Ordered control value → chemical potentials mapping

use crate::defects::ChemicalPotentials;
use serde::{Deserialize, Serialize};

/// One point of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirPoint {
    /// Control value, e.g. oxygen partial pressure in atm
    pub control: f64,
    /// Absolute chemical potentials at this point
    pub chempots: ChemicalPotentials,
}

/// Ordered sequence of reservoir points.
///
/// The order of the points is the order of every series computed from them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reservoirs {
    points: Vec<ReservoirPoint>,
    #[serde(default)]
    temperature: Option<f64>,
}

impl Reservoirs {
    /// Create reservoirs from ordered points
    pub fn new(points: Vec<ReservoirPoint>) -> Self {
        Self {
            points,
            temperature: None,
        }
    }

    /// Build from (control value, chemical potentials) pairs, keeping their order
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, ChemicalPotentials)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(control, chempots)| ReservoirPoint { control, chempots })
                .collect(),
        )
    }

    /// Attach the temperature the chemical potentials were generated at
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn points(&self) -> &[ReservoirPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Control values in sweep order
    pub fn control_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.control).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReservoirPoint> {
        self.points.iter()
    }
}
