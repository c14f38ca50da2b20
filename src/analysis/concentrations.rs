/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Defect concentration records and reporting modes

use super::errors::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Species name → fixed total concentration (cm⁻³).
///
/// Multiplicity qualifiers in the keys are ignored when matching species.
pub type FrozenConcentrations = BTreeMap<String, f64>;

/// Concentration of one defect charge state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectConcentration {
    /// Species name
    pub name: String,
    /// Charge state
    pub charge: f64,
    /// Concentration in cm⁻³
    pub conc: f64,
}

impl DefectConcentration {
    pub fn new(name: &str, charge: f64, conc: f64) -> Self {
        Self {
            name: name.to_string(),
            charge,
            conc,
        }
    }
}

/// How defect concentrations are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcentrationOutput {
    /// Every charge state of every species
    #[default]
    All,
    /// Sum over charge states, per species
    Total,
    /// Only the stable charge state of each species
    Stable,
}

impl FromStr for ConcentrationOutput {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ConcentrationOutput::All),
            "total" => Ok(ConcentrationOutput::Total),
            "stable" => Ok(ConcentrationOutput::Stable),
            other => Err(AnalysisError::InvalidOutputMode(other.to_string())),
        }
    }
}

impl fmt::Display for ConcentrationOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            ConcentrationOutput::All => "all",
            ConcentrationOutput::Total => "total",
            ConcentrationOutput::Stable => "stable",
        };
        write!(f, "{}", mode)
    }
}

/// Defect concentrations at one point, in one of the reporting forms.
///
/// Serialises as a list of `{name, charge, conc}` records or as a
/// `name → conc` object for totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefectConcentrations {
    /// Per charge-state records (`all` and `stable` modes)
    Entries(Vec<DefectConcentration>),
    /// Per species totals (`total` mode)
    Totals(BTreeMap<String, f64>),
}

impl DefectConcentrations {
    /// Total concentration of a species, summed over the charge states present
    pub fn total(&self, name: &str) -> Option<f64> {
        match self {
            DefectConcentrations::Entries(entries) => {
                let mut found = false;
                let mut sum = 0.0;
                for entry in entries.iter().filter(|e| e.name == name) {
                    found = true;
                    sum += entry.conc;
                }
                found.then_some(sum)
            }
            DefectConcentrations::Totals(totals) => totals.get(name).copied(),
        }
    }

    /// Per charge-state records, if reported that way
    pub fn entries(&self) -> Option<&[DefectConcentration]> {
        match self {
            DefectConcentrations::Entries(entries) => Some(entries),
            DefectConcentrations::Totals(_) => None,
        }
    }

    /// Per species totals regardless of the reporting form
    pub fn totals(&self) -> BTreeMap<String, f64> {
        match self {
            DefectConcentrations::Entries(entries) => totals_by_species(entries),
            DefectConcentrations::Totals(totals) => totals.clone(),
        }
    }
}

/// Sum concentrations over charge states, per species name
pub fn totals_by_species(concentrations: &[DefectConcentration]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for c in concentrations {
        *totals.entry(c.name.clone()).or_insert(0.0) += c.conc;
    }
    totals
}
