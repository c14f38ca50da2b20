/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Defect entries: one charge state of one defect

use super::composition::{ChemicalPotentials, DeltaAtoms};
use super::defect::{Defect, DefectKind};
use super::errors::{DefectError, Result};
use super::name::{format_charge_kroger_vink, format_charge_number, DefectName};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_degeneracy() -> f64 {
    1.0
}

/// A single charge state of a defect.
///
/// The formation energy is linear in the Fermi level (referenced to the
/// valence-band maximum) and in the chemical potentials:
///
/// `E_f = energy + charge * E_F + Σ delta[el] * mu[el]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectEntry {
    /// The defect this entry describes
    defect: Defect,
    /// Formation energy at E_F = 0 and zero chemical potentials (eV)
    energy: f64,
    /// Charge state, integer or half-integer
    charge: f64,
    /// Number of equivalent sites per bulk cell
    multiplicity: u32,
    /// Internal (spin/orbital) degeneracy of the charge state
    #[serde(default = "default_degeneracy")]
    degeneracy: f64,
    /// Optional label distinguishing otherwise identical defects
    #[serde(default)]
    label: Option<String>,
}

impl DefectEntry {
    /// Create a new entry, validating the defect
    pub fn new(defect: Defect, energy: f64, charge: f64, multiplicity: u32) -> Result<Self> {
        let entry = Self {
            defect,
            energy,
            charge,
            multiplicity,
            degeneracy: 1.0,
            label: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Attach a label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Set the internal degeneracy
    pub fn with_degeneracy(mut self, degeneracy: f64) -> Result<Self> {
        self.degeneracy = degeneracy;
        self.validate()?;
        Ok(self)
    }

    /// Check every invariant of the entry.
    ///
    /// Entries built through `new` are always valid; entries coming from
    /// deserialisation are checked when handed to the analysis.
    pub fn validate(&self) -> Result<()> {
        self.defect.validate()?;
        if self.multiplicity == 0 {
            return Err(DefectError::InvalidMultiplicity {
                name: self.name().to_string(),
                multiplicity: self.multiplicity,
            });
        }
        if !(self.degeneracy.is_finite() && self.degeneracy > 0.0) {
            return Err(DefectError::InvalidDegeneracy {
                name: self.name().to_string(),
                degeneracy: self.degeneracy,
            });
        }
        Ok(())
    }

    pub fn defect(&self) -> &Defect {
        &self.defect
    }

    pub fn kind(&self) -> DefectKind {
        self.defect.kind()
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    pub fn degeneracy(&self) -> f64 {
        self.degeneracy
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the charge state
    pub fn set_charge(&mut self, charge: f64) {
        self.charge = charge;
    }

    /// Set or clear the label
    pub fn set_label(&mut self, label: Option<&str>) {
        self.label = label.map(str::to_string);
    }

    /// Set the site multiplicity
    pub fn set_multiplicity(&mut self, multiplicity: u32) -> Result<()> {
        if multiplicity == 0 {
            return Err(DefectError::InvalidMultiplicity {
                name: self.name().to_string(),
                multiplicity,
            });
        }
        self.multiplicity = multiplicity;
        Ok(())
    }

    /// Structured name, shared by every charge state of the same defect
    pub fn name(&self) -> DefectName {
        self.defect.name(self.label.as_deref())
    }

    /// Particle-number change with respect to the bulk
    pub fn delta_atoms(&self) -> DeltaAtoms {
        self.defect.delta_atoms()
    }

    /// Sum over exchanged elements of delta * mu
    pub fn chemical_potential_term(&self, chempots: &ChemicalPotentials) -> Result<f64> {
        self.delta_atoms()
            .iter()
            .try_fold(0.0, |acc, (element, change)| match chempots.get(element) {
                Some(mu) => Ok(acc + *change as f64 * mu),
                None => Err(DefectError::MissingChemicalPotential {
                    name: self.name().to_string(),
                    element: element.clone(),
                }),
            })
    }

    /// Formation energy at a Fermi level (eV above the VBM) and chemical potentials
    pub fn formation_energy(&self, fermi_level: f64, chempots: &ChemicalPotentials) -> Result<f64> {
        Ok(self.energy + self.charge * fermi_level + self.chemical_potential_term(chempots)?)
    }

    /// LaTeX symbol
    pub fn symbol(&self) -> String {
        self.name().symbol()
    }

    /// LaTeX symbol with the charge as a number
    pub fn symbol_with_charge(&self) -> String {
        format_charge_number(&self.symbol(), self.charge)
    }

    /// LaTeX symbol with the charge in Kröger-Vink notation
    pub fn symbol_with_charge_kv(&self) -> String {
        format_charge_kroger_vink(&self.symbol(), self.charge)
    }
}

impl fmt::Display for DefectEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (q={}, mult={}, E={:.4} eV)",
            self.name(),
            self.charge,
            self.multiplicity,
            self.energy
        )
    }
}
