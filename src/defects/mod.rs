/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Point-defect model
//!
//! A [`Defect`] says what was changed in the host crystal (vacancy,
//! substitution, interstitial, polaron or a complex of those), a
//! [`DefectName`] is its structured identifier and a [`DefectEntry`] is one
//! charge state of a defect together with its formation energy at the
//! valence-band maximum and zero chemical potentials.

mod composition;
mod defect;
mod entry;
pub mod errors;
mod name;

pub use composition::{delta_atoms_from_compositions, ChemicalPotentials, Composition, DeltaAtoms};
pub use defect::{Defect, DefectKind};
pub use entry::DefectEntry;
pub use errors::{DefectError, Result};
pub use name::{format_charge_kroger_vink, format_charge_number, DefectName};
