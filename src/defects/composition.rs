/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Compositions and particle-number differences

use std::collections::BTreeMap;

/// Element symbol → number of atoms
pub type Composition = BTreeMap<String, u32>;

/// Element symbol → change in particle number (defect minus bulk)
pub type DeltaAtoms = BTreeMap<String, i32>;

/// Element symbol → absolute chemical potential in eV
pub type ChemicalPotentials = BTreeMap<String, f64>;

/// Particle-number difference between a defect cell and the bulk cell.
///
/// Elements whose count does not change are left out, including elements
/// that only appear in the bulk.
pub fn delta_atoms_from_compositions(defect: &Composition, bulk: &Composition) -> DeltaAtoms {
    let mut delta = DeltaAtoms::new();

    for element in defect.keys().chain(bulk.keys()) {
        let n_defect = defect.get(element).copied().unwrap_or(0) as i64;
        let n_bulk = bulk.get(element).copied().unwrap_or(0) as i64;
        let change = n_defect - n_bulk;
        if change != 0 {
            delta.insert(element.clone(), change as i32);
        }
    }

    delta
}
