/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Randomised checks of the neutrality residual and charge-state selection

use defect_thermo::analysis::{
    ChargeCounting, DefectConcentration, DefectsAnalysis, DensityOfStates, FrozenConcentrations,
    SolverConfig,
};
use defect_thermo::defects::{ChemicalPotentials, Defect, DefectEntry};
use proptest::prelude::*;

/// Charge states of one species share its multiplicity
fn entry_strategy() -> impl Strategy<Value = DefectEntry> {
    (0usize..3, 0u8..3, -1.0f64..6.0, -3i32..=3)
        .prop_map(|(element, kind, energy, charge)| {
            let species = ["O", "Zn", "Li"][element];
            let defect = match kind {
                0 => Defect::vacancy(species),
                1 => Defect::interstitial(species),
                _ => Defect::polaron(species),
            };
            let multiplicity = 1 + (element as u32 + kind as u32) % 3;
            DefectEntry::new(defect, energy, charge as f64, multiplicity).unwrap()
        })
}

fn external_strategy() -> impl Strategy<Value = Vec<DefectConcentration>> {
    prop::collection::vec(
        (-2i32..=2, 1e10f64..1e20)
            .prop_map(|(charge, conc)| DefectConcentration::new("Sub_X", charge as f64, conc)),
        1..4,
    )
}

/// Random band shapes on a uniform grid, zero density inside the gap
fn dos_strategy() -> impl Strategy<Value = DensityOfStates> {
    (0.5f64..4.0, prop::collection::vec(0.1f64..5.0, 8))
        .prop_map(|(gap, shape)| {
            let n = ((gap + 6.0) * 50.0).round() as usize;
            let energies: Vec<f64> = (0..=n).map(|i| i as f64 / 50.0 - 3.0).collect();
            let densities = energies
                .iter()
                .enumerate()
                .map(|(i, &e)| {
                    if e <= 0.0 || e >= gap {
                        shape[i % shape.len()]
                    } else {
                        0.0
                    }
                })
                .collect();
            DensityOfStates::new(energies, densities, 0.0, gap, 60.0).unwrap()
        })
}

fn chempots() -> ChemicalPotentials {
    ChemicalPotentials::from([
        ("O".to_string(), -1.0),
        ("Zn".to_string(), -2.0),
        ("Li".to_string(), -1.5),
    ])
}

proptest! {
    #[test]
    fn residual_is_non_increasing(
        entries in prop::collection::vec(entry_strategy(), 1..8),
        dos in dos_strategy(),
        temperature in 300.0f64..1500.0,
        frozen_total in prop::option::of(1e14f64..1e20),
        external in prop::option::of(external_strategy()),
        all_charge_states in any::<bool>(),
    ) {
        let charge_counting = if all_charge_states {
            ChargeCounting::AllChargeStates
        } else {
            ChargeCounting::StableOnly
        };
        let analysis = DefectsAnalysis::new(entries, 60.0)
            .unwrap()
            .with_config(SolverConfig { charge_counting, ..SolverConfig::default() });
        let external = external.unwrap_or_default();
        let mu = chempots();
        let frozen = frozen_total.map(|total| {
            let species = analysis.species_names()[0].to_string();
            FrozenConcentrations::from([(species, total)])
        });

        let mut previous = f64::INFINITY;
        for step in 0..=40 {
            let ef = -0.5 + step as f64 * (dos.cbm() + 1.0) / 40.0;
            let residual = analysis
                .charge_neutrality_residual(&mu, &dos, temperature, ef, frozen.as_ref(), &external)
                .unwrap();
            prop_assert!(residual <= previous + 1e-9 * previous.abs().max(1.0));
            previous = residual;
        }
    }

    #[test]
    fn stable_state_has_minimum_energy(
        entries in prop::collection::vec(entry_strategy(), 1..8),
        fermi_level in -0.5f64..4.0,
    ) {
        let analysis = DefectsAnalysis::new(entries, 60.0).unwrap();
        let mu = chempots();
        for species in analysis.species_names() {
            let stable = analysis.stable_charge_state(species, fermi_level, &mu).unwrap();
            let e_stable = stable.formation_energy(fermi_level, &mu).unwrap();
            for entry in analysis.entries_for(species) {
                let e = entry.formation_energy(fermi_level, &mu).unwrap();
                prop_assert!(e_stable <= e);
                if e == e_stable {
                    prop_assert!(stable.charge() <= entry.charge());
                }
            }
        }
    }
}
