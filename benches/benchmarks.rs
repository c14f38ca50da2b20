/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use defect_thermo::analysis::{DefectsAnalysis, DensityOfStates};
use defect_thermo::defects::{ChemicalPotentials, Defect, DefectEntry};
use defect_thermo::thermodynamics::{PressureAnalysis, Reservoirs};

fn flat_dos() -> DensityOfStates {
    let energies: Vec<f64> = (0..=940).map(|i| i as f64 / 100.0 - 3.0).collect();
    let densities = energies
        .iter()
        .map(|&e| if e <= 0.0 || e >= 3.4 { 1.0 } else { 0.0 })
        .collect();
    DensityOfStates::new(energies, densities, 0.0, 3.4, 47.6).unwrap()
}

fn analysis() -> DefectsAnalysis {
    let entries = vec![
        DefectEntry::new(Defect::vacancy("O"), 1.0, 2.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("O"), 3.5, 0.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("Zn"), 5.0, 0.0, 1).unwrap(),
        DefectEntry::new(Defect::vacancy("Zn"), 6.9, -2.0, 1).unwrap(),
        DefectEntry::new(Defect::interstitial("Zn"), 1.8, 2.0, 1).unwrap(),
        DefectEntry::new(Defect::interstitial("O"), 4.0, -2.0, 2).unwrap(),
    ];
    DefectsAnalysis::new(entries, 47.6).unwrap()
}

fn reservoirs(npoints: usize) -> Reservoirs {
    Reservoirs::from_pairs((0..npoints).map(|i| {
        let mu_o = -3.0 + 3.0 * i as f64 / (npoints - 1) as f64;
        (
            i as f64,
            ChemicalPotentials::from([("O".to_string(), mu_o), ("Zn".to_string(), -3.5 - mu_o)]),
        )
    }))
}

fn fermi_level_benchmark(c: &mut Criterion) {
    let analysis = analysis();
    let dos = flat_dos();
    let mu = ChemicalPotentials::from([("O".to_string(), -1.0), ("Zn".to_string(), -2.5)]);

    let mut group = c.benchmark_group("Fermi Level");

    group.bench_function("equilibrium_fermi_level", |b| {
        b.iter(|| {
            black_box(
                analysis
                    .equilibrium_fermi_level(black_box(&mu), &dos, black_box(1000.0))
                    .unwrap(),
            )
        })
    });

    group.bench_function("charge_neutrality_residual", |b| {
        b.iter(|| {
            black_box(
                analysis
                    .charge_neutrality_residual(&mu, &dos, 1000.0, black_box(1.7), None, &[])
                    .unwrap(),
            )
        })
    });

    group.finish();
}

fn sweep_benchmark(c: &mut Criterion) {
    let analysis = analysis();
    let dos = flat_dos();
    let reservoirs = reservoirs(100);
    let sweep = PressureAnalysis::new(&analysis, &dos);

    let mut group = c.benchmark_group("Pressure Sweep");

    group.bench_function("fermi_levels_100_points", |b| {
        b.iter(|| black_box(sweep.get_fermi_levels(&reservoirs, Some(1000.0)).unwrap()))
    });

    group.bench_function("quenched_fermi_levels_100_points", |b| {
        b.iter(|| {
            black_box(
                sweep
                    .get_quenched_fermi_levels(&reservoirs, Some(1000.0), 300.0, None, false)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, fermi_level_benchmark, sweep_benchmark);
criterion_main!(benches);
