/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Sweeps, quenching, conductivity and result persistence

mod common;

use approx::assert_relative_eq;
use common::{flat_dos, init_logging, zno_analysis, zno_reservoirs};
use defect_thermo::analysis::{AnalysisError, ConcentrationOutput, DefectConcentration};
use defect_thermo::defects::ChemicalPotentials;
use defect_thermo::thermodynamics::{
    partial_pressure_range, BinaryOxideReservoirs, Conductivity, Mobilities, PressureAnalysis,
    ReservoirGenerator, Reservoirs, SweepPolicy, Temperature, ThermoData, ThermoError,
};
use tempfile::tempdir;

#[test]
fn test_conductivity_with_multiplicity_qualifier() {
    let conductivity = Conductivity::new(Mobilities::from([
        ("holes".to_string(), 1.0),
        ("electrons".to_string(), 1.0),
        ("Vac_Na".to_string(), 1.0),
    ]));
    let defects = [DefectConcentration::new("Vac_Na_mult2", -1.0, 1e20)];

    let sigma = conductivity
        .get_conductivity((1e18, 1e18), &defects, true)
        .unwrap();
    let expected = 1.60217662e-19 * (1e18 + 1e18) + 1.0 * 1e20 * 1.0 * 1.60217662e-19 * 1e6;
    assert_relative_eq!(sigma, expected, max_relative = 1e-12);

    assert!(matches!(
        conductivity.get_conductivity((1e18, 1e18), &defects, false),
        Err(ThermoError::MissingMobility(name)) if name == "Vac_Na_mult2"
    ));
}

#[test]
fn test_sweep_without_temperature_fails() {
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let sweep = PressureAnalysis::new(&analysis, &dos);
    assert!(matches!(
        sweep.get_concentrations(&zno_reservoirs(4), ConcentrationOutput::All, None),
        Err(ThermoError::MissingTemperature)
    ));
    assert!(matches!(
        sweep.get_quenched_fermi_levels(&zno_reservoirs(4), None, 300.0, None, false),
        Err(ThermoError::MissingTemperature)
    ));
}

#[test]
fn test_quench_without_cooling_matches_equilibrium() {
    init_logging();
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let sweep = PressureAnalysis::new(&analysis, &dos);
    let reservoirs = zno_reservoirs(7).with_temperature(1100.0);

    let equilibrium = sweep.get_fermi_levels(&reservoirs, None).unwrap();
    let quenched = sweep
        .get_quenched_fermi_levels(&reservoirs, None, 1100.0, None, true)
        .unwrap();

    assert_eq!(quenched.temperature(), Some(Temperature::Quench(1100.0, 1100.0)));
    for (a, b) in equilibrium
        .fermi_levels()
        .unwrap()
        .iter()
        .zip(quenched.fermi_levels().unwrap())
    {
        assert_relative_eq!(*a, *b, epsilon = 1e-8);
    }
}

#[test]
fn test_partial_quench_matches_names_without_multiplicity() {
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let sweep = PressureAnalysis::new(&analysis, &dos);
    let reservoirs = zno_reservoirs(3);
    let quenched_species = vec!["Vac_Zn_mult1".to_string()];

    let hot = sweep
        .get_concentrations(&reservoirs, ConcentrationOutput::Stable, Some(1300.0))
        .unwrap();
    let cold = sweep
        .get_quenched_concentrations(
            &reservoirs,
            Some(1300.0),
            400.0,
            Some(&quenched_species),
            true,
            ConcentrationOutput::Total,
        )
        .unwrap();

    for (h, c) in hot
        .defect_concentrations()
        .unwrap()
        .iter()
        .zip(cold.defect_concentrations().unwrap())
    {
        assert_relative_eq!(
            h.total("Vac_Zn").unwrap(),
            c.total("Vac_Zn").unwrap(),
            max_relative = 1e-9
        );
    }
    assert_eq!(cold.carrier_concentrations().unwrap().len(), 3);
}

#[test]
fn test_fail_fast_is_the_default() {
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let mut points = zno_reservoirs(4).points().to_vec();
    points[1].chempots.remove("Zn");
    let failing_control = points[1].control;
    let reservoirs = Reservoirs::new(points).with_temperature(1000.0);

    let sweep = PressureAnalysis::new(&analysis, &dos);
    assert_eq!(sweep.policy(), SweepPolicy::FailFast);
    let err = sweep
        .get_concentrations(&reservoirs, ConcentrationOutput::All, None)
        .unwrap_err();
    assert!(matches!(err, ThermoError::Point { control, .. } if control == failing_control));
    assert!(matches!(err.analysis_error(), Some(AnalysisError::Defect(_))));

    let skipped = PressureAnalysis::new(&analysis, &dos)
        .with_policy(SweepPolicy::SkipFailed)
        .get_concentrations(&reservoirs, ConcentrationOutput::All, None)
        .unwrap();
    assert_eq!(skipped.len(), 3);
    assert_eq!(skipped.defect_concentrations().unwrap().len(), 3);
    assert!(!skipped.partial_pressures().contains(&failing_control));
}

#[test]
fn test_generated_oxide_reservoirs_drive_a_sweep() {
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let references = ChemicalPotentials::from([("Zn".to_string(), -1.26), ("O".to_string(), -4.95)]);
    let generator = BinaryOxideReservoirs::new("Zn", 1, 1, -3.6, references).unwrap();
    let pressures = partial_pressure_range(-20.0, 5.0, 6);
    let reservoirs = generator.reservoirs(1000.0, &pressures).unwrap();

    let data = PressureAnalysis::new(&analysis, &dos)
        .get_fermi_levels(&reservoirs, None)
        .unwrap();
    assert_eq!(data.partial_pressures(), pressures.as_slice());
    assert_eq!(data.temperature(), Some(Temperature::Single(1000.0)));
    assert!(data
        .fermi_levels()
        .unwrap()
        .iter()
        .all(|ef| *ef > -1.0 && *ef < 4.4));
}

#[test]
fn test_thermodata_file_round_trip() {
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let data = PressureAnalysis::new(&analysis, &dos)
        .get_concentrations(&zno_reservoirs(5), ConcentrationOutput::All, Some(900.0))
        .unwrap()
        .with_name("ZnO 900 K");

    let dir = tempdir().unwrap();
    let path = dir.path().join("thermodata.json");
    data.to_file(&path).unwrap();
    let back = ThermoData::from_file(&path).unwrap();

    assert_eq!(back, data);
    assert_eq!(back.name(), Some("ZnO 900 K"));
    assert_eq!(ThermoData::from_dict(data.as_dict().unwrap()).unwrap(), data);
}

#[test]
fn test_specific_pressure_slice_is_unchanged() {
    let analysis = zno_analysis();
    let dos = flat_dos(3.4, 47.6);
    let data = PressureAnalysis::new(&analysis, &dos)
        .get_concentrations(&zno_reservoirs(5), ConcentrationOutput::Stable, Some(900.0))
        .unwrap();

    let p = data.partial_pressures()[3];
    let slice = data.get_specific_pressures(&[p]).unwrap();
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.partial_pressures(), &[p]);
    assert_eq!(slice.fermi_levels().unwrap()[0], data.fermi_levels().unwrap()[3]);
    assert_eq!(
        slice.defect_concentrations().unwrap()[0],
        data.defect_concentrations().unwrap()[3]
    );
    assert_eq!(
        slice.carrier_concentrations().unwrap()[0],
        data.carrier_concentrations().unwrap()[3]
    );
    assert_eq!(slice.temperature(), data.temperature());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        ThermoData::from_file(dir.path().join("absent.json")),
        Err(ThermoError::Io(_))
    ));
}
