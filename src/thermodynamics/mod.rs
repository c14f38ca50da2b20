/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Thermodynamic sweeps
//!
//! Drives a [`DefectsAnalysis`](crate::analysis::DefectsAnalysis) along an
//! ordered set of reservoirs (for example an oxygen partial-pressure range)
//! and collects Fermi levels, concentrations and conductivities into
//! index-aligned [`ThermoData`] series. Also covers frozen-defect and
//! two-temperature quenching variants.

mod chempots;
mod conductivity;
pub mod errors;
mod pressure_analysis;
mod reservoirs;
mod thermodata;

pub use chempots::{
    chempot_ideal_gas, oxygen_standard_chempot, partial_pressure_range, BinaryOxideReservoirs,
    ReservoirGenerator,
};
pub use conductivity::{Conductivity, Mobilities};
pub use errors::{Result, ThermoError};
pub use pressure_analysis::{PressureAnalysis, SweepPolicy};
pub use reservoirs::{ReservoirPoint, Reservoirs};
pub use thermodata::{Temperature, ThermoData, ThermoSeries};
