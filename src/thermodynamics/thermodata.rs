/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Index-aligned result series of a thermodynamic sweep

use super::errors::{Result, ThermoError};
use crate::analysis::DefectConcentrations;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Temperature of a result set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    /// Single temperature in K
    Single(f64),
    /// Initial and final temperature of a quench, in K
    Quench(f64, f64),
}

/// Parallel sequences, one value per sweep point.
///
/// Every present series has the same length as `partial_pressures`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermoSeries {
    /// Control values, in sweep order
    pub partial_pressures: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defect_concentrations: Option<Vec<DefectConcentrations>>,
    /// (holes, electrons) in cm⁻³
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_concentrations: Option<Vec<(f64, f64)>>,
    /// Conductivities in S/m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conductivities: Option<Vec<f64>>,
    /// Fermi levels in eV above the VBM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fermi_levels: Option<Vec<f64>>,
}

impl ThermoSeries {
    fn check_lengths(&self) -> Result<()> {
        let expected = self.partial_pressures.len();
        let lengths = [
            ("defect_concentrations", self.defect_concentrations.as_ref().map(Vec::len)),
            ("carrier_concentrations", self.carrier_concentrations.as_ref().map(Vec::len)),
            ("conductivities", self.conductivities.as_ref().map(Vec::len)),
            ("fermi_levels", self.fermi_levels.as_ref().map(Vec::len)),
        ];
        for (series, found) in lengths {
            if let Some(found) = found {
                if found != expected {
                    return Err(ThermoError::LengthMismatch {
                        series: series.to_string(),
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_finite(&self) -> Result<()> {
        fn first_bad<T>(values: &[T], finite: impl Fn(&T) -> bool) -> Option<usize> {
            values.iter().position(|v| !finite(v))
        }
        let bad = [
            ("partial_pressures", first_bad(&self.partial_pressures, |p| p.is_finite())),
            (
                "defect_concentrations",
                self.defect_concentrations.as_deref().and_then(|v| {
                    first_bad(v, |point| match point {
                        DefectConcentrations::Entries(entries) => {
                            entries.iter().all(|d| d.charge.is_finite() && d.conc.is_finite())
                        }
                        DefectConcentrations::Totals(totals) => {
                            totals.values().all(|c| c.is_finite())
                        }
                    })
                }),
            ),
            (
                "carrier_concentrations",
                self.carrier_concentrations
                    .as_deref()
                    .and_then(|v| first_bad(v, |(h, n)| h.is_finite() && n.is_finite())),
            ),
            (
                "conductivities",
                self.conductivities.as_deref().and_then(|v| first_bad(v, |s| s.is_finite())),
            ),
            (
                "fermi_levels",
                self.fermi_levels.as_deref().and_then(|v| first_bad(v, |e| e.is_finite())),
            ),
        ];
        match bad.into_iter().find_map(|(series, index)| index.map(|i| (series, i))) {
            Some((series, index)) => Err(ThermoError::NonFiniteValue {
                series: series.to_string(),
                index,
            }),
            None => Ok(()),
        }
    }

    fn select(&self, indices: &[usize]) -> Self {
        fn pick<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
            indices.iter().map(|&i| values[i].clone()).collect()
        }
        Self {
            partial_pressures: pick(&self.partial_pressures, indices),
            defect_concentrations: self.defect_concentrations.as_deref().map(|v| pick(v, indices)),
            carrier_concentrations: self.carrier_concentrations.as_deref().map(|v| pick(v, indices)),
            conductivities: self.conductivities.as_deref().map(|v| pick(v, indices)),
            fermi_levels: self.fermi_levels.as_deref().map(|v| pick(v, indices)),
        }
    }
}

#[derive(Deserialize)]
struct ThermoDocument {
    thermodata: ThermoSeries,
    #[serde(default)]
    temperature: Option<Temperature>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<ThermoDocument> for ThermoData {
    type Error = ThermoError;

    fn try_from(doc: ThermoDocument) -> Result<Self> {
        ThermoData::new(doc.thermodata, doc.temperature, doc.name)
    }
}

/// Immutable result of a sweep.
///
/// Serialises to `{"thermodata": {...}, "temperature": ..., "name": ...}`,
/// with the temperature a number or a `[T_initial, T_final]` pair. Every
/// value must be finite: JSON has no NaN or infinity, so such a document
/// could not be read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThermoDocument")]
pub struct ThermoData {
    thermodata: ThermoSeries,
    temperature: Option<Temperature>,
    name: Option<String>,
}

impl ThermoData {
    /// Create a result set, checking that every series is index-aligned and finite
    pub fn new(
        thermodata: ThermoSeries,
        temperature: Option<Temperature>,
        name: Option<String>,
    ) -> Result<Self> {
        thermodata.check_lengths()?;
        thermodata.check_finite()?;
        Ok(Self {
            thermodata,
            temperature,
            name,
        })
    }

    /// Same data under a different name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn series(&self) -> &ThermoSeries {
        &self.thermodata
    }

    pub fn temperature(&self) -> Option<Temperature> {
        self.temperature
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.thermodata.partial_pressures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thermodata.partial_pressures.is_empty()
    }

    pub fn partial_pressures(&self) -> &[f64] {
        &self.thermodata.partial_pressures
    }

    pub fn fermi_levels(&self) -> Option<&[f64]> {
        self.thermodata.fermi_levels.as_deref()
    }

    pub fn defect_concentrations(&self) -> Option<&[DefectConcentrations]> {
        self.thermodata.defect_concentrations.as_deref()
    }

    pub fn carrier_concentrations(&self) -> Option<&[(f64, f64)]> {
        self.thermodata.carrier_concentrations.as_deref()
    }

    pub fn conductivities(&self) -> Option<&[f64]> {
        self.thermodata.conductivities.as_deref()
    }

    /// Generic JSON value holding every series, the temperature and the name
    pub fn as_dict(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild from the value produced by [`as_dict`](Self::as_dict)
    pub fn from_dict(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the JSON document to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a JSON document written by [`to_file`](Self::to_file)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Slice of the data at the control values closest to the requested ones.
    ///
    /// The nearest point is the one with the smallest absolute difference,
    /// the first one on a tie. Requested values keep their order.
    pub fn get_specific_pressures(&self, values: &[f64]) -> Result<Self> {
        let pressures = &self.thermodata.partial_pressures;
        if pressures.is_empty() && !values.is_empty() {
            return Err(ThermoError::InvalidInput(
                "no control values to select from".to_string(),
            ));
        }

        let mut indices = Vec::with_capacity(values.len());
        for &value in values {
            let mut best = 0;
            for (i, p) in pressures.iter().enumerate() {
                if (p - value).abs() < (pressures[best] - value).abs() {
                    best = i;
                }
            }
            indices.push(best);
        }

        Ok(Self {
            thermodata: self.thermodata.select(&indices),
            temperature: self.temperature,
            name: self.name.clone(),
        })
    }
}
