/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Electronic and ionic conductivity

use super::errors::{Result, ThermoError};
use crate::analysis::DefectConcentration;
use crate::utils::constants::ELEMENTARY_CHARGE;
use crate::utils::{per_cm3_to_per_m3, strip_multiplicity};
use std::collections::BTreeMap;

/// Mobilities keyed by `holes`, `electrons` and defect species names
pub type Mobilities = BTreeMap<String, f64>;

/// Conductivity from carrier and defect concentrations
#[derive(Debug, Clone, PartialEq)]
pub struct Conductivity {
    mobilities: Mobilities,
}

impl Conductivity {
    pub fn new(mobilities: Mobilities) -> Self {
        Self { mobilities }
    }

    pub fn mobilities(&self) -> &Mobilities {
        &self.mobilities
    }

    fn mobility(&self, key: &str) -> Result<f64> {
        self.mobilities
            .get(key)
            .copied()
            .ok_or_else(|| ThermoError::MissingMobility(key.to_string()))
    }

    /// Conductivity in S/m.
    ///
    /// `e (mu_h p + mu_e n) + Σ mu_i |q_i| c_i e 1e6`: defect concentrations
    /// are converted from cm⁻³ to m⁻³, carrier terms are used as given.
    /// With `ignore_multiplicity` the `_multN` part of defect names is
    /// dropped before looking up the mobility.
    ///
    /// # Arguments
    ///
    /// * `carrier_concentrations` - (holes, electrons)
    /// * `defect_concentrations` - Per charge-state concentrations
    /// * `ignore_multiplicity` - Strip multiplicity qualifiers from names
    pub fn get_conductivity(
        &self,
        carrier_concentrations: (f64, f64),
        defect_concentrations: &[DefectConcentration],
        ignore_multiplicity: bool,
    ) -> Result<f64> {
        let (holes, electrons) = carrier_concentrations;
        let sigma_electronic = ELEMENTARY_CHARGE
            * (self.mobility("holes")? * holes + self.mobility("electrons")? * electrons);

        let mut sigma_ionic = 0.0;
        for defect in defect_concentrations {
            let name = if ignore_multiplicity {
                strip_multiplicity(&defect.name)
            } else {
                defect.name.clone()
            };
            sigma_ionic += self.mobility(&name)?
                * per_cm3_to_per_m3(defect.conc)
                * defect.charge.abs()
                * ELEMENTARY_CHARGE;
        }

        Ok(sigma_electronic + sigma_ionic)
    }
}
