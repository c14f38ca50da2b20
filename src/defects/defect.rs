/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Defect variants and their composition rules

use super::composition::DeltaAtoms;
use super::errors::{DefectError, Result};
use super::name::DefectName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefectKind {
    Vacancy,
    Substitution,
    Interstitial,
    Polaron,
    Complex,
}

impl DefectKind {
    /// Prefix used in defect names
    pub fn prefix(&self) -> &'static str {
        match self {
            DefectKind::Vacancy => "Vac",
            DefectKind::Substitution => "Sub",
            DefectKind::Interstitial => "Int",
            DefectKind::Polaron => "Pol",
            DefectKind::Complex => "Complex",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefectKind::Vacancy => "Vacancy",
            DefectKind::Substitution => "Substitution",
            DefectKind::Interstitial => "Interstitial",
            DefectKind::Polaron => "Polaron",
            DefectKind::Complex => "DefectComplex",
        };
        write!(f, "{}", name)
    }
}

/// A defect in the host crystal.
///
/// Each variant carries the species it involves; the change in particle
/// numbers follows from the variant alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defect {
    /// Atom of `species` removed from its site
    Vacancy { species: String },
    /// Atom of `species` placed on a site of `host`
    Substitution { species: String, host: String },
    /// Extra atom of `species` in an interstitial position
    Interstitial { species: String },
    /// Localised charge on a `species` site, no particles exchanged
    Polaron { species: String },
    /// Bound group of single-site defects
    Complex { components: Vec<Defect> },
}

impl Defect {
    /// Create a vacancy
    pub fn vacancy(species: &str) -> Self {
        Defect::Vacancy {
            species: species.to_string(),
        }
    }

    /// Create a substitution of `species` on a `host` site
    pub fn substitution(species: &str, host: &str) -> Self {
        Defect::Substitution {
            species: species.to_string(),
            host: host.to_string(),
        }
    }

    /// Create an interstitial
    pub fn interstitial(species: &str) -> Self {
        Defect::Interstitial {
            species: species.to_string(),
        }
    }

    /// Create a polaron
    pub fn polaron(species: &str) -> Self {
        Defect::Polaron {
            species: species.to_string(),
        }
    }

    /// Create a complex from single-site defects
    pub fn complex(components: Vec<Defect>) -> Self {
        Defect::Complex { components }
    }

    /// Kind tag of this defect
    pub fn kind(&self) -> DefectKind {
        match self {
            Defect::Vacancy { .. } => DefectKind::Vacancy,
            Defect::Substitution { .. } => DefectKind::Substitution,
            Defect::Interstitial { .. } => DefectKind::Interstitial,
            Defect::Polaron { .. } => DefectKind::Polaron,
            Defect::Complex { .. } => DefectKind::Complex,
        }
    }

    /// Change in particle numbers with respect to the bulk.
    ///
    /// For complexes the component deltas are summed per element and zero
    /// sums are kept, so a Frenkel pair reports `{O: 0}` rather than nothing.
    pub fn delta_atoms(&self) -> DeltaAtoms {
        let mut delta = DeltaAtoms::new();
        match self {
            Defect::Vacancy { species } => {
                delta.insert(species.clone(), -1);
            }
            Defect::Substitution { species, host } => {
                delta.insert(species.clone(), 1);
                delta.insert(host.clone(), -1);
            }
            Defect::Interstitial { species } => {
                delta.insert(species.clone(), 1);
            }
            Defect::Polaron { .. } => {}
            Defect::Complex { components } => {
                for component in components {
                    for (element, change) in component.delta_atoms() {
                        *delta.entry(element).or_insert(0) += change;
                    }
                }
            }
        }
        delta
    }

    /// Structured name of this defect
    pub fn name(&self, label: Option<&str>) -> DefectName {
        let label = label.map(str::to_string);
        match self {
            Defect::Vacancy { species }
            | Defect::Interstitial { species }
            | Defect::Polaron { species } => DefectName::Single {
                kind: self.kind(),
                species: species.clone(),
                host: None,
                label,
            },
            Defect::Substitution { species, host } => DefectName::Single {
                kind: DefectKind::Substitution,
                species: species.clone(),
                host: Some(host.clone()),
                label,
            },
            Defect::Complex { components } => DefectName::Complex {
                components: components.iter().map(|c| c.name(None)).collect(),
                label,
            },
        }
    }

    /// Check the structural invariants of the defect
    pub fn validate(&self) -> Result<()> {
        match self {
            Defect::Vacancy { species }
            | Defect::Interstitial { species }
            | Defect::Polaron { species } => check_element(species)?,
            Defect::Substitution { species, host } => {
                check_element(species)?;
                check_element(host)?;
                if species == host {
                    return Err(DefectError::InvalidSubstitution {
                        species: species.clone(),
                        host: host.clone(),
                    });
                }
            }
            Defect::Complex { components } => {
                if components.len() < 2 {
                    return Err(DefectError::InvalidComplex(format!(
                        "a complex needs at least two components, got {}",
                        components.len()
                    )));
                }
                for component in components {
                    if component.kind() == DefectKind::Complex {
                        return Err(DefectError::InvalidComplex(
                            "nested complexes are not supported".to_string(),
                        ));
                    }
                    component.validate()?;
                }
            }
        }

        if self.kind() != DefectKind::Polaron && self.delta_atoms().is_empty() {
            return Err(DefectError::EmptyComposition(self.name(None).to_string()));
        }

        Ok(())
    }
}

fn check_element(symbol: &str) -> Result<()> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DefectError::InvalidElement(symbol.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_atoms_per_kind() {
        assert_eq!(Defect::vacancy("O").delta_atoms()["O"], -1);
        assert_eq!(Defect::interstitial("Li").delta_atoms()["Li"], 1);
        assert!(Defect::polaron("Ti").delta_atoms().is_empty());

        let sub = Defect::substitution("Mg", "Al").delta_atoms();
        assert_eq!(sub["Mg"], 1);
        assert_eq!(sub["Al"], -1);
    }

    #[test]
    fn test_complex_delta_sums_components() {
        let complex = Defect::complex(vec![
            Defect::substitution("Mg", "Al"),
            Defect::vacancy("O"),
            Defect::vacancy("O"),
        ]);
        let delta = complex.delta_atoms();
        assert_eq!(delta["Mg"], 1);
        assert_eq!(delta["Al"], -1);
        assert_eq!(delta["O"], -2);
        assert!(complex.validate().is_ok());
    }

    #[test]
    fn test_frenkel_pair_keeps_zero_delta() {
        let frenkel = Defect::complex(vec![Defect::vacancy("O"), Defect::interstitial("O")]);
        let delta = frenkel.delta_atoms();
        assert_eq!(delta.len(), 1);
        assert_eq!(delta["O"], 0);
        assert!(frenkel.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        assert!(matches!(
            Defect::substitution("Al", "Al").validate(),
            Err(DefectError::InvalidSubstitution { .. })
        ));
        assert!(matches!(
            Defect::complex(vec![Defect::vacancy("O")]).validate(),
            Err(DefectError::InvalidComplex(_))
        ));
        assert!(matches!(
            Defect::vacancy("").validate(),
            Err(DefectError::InvalidElement(_))
        ));
        assert!(matches!(
            Defect::complex(vec![Defect::polaron("Ti"), Defect::polaron("Ti")]).validate(),
            Err(DefectError::EmptyComposition(_))
        ));
        assert!(Defect::polaron("Ti").validate().is_ok());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Defect::vacancy("O").kind().to_string(), "Vacancy");
        assert_eq!(DefectKind::Complex.to_string(), "DefectComplex");
    }
}
