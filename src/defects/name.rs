/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Structured defect identifiers and their display forms

use super::defect::DefectKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured identifier of a defect species.
///
/// The display string (`Vac_O`, `Sub_Mg_on_Al`, `Vac_O-Int_O(split)`) is
/// only ever produced from these fields, never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectName {
    /// Single-site defect
    Single {
        kind: DefectKind,
        species: String,
        host: Option<String>,
        label: Option<String>,
    },
    /// Defect complex, components carry no labels of their own
    Complex {
        components: Vec<DefectName>,
        label: Option<String>,
    },
}

impl DefectName {
    /// Kind tag
    pub fn kind(&self) -> DefectKind {
        match self {
            DefectName::Single { kind, .. } => *kind,
            DefectName::Complex { .. } => DefectKind::Complex,
        }
    }

    /// Optional label
    pub fn label(&self) -> Option<&str> {
        match self {
            DefectName::Single { label, .. } | DefectName::Complex { label, .. } => {
                label.as_deref()
            }
        }
    }

    /// Defect species involved, one per site
    pub fn species(&self) -> Vec<&str> {
        match self {
            DefectName::Single { species, .. } => vec![species.as_str()],
            DefectName::Complex { components, .. } => {
                components.iter().flat_map(|c| c.species()).collect()
            }
        }
    }

    /// Host species replaced by a substitution
    pub fn host(&self) -> Option<&str> {
        match self {
            DefectName::Single { host, .. } => host.as_deref(),
            DefectName::Complex { .. } => None,
        }
    }

    /// Name without the label
    pub fn base_name(&self) -> String {
        match self {
            DefectName::Single {
                kind,
                species,
                host,
                ..
            } => match (kind, host) {
                (DefectKind::Substitution, Some(host)) => {
                    format!("{}_{}_on_{}", kind.prefix(), species, host)
                }
                _ => format!("{}_{}", kind.prefix(), species),
            },
            DefectName::Complex { components, .. } => components
                .iter()
                .map(|c| c.base_name())
                .collect::<Vec<_>>()
                .join("-"),
        }
    }

    /// Full name including the label, same as the `Display` output
    pub fn fullname(&self) -> String {
        self.to_string()
    }

    /// LaTeX symbol of the defect
    pub fn symbol(&self) -> String {
        let symbol = match self {
            DefectName::Single {
                kind,
                species,
                host,
                ..
            } => match kind {
                DefectKind::Vacancy => format!("$V_{{{}}}$", species),
                DefectKind::Interstitial => format!("${}_{{i}}$", species),
                DefectKind::Polaron => format!("${}_{{{}}}$", species, species),
                _ => format!(
                    "${}_{{{}}}$",
                    species,
                    host.as_deref().unwrap_or(species.as_str())
                ),
            },
            DefectName::Complex { components, .. } => components
                .iter()
                .map(|c| c.symbol())
                .collect::<Vec<_>>()
                .join("-"),
        };

        match self.label() {
            Some(label) => format!("{}({})", symbol, label),
            None => symbol,
        }
    }
}

impl fmt::Display for DefectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}({})", self.base_name(), label),
            None => write!(f, "{}", self.base_name()),
        }
    }
}

fn charge_string(charge: f64) -> String {
    if charge.fract() == 0.0 {
        format!("{}", charge as i64)
    } else {
        format!("{}", charge)
    }
}

/// Append the charge as a superscript number to a LaTeX symbol
pub fn format_charge_number(symbol: &str, charge: f64) -> String {
    let q = if charge > 0.0 {
        format!("+{}", charge_string(charge))
    } else if charge == 0.0 {
        "\\;0".to_string()
    } else {
        charge_string(charge)
    };
    format!("{}$^{{{}}}$", symbol, q)
}

/// Annotate a LaTeX symbol with its charge in Kröger-Vink notation.
///
/// One `'` per negative charge, one `°` per positive charge, `x` if neutral.
/// The superscript goes inside the last math block of the symbol.
pub fn format_charge_kroger_vink(symbol: &str, charge: f64) -> String {
    let count = charge.abs().round() as usize;
    let superscript = if count == 0 {
        "x".to_string()
    } else if charge < 0.0 {
        "'".repeat(count)
    } else {
        "°".repeat(count)
    };

    match symbol.rfind('$') {
        Some(pos) => format!(
            "{}^{{{}}}{}",
            &symbol[..pos],
            superscript,
            &symbol[pos..]
        ),
        None => format!("{}^{{{}}}", symbol, superscript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defects::Defect;

    #[test]
    fn test_display_names() {
        assert_eq!(Defect::vacancy("O").name(None).to_string(), "Vac_O");
        assert_eq!(
            Defect::substitution("Mg", "Al").name(None).to_string(),
            "Sub_Mg_on_Al"
        );
        assert_eq!(Defect::interstitial("Li").name(None).to_string(), "Int_Li");
        assert_eq!(Defect::polaron("Ti").name(Some("up")).to_string(), "Pol_Ti(up)");
    }

    #[test]
    fn test_complex_name_drops_component_labels() {
        let name = Defect::complex(vec![Defect::vacancy("O"), Defect::interstitial("O")])
            .name(Some("split"));
        assert_eq!(name.to_string(), "Vac_O-Int_O(split)");
        assert_eq!(name.base_name(), "Vac_O-Int_O");
        assert_eq!(name.kind(), DefectKind::Complex);
        assert_eq!(name.species(), vec!["O", "O"]);
    }

    #[test]
    fn test_structured_fields() {
        let name = Defect::substitution("Mg", "Al").name(Some("a"));
        assert_eq!(name.kind(), DefectKind::Substitution);
        assert_eq!(name.species(), vec!["Mg"]);
        assert_eq!(name.host(), Some("Al"));
        assert_eq!(name.label(), Some("a"));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Defect::vacancy("O").name(None).symbol(), "$V_{O}$");
        assert_eq!(Defect::interstitial("Li").name(None).symbol(), "$Li_{i}$");
        assert_eq!(Defect::substitution("Mg", "Al").name(None).symbol(), "$Mg_{Al}$");
        assert_eq!(Defect::polaron("Ti").name(None).symbol(), "$Ti_{Ti}$");
        assert_eq!(Defect::vacancy("O").name(Some("b")).symbol(), "$V_{O}$(b)");
    }

    #[test]
    fn test_charge_formats() {
        assert_eq!(format_charge_number("$V_{O}$", 2.0), "$V_{O}$$^{+2}$");
        assert_eq!(format_charge_number("$V_{O}$", 0.0), "$V_{O}$$^{\\;0}$");
        assert_eq!(format_charge_number("$V_{O}$", -1.0), "$V_{O}$$^{-1}$");

        assert_eq!(format_charge_kroger_vink("$V_{O}$", 2.0), "$V_{O}^{°°}$");
        assert_eq!(format_charge_kroger_vink("$V_{Na}$", -1.0), "$V_{Na}^{'}$");
        assert_eq!(format_charge_kroger_vink("$Li_{i}$", 0.0), "$Li_{i}^{x}$");
        assert_eq!(format_charge_kroger_vink("$V_{O}$(b)", 1.0), "$V_{O}^{°}$(b)");
    }
}
