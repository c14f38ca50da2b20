/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Helpers for matching species names coming from external data

/// Remove multiplicity qualifiers from a species name.
///
/// Names produced by older workflows carry the site multiplicity as an extra
/// `_`-separated token (`Vac_Na_mult2`). Every token containing `mult` is
/// dropped and the rest is joined back with `_`.
pub fn strip_multiplicity(name: &str) -> String {
    name.split('_')
        .filter(|token| !token.contains("mult"))
        .collect::<Vec<_>>()
        .join("_")
}

/// Compare two species names, optionally ignoring multiplicity qualifiers
pub fn names_match(a: &str, b: &str, ignore_multiplicity: bool) -> bool {
    if ignore_multiplicity {
        strip_multiplicity(a) == strip_multiplicity(b)
    } else {
        a == b
    }
}
