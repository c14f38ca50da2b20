/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Bracketed root finding
//!
//! Plain bisection: slow but it never leaves the bracket and only needs a
//! sign change, which is all a monotone residual guarantees. The iteration
//! count is capped so a pathological input fails instead of spinning.

use super::errors::UtilsError;

/// Settings for [`bisect`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionSettings {
    /// Width of the final bracket (same units as the abscissa)
    pub tolerance: f64,
    /// Maximum number of halvings
    pub max_iterations: usize,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }
}

/// A converged root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Abscissa of the root
    pub value: f64,
    /// Number of halvings performed
    pub iterations: usize,
}

/// Find a root of `f` inside `[lower, upper]` by bisection.
///
/// `f` may fail; its error type only has to absorb [`UtilsError`] so the
/// bracket failures surface through the caller's own error enum.
///
/// # Arguments
///
/// * `f` - Function whose sign change is sought
/// * `lower` - Lower end of the bracket
/// * `upper` - Upper end of the bracket
/// * `settings` - Tolerance and iteration cap
///
/// # Returns
///
/// The midpoint of the final bracket, or `UtilsError::NoSignChange` when `f`
/// has the same sign at both ends.
pub fn bisect<F, E>(
    mut f: F,
    lower: f64,
    upper: f64,
    settings: &BisectionSettings,
) -> std::result::Result<Root, E>
where
    F: FnMut(f64) -> std::result::Result<f64, E>,
    E: From<UtilsError>,
{
    let (mut lo, mut hi) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };

    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if f_lo.is_nan() || f_hi.is_nan() {
        return Err(UtilsError::Math(format!(
            "function is NaN at the bracket ends ({} and {})",
            lo, hi
        ))
        .into());
    }
    if f_lo == 0.0 {
        return Ok(Root {
            value: lo,
            iterations: 0,
        });
    }
    if f_hi == 0.0 {
        return Ok(Root {
            value: hi,
            iterations: 0,
        });
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(UtilsError::NoSignChange {
            lower: lo,
            upper: hi,
            f_lower: f_lo,
            f_upper: f_hi,
        }
        .into());
    }

    for iteration in 1..=settings.max_iterations {
        let mid = lo + 0.5 * (hi - lo);
        let f_mid = f(mid)?;

        if f_mid == 0.0 {
            return Ok(Root {
                value: mid,
                iterations: iteration,
            });
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }

        if hi - lo <= settings.tolerance {
            return Ok(Root {
                value: lo + 0.5 * (hi - lo),
                iterations: iteration,
            });
        }
    }

    Err(UtilsError::NotConverged {
        iterations: settings.max_iterations,
        lower: lo,
        upper: hi,
    }
    .into())
}
