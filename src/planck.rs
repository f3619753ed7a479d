//! Planck distribution evaluation — point spectra and band integrals.
//!
//! Two pieces:
//! - the per-point spectral distribution `L = c1·x^±p / (exp(c2·ξ) − 1)`,
//!   with the reduced variable ξ and the power p selected by the
//!   (flux, spectral-variable) pair;
//! - the tail integral `F_k(ξ) = ∫_ξ^∞ t^k/(e^t − 1) dt`, which has no
//!   elementary closed form and is evaluated by the truncated series of
//!   Widger & Woodall (1976): expand 1/(e^t − 1) = Σ e^(−nt) and integrate
//!   each term by parts, giving a degree-k polynomial in ξ times e^(−nξ)
//!   per term.
//!
//! # Overflow policy
//! Before exponentiating, ξ is clipped to `EMAXEXP / c2` so exp(c2·ξ)
//! saturates at the largest finite double instead of overflowing; the
//! distribution then underflows smoothly to ≈0 for extreme inputs rather
//! than propagating infinity or NaN.
//!
//! # Accuracy boundary
//! Each series term decays as e^(−nξ), so for ξ bounded away from zero the
//! sum converges geometrically and the default 1024 terms give effectively
//! full double precision. Near ξ = 0 the term polynomials approach constant
//! coefficients and the tail decays only algebraically (like 1/n^k), so
//! truncation error grows; callers needing small-ξ accuracy must raise the
//! term count. This is a documented limitation of the series, not corrected
//! adaptively.

use crate::constants::{
    FluxQuantity, RadiationConstants, SpectralUnit, SpectralVariable, EMAXEXP,
};

/// Default truncation order of the tail-integral series.
///
/// Accuracy and cost both scale linearly with the term count; 1024 is full
/// double precision for ξ ≳ 0.05 and better than 1e-6 relative down to
/// ξ = 0 for the energy (k=3) kernel.
pub const DEFAULT_SERIES_TERMS: usize = 1024;

/// Spectral sterance at one (T, x) point for a (flux, spectral-unit) pair.
///
/// `t` in kelvin, `x` in the spectral unit; output per unit area, solid
/// angle, and spectral interval (m² area basis — the caller applies the
/// area factor). Callers must guarantee t > 0 and x > 0; validation lives
/// in the façade.
pub fn spectral_sterance(flux: FluxQuantity, unit: SpectralUnit, t: f64, x: f64) -> f64 {
    let RadiationConstants { c1, c2 } = RadiationConstants::lookup(flux, unit);
    let ximax = EMAXEXP / c2;

    match unit.variable() {
        SpectralVariable::Frequency | SpectralVariable::Wavenumber => {
            let p = match flux {
                FluxQuantity::Energy => 3,
                FluxQuantity::Photon => 2,
            };
            let xi = (x / t).min(ximax);
            c1 * x.powi(p) / ((c2 * xi).exp() - 1.0)
        }
        SpectralVariable::Wavelength => {
            let p = match flux {
                FluxQuantity::Energy => 5,
                FluxQuantity::Photon => 4,
            };
            let xi = (1.0 / (x * t)).min(ximax);
            c1 / x.powi(p) / ((c2 * xi).exp() - 1.0)
        }
    }
}

/// Tail integral F₂(ξ) = ∫_ξ^∞ t²/(eᵗ − 1) dt, truncated at `terms` terms.
///
/// Per-term polynomial from integrating t²·e^(−nt) by parts:
/// e^(−nξ)·(ξ²/n + 2ξ/n² + 2/n³). Used for photon-type quantities.
/// See the module docs for the small-ξ accuracy boundary.
pub fn planck_integral_2(xi: f64, terms: usize) -> f64 {
    let mut sum = 0.0;
    for n in 1..=terms {
        let nf = n as f64;
        let e = (-nf * xi).exp();
        if e == 0.0 {
            // Every later term underflows to exactly zero as well.
            break;
        }
        sum += e * (xi * xi / nf + 2.0 * xi / (nf * nf) + 2.0 / (nf * nf * nf));
    }
    sum
}

/// Tail integral F₃(ξ) = ∫_ξ^∞ t³/(eᵗ − 1) dt, truncated at `terms` terms.
///
/// Per-term polynomial: e^(−nξ)·(ξ³/n + 3ξ²/n² + 6ξ/n³ + 6/n⁴). Used for
/// energy-type quantities. See the module docs for the small-ξ accuracy
/// boundary.
pub fn planck_integral_3(xi: f64, terms: usize) -> f64 {
    let mut sum = 0.0;
    for n in 1..=terms {
        let nf = n as f64;
        let e = (-nf * xi).exp();
        if e == 0.0 {
            break;
        }
        let n2 = nf * nf;
        sum += e * (xi * xi * xi / nf + 3.0 * xi * xi / n2 + 6.0 * xi / (n2 * nf)
            + 6.0 / (n2 * n2));
    }
    sum
}

/// Tail integral of the spectral sterance from `x` to the end of the
/// spectral domain, for one (T, x) pair.
///
/// Substituting the reduced variable turns the tail into
/// `c1/c2^k · T^k · F_{k−1}(ξ)` with k = 4 (energy) or 3 (photon) — one
/// power lower in the kernel than the point distribution because the
/// integration absorbs one power of the substitution. For frequency-like
/// variables ξ = c2·x/T and the tail runs toward +∞ in x; for wavelength
/// ξ = c2/(x·T), so the same expression is the integral from 0 to x in
/// wavelength terms. Band integrals therefore always combine two tails as
/// an absolute difference.
pub fn integrated_sterance(
    flux: FluxQuantity,
    unit: SpectralUnit,
    t: f64,
    x: f64,
    terms: usize,
) -> f64 {
    let RadiationConstants { c1, c2 } = RadiationConstants::lookup(flux, unit);

    let xi = match unit.variable() {
        SpectralVariable::Frequency | SpectralVariable::Wavenumber => c2 * x / t,
        SpectralVariable::Wavelength => c2 / (x * t),
    };

    match flux {
        FluxQuantity::Energy => c1 / c2.powi(4) * t.powi(4) * planck_integral_3(xi, terms),
        FluxQuantity::Photon => c1 / c2.powi(3) * t.powi(3) * planck_integral_2(xi, terms),
    }
}
