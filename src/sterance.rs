//! Validating façade over the Planck evaluators.
//!
//! The four public operations accept slices of temperatures and spectral
//! values, broadcast them elementwise (equal lengths, or either side a
//! one-element scalar), validate eagerly before any computation, and apply
//! the area-unit factor to the result. The core evaluators in
//! [`crate::planck`] trust these checks and never validate themselves.
//!
//! All operations are pure functions of their inputs and the constant
//! tables; independent calls may run concurrently without coordination.

use rayon::prelude::*;
use thiserror::Error;

use crate::constants::{AreaUnit, FluxQuantity, SpectralUnit, UnsupportedUnitError};
use crate::planck::{self, DEFAULT_SERIES_TERMS};

/// Validation errors for the public sterance operations.
///
/// Every failure is deterministic, raised before any computation, and
/// all-or-nothing: no partial results are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SteranceError {
    /// A unit string did not name one of the supported units.
    #[error(transparent)]
    UnsupportedUnit(#[from] UnsupportedUnitError),

    /// A temperature was zero, negative, or NaN.
    #[error("`T` must be greater than zero")]
    NonPositiveTemperature,

    /// A spectral value was zero, negative, or NaN.
    #[error("`x` must be greater than zero")]
    NonPositiveSpectral,

    /// Input slices have incompatible lengths.
    #[error("array lengths {0} and {1} cannot be broadcast (must be equal, or either 1)")]
    ShapeMismatch(usize, usize),

    /// An input slice was empty.
    #[error("input arrays must not be empty")]
    EmptyInput,
}

/// Common broadcast length of two slices: equal lengths, or either may be a
/// one-element scalar.
fn broadcast_len(a: usize, b: usize) -> Result<usize, SteranceError> {
    if a == 0 || b == 0 {
        return Err(SteranceError::EmptyInput);
    }
    match (a, b) {
        _ if a == b => Ok(a),
        (1, n) | (n, 1) => Ok(n),
        _ => Err(SteranceError::ShapeMismatch(a, b)),
    }
}

/// Indexing helper for a broadcast slice.
fn at(v: &[f64], i: usize) -> f64 {
    if v.len() == 1 {
        v[0]
    } else {
        v[i]
    }
}

fn check_temperatures(t: &[f64]) -> Result<(), SteranceError> {
    // `!(v > 0.0)` also rejects NaN.
    if t.is_empty() {
        return Err(SteranceError::EmptyInput);
    }
    if t.iter().any(|&v| !(v > 0.0)) {
        return Err(SteranceError::NonPositiveTemperature);
    }
    Ok(())
}

fn check_spectral(x: &[f64]) -> Result<(), SteranceError> {
    if x.is_empty() {
        return Err(SteranceError::EmptyInput);
    }
    if x.iter().any(|&v| !(v > 0.0)) {
        return Err(SteranceError::NonPositiveSpectral);
    }
    Ok(())
}

fn spectral(
    flux: FluxQuantity,
    t: &[f64],
    x: &[f64],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
) -> Result<Vec<f64>, SteranceError> {
    check_temperatures(t)?;
    check_spectral(x)?;
    let n = broadcast_len(t.len(), x.len())?;
    let factor = area_unit.factor();

    Ok((0..n)
        .map(|i| planck::spectral_sterance(flux, spectral_unit, at(t, i), at(x, i)) * factor)
        .collect())
}

fn integrated(
    flux: FluxQuantity,
    t: &[f64],
    band: [f64; 2],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
    terms: usize,
) -> Result<Vec<f64>, SteranceError> {
    check_temperatures(t)?;
    let factor = area_unit.factor();
    let [x_a, x_b] = band;

    Ok(t.iter()
        .map(|&ti| {
            let i_a = planck::integrated_sterance(flux, spectral_unit, ti, x_a, terms);
            let i_b = planck::integrated_sterance(flux, spectral_unit, ti, x_b, terms);
            (i_b - i_a).abs() * factor
        })
        .collect())
}

/// Spectral radiant sterance (W per area, steradian, and spectral interval).
///
/// `t` (K) and `x` (in `spectral_unit`) broadcast elementwise; either may be
/// a one-element scalar. Both must be strictly positive.
///
/// # Example
/// ```
/// use blackbody::{spectral_radiant_sterance, AreaUnit, SpectralUnit};
///
/// // 300 K surface at 10 um, per m².
/// let l = spectral_radiant_sterance(
///     &[300.0],
///     &[10.0],
///     SpectralUnit::Micrometer,
///     AreaUnit::SquareMeter,
/// )
/// .unwrap();
/// assert!(l[0] > 0.0);
/// ```
pub fn spectral_radiant_sterance(
    t: &[f64],
    x: &[f64],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
) -> Result<Vec<f64>, SteranceError> {
    spectral(FluxQuantity::Energy, t, x, spectral_unit, area_unit)
}

/// Spectral photon sterance (photons/s per area, steradian, and spectral
/// interval). Same contract as [`spectral_radiant_sterance`].
pub fn spectral_photon_sterance(
    t: &[f64],
    x: &[f64],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
) -> Result<Vec<f64>, SteranceError> {
    spectral(FluxQuantity::Photon, t, x, spectral_unit, area_unit)
}

/// Band-integrated radiant sterance between two spectral endpoints, with
/// the default series truncation order.
///
/// The endpoints may be supplied in either order; the result is the
/// absolute difference of the two tail integrals, so it is always
/// non-negative. An endpoint of 0 expresses a full-domain integral, which
/// is why endpoints are not required to be strictly positive here (unlike
/// the point operations).
pub fn integrated_radiant_sterance(
    t: &[f64],
    band: [f64; 2],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
) -> Result<Vec<f64>, SteranceError> {
    integrated(
        FluxQuantity::Energy,
        t,
        band,
        spectral_unit,
        area_unit,
        DEFAULT_SERIES_TERMS,
    )
}

/// [`integrated_radiant_sterance`] with an explicit series truncation
/// order. Higher `terms` improves small-ξ accuracy at linear cost.
pub fn integrated_radiant_sterance_with_terms(
    t: &[f64],
    band: [f64; 2],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
    terms: usize,
) -> Result<Vec<f64>, SteranceError> {
    integrated(FluxQuantity::Energy, t, band, spectral_unit, area_unit, terms)
}

/// Band-integrated photon sterance between two spectral endpoints, with
/// the default series truncation order. Same contract as
/// [`integrated_radiant_sterance`].
pub fn integrated_photon_sterance(
    t: &[f64],
    band: [f64; 2],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
) -> Result<Vec<f64>, SteranceError> {
    integrated(
        FluxQuantity::Photon,
        t,
        band,
        spectral_unit,
        area_unit,
        DEFAULT_SERIES_TERMS,
    )
}

/// [`integrated_photon_sterance`] with an explicit series truncation order.
pub fn integrated_photon_sterance_with_terms(
    t: &[f64],
    band: [f64; 2],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
    terms: usize,
) -> Result<Vec<f64>, SteranceError> {
    integrated(FluxQuantity::Photon, t, band, spectral_unit, area_unit, terms)
}

/// Band-integrated sterance over a grid of temperatures × bands, computed
/// in parallel across temperatures.
///
/// Returns one row per temperature, one column per band. Intended for
/// sensor trade studies that sweep many source temperatures against many
/// filter bands in one call.
pub fn integrated_sterance_sweep(
    flux: FluxQuantity,
    temps: &[f64],
    bands: &[[f64; 2]],
    spectral_unit: SpectralUnit,
    area_unit: AreaUnit,
    terms: usize,
) -> Result<Vec<Vec<f64>>, SteranceError> {
    check_temperatures(temps)?;
    if bands.is_empty() {
        return Err(SteranceError::EmptyInput);
    }
    let factor = area_unit.factor();

    Ok(temps
        .par_iter()
        .map(|&ti| {
            bands
                .iter()
                .map(|&[x_a, x_b]| {
                    let i_a = planck::integrated_sterance(flux, spectral_unit, ti, x_a, terms);
                    let i_b = planck::integrated_sterance(flux, spectral_unit, ti, x_b, terms);
                    (i_b - i_a).abs() * factor
                })
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{stefan_boltzmann_constant, wien_constant, SpectralVariable};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// Composite Simpson's rule; n must be even.
    fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
        assert!(n % 2 == 0);
        let h = (b - a) / n as f64;
        let mut sum = f(a) + f(b);
        for i in 1..n {
            let w = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += w * f(a + i as f64 * h);
        }
        sum * h / 3.0
    }

    /// A band wide enough to cover the whole spectral domain at 500 K.
    fn full_domain_band(unit: SpectralUnit) -> [f64; 2] {
        match unit {
            SpectralUnit::Hertz => [0.0, 1e15],
            SpectralUnit::Terahertz => [0.0, 1e6],
            SpectralUnit::InverseCentimeter => [0.0, 5e4],
            // For wavelength the reduced variable inverts: tiny lambda is
            // the deep tail, huge lambda approaches the full integral.
            SpectralUnit::Micrometer => [1e-3, 1e12],
        }
    }

    #[test]
    fn test_total_flux_law_energy() {
        let t = 500.0;
        for unit in SpectralUnit::ALL {
            let band = full_domain_band(unit);
            let total =
                integrated_radiant_sterance(&[t], band, unit, AreaUnit::SquareMeter).unwrap()[0];
            let sigma = stefan_boltzmann_constant(FluxQuantity::Energy, unit);
            assert_relative_eq!(total, sigma * t.powi(4) / PI, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_total_flux_law_photon() {
        let t = 500.0;
        for unit in SpectralUnit::ALL {
            let band = full_domain_band(unit);
            let total =
                integrated_photon_sterance(&[t], band, unit, AreaUnit::SquareMeter).unwrap()[0];
            let sigma_q = stefan_boltzmann_constant(FluxQuantity::Photon, unit);
            assert_relative_eq!(total, sigma_q * t.powi(3) / PI, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_wien_peak_location_all_pairs() {
        let t = 500.0;
        for flux in FluxQuantity::ALL {
            for unit in SpectralUnit::ALL {
                let w = wien_constant(flux, unit);
                let x_peak = match unit.variable() {
                    SpectralVariable::Wavelength => w / t,
                    _ => w * t,
                };
                let eval = |x: f64| match flux {
                    FluxQuantity::Energy => {
                        spectral_radiant_sterance(&[t], &[x], unit, AreaUnit::SquareMeter)
                            .unwrap()[0]
                    }
                    FluxQuantity::Photon => {
                        spectral_photon_sterance(&[t], &[x], unit, AreaUnit::SquareMeter)
                            .unwrap()[0]
                    }
                };
                let at_peak = eval(x_peak);
                assert!(
                    at_peak > eval(x_peak * 0.99) && at_peak > eval(x_peak * 1.01),
                    "no peak at Wien location for {flux:?}/{unit}"
                );
            }
        }
    }

    #[test]
    fn test_band_integral_agrees_with_quadrature() {
        // 8-12 um atmospheric window at 300 K.
        let t = 300.0;
        let band = integrated_radiant_sterance(
            &[t],
            [8.0, 12.0],
            SpectralUnit::Micrometer,
            AreaUnit::SquareMeter,
        )
        .unwrap()[0];

        let quad = simpson(
            |lam| {
                spectral_radiant_sterance(&[t], &[lam], SpectralUnit::Micrometer,
                    AreaUnit::SquareMeter)
                .unwrap()[0]
            },
            8.0,
            12.0,
            2000,
        );
        assert_relative_eq!(band, quad, max_relative = 1e-6);
    }

    #[test]
    fn test_endpoint_order_invariance() {
        let t = [350.0, 500.0];
        for unit in SpectralUnit::ALL {
            let (a, b) = match unit {
                SpectralUnit::Hertz => (1e13, 5e13),
                SpectralUnit::Terahertz => (10.0, 50.0),
                SpectralUnit::Micrometer => (6.0, 30.0),
                SpectralUnit::InverseCentimeter => (333.0, 1666.0),
            };
            let fwd =
                integrated_radiant_sterance(&t, [a, b], unit, AreaUnit::SquareMeter).unwrap();
            let rev =
                integrated_radiant_sterance(&t, [b, a], unit, AreaUnit::SquareMeter).unwrap();
            assert_eq!(fwd, rev);
        }
    }

    #[test]
    fn test_area_unit_scaling_is_exact() {
        let t = [290.0];
        let x = [15.0];
        let m2 = spectral_radiant_sterance(&t, &x, SpectralUnit::Micrometer,
            AreaUnit::SquareMeter)
        .unwrap();
        let cm2 = spectral_radiant_sterance(&t, &x, SpectralUnit::Micrometer,
            AreaUnit::SquareCentimeter)
        .unwrap();
        assert_eq!(cm2[0], m2[0] * 1e-4);

        let m2 = integrated_photon_sterance(&t, [3.0, 5.0], SpectralUnit::Micrometer,
            AreaUnit::SquareMeter)
        .unwrap();
        let cm2 = integrated_photon_sterance(&t, [3.0, 5.0], SpectralUnit::Micrometer,
            AreaUnit::SquareCentimeter)
        .unwrap();
        assert_eq!(cm2[0], m2[0] * 1e-4);
    }

    #[test]
    fn test_concrete_scenario_500k_1e13hz() {
        use crate::constants::{C, H, K};
        let t = 500.0;
        let nu: f64 = 1e13;
        let expected = 2.0 * H / (C * C) * nu.powi(3) / ((H * nu / (K * t)).exp() - 1.0);
        let got =
            spectral_radiant_sterance(&[t], &[nu], SpectralUnit::Hertz, AreaUnit::SquareMeter)
                .unwrap()[0];
        assert_relative_eq!(got, expected, max_relative = 1e-13);
    }

    #[test]
    fn test_rejects_non_positive_temperature() {
        for bad_t in [0.0, -250.0, f64::NAN] {
            let err = spectral_radiant_sterance(&[300.0, bad_t], &[10.0],
                SpectralUnit::Micrometer, AreaUnit::SquareMeter)
            .unwrap_err();
            assert_eq!(err, SteranceError::NonPositiveTemperature);

            let err = integrated_photon_sterance(&[bad_t], [3.0, 5.0],
                SpectralUnit::Micrometer, AreaUnit::SquareMeter)
            .unwrap_err();
            assert_eq!(err, SteranceError::NonPositiveTemperature);
        }
    }

    #[test]
    fn test_rejects_non_positive_spectral_value() {
        for bad_x in [0.0, -1e13, f64::NAN] {
            let err = spectral_photon_sterance(&[300.0], &[1e13, bad_x], SpectralUnit::Hertz,
                AreaUnit::SquareMeter)
            .unwrap_err();
            assert_eq!(err, SteranceError::NonPositiveSpectral);
        }
    }

    #[test]
    fn test_rejects_empty_and_mismatched_shapes() {
        let err = spectral_radiant_sterance(&[], &[10.0], SpectralUnit::Micrometer,
            AreaUnit::SquareMeter)
        .unwrap_err();
        assert_eq!(err, SteranceError::EmptyInput);

        let err = spectral_radiant_sterance(&[300.0, 400.0], &[1.0, 2.0, 3.0],
            SpectralUnit::Micrometer, AreaUnit::SquareMeter)
        .unwrap_err();
        assert_eq!(err, SteranceError::ShapeMismatch(2, 3));
    }

    #[test]
    fn test_broadcasting_matches_scalar_calls() {
        let temps = [250.0, 300.0, 350.0];
        let x = [10.0];
        let broadcast = spectral_radiant_sterance(&temps, &x, SpectralUnit::Micrometer,
            AreaUnit::SquareMeter)
        .unwrap();
        assert_eq!(broadcast.len(), 3);

        for (i, &t) in temps.iter().enumerate() {
            let single = spectral_radiant_sterance(&[t], &x, SpectralUnit::Micrometer,
                AreaUnit::SquareMeter)
            .unwrap();
            assert_eq!(broadcast[i], single[0]);
        }

        // Scalar T against an x array, and matched lengths.
        let xs = [5.0, 10.0, 20.0];
        let out = spectral_radiant_sterance(&[300.0], &xs, SpectralUnit::Micrometer,
            AreaUnit::SquareMeter)
        .unwrap();
        assert_eq!(out.len(), 3);
        let paired = spectral_radiant_sterance(&[300.0, 300.0, 300.0], &xs,
            SpectralUnit::Micrometer, AreaUnit::SquareMeter)
        .unwrap();
        assert_eq!(out, paired);
    }

    #[test]
    fn test_with_terms_default_matches_plain_call() {
        let t = [400.0];
        let band = [500.0, 1500.0];
        let plain = integrated_radiant_sterance(&t, band, SpectralUnit::InverseCentimeter,
            AreaUnit::SquareMeter)
        .unwrap();
        let explicit = integrated_radiant_sterance_with_terms(&t, band,
            SpectralUnit::InverseCentimeter, AreaUnit::SquareMeter, DEFAULT_SERIES_TERMS)
        .unwrap();
        assert_eq!(plain, explicit);
    }

    #[test]
    fn test_sweep_matches_single_band_calls() {
        let temps = [280.0, 300.0, 320.0];
        let bands = [[3.0, 5.0], [8.0, 12.0]];
        let grid = integrated_sterance_sweep(
            FluxQuantity::Photon,
            &temps,
            &bands,
            SpectralUnit::Micrometer,
            AreaUnit::SquareCentimeter,
            DEFAULT_SERIES_TERMS,
        )
        .unwrap();

        assert_eq!(grid.len(), temps.len());
        for (row, &t) in grid.iter().zip(&temps) {
            assert_eq!(row.len(), bands.len());
            for (value, &band) in row.iter().zip(&bands) {
                let single = integrated_photon_sterance(&[t], band, SpectralUnit::Micrometer,
                    AreaUnit::SquareCentimeter)
                .unwrap();
                assert_eq!(*value, single[0]);
            }
        }
    }

    #[test]
    fn test_band_result_non_negative() {
        let out = integrated_radiant_sterance(&[500.0], [4.0, 4.0], SpectralUnit::Micrometer,
            AreaUnit::SquareMeter)
        .unwrap();
        assert_eq!(out[0], 0.0);
    }
}
