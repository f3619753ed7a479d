//! Python bindings via PyO3.
//!
//! Mirrors the string-keyed call surface of the original Python package:
//! units are passed as strings ("Hz", "um", "m^2", ...), temperatures and
//! spectral values as scalars-as-lists or lists, and every validation
//! failure maps to ValueError.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::constants::{
    self, AreaUnit, FluxQuantity, RadiationConstants, SpectralUnit,
};
use crate::planck::DEFAULT_SERIES_TERMS;
use crate::sterance;

fn value_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_spectral(unit: &str) -> PyResult<SpectralUnit> {
    unit.parse::<SpectralUnit>().map_err(value_err)
}

fn parse_area(unit: &str) -> PyResult<AreaUnit> {
    unit.parse::<AreaUnit>().map_err(value_err)
}

fn parse_flux(flux: &str) -> PyResult<FluxQuantity> {
    flux.parse::<FluxQuantity>().map_err(value_err)
}

fn parse_band(band: Vec<f64>) -> PyResult<[f64; 2]> {
    match band[..] {
        [a, b] => Ok([a, b]),
        _ => Err(PyValueError::new_err(
            "band must have exactly 2 elements [x_a, x_b]",
        )),
    }
}

/// Spectral radiant sterance (energy flux).
#[pyfunction]
#[pyo3(signature = (t, x, *, spectral_unit, area_unit))]
fn spectral_radiant_sterance(
    t: Vec<f64>,
    x: Vec<f64>,
    spectral_unit: &str,
    area_unit: &str,
) -> PyResult<Vec<f64>> {
    let s = parse_spectral(spectral_unit)?;
    let a = parse_area(area_unit)?;
    sterance::spectral_radiant_sterance(&t, &x, s, a).map_err(value_err)
}

/// Spectral photon sterance (photon flux).
#[pyfunction]
#[pyo3(signature = (t, x, *, spectral_unit, area_unit))]
fn spectral_photon_sterance(
    t: Vec<f64>,
    x: Vec<f64>,
    spectral_unit: &str,
    area_unit: &str,
) -> PyResult<Vec<f64>> {
    let s = parse_spectral(spectral_unit)?;
    let a = parse_area(area_unit)?;
    sterance::spectral_photon_sterance(&t, &x, s, a).map_err(value_err)
}

/// Band-integrated radiant sterance between two spectral endpoints.
#[pyfunction]
#[pyo3(signature = (t, x_ab, *, spectral_unit, area_unit, terms=DEFAULT_SERIES_TERMS))]
fn integrated_radiant_sterance(
    t: Vec<f64>,
    x_ab: Vec<f64>,
    spectral_unit: &str,
    area_unit: &str,
    terms: usize,
) -> PyResult<Vec<f64>> {
    let s = parse_spectral(spectral_unit)?;
    let a = parse_area(area_unit)?;
    let band = parse_band(x_ab)?;
    sterance::integrated_radiant_sterance_with_terms(&t, band, s, a, terms).map_err(value_err)
}

/// Band-integrated photon sterance between two spectral endpoints.
#[pyfunction]
#[pyo3(signature = (t, x_ab, *, spectral_unit, area_unit, terms=DEFAULT_SERIES_TERMS))]
fn integrated_photon_sterance(
    t: Vec<f64>,
    x_ab: Vec<f64>,
    spectral_unit: &str,
    area_unit: &str,
    terms: usize,
) -> PyResult<Vec<f64>> {
    let s = parse_spectral(spectral_unit)?;
    let a = parse_area(area_unit)?;
    let band = parse_band(x_ab)?;
    sterance::integrated_photon_sterance_with_terms(&t, band, s, a, terms).map_err(value_err)
}

/// Radiation constants (c1, c2) for a (flux, spectral-unit) pair.
#[pyfunction]
fn radiation_constants(flux: &str, spectral_unit: &str) -> PyResult<(f64, f64)> {
    let rc = RadiationConstants::lookup(parse_flux(flux)?, parse_spectral(spectral_unit)?);
    Ok((rc.c1, rc.c2))
}

/// Stefan-Boltzmann constant for a (flux, spectral-unit) pair.
#[pyfunction]
fn stefan_boltzmann_constant(flux: &str, spectral_unit: &str) -> PyResult<f64> {
    Ok(constants::stefan_boltzmann_constant(
        parse_flux(flux)?,
        parse_spectral(spectral_unit)?,
    ))
}

/// Wien displacement constant for a (flux, spectral-unit) pair.
#[pyfunction]
fn wien_constant(flux: &str, spectral_unit: &str) -> PyResult<f64> {
    Ok(constants::wien_constant(
        parse_flux(flux)?,
        parse_spectral(spectral_unit)?,
    ))
}

/// Multiplicative factor for an area unit (1 for m^2).
#[pyfunction]
fn area_factor(area_unit: &str) -> PyResult<f64> {
    Ok(parse_area(area_unit)?.factor())
}

/// Supported flux-quantity names.
#[pyfunction]
fn flux_units() -> Vec<String> {
    FluxQuantity::ALL.iter().map(|f| f.to_string()).collect()
}

/// Supported spectral-unit names.
#[pyfunction]
fn spectral_units() -> Vec<String> {
    SpectralUnit::ALL.iter().map(|u| u.to_string()).collect()
}

/// Supported area-unit names.
#[pyfunction]
fn area_units() -> Vec<String> {
    AreaUnit::ALL.iter().map(|u| u.to_string()).collect()
}

// Module registration
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(spectral_radiant_sterance, m)?)?;
    m.add_function(wrap_pyfunction!(spectral_photon_sterance, m)?)?;
    m.add_function(wrap_pyfunction!(integrated_radiant_sterance, m)?)?;
    m.add_function(wrap_pyfunction!(integrated_photon_sterance, m)?)?;
    m.add_function(wrap_pyfunction!(radiation_constants, m)?)?;
    m.add_function(wrap_pyfunction!(stefan_boltzmann_constant, m)?)?;
    m.add_function(wrap_pyfunction!(wien_constant, m)?)?;
    m.add_function(wrap_pyfunction!(area_factor, m)?)?;
    m.add_function(wrap_pyfunction!(flux_units, m)?)?;
    m.add_function(wrap_pyfunction!(spectral_units, m)?)?;
    m.add_function(wrap_pyfunction!(area_units, m)?)?;
    Ok(())
}
