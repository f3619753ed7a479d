//! # blackbody
//!
//! Planck blackbody radiation formulas: spectral radiant/photon sterance at
//! a point in the spectrum, and band-integrated sterance over a spectral
//! interval, as a function of temperature, spectral variable (frequency,
//! wavelength, or wavenumber), and flux type (energy or photon count).
//! Band integrals use the Widger & Woodall series expansion of the Planck
//! integral; point evaluation is overflow-safe across the full dynamic
//! range of double precision.
//!
//! Everything is a pure function of its inputs and the read-only constant
//! tables — no I/O, no shared mutable state, safe for concurrent use.

pub mod constants;
pub mod planck;
pub mod sterance;

pub use constants::{
    stefan_boltzmann_constant, wien_constant, AreaUnit, FluxQuantity, RadiationConstants,
    SpectralUnit, SpectralVariable, UnsupportedUnitError,
};
pub use planck::DEFAULT_SERIES_TERMS;
pub use sterance::{
    integrated_photon_sterance, integrated_photon_sterance_with_terms,
    integrated_radiant_sterance, integrated_radiant_sterance_with_terms,
    integrated_sterance_sweep, spectral_photon_sterance, spectral_radiant_sterance,
    SteranceError,
};

#[cfg(feature = "python")]
mod pybridge;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn blackbody(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pybridge::register(m)?;
    Ok(())
}
