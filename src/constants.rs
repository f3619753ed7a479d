//! Physical constants and unit enumerations.
//!
//! All derived tables (radiation constants, Stefan-Boltzmann constants, Wien
//! displacement constants) are exact products of the CODATA constants and
//! powers of ten for unit conversion, computed by pure functions of `Copy`
//! enums — there is no global state and no lazy initialization, so every
//! table is safe for unlimited concurrent readers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Planck constant (J·s) — SI exact
pub const H: f64 = 6.62607015e-34;

/// Boltzmann constant (J/K) — SI exact
pub const K: f64 = 1.380649e-23;

/// Speed of light in vacuum (m/s) — SI exact
pub const C: f64 = 299792458.0;

/// Stefan-Boltzmann constant (W m⁻² K⁻⁴), derived: 2π⁵k⁴ / (15h³c²)
pub const SIGMA: f64 = 5.670374419184429e-8;

/// Apéry's constant ζ(3)
pub const ZETA3: f64 = 1.2020569031595943;

/// Largest argument the double-precision exponential accepts without
/// overflowing: ln(2) × MAX_EXP ≈ 709.78.
pub const EMAXEXP: f64 = std::f64::consts::LN_2 * f64::MAX_EXP as f64;

/// Requested unit string is not one of the supported values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported {kind} unit '{value}', expected one of {expected}")]
pub struct UnsupportedUnitError {
    /// Which unit family was being parsed ("spectral" or "area").
    pub kind: &'static str,
    /// The offending input string.
    pub value: String,
    /// Comma-separated list of accepted spellings.
    pub expected: &'static str,
}

/// Whether a quantity counts energy (W) or photons (photons/s).
///
/// Determines the power-law exponent and the leading coefficient family in
/// every formula: the photon distribution is one power of the spectral
/// variable lower than the energy distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluxQuantity {
    Energy,
    Photon,
}

impl FluxQuantity {
    /// Both flux quantities, for table iteration.
    pub const ALL: [FluxQuantity; 2] = [FluxQuantity::Energy, FluxQuantity::Photon];
}

impl fmt::Display for FluxQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FluxQuantity::Energy => "energy",
            FluxQuantity::Photon => "photon",
        };
        f.write_str(s)
    }
}

impl FromStr for FluxQuantity {
    type Err = UnsupportedUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "energy" => Ok(FluxQuantity::Energy),
            "photon" => Ok(FluxQuantity::Photon),
            _ => Err(UnsupportedUnitError {
                kind: "flux",
                value: s.to_string(),
                expected: "energy, photon",
            }),
        }
    }
}

/// The independent variable of the spectrum.
///
/// Frequency and wavenumber share the same reduced-variable substitution
/// ξ = x/T; wavelength uses ξ = 1/(x·T) and negative powers of x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralVariable {
    Frequency,
    Wavelength,
    Wavenumber,
}

/// Supported units of the spectral variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralUnit {
    /// Frequency in hertz ("Hz").
    Hertz,
    /// Frequency in terahertz ("THz").
    Terahertz,
    /// Wavelength in micrometers ("um").
    Micrometer,
    /// Wavenumber in reciprocal centimeters ("cm^-1").
    InverseCentimeter,
}

impl SpectralUnit {
    /// All supported spectral units, for table iteration.
    pub const ALL: [SpectralUnit; 4] = [
        SpectralUnit::Hertz,
        SpectralUnit::Terahertz,
        SpectralUnit::Micrometer,
        SpectralUnit::InverseCentimeter,
    ];

    /// Which spectral variable this unit measures.
    pub fn variable(self) -> SpectralVariable {
        match self {
            SpectralUnit::Hertz | SpectralUnit::Terahertz => SpectralVariable::Frequency,
            SpectralUnit::Micrometer => SpectralVariable::Wavelength,
            SpectralUnit::InverseCentimeter => SpectralVariable::Wavenumber,
        }
    }
}

impl fmt::Display for SpectralUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpectralUnit::Hertz => "Hz",
            SpectralUnit::Terahertz => "THz",
            SpectralUnit::Micrometer => "um",
            SpectralUnit::InverseCentimeter => "cm^-1",
        };
        f.write_str(s)
    }
}

impl FromStr for SpectralUnit {
    type Err = UnsupportedUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hz" => Ok(SpectralUnit::Hertz),
            "THz" => Ok(SpectralUnit::Terahertz),
            "um" | "µm" | "μm" => Ok(SpectralUnit::Micrometer),
            "cm^-1" => Ok(SpectralUnit::InverseCentimeter),
            _ => Err(UnsupportedUnitError {
                kind: "spectral",
                value: s.to_string(),
                expected: "Hz, THz, um, cm^-1",
            }),
        }
    }
}

/// Units of the emitting-area element.
///
/// Area only scales the output flux; it never enters the exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    /// Square meters ("m^2").
    SquareMeter,
    /// Square centimeters ("cm^2").
    SquareCentimeter,
}

impl AreaUnit {
    /// Both supported area units, for table iteration.
    pub const ALL: [AreaUnit; 2] = [AreaUnit::SquareMeter, AreaUnit::SquareCentimeter];

    /// Multiplicative conversion factor applied to any computed flux.
    /// factor(m²) = 1 by definition.
    pub fn factor(self) -> f64 {
        match self {
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::SquareCentimeter => 1e-4,
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AreaUnit::SquareMeter => "m^2",
            AreaUnit::SquareCentimeter => "cm^2",
        };
        f.write_str(s)
    }
}

impl FromStr for AreaUnit {
    type Err = UnsupportedUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m^2" => Ok(AreaUnit::SquareMeter),
            "cm^2" => Ok(AreaUnit::SquareCentimeter),
            _ => Err(UnsupportedUnitError {
                kind: "area",
                value: s.to_string(),
                expected: "m^2, cm^2",
            }),
        }
    }
}

/// Radiation-constant pair (c1, c2) for one (flux, spectral-unit) pair.
///
/// c1 carries the leading power-law coefficient (Planck constant, speed of
/// light, and the unit-scale factor); c2 carries the exponent scale (h/k or
/// hc/k, unit-scaled). The spectral distribution is
/// `c1·x^±p / (exp(c2·ξ) − 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiationConstants {
    /// Leading coefficient.
    pub c1: f64,
    /// Exponent scale.
    pub c2: f64,
}

impl RadiationConstants {
    /// Radiation constants for a (flux, spectral-unit) pair.
    ///
    /// For a fixed pair, c2 is identical across area units — the area
    /// factor is applied to the output by the caller, never here.
    pub fn lookup(flux: FluxQuantity, unit: SpectralUnit) -> Self {
        use FluxQuantity::*;
        use SpectralUnit::*;

        let (c1, c2) = match (flux, unit) {
            (Energy, Hertz) => (2.0 * H / (C * C), H / K),
            (Photon, Hertz) => (2.0 / (C * C), H / K),
            (Energy, Terahertz) => (2.0 * H / (C * C) * 1e48, H / K * 1e12),
            (Photon, Terahertz) => (2.0 / (C * C) * 1e36, H / K * 1e12),
            (Energy, Micrometer) => (2.0 * H * C * C * 1e24, H * C / K * 1e6),
            (Photon, Micrometer) => (2.0 * C * 1e18, H * C / K * 1e6),
            (Energy, InverseCentimeter) => (2.0 * H * C * C * 1e8, H * C / K * 100.0),
            (Photon, InverseCentimeter) => (2.0 * C * 1e6, H * C / K * 100.0),
        };

        RadiationConstants { c1, c2 }
    }
}

/// Stefan-Boltzmann constant for a (flux, spectral-unit) pair.
///
/// Total hemispheric flux is `constant × T⁴` (energy) or `constant × T³`
/// (photon); the sterance integrated over the full spectral domain is that
/// divided by π. The value does not depend on the spectral unit because the
/// full-domain integral is invariant under a change of spectral variable.
/// Used for validation and testing, not by the integrator.
pub fn stefan_boltzmann_constant(flux: FluxQuantity, _unit: SpectralUnit) -> f64 {
    match flux {
        FluxQuantity::Energy => SIGMA,
        FluxQuantity::Photon => {
            4.0 * std::f64::consts::PI * ZETA3 * K.powi(3) / (H.powi(3) * C * C)
        }
    }
}

/// Wien displacement constant for a (flux, spectral-unit) pair.
///
/// The spectral distribution peaks at `constant × T` for frequency-like
/// variables and at `constant / T` for wavelength. The dimensionless peak
/// location solves m·(1 − e⁻ˣ) = x, i.e. x = m + W₀(−m·e⁻ᵐ), with m the
/// power-law exponent of the distribution (3/2 for frequency-like
/// energy/photon, 5/4 for wavelength energy/photon). Used for validation
/// and testing, not by the integrator.
pub fn wien_constant(flux: FluxQuantity, unit: SpectralUnit) -> f64 {
    use FluxQuantity::*;
    use SpectralUnit::*;

    match (flux, unit) {
        (Energy, Hertz) => K / H * wien_peak(3.0),
        (Photon, Hertz) => K / H * wien_peak(2.0),
        (Energy, Terahertz) => 1e-12 * K / H * wien_peak(3.0),
        (Photon, Terahertz) => 1e-12 * K / H * wien_peak(2.0),
        (Energy, Micrometer) => 1e6 * H * C / K / wien_peak(5.0),
        (Photon, Micrometer) => 1e6 * H * C / K / wien_peak(4.0),
        (Energy, InverseCentimeter) => K / (100.0 * H * C) * wien_peak(3.0),
        (Photon, InverseCentimeter) => K / (100.0 * H * C) * wien_peak(2.0),
    }
}

/// Dimensionless peak location |m + W₀(−m·e⁻ᵐ)| of x^m/(eˣ−1).
fn wien_peak(m: f64) -> f64 {
    (m + lambert_w0(-m * (-m).exp())).abs()
}

/// Principal branch of the Lambert W function, W₀(z)·e^W₀(z) = z.
///
/// Halley iteration; valid for z ≥ −1/e. The Wien arguments −m·e⁻ᵐ for
/// m ∈ {2,3,4,5} all lie in (−1/e, 0), where the small-|z| starting guess
/// converges in a handful of iterations.
pub fn lambert_w0(z: f64) -> f64 {
    // First-order series guess; good for |z| < 1/e.
    let mut w = if z.abs() < 1.0 { z * (1.0 - z) } else { z.ln() };

    for _ in 0..64 {
        let ew = w.exp();
        let f = w * ew - z;
        let wp1 = w + 1.0;
        let delta = f / (ew * wp1 - (w + 2.0) * f / (2.0 * wp1));
        w -= delta;
        if delta.abs() <= 1e-16 * (1.0 + w.abs()) {
            break;
        }
    }
    w
}
