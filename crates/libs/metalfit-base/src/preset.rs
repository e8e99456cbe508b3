//! Measured complex refractive indices of common metals.

use crate::{
    color::{Channel, Rgb},
    error::FitError,
    fitting::{find_best_ior, FitParams, IorFit},
    optics::ior::Ior,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A named metal with its complex refractive index at the three bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalPreset {
    /// Display name.
    pub name: Cow<'static, str>,
    /// Real part `n` of the refractive index.
    pub eta: Rgb,
    /// Imaginary part `k` of the refractive index (extinction coefficient).
    pub k: Rgb,
}

impl MetalPreset {
    /// Creates a preset with a static name.
    pub const fn new(name: &'static str, eta: Rgb, k: Rgb) -> Self {
        Self {
            name: Cow::Borrowed(name),
            eta,
            k,
        }
    }

    /// Looks up a built-in preset, ignoring case.
    pub fn find(name: &str) -> Option<&'static MetalPreset> {
        BUILTIN_PRESETS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }

    /// Complex refractive index at one band.
    pub fn ior(&self, channel: Channel) -> Ior { Ior::from_channel(self.eta, self.k, channel) }

    /// Fits the IOR of the metallic model to this metal.
    pub fn fit(&self, params: &FitParams) -> Result<IorFit, FitError> {
        find_best_ior(self.eta, self.k, params)
    }
}

/// Built-in metals, sampled at 650, 550 and 450 nm.
pub static BUILTIN_PRESETS: [MetalPreset; 15] = [
    MetalPreset::new(
        "Silver",
        Rgb::new(0.052225, 0.059582, 0.040000),
        Rgb::new(4.4094, 3.5974, 2.6484),
    ),
    MetalPreset::new(
        "Gold",
        Rgb::new(0.15557, 0.42415, 1.3831),
        Rgb::new(3.6024, 2.4721, 1.9155),
    ),
    MetalPreset::new(
        "Copper",
        Rgb::new(0.23780, 1.0066, 1.2404),
        Rgb::new(3.6264, 2.5823, 2.3929),
    ),
    MetalPreset::new(
        "Aluminum",
        Rgb::new(1.5580, 1.0152, 0.63324),
        Rgb::new(7.7124, 6.6273, 5.4544),
    ),
    MetalPreset::new(
        "Chromium",
        Rgb::new(3.1071, 3.1812, 2.3230),
        Rgb::new(3.3314, 3.3291, 3.1350),
    ),
    MetalPreset::new(
        "Lead",
        Rgb::new(2.5750, 2.5444, 2.1038),
        Rgb::new(4.1612, 4.1823, 4.1890),
    ),
    MetalPreset::new(
        "Platinum",
        Rgb::new(0.47475, 0.46521, 0.63275),
        Rgb::new(6.3329, 5.1073, 3.7481),
    ),
    MetalPreset::new(
        "Titanium",
        Rgb::new(0.25300, 0.28822, 0.52181),
        Rgb::new(5.2796, 4.2122, 3.0367),
    ),
    MetalPreset::new(
        "Tungsten",
        Rgb::new(0.92074, 1.3437, 2.2323),
        Rgb::new(6.8595, 5.2293, 5.1461),
    ),
    MetalPreset::new(
        "Iron",
        Rgb::new(1.8247, 1.2246, 1.0205),
        Rgb::new(7.6326, 5.9377, 4.3952),
    ),
    MetalPreset::new(
        "Vanadium",
        Rgb::new(0.43109, 0.60711, 0.91187),
        Rgb::new(5.5575, 4.5217, 3.6035),
    ),
    MetalPreset::new(
        "Zinc",
        Rgb::new(1.2338, 0.92943, 0.67767),
        Rgb::new(5.8730, 4.9751, 4.0122),
    ),
    MetalPreset::new(
        "Nickel",
        Rgb::new(1.3726, 1.0753, 1.1336),
        Rgb::new(6.6273, 5.1763, 3.7544),
    ),
    MetalPreset::new(
        "Mercury",
        Rgb::new(2.0733, 1.5523, 1.0606),
        Rgb::new(5.3383, 4.6510, 3.8628),
    ),
    MetalPreset::new(
        "Cobalt",
        Rgb::new(2.2371, 2.0524, 1.7365),
        Rgb::new(4.2357, 3.8242, 3.2745),
    ),
];
