//! Index of refraction.

use crate::color::{Channel, Rgb};
use std::fmt::{Debug, Display, Formatter};

/// Complex index of refraction without wavelength information.
#[derive(Copy, Clone, PartialEq)]
pub struct Ior {
    /// Index of refraction.
    pub eta: f32,
    /// Extinction coefficient.
    pub k: f32,
}

impl Debug for Ior {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "IOR(η={}, κ={})", self.eta, self.k)
    }
}

impl Display for Ior {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "η={}, κ={}", self.eta, self.k)
    }
}

impl Ior {
    /// Refractive index of vacuum.
    pub const VACUUM: Self = Self { eta: 1.0, k: 0.0 };

    /// Creates a new refractive index.
    pub const fn new(eta: f32, k: f32) -> Self { Self { eta, k } }

    /// Picks the index of one channel out of spectral triples of `n` and `k`.
    pub fn from_channel(eta: Rgb, k: Rgb, channel: Channel) -> Self {
        Self::new(eta[channel], k[channel])
    }

    /// Checks whether the refractive index represents insulator material.
    pub fn is_dielectric(&self) -> bool { (self.k - 0.0).abs() < f32::EPSILON }

    /// Checks whether the refractive index represents conductor material.
    pub fn is_conductor(&self) -> bool { !self.is_dielectric() }

    /// `n² + k²`, the squared magnitude of the complex index.
    #[inline]
    pub fn norm_sqr(&self) -> f32 { self.eta * self.eta + self.k * self.k }
}
