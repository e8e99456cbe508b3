//! Three-band linear values.
//!
//! [`Rgb`] carries either a reflectance colour or a spectral triple (the `n`
//! or `k` part of a refractive index) sampled at the wavelengths listed in
//! [`WAVELENGTHS`]. Channels never interact: every operation is applied
//! independently per channel.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Add, Index, IndexMut, Mul, Sub},
};

/// Wavelengths in nanometres associated with the red, green and blue channel.
pub const WAVELENGTHS: [f32; 3] = [650.0, 550.0, 450.0];

/// One of the three bands of an [`Rgb`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red, 650 nm.
    Red = 0,
    /// Green, 550 nm.
    Green = 1,
    /// Blue, 450 nm.
    Blue = 2,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Wavelength of the band in nanometres.
    pub const fn wavelength(&self) -> f32 { WAVELENGTHS[*self as usize] }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Red => write!(f, "red"),
            Channel::Green => write!(f, "green"),
            Channel::Blue => write!(f, "blue"),
        }
    }
}

/// Linear three-channel value.
///
/// Reflectance colours are conceptually in [0, 1] but this type doesn't
/// enforce it; see [`Rgb::clamp`].
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// All channels set to zero.
    pub const ZERO: Self = Self::splat(0.0);
    /// All channels set to one.
    pub const ONE: Self = Self::splat(1.0);

    /// Creates a new value from its channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self { Self { r, g, b } }

    /// Creates a value with the same number in every channel.
    pub const fn splat(v: f32) -> Self { Self { r: v, g: v, b: v } }

    /// Applies `f` to every channel.
    pub fn map<F: FnMut(f32) -> f32>(self, mut f: F) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Applies `f` to every channel together with the channel tag.
    pub fn map_channels<F: FnMut(Channel, f32) -> f32>(self, mut f: F) -> Self {
        Self::new(
            f(Channel::Red, self.r),
            f(Channel::Green, self.g),
            f(Channel::Blue, self.b),
        )
    }

    /// Combines two values channel by channel.
    pub fn zip_map<F: FnMut(f32, f32) -> f32>(self, other: Self, mut f: F) -> Self {
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }

    /// Squared euclidean length, accumulated in double precision.
    pub fn length_sqr(&self) -> f64 {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        r * r + g * g + b * b
    }

    /// Squared euclidean distance to `other`.
    pub fn distance_sqr(&self, other: &Self) -> f64 { (*self - *other).length_sqr() }

    /// Clamps every channel into `[min, max]`.
    pub fn clamp(self, min: f32, max: f32) -> Self { self.map(|v| v.clamp(min, max)) }

    /// Whether all channels are finite.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Largest channel.
    pub fn max_element(&self) -> f32 { self.r.max(self.g).max(self.b) }

    /// Iterates over the channels in storage order.
    pub fn iter(&self) -> impl Iterator<Item = f32> { [self.r, self.g, self.b].into_iter() }
}

impl Debug for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5}, {:.5})", self.r, self.g, self.b)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(v: [f32; 3]) -> Self { Self::new(v[0], v[1], v[2]) }
}

impl From<Rgb> for [f32; 3] {
    fn from(v: Rgb) -> Self { [v.r, v.g, v.b] }
}

impl Index<Channel> for Rgb {
    type Output = f32;

    fn index(&self, channel: Channel) -> &Self::Output {
        match channel {
            Channel::Red => &self.r,
            Channel::Green => &self.g,
            Channel::Blue => &self.b,
        }
    }
}

impl IndexMut<Channel> for Rgb {
    fn index_mut(&mut self, channel: Channel) -> &mut Self::Output {
        match channel {
            Channel::Red => &mut self.r,
            Channel::Green => &mut self.g,
            Channel::Blue => &mut self.b,
        }
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Self) -> Self::Output { self.zip_map(rhs, |a, b| a + b) }
}

impl Sub for Rgb {
    type Output = Rgb;

    fn sub(self, rhs: Self) -> Self::Output { self.zip_map(rhs, |a, b| a - b) }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;

    fn mul(self, rhs: f32) -> Self::Output { self.map(|v| v * rhs) }
}

impl Mul<Rgb> for f32 {
    type Output = Rgb;

    fn mul(self, rhs: Rgb) -> Self::Output { rhs * self }
}
