//! Fresnel equations and the reflectance models compared by the fitter.
//!
//! # Conductor reflectance
//!
//! For a metal with complex refractive index $\eta + ik$ seen from air, the
//! unpolarised reflectance at the incident angle $\theta$ ($c = \cos\theta$)
//! is the average of the "S" (perpendicular) and "P" (parallel) terms:
//!
//! $$R_s = \frac{\eta^2 + k^2 - 2\eta c + c^2}{\eta^2 + k^2 + 2\eta c + c^2}$$
//!
//! $$R_p = \frac{(\eta^2 + k^2)c^2 - 2\eta c + 1}{(\eta^2 + k^2)c^2 + 2\eta c + 1}$$
//!
//! $$F = \frac{1}{2}(R_s + R_p)$$
//!
//! See [`complex_fresnel`]. This is the reference curve.
//!
//! # Metallic Fresnel
//!
//! The two-colour model used by the shading system blends a base colour (seen
//! along the normal) and a grazing colour with the *dielectric* Fresnel
//! coefficient of a single scalar IOR:
//!
//! $$M(c) = base (1 - f(c)) + grazing f(c)$$
//!
//! The coefficient is computed from the geometry of the refracted ray, see
//! [`refract_cos`], [`fresnel_coefficient`] and [`metallic_fresnel`].
//!
//! # Artist-friendly metallic Fresnel
//!
//! Gulbrandsen's model ("Artist Friendly Metallic Fresnel", JCGT 2014) maps a
//! base reflectance $r$ and an edge tint $g$ back to a plausible $(\eta, k)$
//! pair and then evaluates the conductor formula above:
//!
//! $$\eta_{min} = \frac{1 - r}{1 + r}, \quad \eta_{max} = \frac{1 + \sqrt r}{1 - \sqrt r}$$
//!
//! $$\eta = g\,\eta_{min} + (1 - g)\,\eta_{max}, \quad k^2 = \frac{(\eta + 1)^2 r - (\eta - 1)^2}{1 - r}$$
//!
//! See [`ArtistFresnel`].

use crate::{
    color::{Channel, Rgb},
    error::{DomainViolation, FitError},
    optics::ior::Ior,
};
use glam::Vec3;

/// Upper bound of the base reflectance accepted by the artist-friendly model;
/// `r = 1` makes `k²` diverge.
pub const ARTIST_MAX_BASE: f32 = 0.99;

/// Relative tolerance below zero under which a derived `k²` is treated as a
/// rounding artefact and snapped to zero.
pub const ARTIST_K2_TOLERANCE: f64 = 1e-6;

/// `num / den`, with the 0/0 and x/0 forms taken as total reflection.
#[inline(always)]
fn ratio_or_one(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        1.0
    } else {
        num / den
    }
}

/// Unclamped unpolarised reflectance from `η`, `k²` and the cosine of the
/// incident angle.
#[inline]
fn reflectance_sp(eta: f64, k2: f64, cos: f64) -> f64 {
    let nk2 = eta * eta + k2;
    let c2 = cos * cos;
    let two_nc = 2.0 * eta * cos;
    let rs = ratio_or_one(nk2 - two_nc + c2, nk2 + two_nc + c2);
    let rp = ratio_or_one(nk2 * c2 - two_nc + 1.0, nk2 * c2 + two_nc + 1.0);
    0.5 * (rs + rp)
}

/// Fresnel reflectance of unpolarised light between the air and a conductor
/// for one wavelength.
///
/// # Arguments
///
/// * `ior` - complex refractive index of the conductor.
/// * `cos` - cosine of the angle between the viewing direction and the surface
///   normal, in [0, 1].
///
/// # Notes
///
/// The result is clamped to [0, 1]. When `η = k = 0` and `cos = 0` both
/// polarisation terms degenerate to 0/0; they are defined as 1, the limit of
/// the terms when `cos` goes to 0.
pub fn complex_fresnel(ior: Ior, cos: f32) -> f32 {
    debug_assert!(
        (0.0..=1.0).contains(&cos),
        "the cosine of the incident angle must be in [0, 1], got {}",
        cos
    );
    let k = ior.k as f64;
    (reflectance_sp(ior.eta as f64, k * k, cos as f64) as f32).clamp(0.0, 1.0)
}

/// Complex Fresnel reflectance for the three bands at once.
///
/// See [`complex_fresnel`].
pub fn complex_fresnel_rgb(eta: Rgb, k: Rgb, cos: f32) -> Rgb {
    eta.map_channels(|channel, _| complex_fresnel(Ior::from_channel(eta, k, channel), cos))
}

/// Result of a refraction computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    /// Direction of the transmitted ray.
    pub dir_t: Vec3,
    /// Cosine of the transmitted angle, between the refracted direction and
    /// the inverse of the normal. Zero on total internal reflection.
    pub cos_t: f32,
    /// Whether the configuration leads to total internal reflection. The
    /// direction is still produced, with a grazing transmitted angle.
    pub tir: bool,
}

/// Refracts an incident vector `wi` at the surface with a normal `n` using the
/// relative refraction index `eta = eta_i / eta_t`.
///
/// # Arguments
///
/// * `wi` - Incident vector (normalised), ends up on the point of incidence.
/// * `n` - Normal vector (normalised), pointing towards the incident medium.
/// * `eta` - Relative refraction index.
/// * `cos_i` - Cosine of the incident angle, always positive.
pub fn refract_cos(wi: Vec3, n: Vec3, eta: f32, cos_i: f32) -> Refraction {
    debug_assert!(
        (0.0..=1.0).contains(&cos_i),
        "cos_i should be the cosine of the incident angle and should be positive."
    );
    let cos_t_sqr = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    let tir = cos_t_sqr < 0.0;
    let cos_t = cos_t_sqr.max(0.0).sqrt();
    let dir_t = (eta * cos_i - cos_t) * n + eta * wi;
    Refraction { dir_t, cos_t, tir }
}

/// Unpolarised dielectric Fresnel coefficient of an interface with relative
/// index `ior` (transmitted over incident), from the incident and transmitted
/// cosines. Total internal reflection yields 1.
pub fn fresnel_coefficient(cos_i: f32, cos_t: f32, ior: f32) -> f32 {
    if cos_t <= 0.0 {
        return 1.0;
    }
    let rs = (cos_i - ior * cos_t) / (cos_i + ior * cos_t);
    let rp = (cos_t - ior * cos_i) / (cos_t + ior * cos_i);
    (0.5 * (rs * rs + rp * rp)).clamp(0.0, 1.0)
}

/// Reflectance of the two-colour metallic model with a scalar IOR.
///
/// The view direction is `(sqrt(1 - c²), 0, -c)` against the normal
/// `(0, 0, 1)`. The scalar Fresnel coefficient `f` of the refraction into a
/// medium of index `ior` blends `base` and `grazing` linearly per channel. The
/// result is not clamped.
///
/// # Arguments
///
/// * `base` - Reflectance along the normal.
/// * `grazing` - Reflectance at 90 degrees.
/// * `ior` - Index of refraction, positive.
/// * `cos` - Cosine between the viewing direction and the surface normal.
pub fn metallic_fresnel(base: Rgb, grazing: Rgb, ior: f32, cos: f32) -> Rgb {
    let cos = cos.clamp(0.0, 1.0);
    let view = Vec3::new((1.0 - cos * cos).max(0.0).sqrt(), 0.0, -cos);
    let normal = Vec3::Z;
    let refraction = refract_cos(view, normal, ior.recip(), -view.dot(normal));
    let f = fresnel_coefficient(-view.dot(normal), -refraction.dir_t.dot(normal), ior);
    base * (1.0 - f) + grazing * f
}

/// Artist-friendly metallic Fresnel with the per-channel `(η, k²)` already
/// derived from the base and edge colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtistFresnel {
    eta: [f64; 3],
    k2: [f64; 3],
}

impl ArtistFresnel {
    /// Derives the synthetic refractive index for every channel.
    ///
    /// # Errors
    ///
    /// [`FitError::DomainInputInvalid`] when a base channel is not below 1,
    /// an input isn't finite, or the derived `k²` is negative by more than
    /// [`ARTIST_K2_TOLERANCE`] relative to its terms (edge tint outside
    /// [0, 1]). Slightly negative values are snapped to zero.
    ///
    /// Base channels are clamped to `[0, 0.99]`, so negative bases behave as
    /// a base of 0.
    pub fn new(base: Rgb, grazing: Rgb) -> Result<Self, FitError> {
        let mut eta = [0.0; 3];
        let mut k2 = [0.0; 3];
        for channel in Channel::ALL {
            let (n, kk) = derive_eta_k2(base[channel], grazing[channel])
                .map_err(|reason| FitError::DomainInputInvalid { channel, reason })?;
            eta[channel as usize] = n;
            k2[channel as usize] = kk;
        }
        Ok(Self { eta, k2 })
    }

    /// Synthetic `η` per channel.
    pub fn eta(&self) -> Rgb { Rgb::new(self.eta[0] as f32, self.eta[1] as f32, self.eta[2] as f32) }

    /// Synthetic `k²` per channel.
    pub fn k2(&self) -> Rgb { Rgb::new(self.k2[0] as f32, self.k2[1] as f32, self.k2[2] as f32) }

    /// Evaluates the model; the result is not clamped.
    ///
    /// At `cos = 0` every channel is 1 whatever the edge tint: the curve
    /// only ends on the grazing colour when that colour is 1, which holds
    /// for the physical grazing reflectance of any metal.
    pub fn eval(&self, cos: f32) -> Rgb {
        let c = cos as f64;
        Rgb::ZERO.map_channels(|channel, _| {
            let i = channel as usize;
            reflectance_sp(self.eta[i], self.k2[i], c) as f32
        })
    }
}

/// Lowest plausible `η` for a base reflectance `r`.
#[inline]
fn eta_min(r: f64) -> f64 { (1.0 - r) / (1.0 + r) }

/// Highest plausible `η` for a base reflectance `r`.
#[inline]
fn eta_max(r: f64) -> f64 {
    let sqrt_r = r.sqrt();
    (1.0 + sqrt_r) / (1.0 - sqrt_r)
}

fn derive_eta_k2(r: f32, g: f32) -> Result<(f64, f64), DomainViolation> {
    if !r.is_finite() || !g.is_finite() {
        return Err(DomainViolation::NonFinite);
    }
    if r >= 1.0 {
        return Err(DomainViolation::BaseOutOfRange(r));
    }
    let r = r.clamp(0.0, ARTIST_MAX_BASE) as f64;
    let g = g as f64;
    let eta = g * eta_min(r) + (1.0 - g) * eta_max(r);
    let pos = (eta + 1.0) * (eta + 1.0) * r;
    let neg = (eta - 1.0) * (eta - 1.0);
    let k2 = (pos - neg) / (1.0 - r);
    if k2 >= 0.0 {
        Ok((eta, k2))
    } else if -k2 <= ARTIST_K2_TOLERANCE * (pos + neg) / (1.0 - r) {
        Ok((eta, 0.0))
    } else {
        Err(DomainViolation::NegativeK2(k2 as f32))
    }
}

/// Artist-friendly metallic Fresnel evaluated once.
///
/// Prefer [`ArtistFresnel::new`] when evaluating the same colours at many
/// angles.
pub fn artist_fresnel(base: Rgb, grazing: Rgb, cos: f32) -> Result<Rgb, FitError> {
    ArtistFresnel::new(base, grazing).map(|model| model.eval(cos))
}

/// Reflectance curves that can be sampled against each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReflectanceModel {
    /// Physical reflectance from the complex refractive index.
    Complex {
        /// Real part per channel.
        eta: Rgb,
        /// Imaginary part per channel.
        k: Rgb,
    },
    /// Two-colour model with a scalar IOR.
    Metallic {
        /// Reflectance along the normal.
        base: Rgb,
        /// Reflectance at 90 degrees.
        grazing: Rgb,
        /// Scalar index of refraction.
        ior: f32,
    },
    /// Two-colour model without IOR.
    Artist(ArtistFresnel),
}

impl ReflectanceModel {
    /// Evaluates the curve at the given cosine.
    pub fn eval(&self, cos: f32) -> Rgb {
        match self {
            ReflectanceModel::Complex { eta, k } => complex_fresnel_rgb(*eta, *k, cos),
            ReflectanceModel::Metallic { base, grazing, ior } => {
                metallic_fresnel(*base, *grazing, *ior, cos)
            },
            ReflectanceModel::Artist(model) => model.eval(cos),
        }
    }

    /// Short name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            ReflectanceModel::Complex { .. } => "complex",
            ReflectanceModel::Metallic { .. } => "metallic",
            ReflectanceModel::Artist(_) => "artist",
        }
    }
}
