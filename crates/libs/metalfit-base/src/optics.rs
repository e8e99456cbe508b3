//! Optics related functions: complex refractive indices and the Fresnel
//! reflectance models.

pub mod fresnel;
pub mod ior;
