//! Core processing building blocks: reflectance rescaling, brightness
//! adjustment and RGB compositing. These are pure primitives consumed by the
//! high-level `api` module.
pub mod params;
pub mod processing;
