pub mod composite;
pub mod rescale;

pub use composite::{BandStack, RgbImage, compose_rgb, composite_bands};
