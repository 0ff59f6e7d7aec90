use ndarray::{Array3, Axis};
use tracing::debug;

use crate::core::params::validate_brightness;
use crate::core::processing::rescale::{apply_brightness, rescale_band};
use crate::error::{Error, Result};
use crate::types::{BandOrder, Composite};

/// Raw digital numbers, shape (bands, height, width)
pub type BandStack = Array3<f32>;

/// Display-ready image, shape (height, width, 3), channels in R, G, B order
pub type RgbImage = Array3<u8>;

/// Check the stack has enough bands for `order`.
pub fn check_band_count(band_count: usize, order: &BandOrder) -> Result<()> {
    let required = order.required_bands();
    if band_count < required {
        return Err(Error::InsufficientBands {
            found: band_count,
            required,
        });
    }
    Ok(())
}

/// Rescale the three selected bands and interleave them as R, G, B.
pub fn composite_bands(
    stack: &BandStack,
    order: &BandOrder,
    composite: Composite,
) -> Result<RgbImage> {
    check_band_count(stack.len_of(Axis(0)), order)?;

    let [r, g, b] = order
        .channels(composite)
        .map(|idx| rescale_band(stack.index_axis(Axis(0), idx)));

    ndarray::stack(Axis(2), &[r.view(), g.view(), b.view()]).map_err(Error::processing)
}

/// Full compositor: band selection, reflectance rescaling, channel stacking,
/// then a uniform brightness multiply with clipping.
pub fn compose_rgb(
    stack: &BandStack,
    order: &BandOrder,
    composite: Composite,
    brightness: f64,
) -> Result<RgbImage> {
    validate_brightness(brightness)?;
    order.validate()?;

    let mut rgb = composite_bands(stack, order, composite)?;
    apply_brightness(&mut rgb, brightness);

    let (rows, cols, _) = rgb.dim();
    debug!(
        "Composed {} image {}x{} with brightness x{}",
        composite, cols, rows, brightness
    );
    Ok(rgb)
}
