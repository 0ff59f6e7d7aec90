use ndarray::{Array2, Array3, ArrayView2};

/// Digital numbers per unit of surface reflectance (Sentinel-2 L2A convention).
pub const REFLECTANCE_SCALE: f64 = 10_000.0;
const SCALE_255: f64 = 255.0;

/// Linear map of one digital number onto the 8-bit display range.
/// Reflectance 1.0 and above saturates at 255, negatives and NaN become 0.
#[inline]
pub fn reflectance_to_u8(dn: f64) -> u8 {
    // `as` truncates toward zero and maps NaN to 0
    (dn / REFLECTANCE_SCALE * SCALE_255).clamp(0.0, SCALE_255) as u8
}

/// Rescale a whole band of digital numbers to u8. No gamma or histogram stretch.
pub fn rescale_band(band: ArrayView2<'_, f32>) -> Array2<u8> {
    band.mapv(|dn| reflectance_to_u8(f64::from(dn)))
}

/// 256-entry lookup table for `clip(v * factor, 0, 255)` truncated to u8.
pub fn brightness_lut(factor: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = (v as f64 * factor).clamp(0.0, SCALE_255) as u8;
    }
    lut
}

/// Multiply every channel of `rgb` by `factor` in place, clipping to 0..=255.
pub fn apply_brightness(rgb: &mut Array3<u8>, factor: f64) {
    let lut = brightness_lut(factor);
    rgb.mapv_inplace(|v| lut[v as usize]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scales_reflectance_linearly() {
        assert_eq!(reflectance_to_u8(0.0), 0);
        assert_eq!(reflectance_to_u8(5000.0), 127);
        assert_eq!(reflectance_to_u8(10000.0), 255);
        assert_eq!(reflectance_to_u8(2000.0), 51);
    }

    #[test]
    fn saturates_and_floors() {
        assert_eq!(reflectance_to_u8(25000.0), 255);
        assert_eq!(reflectance_to_u8(65535.0), 255);
        assert_eq!(reflectance_to_u8(-10.0), 0);
        assert_eq!(reflectance_to_u8(f64::NAN), 0);
    }

    #[test]
    fn rescales_every_pixel() {
        let band = array![[0.0f32, 5000.0], [10000.0, 12000.0]];
        assert_eq!(rescale_band(band.view()), array![[0u8, 127], [255, 255]]);
    }

    #[test]
    fn unit_brightness_is_identity() {
        let lut = brightness_lut(1.0);
        for v in 0..=255u8 {
            assert_eq!(lut[v as usize], v);
        }
    }

    #[test]
    fn brightness_clips_and_truncates() {
        let lut = brightness_lut(1.3);
        assert_eq!(lut[100], 130);
        assert_eq!(lut[127], 165); // 165.1
        assert_eq!(lut[200], 255);
        assert_eq!(lut[255], 255);

        let dark = brightness_lut(0.5);
        assert_eq!(dark[255], 127);
        assert_eq!(dark[1], 0);
        assert!(brightness_lut(0.0).iter().all(|&v| v == 0));
    }

    #[test]
    fn brightness_is_monotonic_in_factor() {
        let factors = [0.0, 0.25, 0.8, 1.0, 1.2, 1.5, 3.0, 10.0];
        for w in factors.windows(2) {
            let (lo, hi) = (brightness_lut(w[0]), brightness_lut(w[1]));
            for v in 0..256 {
                assert!(hi[v] >= lo[v], "factor {} vs {} at {}", w[0], w[1], v);
            }
        }
    }

    #[test]
    fn applies_in_place() {
        let mut rgb = Array3::<u8>::from_elem((2, 2, 3), 100);
        apply_brightness(&mut rgb, 2.0);
        assert!(rgb.iter().all(|&v| v == 200));
        apply_brightness(&mut rgb, 2.0);
        assert!(rgb.iter().all(|&v| v == 255));
    }
}
