use gdal::Dataset;
use gdal::DriverManager;
use gdal::raster::{Buffer, ColorInterpretation, RasterCreationOptions};
use ndarray::Axis;
use std::path::Path;

use crate::core::processing::RgbImage;
use crate::io::gdal::GdalError;

/// Map a source COMPRESSION value to a GTiff COMPRESS creation option.
pub fn creation_compression(source: &str) -> Option<&'static str> {
    match source.trim().to_ascii_uppercase().as_str() {
        "LZW" => Some("LZW"),
        "DEFLATE" => Some("DEFLATE"),
        "ZSTD" => Some("ZSTD"),
        "PACKBITS" => Some("PACKBITS"),
        "LZMA" => Some("LZMA"),
        "WEBP" => Some("WEBP"),
        "JPEG" | "YCBCR JPEG" => Some("JPEG"),
        _ => None,
    }
}

/// Write `rgb` as a 3-band u8 GeoTIFF, one plane per channel in R, G, B
/// order. Georeferencing and metadata are added by the caller on the
/// returned dataset, which is flushed and closed when dropped.
pub fn write_tiff_rgb_u8(
    output: &Path,
    rgb: &RgbImage,
    compression: Option<&str>,
) -> Result<Dataset, GdalError> {
    let (rows, cols, _) = rgb.dim();
    let driver = DriverManager::get_driver_by_name("GTiff")?;

    let mut options = RasterCreationOptions::new();
    options.add_string("PHOTOMETRIC=RGB")?;
    if let Some(c) = compression.and_then(creation_compression) {
        options.add_string(&format!("COMPRESS={}", c))?;
    }

    let ds = driver
        .create_with_band_type_with_options::<u8, _>(output, cols, rows, 3, &options)
        .map_err(|source| GdalError::Create {
            path: output.display().to_string(),
            source,
        })?;

    let interpretations = [
        ColorInterpretation::RedBand,
        ColorInterpretation::GreenBand,
        ColorInterpretation::BlueBand,
    ];
    for (idx, interp) in interpretations.into_iter().enumerate() {
        let mut band = ds.rasterband(idx + 1)?;
        band.set_color_interpretation(interp)?;
        let plane: Vec<u8> = rgb.index_axis(Axis(2), idx).iter().copied().collect();
        let mut buf = Buffer::new((cols, rows), plane);
        band.write((0, 0), (cols, rows), &mut buf)?;
    }

    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_compressions() {
        assert_eq!(creation_compression("LZW"), Some("LZW"));
        assert_eq!(creation_compression("deflate"), Some("DEFLATE"));
        assert_eq!(creation_compression("YCbCr JPEG"), Some("JPEG"));
        assert_eq!(creation_compression("CCITTFAX4"), None);
    }
}
