use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::processing::RgbImage;
use crate::error::{Error, Result};

/// JPEG stores dimensions as 16-bit values.
fn jpeg_dimensions(cols: usize, rows: usize) -> Result<(u16, u16)> {
    let too_large = || Error::InvalidArgument {
        arg: "dimensions",
        value: format!("{}x{} exceeds the JPEG limit of 65535", cols, rows),
    };
    let w = u16::try_from(cols).map_err(|_| too_large())?;
    let h = u16::try_from(rows).map_err(|_| too_large())?;
    Ok((w, h))
}

pub fn write_rgb_jpeg(output: &Path, rgb: &RgbImage, quality: u8) -> Result<()> {
    let (rows, cols, _) = rgb.dim();
    let (w, h) = jpeg_dimensions(cols, rows)?;
    let data = rgb.as_standard_layout();
    let pixels = data
        .as_slice()
        .ok_or_else(|| Error::processing("RGB buffer is not contiguous"))?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder.encode(pixels, w, h, ColorType::Rgb)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_oversized_images() {
        assert_eq!(jpeg_dimensions(65535, 10).unwrap(), (65535, 10));
        let err = jpeg_dimensions(70000, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let rgb = RgbImage::zeros((4, 4, 3));
        let err = write_rgb_jpeg(Path::new("/nonexistent/dir/out.jpg"), &rgb, 95).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
