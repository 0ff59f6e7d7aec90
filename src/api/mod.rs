//! High-level library API: convert one raster into an RGB file, either with
//! the default GDAL reader/file writer or with custom collaborators. Prefer
//! these entrypoints over the low-level processing modules.
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::core::params::ConversionParams;
use crate::core::processing::{RgbImage, compose_rgb};
use crate::error::Result;
use crate::io::writers::metadata::Provenance;
use crate::io::{BandReader, FileWriter, GdalBandReader, RgbWriter, WriterOptions};
use crate::preview::{Preview, preview_for, preview_title};
use crate::types::OutputFormat;

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Final image, shape (height, width, 3)
    pub image: RgbImage,
    pub output_path: PathBuf,
}

fn input_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// `{output_dir}/{input stem}_RGB.{jpg|tif}`
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{}_RGB.{}", input_stem(input), format.extension()))
}

/// Read, compose, write and optionally preview a single raster.
pub struct Converter<R: BandReader = GdalBandReader, W: RgbWriter = FileWriter> {
    reader: R,
    writer: W,
    preview: Box<dyn Preview>,
}

impl Converter<GdalBandReader, FileWriter> {
    /// GDAL reader, file writer and the preview backend named in `params`
    pub fn from_params(params: &ConversionParams) -> Self {
        let options = WriterOptions {
            jpeg_quality: params.jpeg_quality,
            world_file: params.world_file,
            sidecar: params.sidecar,
        };
        Self {
            reader: GdalBandReader,
            writer: FileWriter::new(options),
            preview: preview_for(params.display),
        }
    }
}

impl<R: BandReader, W: RgbWriter> Converter<R, W> {
    pub fn with_custom(reader: R, writer: W, preview: Box<dyn Preview>) -> Self {
        Self {
            reader,
            writer,
            preview,
        }
    }

    pub fn convert(&self, input: &Path, params: &ConversionParams) -> Result<Conversion> {
        params.validate()?;
        std::fs::create_dir_all(&params.output_dir)?;

        let (stack, profile) = self.reader.read(input)?;
        let rgb = compose_rgb(
            &stack,
            &params.band_order,
            params.composite,
            params.brightness,
        )?;
        drop(stack);

        let output = output_path_for(input, &params.output_dir, params.format);
        let provenance = Provenance::new(input, params);
        let output_path =
            self.writer
                .write(&rgb, &output, params.format, Some(&profile), &provenance)?;

        let title = preview_title(&input_stem(input), params.brightness);
        if let Err(e) = self.preview.show(&rgb, &title) {
            warn!("Preview unavailable: {}", e);
        }

        Ok(Conversion {
            image: rgb,
            output_path,
        })
    }
}

/// Convert `input` with the default GDAL-backed collaborators.
pub fn convert_file(input: &Path, params: &ConversionParams) -> Result<Conversion> {
    Converter::from_params(params).convert(input, params)
}

/// Top-level wrapper: logs the outcome and turns any failure into `None`.
pub fn convert_and_report(input: &Path, params: &ConversionParams) -> Option<Conversion> {
    match convert_file(input, params) {
        Ok(conversion) => {
            info!(
                "Processing succeeded, image saved to: {}",
                conversion.output_path.display()
            );
            Some(conversion)
        }
        Err(e) => {
            error!("Processing failed ({} error): {}", e.kind(), e);
            None
        }
    }
}
