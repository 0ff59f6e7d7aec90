//! Output writers: JPEG via `jpeg-encoder`, GeoTIFF via GDAL, plus world
//! files and JSON sidecars. [`FileWriter`] dispatches on [`OutputFormat`].
pub mod jpeg;
pub mod metadata;
pub mod tiff;
pub mod worldfile;

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::processing::RgbImage;
use crate::error::Result;
use crate::io::gdal::SpatialProfile;
use crate::types::OutputFormat;
use metadata::{Provenance, create_jpeg_metadata_sidecar, embed_tiff_metadata};
use worldfile::{write_prj_file, write_world_file};

/// Serializes a composed RGB image to disk.
pub trait RgbWriter {
    /// Write `rgb` to `output` and return the path that was written.
    /// `profile` is the source's spatial profile when one is available.
    fn write(
        &self,
        rgb: &RgbImage,
        output: &Path,
        format: OutputFormat,
        profile: Option<&SpatialProfile>,
        provenance: &Provenance,
    ) -> Result<PathBuf>;
}

/// Options of the default file writer
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    pub jpeg_quality: u8,
    pub world_file: bool,
    pub sidecar: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: crate::core::params::DEFAULT_JPEG_QUALITY,
            world_file: false,
            sidecar: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter {
    pub options: WriterOptions,
}

impl FileWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    fn write_jpeg(
        &self,
        rgb: &RgbImage,
        output: &Path,
        profile: Option<&SpatialProfile>,
        provenance: &Provenance,
    ) -> Result<()> {
        jpeg::write_rgb_jpeg(output, rgb, self.options.jpeg_quality)?;

        if self.options.world_file {
            match profile {
                Some(p) if p.is_georeferenced() => {
                    write_world_file(output, p.geotransform)?;
                    if !p.projection.is_empty() {
                        write_prj_file(output, &p.projection)?;
                    }
                }
                _ => warn!("Source is not georeferenced, skipping world file for {:?}", output),
            }
        }
        if self.options.sidecar {
            create_jpeg_metadata_sidecar(output, profile, provenance)?;
        }
        info!("JPEG saved (quality {})", self.options.jpeg_quality);
        Ok(())
    }

    fn write_tiff(
        &self,
        rgb: &RgbImage,
        output: &Path,
        profile: Option<&SpatialProfile>,
        provenance: &Provenance,
    ) -> Result<()> {
        let compression = profile.and_then(|p| p.compression.as_deref());
        let mut ds = tiff::write_tiff_rgb_u8(output, rgb, compression)?;
        if let Some(p) = profile {
            embed_tiff_metadata(&mut ds, p, provenance)?;
        } else {
            for (key, value) in provenance.items() {
                gdal::Metadata::set_metadata_item(&mut ds, key, &value, "")
                    .map_err(crate::io::GdalError::from)?;
            }
        }
        // closing the dataset flushes it to disk
        drop(ds);
        info!("GeoTIFF saved with 3 u8 bands and metadata");
        Ok(())
    }
}

impl RgbWriter for FileWriter {
    fn write(
        &self,
        rgb: &RgbImage,
        output: &Path,
        format: OutputFormat,
        profile: Option<&SpatialProfile>,
        provenance: &Provenance,
    ) -> Result<PathBuf> {
        match format {
            OutputFormat::JPEG => self.write_jpeg(rgb, output, profile, provenance)?,
            OutputFormat::TIFF => self.write_tiff(rgb, output, profile, provenance)?,
        }
        Ok(output.to_path_buf())
    }
}
