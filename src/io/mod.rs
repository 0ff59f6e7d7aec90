//! I/O layer: the GDAL-backed band reader and the `writers` for JPEG/GeoTIFF
//! outputs and their world files and sidecars.
pub mod gdal;
pub use gdal::{GdalBandReader, GdalError, SpatialProfile};

pub mod writers;
pub use writers::{FileWriter, RgbWriter, WriterOptions};

use std::path::Path;

use crate::core::processing::BandStack;
use crate::error::Result;

/// Loads band data and the spatial profile of a source raster.
pub trait BandReader {
    fn read(&self, path: &Path) -> Result<(BandStack, SpatialProfile)>;
}

impl BandReader for GdalBandReader {
    fn read(&self, path: &Path) -> Result<(BandStack, SpatialProfile)> {
        Ok(GdalBandReader::load(path)?)
    }
}
