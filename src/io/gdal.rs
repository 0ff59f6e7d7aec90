use gdal::{Dataset, Metadata, errors::GdalError as GdalCrateError};
use ndarray::{Array3, ArrayView2, Axis};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::processing::BandStack;

/// Errors encountered when reading or writing rasters through GDAL
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: GdalCrateError,
    },
    #[error("cannot create {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: GdalCrateError,
    },
    #[error("{0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Band {band} holds {got} samples, expected {expected}")]
    SampleCount {
        band: usize,
        expected: usize,
        got: usize,
    },
}

impl GdalError {
    /// Whether the failure is about reaching the file rather than its content.
    pub fn is_io(&self) -> bool {
        matches!(self, GdalError::Open { .. } | GdalError::Create { .. })
    }
}

pub const IDENTITY_GEOTRANSFORM: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Spatial and descriptive metadata of a source raster
#[derive(Debug, Clone)]
pub struct SpatialProfile {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format, empty when the source has none
    pub projection: String,
    /// `EPSG:xxxx` when the WKT carries an EPSG authority
    pub epsg: Option<String>,
    /// GDAL name of the first band's data type, e.g. `UInt16`
    pub data_type: String,
    pub nodata: Option<f64>,
    /// Source compression (IMAGE_STRUCTURE domain), e.g. `LZW`
    pub compression: Option<String>,
    pub band_descriptions: Vec<String>,
    /// Dataset metadata items of the default domain
    pub metadata: HashMap<String, String>,
}

impl SpatialProfile {
    /// True when the source carries a real (non-identity) geotransform.
    pub fn is_georeferenced(&self) -> bool {
        self.geotransform != IDENTITY_GEOTRANSFORM
    }
}

// Helper to extract EPSG code from a WKT1 AUTHORITY or WKT2 ID tag.
// The outermost CRS carries the last tag, so search from the end.
fn parse_epsg(wkt: &str) -> Option<String> {
    const KEYS: [&str; 2] = ["AUTHORITY[\"EPSG\",\"", "ID[\"EPSG\","];
    let (idx, key) = KEYS
        .iter()
        .filter_map(|k| wkt.rfind(k).map(|i| (i, *k)))
        .max_by_key(|(i, _)| *i)?;
    let start = idx + key.len();
    let code: String = wkt[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if code.is_empty() {
        None
    } else {
        Some(format!("EPSG:{}", code))
    }
}

/// Reader for multi-band rasters (GeoTIFF, JP2, VRT, ...) via GDAL
pub struct GdalBandReader;

impl GdalBandReader {
    /// Load every band of `path` into memory together with its spatial profile.
    /// The dataset handle is closed before this returns, on success or failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(BandStack, SpatialProfile), GdalError> {
        let path = path.as_ref();
        let dataset = Dataset::open(path).map_err(|source| GdalError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let profile = read_profile(&dataset)?;
        info!(
            "Opened {:?}: {}x{} with {} bands of {}",
            path, profile.size_x, profile.size_y, profile.bands, profile.data_type
        );
        debug!(
            "Profile: epsg={:?} geotransform={:?} compression={:?} bands={:?}",
            profile.epsg, profile.geotransform, profile.compression, profile.band_descriptions
        );

        let mut stack = Array3::<f32>::zeros((profile.bands, profile.size_y, profile.size_x));
        for (i, mut plane) in stack.axis_iter_mut(Axis(0)).enumerate() {
            let band = dataset.rasterband(i + 1)?;
            let window = (profile.size_x, profile.size_y);
            let buf = band.read_as::<f32>((0, 0), window, window, None)?;
            let view = ArrayView2::from_shape((profile.size_y, profile.size_x), buf.data())
                .map_err(|_| GdalError::SampleCount {
                    band: i + 1,
                    expected: profile.size_x * profile.size_y,
                    got: buf.data().len(),
                })?;
            plane.assign(&view);
        }
        Ok((stack, profile))
    }
}

fn read_profile(dataset: &Dataset) -> Result<SpatialProfile, GdalError> {
    let (size_x, size_y) = dataset.raster_size();
    let bands = dataset.raster_count() as usize;
    if bands == 0 {
        return Err(GdalError::UnsupportedFormat("No raster bands found".into()));
    }
    let geotransform = dataset.geo_transform().unwrap_or(IDENTITY_GEOTRANSFORM);
    let mut projection = dataset.projection();
    if projection.is_empty() {
        // Fallback to GCP projection if available
        if let Some(gcp_proj) = dataset.gcp_projection() {
            if !gcp_proj.is_empty() {
                projection = gcp_proj;
            }
        }
    }
    let epsg = parse_epsg(&projection);

    let mut metadata = HashMap::new();
    if let Some(entries) = dataset.metadata_domain("") {
        for entry in entries {
            if let Some((key, val)) = entry.split_once('=') {
                metadata.insert(key.to_string(), val.to_string());
            }
        }
    }
    let compression = dataset.metadata_item("COMPRESSION", "IMAGE_STRUCTURE");

    let first = dataset.rasterband(1)?;
    let data_type = first.band_type().name();
    let nodata = first.no_data_value();

    let mut band_descriptions = Vec::with_capacity(bands);
    for idx in 1..=bands {
        let band = dataset.rasterband(idx)?;
        band_descriptions.push(band.description().unwrap_or_default());
    }

    Ok(SpatialProfile {
        size_x,
        size_y,
        bands,
        geotransform,
        projection,
        epsg,
        data_type,
        nodata,
        compression,
        band_descriptions,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wkt1_authority() {
        let wkt = r#"PROJCS["WGS 84 / UTM zone 50N",GEOGCS["WGS 84",AUTHORITY["EPSG","4326"]],AUTHORITY["EPSG","32650"]]"#;
        assert_eq!(parse_epsg(wkt).as_deref(), Some("EPSG:32650"));
    }

    #[test]
    fn parses_wkt2_id() {
        let wkt = r#"PROJCRS["WGS 84 / UTM zone 33N",BASEGEOGCRS["WGS 84",ID["EPSG",4326]],ID["EPSG",32633]]"#;
        assert_eq!(parse_epsg(wkt).as_deref(), Some("EPSG:32633"));
    }

    #[test]
    fn no_authority_no_epsg() {
        assert_eq!(parse_epsg(""), None);
        assert_eq!(parse_epsg(r#"LOCAL_CS["arbitrary"]"#), None);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = GdalBandReader::load("/nonexistent/scene.tif").unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("/nonexistent/scene.tif"));
    }
}
