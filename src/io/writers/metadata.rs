use gdal::Dataset;
use gdal::Metadata;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::core::params::ConversionParams;
use crate::error::Result;
use crate::io::gdal::{GdalError, SpatialProfile};
use crate::types::Composite;

pub const CONVERSION_TOOL: &str = env!("CARGO_PKG_NAME");
pub const CONVERSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How an output was produced, recorded alongside the pixels
#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub source_file: String,
    pub brightness_factor: f64,
    pub composite: Composite,
    /// One-based B,G,R,N band numbers
    pub band_order: String,
    pub conversion_tool: String,
    pub conversion_version: String,
    pub conversion_timestamp: String,
    /// Zero-based source bands behind the R, G, B outputs
    #[serde(skip)]
    pub channel_bands: [usize; 3],
}

impl Provenance {
    pub fn new(source: &Path, params: &ConversionParams) -> Self {
        Self {
            source_file: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            brightness_factor: params.brightness,
            composite: params.composite,
            band_order: params.band_order.to_string(),
            conversion_tool: CONVERSION_TOOL.to_string(),
            conversion_version: CONVERSION_VERSION.to_string(),
            conversion_timestamp: chrono::Utc::now().to_rfc3339(),
            channel_bands: params.band_order.channels(params.composite),
        }
    }

    /// GDAL metadata items, upper-case keys as GDAL drivers use them
    pub fn items(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SOURCE_FILE", self.source_file.clone()),
            ("BRIGHTNESS_FACTOR", self.brightness_factor.to_string()),
            ("COMPOSITE", self.composite.to_string()),
            ("BAND_ORDER", self.band_order.clone()),
            ("CONVERSION_TOOL", self.conversion_tool.clone()),
            ("CONVERSION_VERSION", self.conversion_version.clone()),
            ("CONVERSION_TIMESTAMP", self.conversion_timestamp.clone()),
        ]
    }
}

/// Source nodata as a u8 sample value, if it has one.
fn u8_nodata(nodata: Option<f64>) -> Option<f64> {
    let value = nodata?;
    if value.fract() == 0.0 && (0.0..=255.0).contains(&value) {
        Some(value)
    } else {
        warn!("Source nodata {} does not fit in u8, not carried over", value);
        None
    }
}

/// Copy georeferencing, nodata, band descriptions and metadata of the source
/// profile into a GeoTIFF dataset and append the provenance items.
pub fn embed_tiff_metadata(
    ds: &mut Dataset,
    profile: &SpatialProfile,
    provenance: &Provenance,
) -> std::result::Result<(), GdalError> {
    // An identity transform means the source was not georeferenced
    if profile.is_georeferenced() {
        ds.set_geo_transform(&profile.geotransform)?;
        if !profile.projection.is_empty() {
            ds.set_projection(&profile.projection)?;
        }
    }

    let nodata = u8_nodata(profile.nodata);
    for (idx, &source) in provenance.channel_bands.iter().enumerate() {
        let mut band = ds.rasterband(idx + 1)?;
        if nodata.is_some() {
            band.set_no_data_value(nodata)?;
        }
        if let Some(desc) = profile
            .band_descriptions
            .get(source)
            .filter(|d| !d.is_empty())
        {
            band.set_description(desc)?;
        }
    }

    for (key, value) in &profile.metadata {
        ds.set_metadata_item(key, value, "")?;
    }
    for (key, value) in provenance.items() {
        ds.set_metadata_item(key, &value, "")?;
    }
    Ok(())
}

/// Build the JSON sidecar document for a JPEG output
pub fn sidecar_json(
    profile: Option<&SpatialProfile>,
    provenance: &Provenance,
) -> BTreeMap<String, serde_json::Value> {
    let mut json = BTreeMap::new();
    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(provenance) {
        json.extend(map);
    }

    if let Some(profile) = profile {
        json.insert("width".to_string(), profile.size_x.into());
        json.insert("height".to_string(), profile.size_y.into());
        json.insert("source_bands".to_string(), profile.bands.into());
        json.insert(
            "source_data_type".to_string(),
            profile.data_type.clone().into(),
        );
        if profile.is_georeferenced() {
            json.insert(
                "geotransform".to_string(),
                serde_json::Value::Array(
                    profile
                        .geotransform
                        .iter()
                        .filter_map(|&v| serde_json::Number::from_f64(v))
                        .map(serde_json::Value::Number)
                        .collect(),
                ),
            );
        }
        if let Some(crs) = profile.epsg.as_deref() {
            json.insert("crs".to_string(), crs.into());
        } else if !profile.projection.is_empty() {
            json.insert("crs".to_string(), profile.projection.clone().into());
        }
    }
    json
}

/// Create a sidecar metadata file for a JPEG image (`<name>.json`)
pub fn create_jpeg_metadata_sidecar(
    output_path: &Path,
    profile: Option<&SpatialProfile>,
    provenance: &Provenance,
) -> Result<()> {
    let json = sidecar_json(profile, provenance);
    let sidecar_path = output_path.with_extension("json");
    let json_string = serde_json::to_string_pretty(&json)?;
    std::fs::write(&sidecar_path, json_string)?;

    info!("Created JPEG metadata sidecar: {:?}", sidecar_path);
    Ok(())
}
