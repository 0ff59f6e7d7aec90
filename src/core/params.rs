use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BandOrder, Composite, DisplayBackend, OutputFormat};

pub const DEFAULT_BRIGHTNESS: f64 = 1.2;
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Conversion parameters suitable for config files and presets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Destination directory, created if absent
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub display: DisplayBackend,
    /// Linear multiplier applied after rescaling; results are clipped to 0..=255
    pub brightness: f64,
    pub band_order: BandOrder,
    pub composite: Composite,
    /// JPEG quality 1..=100
    pub jpeg_quality: u8,
    /// Write .jgw/.prj next to JPEG output
    pub world_file: bool,
    /// Write a .json provenance sidecar next to JPEG output
    pub sidecar: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            format: OutputFormat::JPEG,
            display: DisplayBackend::None,
            brightness: DEFAULT_BRIGHTNESS,
            band_order: BandOrder::default(),
            composite: Composite::TrueColor,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            world_file: false,
            sidecar: false,
        }
    }
}

impl ConversionParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: ConversionParams = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        validate_brightness(self.brightness)?;
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                value: self.jpeg_quality.to_string(),
            });
        }
        self.band_order.validate()
    }
}

pub fn validate_brightness(factor: f64) -> Result<()> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(Error::InvalidArgument {
            arg: "brightness",
            value: factor.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_match_the_documented_options() {
        let p = ConversionParams::default();
        assert_eq!(p.output_dir, PathBuf::from("output"));
        assert_eq!(p.brightness, 1.2);
        assert_eq!(p.format, OutputFormat::JPEG);
        assert_eq!(p.jpeg_quality, 95);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_presets_fill_in_defaults() {
        let p: ConversionParams =
            serde_json::from_str(r#"{ "format": "TIFF", "brightness": 1.3 }"#).unwrap();
        assert_eq!(p.format, OutputFormat::TIFF);
        assert_eq!(p.brightness, 1.3);
        assert_eq!(p.band_order, BandOrder::default());
        assert_eq!(p.display, DisplayBackend::None);
    }

    #[test]
    fn rejects_negative_or_nan_brightness() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let p = ConversionParams {
                brightness: bad,
                ..Default::default()
            };
            assert_eq!(p.validate().unwrap_err().kind(), ErrorKind::Validation);
        }
        assert!(validate_brightness(0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let p = ConversionParams {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn loads_preset_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        let preset = ConversionParams {
            world_file: true,
            composite: Composite::FalseColor,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&preset).unwrap()).unwrap();

        let loaded = ConversionParams::from_json_file(&path).unwrap();
        assert!(loaded.world_file);
        assert_eq!(loaded.composite, Composite::FalseColor);
    }
}
