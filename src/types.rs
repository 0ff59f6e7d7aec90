//! Shared types and enums used across s2rgb.
//! Includes `OutputFormat`, `Composite`, `DisplayBackend` and `BandOrder`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    TIFF, // Georeferenced, 3 x u8 bands
    JPEG, // Lossy, preview only
}

impl OutputFormat {
    /// Resolve a user supplied format name. Only `jpg` selects JPEG;
    /// every other name falls through to GeoTIFF.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("jpg") {
            OutputFormat::JPEG
        } else {
            OutputFormat::TIFF
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::TIFF => "tif",
            OutputFormat::JPEG => "jpg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::TIFF => write!(f, "TIFF"),
            OutputFormat::JPEG => write!(f, "JPEG"),
        }
    }
}

/// Which bands feed the red, green and blue output channels.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Composite {
    /// R,G,B = red, green, blue
    TrueColor,
    /// R,G,B = near-infrared, red, green
    FalseColor,
}

impl std::fmt::Display for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Composite::TrueColor => write!(f, "TrueColor"),
            Composite::FalseColor => write!(f, "FalseColor"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum DisplayBackend {
    /// Headless: never opens a window
    None,
    /// Native preview window (requires the `gui` feature)
    Window,
}

/// Zero-based positions of the spectral bands inside the input stack.
///
/// The default matches the usual Sentinel-2 10 m export, B2, B3, B4, B8.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BandOrder {
    pub blue: usize,
    pub green: usize,
    pub red: usize,
    pub nir: usize,
}

/// Minimum band count of any input, regardless of the band order.
pub const MIN_BANDS: usize = 4;

/// Upper bound on band counts (TIFF stores samples per pixel as u16).
pub const MAX_BANDS: usize = 65_535;

impl Default for BandOrder {
    fn default() -> Self {
        Self {
            blue: 0,
            green: 1,
            red: 2,
            nir: 3,
        }
    }
}

impl BandOrder {
    fn indices(&self) -> [usize; 4] {
        [self.blue, self.green, self.red, self.nir]
    }

    /// Number of bands an input must have for this order to be usable.
    pub fn required_bands(&self) -> usize {
        self.indices()
            .iter()
            .map(|i| i.saturating_add(1))
            .max()
            .unwrap_or(0)
            .max(MIN_BANDS)
    }

    pub fn validate(&self) -> Result<()> {
        let idx = self.indices();
        for (i, a) in idx.iter().enumerate() {
            if *a >= MAX_BANDS || idx[i + 1..].contains(a) {
                return Err(Error::InvalidArgument {
                    arg: "band_order",
                    value: self.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Band indices for the (red, green, blue) output channels.
    pub fn channels(&self, composite: Composite) -> [usize; 3] {
        match composite {
            Composite::TrueColor => [self.red, self.green, self.blue],
            Composite::FalseColor => [self.nir, self.red, self.green],
        }
    }
}

impl std::fmt::Display for BandOrder {
    /// One-based, in B,G,R,N order, the same form `FromStr` accepts.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.blue.saturating_add(1),
            self.green.saturating_add(1),
            self.red.saturating_add(1),
            self.nir.saturating_add(1)
        )
    }
}

impl std::str::FromStr for BandOrder {
    type Err = Error;

    /// Parse `"B,G,R,N"` with one-based band numbers, as GDAL counts them.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument {
            arg: "bands",
            value: s.to_string(),
        };
        let nums = s
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        let [b, g, r, n] = nums[..] else {
            return Err(invalid());
        };
        if nums.contains(&0) {
            return Err(invalid());
        }
        let order = BandOrder {
            blue: b - 1,
            green: g - 1,
            red: r - 1,
            nir: n - 1,
        };
        order.validate()?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_jpg_selects_jpeg() {
        assert_eq!(OutputFormat::from_name("jpg"), OutputFormat::JPEG);
        assert_eq!(OutputFormat::from_name("JPG"), OutputFormat::JPEG);
        assert_eq!(OutputFormat::from_name("tif"), OutputFormat::TIFF);
        assert_eq!(OutputFormat::from_name("png"), OutputFormat::TIFF);
        assert_eq!(OutputFormat::from_name("jpeg"), OutputFormat::TIFF);
    }

    #[test]
    fn default_order_needs_four_bands() {
        let order = BandOrder::default();
        assert_eq!(order.required_bands(), 4);
        assert_eq!(order.channels(Composite::TrueColor), [2, 1, 0]);
        assert_eq!(order.channels(Composite::FalseColor), [3, 2, 1]);
    }

    #[test]
    fn wide_orders_raise_the_band_requirement() {
        let order: BandOrder = "2,3,4,8".parse().unwrap();
        assert_eq!(order.blue, 1);
        assert_eq!(order.nir, 7);
        assert_eq!(order.required_bands(), 8);
        assert_eq!(order.to_string(), "2,3,4,8");
    }

    #[test]
    fn rejects_malformed_band_lists() {
        assert!("1,2,3".parse::<BandOrder>().is_err());
        assert!("0,1,2,3".parse::<BandOrder>().is_err());
        assert!("1,1,2,3".parse::<BandOrder>().is_err());
        assert!("a,b,c,d".parse::<BandOrder>().is_err());
        assert!("1,2,3,65536".parse::<BandOrder>().is_err());
    }

    #[test]
    fn out_of_range_index_is_a_validation_error() {
        let order: BandOrder =
            serde_json::from_str(r#"{"blue":0,"green":1,"red":18446744073709551615,"nir":3}"#)
                .unwrap();
        assert_eq!(order.required_bands(), usize::MAX);
        let err = order.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "band_order", .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }
}
