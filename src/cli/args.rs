use clap::Parser;
use std::path::PathBuf;

use s2rgb::{BandOrder, Composite};

fn parse_band_order(s: &str) -> Result<BandOrder, String> {
    s.parse::<BandOrder>().map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "s2rgb", version, about = "Sentinel-2 band stack to RGB JPEG or GeoTIFF")]
pub struct CliArgs {
    /// Input multi-band raster with at least 4 bands (B2, B3, B4, B8)
    pub input: PathBuf,

    /// Output directory, created if absent [default: output]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format: "jpg" writes a JPEG, any other value (e.g. "tif") a GeoTIFF [default: jpg]
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Linear brightness multiplier, results are clipped to 0..=255 [default: 1.2]
    #[arg(short, long)]
    pub brightness: Option<f64>,

    /// Show the result in a preview window (needs the `gui` feature)
    #[arg(long, default_value_t = false)]
    pub display: bool,

    /// One-based band numbers of blue, green, red and NIR [default: 1,2,3,4]
    #[arg(long, value_parser = parse_band_order)]
    pub bands: Option<BandOrder>,

    /// Band composite [default: true-color]
    #[arg(long, value_enum)]
    pub composite: Option<Composite>,

    /// JPEG quality 1-100 [default: 95]
    #[arg(long)]
    pub quality: Option<u8>,

    /// Write .jgw/.prj georeferencing next to JPEG output
    #[arg(long, default_value_t = false)]
    pub world_file: bool,

    /// Write a .json provenance sidecar next to JPEG output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// JSON preset with conversion parameters; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
