#![doc = r#"
s2rgb: Sentinel-2 band stacks to viewable RGB images.

This crate turns a multi-band Sentinel-2 raster (B2, B3, B4, B8 as digital
numbers scaled by 10000) into an 8-bit RGB image with an adjustable brightness
multiplier, and writes it either as a JPEG or as a 3-band GeoTIFF that keeps
the source georeferencing. It powers the `s2rgb` CLI and can be embedded in
your own Rust applications.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: convert a file
---------------------------
```rust,no_run
use std::path::Path;
use s2rgb::{convert_file, ConversionParams, OutputFormat};

fn main() -> s2rgb::Result<()> {
    let params = ConversionParams {
        format: OutputFormat::TIFF,
        brightness: 1.3,
        ..Default::default()
    };
    let result = convert_file(Path::new("/data/2019_1101_roi.tif"), &params)?;
    println!("wrote {}", result.output_path.display());
    Ok(())
}
```

Compose in memory
-----------------
```rust
use ndarray::Array3;
use s2rgb::{compose_rgb, BandOrder, Composite};

let stack = Array3::<f32>::from_elem((4, 100, 100), 10000.0);
let rgb = compose_rgb(&stack, &BandOrder::default(), Composite::TrueColor, 1.3).unwrap();
assert_eq!(rgb.dim(), (100, 100, 3));
assert!(rgb.iter().all(|&v| v == 255));
```

Error handling
--------------
All public functions return `s2rgb::Result<T>`. Match on `s2rgb::Error`, or
branch on `Error::kind()` for the coarse class (validation, I/O, processing).

```rust,no_run
use std::path::Path;
use s2rgb::{convert_file, ConversionParams, ErrorKind};

match convert_file(Path::new("/bad/path.tif"), &ConversionParams::default()) {
    Ok(c) => println!("saved {}", c.output_path.display()),
    Err(e) if e.kind() == ErrorKind::Validation => eprintln!("bad input: {e}"),
    Err(e) => eprintln!("failed: {e}"),
}
```

Feature flags
-------------
- `gui`: native preview window (`DisplayBackend::Window`) via eframe.
- `full`: every optional feature.

Useful modules
--------------
- [`api`]: high-level entry points and the `Converter`.
- [`core`]: rescaling, brightness and compositing primitives.
- [`io`]: GDAL reader and JPEG/GeoTIFF writers.
- [`types`]: `OutputFormat`, `Composite`, `BandOrder`, `DisplayBackend`.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod preview;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::ConversionParams;
pub use crate::core::processing::{BandStack, RgbImage, compose_rgb, composite_bands};
pub use crate::error::{Error, ErrorKind, Result};
pub use types::{BandOrder, Composite, DisplayBackend, OutputFormat};

// Collaborators
pub use io::{BandReader, FileWriter, GdalBandReader, GdalError, RgbWriter, SpatialProfile};
pub use preview::{NoopPreview, Preview};

// High-level API re-exports
pub use api::{Conversion, Converter, convert_and_report, convert_file, output_path_for};
