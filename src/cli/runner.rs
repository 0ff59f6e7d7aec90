use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use s2rgb::{ConversionParams, DisplayBackend, OutputFormat, convert_and_report};

use super::args::CliArgs;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .ok();
}

/// Preset (or defaults) overridden by whatever flags were given.
pub fn build_params(args: &CliArgs) -> s2rgb::Result<ConversionParams> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading preset {:?}", path);
            ConversionParams::from_json_file(path)?
        }
        None => ConversionParams::default(),
    };

    if let Some(dir) = &args.output_dir {
        params.output_dir = dir.clone();
    }
    if let Some(format) = &args.format {
        params.format = OutputFormat::from_name(format);
    }
    if let Some(brightness) = args.brightness {
        params.brightness = brightness;
    }
    if args.display {
        params.display = DisplayBackend::Window;
    }
    if let Some(order) = args.bands {
        params.band_order = order;
    }
    if let Some(composite) = args.composite {
        params.composite = composite;
    }
    if let Some(quality) = args.quality {
        params.jpeg_quality = quality;
    }
    params.world_file |= args.world_file;
    params.sidecar |= args.sidecar;

    params.validate()?;
    Ok(params)
}

pub fn run(args: CliArgs) -> ExitCode {
    init_logging(args.log);

    let params = match build_params(&args) {
        Ok(params) => params,
        Err(e) => {
            error!("Processing failed ({} error): {}", e.kind(), e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Converting {:?} -> {:?} as {} (brightness x{}, {})",
        args.input, params.output_dir, params.format, params.brightness, params.composite
    );

    match convert_and_report(&args.input, &params) {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    }
}
