//! On-screen preview of a composed image. The backend is chosen explicitly
//! through [`DisplayBackend`]; headless runs use [`NoopPreview`].
#[cfg(feature = "gui")]
pub mod window;

use tracing::debug;

use crate::core::processing::RgbImage;
use crate::error::Result;
use crate::types::DisplayBackend;

pub trait Preview {
    /// Render `rgb` with `title`. May block until the user closes the view.
    fn show(&self, rgb: &RgbImage, title: &str) -> Result<()>;
}

/// Backend for headless environments
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreview;

impl Preview for NoopPreview {
    fn show(&self, rgb: &RgbImage, title: &str) -> Result<()> {
        let (rows, cols, _) = rgb.dim();
        debug!("Preview disabled, not showing {:?} ({}x{})", title, cols, rows);
        Ok(())
    }
}

/// Title shown above a preview
pub fn preview_title(stem: &str, brightness: f64) -> String {
    format!(
        "Processed Sentinel-2 Image\n{} (Brightness × {})",
        stem, brightness
    )
}

pub fn preview_for(backend: DisplayBackend) -> Box<dyn Preview> {
    match backend {
        DisplayBackend::None => Box::new(NoopPreview),
        #[cfg(feature = "gui")]
        DisplayBackend::Window => Box::new(window::WindowPreview),
        #[cfg(not(feature = "gui"))]
        DisplayBackend::Window => {
            tracing::warn!("Built without the `gui` feature, preview window unavailable");
            Box::new(NoopPreview)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_names_scene_and_factor() {
        assert_eq!(
            preview_title("2019_1101_roi", 1.3),
            "Processed Sentinel-2 Image\n2019_1101_roi (Brightness × 1.3)"
        );
    }

    #[test]
    fn noop_backend_always_succeeds() {
        let rgb = RgbImage::zeros((2, 2, 3));
        assert!(preview_for(DisplayBackend::None).show(&rgb, "t").is_ok());
    }
}
