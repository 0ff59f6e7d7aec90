use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

fn world_file_path(output_image: &Path) -> PathBuf {
    let ext = output_image
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let world_ext = match ext.as_str() {
        "jpg" | "jpeg" => "jgw".to_string(),
        "png" => "pgw".to_string(),
        "tif" | "tiff" => "tfw".to_string(),
        // first letter + last letter + "w"
        other if other.len() >= 2 => {
            let mut s = String::new();
            s.extend(other.chars().next());
            s.extend(other.chars().last());
            s.push('w');
            s
        }
        _ => "wld".to_string(),
    };
    output_image.with_extension(world_ext)
}

/// World file parameters A, D, B, E, C, F for a GDAL geotransform.
/// C and F address the center of the upper-left pixel.
pub fn world_file_params(geotransform: [f64; 6]) -> [f64; 6] {
    let a = geotransform[1];
    let d = geotransform[4];
    let b = geotransform[2];
    let e = geotransform[5];
    let c = geotransform[0] + 0.5 * a + 0.5 * b;
    let f = geotransform[3] + 0.5 * d + 0.5 * e;
    [a, d, b, e, c, f]
}

/// Write a world file next to the raster image using the provided geotransform.
pub fn write_world_file(output_image: &Path, geotransform: [f64; 6]) -> Result<PathBuf> {
    let world_path = world_file_path(output_image);
    let mut file = BufWriter::new(File::create(&world_path)?);
    for v in world_file_params(geotransform) {
        writeln!(file, "{:.12}", v)?;
    }
    file.flush()?;
    Ok(world_path)
}

/// Write a .prj file with the provided projection (WKT)
pub fn write_prj_file(output_image: &Path, projection: &str) -> Result<PathBuf> {
    let prj_path = output_image.with_extension("prj");
    std::fs::write(&prj_path, projection.as_bytes())?;
    Ok(prj_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shifts_origin_to_pixel_center() {
        let p = world_file_params([500000.0, 10.0, 0.0, 4100000.0, 0.0, -10.0]);
        assert_relative_eq!(p[0], 10.0);
        assert_relative_eq!(p[3], -10.0);
        assert_relative_eq!(p[4], 500005.0);
        assert_relative_eq!(p[5], 4099995.0);
    }

    #[test]
    fn picks_extension_by_image_type() {
        assert_eq!(world_file_path(Path::new("a/x_RGB.jpg")), PathBuf::from("a/x_RGB.jgw"));
        assert_eq!(world_file_path(Path::new("x.tif")), PathBuf::from("x.tfw"));
        assert_eq!(world_file_path(Path::new("x.bmp")), PathBuf::from("x.bpw"));
        assert_eq!(world_file_path(Path::new("x")), PathBuf::from("x.wld"));
    }

    #[test]
    fn writes_six_lines() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("scene_RGB.jpg");
        let path = write_world_file(&img, [100.0, 2.0, 0.0, 200.0, 0.0, -2.0]).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let values: Vec<f64> = text.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(values, vec![2.0, 0.0, 0.0, -2.0, 101.0, 199.0]);
    }
}
