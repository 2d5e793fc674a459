//! ASCII PCD reader and writer.
//!
//! Only the subset needed for planar templates is supported: `DATA ascii`,
//! any field layout containing `x` and `y`. Other fields (`z`, `intensity`,
//! ...) are read past and ignored; `z` is written as 0.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::info;

use crate::core::types::{Point2D, PointCloud2D};
use crate::error::{Error, Result};
use crate::perception::Template;

/// Load a dock template from an ASCII PCD file.
///
/// Fails with [`Error::EmptyTemplatePath`] for an empty path and
/// [`Error::EmptyTemplate`] when the file holds no usable points.
pub fn load_template(path: &Path) -> Result<Template> {
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyTemplatePath);
    }
    let contents = fs::read_to_string(path)?;
    let cloud = parse_pcd(&contents)?;
    let template = Template::new(cloud)?;
    info!(
        "Dock loaded from PCD file {} ({} points, width {:.3} m)",
        path.display(),
        template.len(),
        template.width()
    );
    Ok(template)
}

/// Save a point cloud as an ASCII PCD file.
pub fn save_template(path: &Path, cloud: &PointCloud2D) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyTemplatePath);
    }
    fs::write(path, write_pcd(cloud))?;
    info!("Dock saved to PCD file {}", path.display());
    Ok(())
}

/// Serialize a cloud to ASCII PCD text.
pub fn write_pcd(cloud: &PointCloud2D) -> String {
    let n = cloud.len();
    let mut out = String::with_capacity(256 + n * 32);
    out.push_str("# .PCD v0.7 - Point Cloud Data file format\n");
    out.push_str("VERSION 0.7\n");
    out.push_str("FIELDS x y z\n");
    out.push_str("SIZE 4 4 4\n");
    out.push_str("TYPE F F F\n");
    out.push_str("COUNT 1 1 1\n");
    let _ = writeln!(out, "WIDTH {}", n);
    out.push_str("HEIGHT 1\n");
    out.push_str("VIEWPOINT 0 0 0 1 0 0 0\n");
    let _ = writeln!(out, "POINTS {}", n);
    out.push_str("DATA ascii\n");
    for p in cloud.iter() {
        let _ = writeln!(out, "{} {} 0", p.x, p.y);
    }
    out
}

/// Parse ASCII PCD text into a planar cloud.
///
/// Points with a non-finite x or y are skipped.
pub fn parse_pcd(contents: &str) -> Result<PointCloud2D> {
    let mut lines = contents.lines().enumerate();

    let mut fields: Vec<String> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut declared_points: Option<usize> = None;
    let mut found_data = false;

    for (idx, raw) in lines.by_ref() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        match key.to_ascii_uppercase().as_str() {
            "FIELDS" => fields = tokens.map(str::to_string).collect(),
            "COUNT" => {
                counts = tokens
                    .map(|t| parse_number::<usize>(t, idx))
                    .collect::<Result<_>>()?;
            }
            "POINTS" => {
                let value = tokens.next().ok_or_else(|| pcd_error(idx, "POINTS without value"))?;
                declared_points = Some(parse_number(value, idx)?);
            }
            "DATA" => {
                let kind = tokens.next().unwrap_or_default();
                if !kind.eq_ignore_ascii_case("ascii") {
                    return Err(pcd_error(idx, format!("unsupported DATA encoding '{}'", kind)));
                }
                found_data = true;
                break;
            }
            // VERSION, SIZE, TYPE, WIDTH, HEIGHT, VIEWPOINT
            _ => {}
        }
    }

    if !found_data {
        return Err(pcd_error(0, "missing DATA line"));
    }
    if counts.is_empty() {
        counts = vec![1; fields.len()];
    }
    if counts.len() != fields.len() {
        return Err(pcd_error(0, "FIELDS and COUNT lengths differ"));
    }

    let column_of = |name: &str| -> Option<usize> {
        let pos = fields.iter().position(|f| f == name)?;
        Some(counts[..pos].iter().sum())
    };
    let (x_col, y_col) = match (column_of("x"), column_of("y")) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(pcd_error(0, "FIELDS must include x and y")),
    };
    let columns: usize = counts.iter().sum();

    let mut cloud = PointCloud2D::with_capacity(declared_points.unwrap_or(0));
    let mut rows = 0usize;
    for (idx, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split_whitespace().collect();
        if values.len() != columns {
            return Err(pcd_error(
                idx,
                format!("expected {} values, found {}", columns, values.len()),
            ));
        }
        rows += 1;
        let x: f32 = parse_number(values[x_col], idx)?;
        let y: f32 = parse_number(values[y_col], idx)?;
        if x.is_finite() && y.is_finite() {
            cloud.push(Point2D::new(x, y));
        }
    }

    if let Some(expected) = declared_points
        && expected != rows
    {
        return Err(pcd_error(
            0,
            format!("POINTS declares {} rows, found {}", expected, rows),
        ));
    }

    Ok(cloud)
}

fn parse_number<T: std::str::FromStr>(token: &str, idx: usize) -> Result<T> {
    token
        .parse()
        .map_err(|_| pcd_error(idx, format!("invalid number '{}'", token)))
}

fn pcd_error(idx: usize, message: impl Into<String>) -> Error {
    Error::Pcd {
        line: idx + 1,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# .PCD v0.7 - Point Cloud Data file format
VERSION 0.7
FIELDS x y z intensity
SIZE 4 4 4 4
TYPE F F F F
COUNT 1 1 1 1
WIDTH 3
HEIGHT 1
VIEWPOINT 0 0 0 1 0 0 0
POINTS 3
DATA ascii
0.0 -0.2 0 10
0.05 0.0 0.1 20
0.0 0.2 0 30
";

    #[test]
    fn test_parse_sample() {
        let cloud = parse_pcd(SAMPLE).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.point_at(1), Point2D::new(0.05, 0.0));
        assert_eq!(cloud.point_at(2), Point2D::new(0.0, 0.2));
    }

    #[test]
    fn test_write_then_parse_keeps_points() {
        let cloud = PointCloud2D::from_points(&[
            Point2D::new(0.125, -0.25),
            Point2D::new(0.5, 0.0),
            Point2D::new(0.125, 0.25),
        ]);
        let text = write_pcd(&cloud);
        assert!(text.contains("POINTS 3"));
        assert_eq!(parse_pcd(&text).unwrap(), cloud);
    }

    #[test]
    fn test_skips_nan_points() {
        let text = "FIELDS x y z\nPOINTS 2\nDATA ascii\nnan nan nan\n1 2 0\n";
        let cloud = parse_pcd(text).unwrap();
        assert_eq!(cloud.len(), 1);
    }

    #[test]
    fn test_binary_data_rejected() {
        let text = "FIELDS x y z\nPOINTS 0\nDATA binary\n";
        assert!(matches!(parse_pcd(text), Err(Error::Pcd { line: 3, .. })));
    }

    #[test]
    fn test_missing_xy_rejected() {
        let text = "FIELDS a b\nDATA ascii\n1 2\n";
        assert!(matches!(parse_pcd(text), Err(Error::Pcd { .. })));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let text = "FIELDS x y\nDATA ascii\n1 2\n1 oops\n";
        match parse_pcd(text) {
            Err(Error::Pcd { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_point_count_mismatch_rejected() {
        let text = "FIELDS x y\nPOINTS 3\nDATA ascii\n1 2\n";
        assert!(parse_pcd(text).is_err());
    }

    #[test]
    fn test_load_empty_path() {
        assert!(matches!(
            load_template(Path::new("")),
            Err(Error::EmptyTemplatePath)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_template(Path::new("/nonexistent/dock.pcd")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_save_and_load_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dock.pcd");
        let cloud: PointCloud2D = (0..10)
            .map(|i| Point2D::new(0.0, i as f32 * 0.05))
            .collect();

        save_template(&path, &cloud).unwrap();
        let template = load_template(&path).unwrap();

        assert_eq!(template.len(), 10);
        assert!((template.width() - 0.45).abs() < 1e-5);
    }

    #[test]
    fn test_load_file_without_points_is_empty_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pcd");
        save_template(&path, &PointCloud2D::new()).unwrap();
        assert!(matches!(load_template(&path), Err(Error::EmptyTemplate)));
    }
}
