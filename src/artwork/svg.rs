//! Minimal SVG reader: canvas size and the first path's outline

use kurbo::{BezPath, PathEl};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::artwork::Artwork;
use crate::error::{Error, Result};
use crate::projection::PlanarPoint;

/// Maximum deviation, in drawing units, when curves are flattened to lines
const FLATTEN_TOLERANCE: f64 = 0.25;

/// Parses an SVG document into an [`Artwork`]
///
/// The canvas width comes from the root `width` attribute, or from the
/// `viewBox` when no width is given. Only the first `<path>` is used.
pub fn parse_artwork(name: &str, content: &str) -> Result<Artwork> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut width = None;
    let mut height = None;
    let mut view_box = None;
    let mut path_data: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

                if tag == "svg" || (tag == "path" && path_data.is_none()) {
                    for attr in e.attributes().flatten() {
                        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
                        let value = attr.unescape_value()
                            .map_err(|e| Error::artwork(name, e))?
                            .into_owned();

                        match (tag.as_str(), key.as_str()) {
                            ("svg", "width") => width = parse_length(&value),
                            ("svg", "height") => height = parse_length(&value),
                            ("svg", "viewBox") => view_box = parse_view_box(&value),
                            ("path", "d") => path_data = Some(value),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::artwork(name, e)),
            _ => {}
        }
        buf.clear();
    }

    let width = width
        .or(view_box.map(|(w, _)| w))
        .ok_or_else(|| Error::artwork(name, "missing canvas width"))?;
    let height = height.or(view_box.map(|(_, h)| h)).unwrap_or(0.0);
    let data = path_data.ok_or_else(|| Error::artwork(name, "no <path> element"))?;

    let outline = outline_points(&data).map_err(|reason| Error::artwork(name, reason))?;

    Artwork::new(width, height, outline).map_err(|e| Error::artwork(name, e))
}

/// Converts SVG path data into an ordered list of points
///
/// Straight segments contribute their end points; curves are flattened.
/// A `Z` returns to the start of the current subpath.
pub fn outline_points(data: &str) -> std::result::Result<Vec<PlanarPoint>, String> {
    let path = BezPath::from_svg(data).map_err(|e| format!("bad path data: {}", e))?;

    let mut points = Vec::new();
    let mut subpath_start = None;

    path.flatten(FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            subpath_start = Some(p);
            points.push(PlanarPoint::new(p.x, p.y));
        }
        PathEl::LineTo(p) => points.push(PlanarPoint::new(p.x, p.y)),
        PathEl::ClosePath => {
            if let Some(p) = subpath_start {
                points.push(PlanarPoint::new(p.x, p.y));
            }
        }
        _ => {}
    });

    Ok(points)
}

/// Parses a length such as `210`, `210.5mm` or `300px`, ignoring the unit
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Returns (width, height) from a `viewBox="min-x min-y width height"`
fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect::<Option<Vec<f64>>>()?;

    match parts.as_slice() {
        [_, _, w, h] => Some((*w, *h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("210"), Some(210.0));
        assert_eq!(parse_length("210.5mm"), Some(210.5));
        assert_eq!(parse_length(" 300px "), Some(300.0));
        assert_eq!(parse_length("auto"), None);
    }

    #[test]
    fn test_parse_view_box() {
        assert_eq!(parse_view_box("0 0 640 480"), Some((640.0, 480.0)));
        assert_eq!(parse_view_box("0,0,10,20"), Some((10.0, 20.0)));
        assert_eq!(parse_view_box("0 0 10"), None);
    }

    #[test]
    fn test_relative_lines() {
        let points = outline_points("m 10,10 l 5,0 l 0,5").unwrap();
        assert_eq!(
            points,
            vec![
                PlanarPoint::new(10.0, 10.0),
                PlanarPoint::new(15.0, 10.0),
                PlanarPoint::new(15.0, 15.0),
            ]
        );
    }

    #[test]
    fn test_close_path_returns_to_start() {
        let points = outline_points("M0 0 L10 0 L10 10 Z").unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], PlanarPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_curves_are_flattened() {
        let points = outline_points("M0 0 C 0 100 100 100 100 0").unwrap();
        assert!(points.len() > 4);
        let last = points.last().unwrap();
        assert!((last.x - 100.0).abs() < 1e-9 && last.y.abs() < 1e-9);
    }

    #[test]
    fn test_parse_document() {
        let svg = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200mm" height="80mm">
  <g><path id="p1" d="M 20,60 L 40,20 L 60,60" /></g>
  <path d="M 0,0 L 1,1" />
</svg>"#;
        let artwork = parse_artwork("peak.svg", svg).unwrap();

        assert_eq!(artwork.width, 200.0);
        assert_eq!(artwork.height, 80.0);
        assert_eq!(
            artwork.outline,
            vec![
                PlanarPoint::new(0.0, 0.0),
                PlanarPoint::new(20.0, -40.0),
                PlanarPoint::new(40.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_view_box_width() {
        let svg = r#"<svg viewBox="0 0 64 32"><path d="M0 0 H 64"/></svg>"#;
        let artwork = parse_artwork("line.svg", svg).unwrap();
        assert_eq!(artwork.width, 64.0);
        assert_eq!(artwork.height, 32.0);
    }

    #[test]
    fn test_malformed_documents() {
        let no_path = r#"<svg width="10" height="10"></svg>"#;
        let no_width = r#"<svg><path d="M0 0 L1 1"/></svg>"#;
        let bad_data = r#"<svg width="10"><path d="M0 0 Q"/></svg>"#;
        let single_point = r#"<svg width="10"><path d="M5 5"/></svg>"#;

        for doc in [no_path, no_width, bad_data, single_point] {
            assert!(
                matches!(parse_artwork("bad.svg", doc), Err(Error::ArtworkLoad { .. })),
                "accepted {}",
                doc
            );
        }
    }
}
