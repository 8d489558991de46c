//! Vector outlines traced onto tracks
//!
//! An [`Artwork`] is the polyline of an SVG drawing, translated so that its
//! first point is the origin. Artworks are immutable once loaded and are
//! shared between invocations through [`ArtworkLibrary`].

pub mod svg;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::ArtworkCache;
use crate::error::{Error, Result};
use crate::projection::PlanarPoint;

/// A loaded drawing: its canvas size and outline
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    /// Canvas width in drawing units
    pub width: f64,
    /// Canvas height in drawing units
    pub height: f64,
    /// Outline points, first point at the origin
    pub outline: Vec<PlanarPoint>,
}

impl Artwork {
    /// Creates an artwork, translating the outline so it starts at the origin
    ///
    /// Fails unless the width is positive and finite and the outline has at
    /// least two finite points.
    pub fn new(width: f64, height: f64, outline: Vec<PlanarPoint>) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::Input(format!("Artwork width {} must be positive", width)));
        }
        if outline.len() < 2 {
            return Err(Error::Input(format!(
                "Artwork outline needs at least 2 points, got {}",
                outline.len()
            )));
        }
        if outline.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::Input("Artwork outline has non-finite points".to_string()));
        }

        let origin = outline[0];
        let outline = outline.iter().map(|p| p.relative_to(&origin)).collect();

        Ok(Self {
            width,
            height,
            outline,
        })
    }
}

/// Supplies artworks by name
pub trait ArtworkSource: Send + Sync {
    /// Loads the named artwork; failures are [`Error::ArtworkLoad`]
    fn load(&self, name: &str) -> Result<Arc<Artwork>>;
}

/// Directory of SVG files with a shared in-memory cache
pub struct ArtworkLibrary {
    dir: PathBuf,
    cache: ArtworkCache,
}

impl ArtworkLibrary {
    /// Creates a library reading from `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            cache: ArtworkCache::new(),
        }
    }

    /// Returns the directory artworks are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the cache backing this library
    pub fn cache(&self) -> &ArtworkCache {
        &self.cache
    }

    fn read(&self, name: &str) -> Result<Artwork> {
        let file_name = Path::new(name);
        if name.is_empty() || file_name.components().count() != 1 || file_name.file_name().is_none() {
            return Err(Error::artwork(name, "not a plain file name"));
        }

        let path = self.dir.join(file_name);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::artwork(name, format!("{}: {}", path.display(), e)))?;

        svg::parse_artwork(name, &content)
    }
}

impl ArtworkSource for ArtworkLibrary {
    fn load(&self, name: &str) -> Result<Arc<Artwork>> {
        self.cache.get_or_try_insert(name, || self.read(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <path d="M 10,40 L 60,0 L 110,40" />
</svg>"#;

    #[test]
    fn test_artwork_moves_to_origin() {
        let artwork = Artwork::new(
            10.0,
            5.0,
            vec![PlanarPoint::new(3.0, 4.0), PlanarPoint::new(5.0, 4.0)],
        )
        .unwrap();

        assert_eq!(artwork.outline[0], PlanarPoint::new(0.0, 0.0));
        assert_eq!(artwork.outline[1], PlanarPoint::new(2.0, 0.0));
    }

    #[test]
    fn test_artwork_validation() {
        let one = vec![PlanarPoint::new(0.0, 0.0)];
        let two = vec![PlanarPoint::new(0.0, 0.0), PlanarPoint::new(1.0, 0.0)];
        assert!(Artwork::new(10.0, 1.0, one).is_err());
        assert!(Artwork::new(0.0, 1.0, two.clone()).is_err());
        assert!(Artwork::new(f64::NAN, 1.0, two.clone()).is_err());
        assert!(Artwork::new(10.0, 1.0, two).is_ok());
    }

    #[test]
    fn test_library_loads_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("triangle.svg"), TRIANGLE).unwrap();

        let library = ArtworkLibrary::new(dir.path());
        let first = library.load("triangle.svg").unwrap();
        assert_eq!(first.width, 100.0);
        assert_eq!(first.outline.len(), 3);
        assert_eq!(first.outline[1], PlanarPoint::new(50.0, -40.0));

        // Served from cache even once the file is gone
        fs::remove_file(dir.path().join("triangle.svg")).unwrap();
        let second = library.load("triangle.svg").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(library.cache().len(), 1);
    }

    #[test]
    fn test_library_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let library = ArtworkLibrary::new(dir.path());
        assert!(matches!(library.load("nope.svg"), Err(Error::ArtworkLoad { .. })));
    }

    #[test]
    fn test_library_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let library = ArtworkLibrary::new(dir.path());
        assert!(matches!(library.load("../secret.svg"), Err(Error::ArtworkLoad { .. })));
        assert!(matches!(library.load(""), Err(Error::ArtworkLoad { .. })));
    }
}
