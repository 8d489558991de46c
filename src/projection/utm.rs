use crate::error::{Error, Result};
use crate::projection::coordinate::PlanarPoint;
use crate::projection::epsg;
use proj::Proj;

/// Bidirectional WGS84 <-> UTM transform for one fixed zone and hemisphere
pub struct UtmProjector {
    forward: Proj,
    inverse: Proj,
    zone: u8,
    south: bool,
}

impl UtmProjector {
    /// Creates a projector for the given UTM zone (1..=60) and hemisphere
    pub fn new(zone: u8, south: bool) -> Result<Self> {
        if !(1..=60).contains(&zone) {
            return Err(Error::Input(format!("UTM zone {} outside 1..=60", zone)));
        }

        let geographic = format!("EPSG:{}", epsg::WGS84);
        let planar = format!("EPSG:{}", epsg::utm(zone, south));

        let forward = Proj::new_known_crs(&geographic, &planar, None)
            .map_err(|e| Error::Projection(format!("Failed to create projection: {}", e)))?;
        let inverse = Proj::new_known_crs(&planar, &geographic, None)
            .map_err(|e| Error::Projection(format!("Failed to create inverse projection: {}", e)))?;

        Ok(Self {
            forward,
            inverse,
            zone,
            south,
        })
    }

    /// Creates the projector whose zone contains the given point
    pub fn for_point(lat: f64, lon: f64) -> Result<Self> {
        Self::new(utm_zone(lat, lon)?, lat < 0.0)
    }

    /// Projects latitude/longitude in degrees to planar meters
    pub fn forward(&self, lat: f64, lon: f64) -> Result<PlanarPoint> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(Error::Input(format!("Non-finite coordinate ({}, {})", lat, lon)));
        }

        let (x, y) = self.forward.convert((lon, lat))
            .map_err(|e| Error::Projection(format!("Projection failed: {}", e)))?;

        Ok(PlanarPoint::new(x, y))
    }

    /// Projects planar meters back to (latitude, longitude) in degrees
    pub fn inverse(&self, point: PlanarPoint) -> Result<(f64, f64)> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(Error::Input(format!("Non-finite planar point ({}, {})", point.x, point.y)));
        }

        let (lon, lat) = self.inverse.convert((point.x, point.y))
            .map_err(|e| Error::Projection(format!("Inverse projection failed: {}", e)))?;

        Ok((lat, lon))
    }

    /// Projects many (lat, lon) pairs
    pub fn forward_many(&self, points: &[(f64, f64)]) -> Result<Vec<PlanarPoint>> {
        points.iter()
            .map(|&(lat, lon)| self.forward(lat, lon))
            .collect()
    }

    /// Projects many planar points back to (lat, lon)
    pub fn inverse_many(&self, points: &[PlanarPoint]) -> Result<Vec<(f64, f64)>> {
        points.iter()
            .map(|&p| self.inverse(p))
            .collect()
    }

    /// Returns the UTM zone number
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Returns true for the southern hemisphere variant
    pub fn is_south(&self) -> bool {
        self.south
    }
}

/// Returns the UTM zone number containing a point
///
/// Includes the standard exceptions for south-west Norway (32V) and
/// Svalbard (31X..37X).
pub fn utm_zone(lat: f64, lon: f64) -> Result<u8> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(Error::Input(format!("Non-finite coordinate ({}, {})", lat, lon)));
    }
    if !(-80.0..=84.0).contains(&lat) {
        return Err(Error::Input(format!("Latitude {} outside the UTM band", lat)));
    }

    let lon = if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    };

    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return Ok(32);
    }

    if (72.0..=84.0).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            return Ok(31);
        } else if lon < 21.0 {
            return Ok(33);
        } else if lon < 33.0 {
            return Ok(35);
        } else if lon < 42.0 {
            return Ok(37);
        }
    }

    Ok((((lon + 180.0) / 6.0).floor() as u8 % 60) + 1)
}

/// Wraps latitude into (-90, 90] and longitude into (-180, 180]
///
/// Uses a floored modulo followed by a single shift, so out-of-range values
/// wrap rather than clamp: `(100, 400)` becomes `(-80, 40)`.
pub fn normalize_latlon(lat: f64, lon: f64) -> (f64, f64) {
    let mut lat = lat.rem_euclid(180.0);
    let mut lon = lon.rem_euclid(360.0);
    if lat > 90.0 {
        lat -= 180.0;
    }
    if lon > 180.0 {
        lon -= 360.0;
    }
    (lat, lon)
}
