//! Geographic projection and geodesic measurement
//!
//! Planar math on a track happens in UTM meters; distances along a track
//! are measured on the WGS84 ellipsoid.

pub mod coordinate;
pub mod geodesic;
pub mod utm;

pub use coordinate::PlanarPoint;
pub use geodesic::{cumulative_lengths, distance};
pub use utm::{normalize_latlon, utm_zone, UtmProjector};

/// EPSG codes used by the projector
pub mod epsg {
    /// WGS84 geographic coordinates
    pub const WGS84: u16 = 4326;

    /// WGS84 / UTM for a zone and hemisphere (326zz north, 327zz south)
    pub fn utm(zone: u8, south: bool) -> u16 {
        let base = if south { 32700 } else { 32600 };
        base + zone as u16
    }
}

#[cfg(test)]
mod tests {
    use super::epsg;

    #[test]
    fn test_utm_epsg_codes() {
        assert_eq!(epsg::utm(30, false), 32630);
        assert_eq!(epsg::utm(56, true), 32756);
        assert_eq!(epsg::utm(1, false), 32601);
    }
}
