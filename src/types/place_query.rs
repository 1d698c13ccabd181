use super::{amenity_type::AmenityType, geo_point::GeoPoint};

pub const DEFAULT_RADIUS_M: u32 = 1000;
pub const MIN_RADIUS_M: u32 = 100;
pub const MAX_RADIUS_M: u32 = 5000;

pub struct PlaceQuery {
    pub location: GeoPoint,
    pub radius_m: u32,
    pub amenity: AmenityType,
    pub only_named: bool,
}

impl PlaceQuery {
    pub fn new(
        location: GeoPoint,
        radius_m: Option<i64>,
        amenity: AmenityType,
        only_named: bool,
    ) -> Self {
        PlaceQuery {
            location,
            radius_m: clamp_radius(radius_m),
            amenity,
            only_named,
        }
    }
}

pub fn clamp_radius(radius_m: Option<i64>) -> u32 {
    match radius_m {
        None => DEFAULT_RADIUS_M,
        Some(r) => r.clamp(MIN_RADIUS_M as i64, MAX_RADIUS_M as i64) as u32,
    }
}

/// Reads a radius from free-form input. A value that is present but not a
/// number counts as the minimum radius; fractions are truncated.
pub fn parse_radius(raw: Option<&str>) -> Option<i64> {
    raw.map(|raw| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .map(|r| r.trunc() as i64)
            .unwrap_or(MIN_RADIUS_M as i64)
    })
}
