use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Builds a point only when both values are usable coordinates.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let point = GeoPoint { lat, lng };
        point.is_valid().then_some(point)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points on a sphere of radius
/// [`EARTH_RADIUS_KM`].
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

/// Anything that can be placed on the map.
pub trait Locatable {
    fn coordinate(&self) -> GeoPoint;
}

impl Locatable for GeoPoint {
    fn coordinate(&self) -> GeoPoint {
        *self
    }
}
