use crate::types::geo_point::{GeoPoint, Locatable};

/// A search result with its coordinate and provider-specific attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<P> {
    pub point: GeoPoint,
    pub payload: P,
}

impl<P> Candidate<P> {
    pub fn new(point: GeoPoint, payload: P) -> Self {
        Candidate { point, payload }
    }
}

impl<P> Locatable for Candidate<P> {
    fn coordinate(&self) -> GeoPoint {
        self.point
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate<C> {
    pub candidate: C,
    pub distance_km: f64,
}

/// Ranks `candidates` by great-circle distance from `user`, nearest first.
///
/// The sort is stable, so candidates at the same distance keep the order
/// the provider returned them in. Coordinates are expected to be valid;
/// providers drop anything without a usable position before calling this.
pub fn resolve<C: Locatable>(user: GeoPoint, candidates: Vec<C>) -> Vec<RankedCandidate<C>> {
    let mut ranked = candidates
        .into_iter()
        .map(|candidate| RankedCandidate {
            distance_km: user.distance_km(&candidate.coordinate()),
            candidate,
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    ranked
}

/// Human readable distance: whole meters below a kilometer, otherwise
/// kilometers with two decimals.
pub fn format_distance(distance_km: f64) -> String {
    let meters = (distance_km * 1000.0).round();

    if meters < 1000.0 {
        format!("{} m", meters as i64)
    } else {
        format!("{:.2} km", distance_km)
    }
}
