use async_trait::async_trait;
use tracing::info;

use crate::{
    types::{geo_point::Locatable, place_query::PlaceQuery},
    utils::nearest_place_resolver::{resolve, RankedCandidate},
};

/// A backend able to list places around a point.
///
/// Implementations must only return places with a usable coordinate.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    type Place: Locatable + Send;
    type Error: std::fmt::Display + Send;

    fn name(&self) -> &'static str;

    async fn search_places(&self, query: &PlaceQuery) -> Result<Vec<Self::Place>, Self::Error>;
}

/// Searches `provider` and ranks the results by distance from the query
/// location, nearest first.
pub async fn search_nearest<S>(
    provider: &S,
    query: &PlaceQuery,
) -> Result<Vec<RankedCandidate<S::Place>>, S::Error>
where
    S: PlaceSearchProvider + ?Sized,
{
    let candidates = provider.search_places(query).await?;

    info!(
        "{} returned {} places within {} m of {},{}",
        provider.name(),
        candidates.len(),
        query.radius_m,
        query.location.lat,
        query.location.lng
    );

    Ok(resolve(query.location, candidates))
}
