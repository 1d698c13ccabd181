use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;
use urlencoding::encode;

use super::types::{
    overpass_response::{OverpassResponse, OverpassResponseElement},
    overpass_service_error::OverpassServiceError,
};
use crate::{
    services::place_search::PlaceSearchProvider,
    types::{geo_point::GeoPoint, place_query::PlaceQuery},
    utils::nearest_place_resolver::Candidate,
};

pub const DEFAULT_OVERPASS_HOST: &str = "https://overpass-api.de";

#[derive(Clone)]
pub struct OverpassServiceConfig {
    pub host: String,
}

#[derive(Clone)]
pub struct OverpassService {
    config: OverpassServiceConfig,
    client: reqwest::Client,
}

/// An OpenStreetMap node, way or relation tagged as a food amenity.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmPlace {
    pub id: i64,
    pub element_type: String,
    pub name: Option<String>,
    pub amenity: Option<String>,
    pub tags: HashMap<String, String>,
}

impl OsmPlace {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn first_tag(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.tag(key))
            .map(str::to_string)
    }

    pub fn address(&self) -> Option<String> {
        let parts = ["addr:street", "addr:housenumber", "addr:city", "addr:suburb"]
            .iter()
            .filter_map(|key| self.tag(key))
            .collect::<Vec<&str>>();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    pub fn cuisine(&self) -> Option<String> {
        self.first_tag(&["cuisine"])
    }

    pub fn opening_hours(&self) -> Option<String> {
        self.first_tag(&["opening_hours"])
    }

    pub fn website(&self) -> Option<String> {
        self.first_tag(&["website", "contact:website"])
    }

    pub fn phone(&self) -> Option<String> {
        self.first_tag(&["phone", "contact:phone", "contact:mobile"])
    }

    pub fn osm_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/{}/{}",
            self.element_type, self.id
        )
    }
}

impl OverpassService {
    pub fn new(config: OverpassServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn build_query(query: &PlaceQuery) -> String {
        let amenities = query.amenity.osm_values().join("|");
        let around = format!(
            "(around:{},{},{})",
            query.radius_m, query.location.lat, query.location.lng
        );

        format!(
            "[out:json][timeout:25];(node[\"amenity\"~\"^({a})$\"]{r};way[\"amenity\"~\"^({a})$\"]{r};relation[\"amenity\"~\"^({a})$\"]{r};);out center;",
            a = amenities,
            r = around
        )
    }

    pub async fn fetch_elements(
        &self,
        query: &PlaceQuery,
    ) -> Result<OverpassResponse, OverpassServiceError> {
        let url = format!("{}/api/interpreter", self.config.host);
        let body = format!("data={}", encode(&Self::build_query(query)));

        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| OverpassServiceError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OverpassServiceError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| OverpassServiceError::Request(e.to_string()))?;

        serde_json::from_str::<OverpassResponse>(&text)
            .map_err(|e| OverpassServiceError::InvalidResponse(e.to_string()))
    }
}

/// Nodes carry their own position; ways and relations only have the
/// `center` produced by `out center`.
fn element_point(element: &OverpassResponseElement) -> Option<GeoPoint> {
    let own = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => GeoPoint::checked(lat, lon),
        _ => None,
    };

    own.or_else(|| {
        element
            .center
            .as_ref()
            .and_then(|c| GeoPoint::checked(c.lat, c.lon))
    })
}

pub fn element_to_candidate(
    element: OverpassResponseElement,
    only_named: bool,
) -> Option<Candidate<OsmPlace>> {
    let Some(point) = element_point(&element) else {
        debug!(
            "Dropping {} {} without a usable coordinate",
            element.r#type, element.id
        );
        return None;
    };

    let name = ["name", "name:en"]
        .iter()
        .filter_map(|key| element.tags.get(*key))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string);

    if only_named && name.is_none() {
        return None;
    }

    let amenity = element
        .tags
        .get("amenity")
        .filter(|v| !v.is_empty())
        .cloned();

    Some(Candidate::new(
        point,
        OsmPlace {
            id: element.id,
            element_type: element.r#type,
            name,
            amenity,
            tags: element.tags,
        },
    ))
}

#[async_trait]
impl PlaceSearchProvider for OverpassService {
    type Place = Candidate<OsmPlace>;
    type Error = OverpassServiceError;

    fn name(&self) -> &'static str {
        "Overpass"
    }

    async fn search_places(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<Candidate<OsmPlace>>, OverpassServiceError> {
        let response = self.fetch_elements(query).await?;

        Ok(response
            .elements
            .into_iter()
            .filter_map(|e| element_to_candidate(e, query.only_named))
            .collect())
    }
}
