use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use urlencoding::encode;

use super::types::{
    google_nearby_search_response::{GoogleNearbySearchResponse, GoogleNearbySearchResult},
    google_place_details_response::GooglePlaceDetailsResponse,
    maps_service_error::MapsServiceError,
};
use crate::{
    services::place_search::PlaceSearchProvider,
    types::{geo_point::GeoPoint, place_query::PlaceQuery},
    utils::nearest_place_resolver::Candidate,
};

pub const DEFAULT_MAPS_HOST: &str = "https://maps.googleapis.com";

const DETAILS_FIELDS: &str = "formatted_address,formatted_phone_number,international_phone_number,website,url,opening_hours,rating,user_ratings_total";

#[derive(Clone)]
pub struct MapsServiceConfig {
    pub api_key: String,
    pub host: String,
}

#[derive(Clone)]
pub struct MapsService {
    config: MapsServiceConfig,
    client: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GooglePlace {
    pub place_id: String,
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub open_now: Option<bool>,
}

impl GooglePlace {
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/place/?q=place_id:{}",
            encode(&self.place_id)
        )
    }
}

pub struct PlaceDetailsOutput {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub google_url: Option<String>,
    pub opening_hours: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

impl MapsService {
    pub fn new(config: MapsServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MapsServiceError> {
        let resp =
            self.client.get(url).send().await.map_err(|e| {
                MapsServiceError::Internal(format!("Failed to send request: {}", e))
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MapsServiceError::Status {
                status: status.to_string(),
                message: None,
            });
        }

        resp.json::<T>().await.map_err(|e| {
            MapsServiceError::Internal(format!("Failed to get response body: {}", e))
        })
    }

    pub async fn get_nearby(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<GoogleNearbySearchResult>, MapsServiceError> {
        let filter = match query.amenity.google_type() {
            Some(t) => format!("type={}", encode(t)),
            None => "keyword=food".to_string(),
        };

        let url = format!(
            "{}/maps/api/place/nearbysearch/json?location={},{}&radius={}&{}&key={}",
            self.config.host,
            query.location.lat,
            query.location.lng,
            query.radius_m,
            filter,
            encode(&self.config.api_key)
        );

        let body = self.get_json::<GoogleNearbySearchResponse>(&url).await?;

        match body.status.as_str() {
            "OK" => Ok(body.results),
            "ZERO_RESULTS" => Ok(vec![]),
            _ => Err(MapsServiceError::Status {
                status: body.status,
                message: body.error_message,
            }),
        }
    }

    pub async fn get_place_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetailsOutput, MapsServiceError> {
        let url = format!(
            "{}/maps/api/place/details/json?place_id={}&fields={}&key={}",
            self.config.host,
            encode(place_id),
            DETAILS_FIELDS,
            encode(&self.config.api_key)
        );

        let body = self.get_json::<GooglePlaceDetailsResponse>(&url).await?;

        if body.status != "OK" {
            return Err(MapsServiceError::Status {
                status: body.status,
                message: body.error_message,
            });
        }

        let result = body.result.ok_or_else(|| {
            MapsServiceError::Internal("Place details response has no result".to_string())
        })?;

        Ok(PlaceDetailsOutput {
            address: result.formatted_address,
            phone: result
                .formatted_phone_number
                .or(result.international_phone_number),
            website: result.website,
            google_url: result.url,
            opening_hours: result
                .opening_hours
                .map(|h| h.weekday_text)
                .unwrap_or_default(),
            rating: result.rating,
            user_ratings_total: result.user_ratings_total,
        })
    }
}

pub fn result_to_candidate(result: GoogleNearbySearchResult) -> Option<Candidate<GooglePlace>> {
    let Some(point) = result
        .geometry
        .as_ref()
        .and_then(|g| GeoPoint::checked(g.location.lat, g.location.lng))
    else {
        debug!("Dropping place {} without a usable coordinate", result.place_id);
        return None;
    };

    Some(Candidate::new(
        point,
        GooglePlace {
            place_id: result.place_id,
            name: result.name.filter(|n| !n.trim().is_empty()),
            vicinity: result.vicinity,
            types: result.types,
            rating: result.rating,
            user_ratings_total: result.user_ratings_total,
            open_now: result.opening_hours.and_then(|h| h.open_now),
        },
    ))
}

#[async_trait]
impl PlaceSearchProvider for MapsService {
    type Place = Candidate<GooglePlace>;
    type Error = MapsServiceError;

    fn name(&self) -> &'static str {
        "Google Places"
    }

    async fn search_places(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<Candidate<GooglePlace>>, MapsServiceError> {
        Ok(self
            .get_nearby(query)
            .await?
            .into_iter()
            .filter_map(result_to_candidate)
            .filter(|c| !query.only_named || c.payload.name.is_some())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::maps_client::types::{
            google_nearby_search_response::{GoogleGeometry, GoogleLatLng, GoogleOpeningHours},
            google_place_details_response::GooglePlaceDetailsResult,
        },
        types::amenity_type::AmenityType,
    };

    fn result(place_id: &str, location: Option<(f64, f64)>) -> GoogleNearbySearchResult {
        GoogleNearbySearchResult {
            place_id: place_id.to_string(),
            name: Some(format!("Place {}", place_id)),
            vicinity: Some("Silom".to_string()),
            geometry: location.map(|(lat, lng)| GoogleGeometry {
                location: GoogleLatLng { lat, lng },
            }),
            types: vec!["restaurant".to_string()],
            rating: Some(4.5),
            user_ratings_total: Some(120),
            opening_hours: Some(GoogleOpeningHours {
                open_now: Some(true),
                weekday_text: vec![],
            }),
        }
    }

    fn service(host: String) -> MapsService {
        MapsService::new(MapsServiceConfig {
            api_key: "key".to_string(),
            host,
        })
    }

    fn query(amenity: AmenityType) -> PlaceQuery {
        PlaceQuery::new(GeoPoint::new(13.7563, 100.5018), Some(500), amenity, false)
    }

    #[test]
    fn drops_results_without_location() {
        assert!(result_to_candidate(result("a", None)).is_none());
        assert!(result_to_candidate(result("b", Some((f64::NAN, 1.0)))).is_none());

        let candidate = result_to_candidate(result("c", Some((0.0, 0.0)))).unwrap();
        assert_eq!(candidate.point, GeoPoint::new(0.0, 0.0));
        assert_eq!(candidate.payload.open_now, Some(true));
    }

    #[tokio::test]
    async fn nearby_search_uses_type_filter() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = GoogleNearbySearchResponse {
            status: "OK".to_string(),
            error_message: None,
            results: vec![result("1", Some((13.757, 100.502))), result("2", None)],
        };

        let mock = server
            .mock("GET", "/maps/api/place/nearbysearch/json")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("type".to_string(), "cafe".to_string()),
                mockito::Matcher::UrlEncoded("radius".to_string(), "500".to_string()),
                mockito::Matcher::UrlEncoded("key".to_string(), "key".to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let places = service(server.url())
            .search_places(&query(AmenityType::Cafe))
            .await
            .unwrap_or_else(|e| panic!("search failed: {}", e));

        mock.assert_async().await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].payload.place_id, "1");
    }

    #[tokio::test]
    async fn only_named_drops_nameless_results() {
        let mut server = mockito::Server::new_async().await;

        let mut nameless = result("2", Some((13.757, 100.502)));
        nameless.name = Some(" ".to_string());

        let mock_response = GoogleNearbySearchResponse {
            status: "OK".to_string(),
            error_message: None,
            results: vec![result("1", Some((13.758, 100.502))), nameless],
        };

        let _mock = server
            .mock("GET", "/maps/api/place/nearbysearch/json")
            .match_query(mockito::Matcher::Any)
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let mut named_query = query(AmenityType::All);
        named_query.only_named = true;

        let places = service(server.url())
            .search_places(&named_query)
            .await
            .unwrap_or_else(|e| panic!("search failed: {}", e));

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].payload.place_id, "1");
    }

    #[tokio::test]
    async fn api_key_is_url_encoded() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = GooglePlaceDetailsResponse {
            status: "OK".to_string(),
            error_message: None,
            result: Some(GooglePlaceDetailsResult {
                formatted_address: None,
                formatted_phone_number: None,
                international_phone_number: None,
                website: None,
                url: None,
                opening_hours: None,
                rating: None,
                user_ratings_total: None,
            }),
        };

        let details_mock = server
            .mock("GET", "/maps/api/place/details/json")
            .match_query(mockito::Matcher::UrlEncoded(
                "key".to_string(),
                "k&y=1 2".to_string(),
            ))
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let nearby_mock = server
            .mock("GET", "/maps/api/place/nearbysearch/json")
            .match_query(mockito::Matcher::UrlEncoded(
                "key".to_string(),
                "k&y=1 2".to_string(),
            ))
            .with_body(
                serde_json::to_string(&GoogleNearbySearchResponse {
                    status: "ZERO_RESULTS".to_string(),
                    error_message: None,
                    results: vec![],
                })
                .unwrap(),
            )
            .create_async()
            .await;

        let service = MapsService::new(MapsServiceConfig {
            api_key: "k&y=1 2".to_string(),
            host: server.url(),
        });

        if let Err(e) = service.get_place_details("abc").await {
            panic!("details failed: {}", e);
        }
        if let Err(e) = service.search_places(&query(AmenityType::All)).await {
            panic!("search failed: {}", e);
        }

        details_mock.assert_async().await;
        nearby_mock.assert_async().await;
    }

    #[tokio::test]
    async fn zero_results_is_empty() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = GoogleNearbySearchResponse {
            status: "ZERO_RESULTS".to_string(),
            error_message: None,
            results: vec![],
        };

        let _mock = server
            .mock("GET", "/maps/api/place/nearbysearch/json")
            .match_query(mockito::Matcher::UrlEncoded(
                "keyword".to_string(),
                "food".to_string(),
            ))
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let places = service(server.url())
            .search_places(&query(AmenityType::All))
            .await
            .unwrap_or_else(|e| panic!("search failed: {}", e));

        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn denied_request_is_an_error() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = GoogleNearbySearchResponse {
            status: "REQUEST_DENIED".to_string(),
            error_message: Some("The provided API key is invalid.".to_string()),
            results: vec![],
        };

        let _mock = server
            .mock("GET", "/maps/api/place/nearbysearch/json")
            .match_query(mockito::Matcher::Any)
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let err = match service(server.url())
            .search_places(&query(AmenityType::All))
            .await
        {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };

        assert_eq!(
            err.to_string(),
            "Places API returned REQUEST_DENIED: The provided API key is invalid."
        );
    }

    #[tokio::test]
    async fn fetches_details() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = GooglePlaceDetailsResponse {
            status: "OK".to_string(),
            error_message: None,
            result: Some(GooglePlaceDetailsResult {
                formatted_address: Some("1 Silom Rd, Bangkok".to_string()),
                formatted_phone_number: None,
                international_phone_number: Some("+66 2 000 0000".to_string()),
                website: None,
                url: Some("https://maps.google.com/?cid=1".to_string()),
                opening_hours: Some(GoogleOpeningHours {
                    open_now: None,
                    weekday_text: vec!["Monday: 9:00 AM – 9:00 PM".to_string()],
                }),
                rating: Some(4.2),
                user_ratings_total: Some(10),
            }),
        };

        let mock = server
            .mock("GET", "/maps/api/place/details/json")
            .match_query(mockito::Matcher::UrlEncoded(
                "place_id".to_string(),
                "abc".to_string(),
            ))
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let details = service(server.url())
            .get_place_details("abc")
            .await
            .unwrap_or_else(|e| panic!("details failed: {}", e));

        mock.assert_async().await;
        assert_eq!(details.address.as_deref(), Some("1 Silom Rd, Bangkok"));
        assert_eq!(details.phone.as_deref(), Some("+66 2 000 0000"));
        assert_eq!(details.opening_hours.len(), 1);
    }
}
