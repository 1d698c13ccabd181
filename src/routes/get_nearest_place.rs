use crate::{
    services::{overpass_client::overpass_service::OsmPlace, place_search::search_nearest},
    types::{
        amenity_type::AmenityType, app_state::AppState, geo_point::GeoPoint,
        place_query::{parse_radius, PlaceQuery},
    },
    utils::{
        app_error::AppError,
        nearest_place_resolver::{format_distance, Candidate, RankedCandidate},
        validated_query::ValidatedQuery,
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct NearestPlacePayload {
    pub lat: Option<String>,

    pub lon: Option<String>,

    pub radius: Option<String>,

    pub place_type: Option<String>,

    pub only_named: Option<bool>,
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
}

impl NearestPlacePayload {
    pub fn to_place_query(&self) -> Result<PlaceQuery, AppError> {
        let (Some(lat), Some(lon)) = (
            parse_coordinate(self.lat.as_deref()),
            parse_coordinate(self.lon.as_deref()),
        ) else {
            return Err(AppError::no_location());
        };
        let location = GeoPoint::checked(lat, lon).ok_or_else(AppError::no_location)?;

        Ok(PlaceQuery::new(
            location,
            parse_radius(self.radius.as_deref()),
            AmenityType::from_key(self.place_type.as_deref()),
            self.only_named.unwrap_or(false),
        ))
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct OsmPlaceResponse {
    pub id: i64,
    pub element_type: String,
    pub name: Option<String>,
    pub amenity: Option<String>,
    pub location: GeoPoint,
    pub distance_km: f64,
    pub distance: String,
    pub address: Option<String>,
    pub cuisine: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub osm_url: String,
}

impl From<RankedCandidate<Candidate<OsmPlace>>> for OsmPlaceResponse {
    fn from(ranked: RankedCandidate<Candidate<OsmPlace>>) -> Self {
        let place = &ranked.candidate.payload;

        OsmPlaceResponse {
            address: place.address(),
            cuisine: place.cuisine(),
            opening_hours: place.opening_hours(),
            phone: place.phone(),
            website: place.website(),
            osm_url: place.osm_url(),
            location: ranked.candidate.point,
            distance: format_distance(ranked.distance_km),
            distance_km: ranked.distance_km,
            id: ranked.candidate.payload.id,
            element_type: ranked.candidate.payload.element_type,
            name: ranked.candidate.payload.name,
            amenity: ranked.candidate.payload.amenity,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct GetNearestPlaceResponseData {
    pub location: GeoPoint,
    pub radius: u32,
    pub place_type: AmenityType,
    pub searched_at: String,
    pub message: String,
    pub nearest: OsmPlaceResponse,
    pub places: Vec<OsmPlaceResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct GetNearestPlaceResponse {
    pub data: GetNearestPlaceResponseData,
}

pub fn found_message(count: usize, name: Option<&str>, distance: &str) -> String {
    format!(
        "Found {} places. Nearest: {} ({})",
        count,
        name.unwrap_or("Unnamed place"),
        distance
    )
}

#[cfg_attr(test, debug_handler)]
pub async fn get_nearest_place(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<NearestPlacePayload>,
) -> Result<Response, AppError> {
    let query = payload.to_place_query()?;

    let places = search_nearest(&state.overpass_service, &query)
        .await?
        .into_iter()
        .map(OsmPlaceResponse::from)
        .collect::<Vec<OsmPlaceResponse>>();

    let Some(nearest) = places.first().cloned() else {
        info!("No places within {} m", query.radius_m);
        return Err(AppError::no_results(query.radius_m));
    };

    let message = found_message(places.len(), nearest.name.as_deref(), &nearest.distance);
    info!("{}", message);

    Ok((
        StatusCode::OK,
        Json(GetNearestPlaceResponse {
            data: GetNearestPlaceResponseData {
                location: query.location,
                radius: query.radius_m,
                place_type: query.amenity,
                searched_at: Utc::now().to_rfc3339(),
                message,
                nearest,
                places,
            },
        }),
    )
        .into_response())
}
