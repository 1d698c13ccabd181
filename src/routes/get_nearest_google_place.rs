use crate::{
    routes::get_nearest_place::{found_message, NearestPlacePayload},
    services::{
        maps_client::maps_service::{GooglePlace, PlaceDetailsOutput},
        place_search::search_nearest,
    },
    types::{amenity_type::AmenityType, app_state::AppState, geo_point::GeoPoint},
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
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Clone)]
pub struct GooglePlaceResponse {
    pub place_id: String,
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub open_now: Option<bool>,
    pub location: GeoPoint,
    pub distance_km: f64,
    pub distance: String,
    pub maps_url: String,
}

impl From<RankedCandidate<Candidate<GooglePlace>>> for GooglePlaceResponse {
    fn from(ranked: RankedCandidate<Candidate<GooglePlace>>) -> Self {
        let maps_url = ranked.candidate.payload.maps_url();
        let place = ranked.candidate.payload;

        GooglePlaceResponse {
            place_id: place.place_id,
            name: place.name,
            vicinity: place.vicinity,
            types: place.types,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            open_now: place.open_now,
            location: ranked.candidate.point,
            distance_km: ranked.distance_km,
            distance: format_distance(ranked.distance_km),
            maps_url,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsData {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub google_url: Option<String>,
    pub opening_hours: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

impl From<PlaceDetailsOutput> for GooglePlaceDetailsData {
    fn from(d: PlaceDetailsOutput) -> Self {
        GooglePlaceDetailsData {
            address: d.address,
            phone: d.phone,
            website: d.website,
            google_url: d.google_url,
            opening_hours: d.opening_hours,
            rating: d.rating,
            user_ratings_total: d.user_ratings_total,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct GoogleNearestPlaceResponse {
    #[serde(flatten)]
    pub place: GooglePlaceResponse,
    pub details: Option<GooglePlaceDetailsData>,
}

#[derive(Serialize, Deserialize)]
pub struct GetNearestGooglePlaceResponseData {
    pub location: GeoPoint,
    pub radius: u32,
    pub place_type: AmenityType,
    pub searched_at: String,
    pub message: String,
    pub nearest: GoogleNearestPlaceResponse,
    pub places: Vec<GooglePlaceResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct GetNearestGooglePlaceResponse {
    pub data: GetNearestGooglePlaceResponseData,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_nearest_google_place(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<NearestPlacePayload>,
) -> Result<Response, AppError> {
    let Some(maps_service) = state.maps_service else {
        return Err(AppError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Google Places search is not configured",
        ));
    };

    let query = payload.to_place_query()?;

    let places = search_nearest(&maps_service, &query)
        .await?
        .into_iter()
        .map(GooglePlaceResponse::from)
        .collect::<Vec<GooglePlaceResponse>>();

    let Some(nearest) = places.first().cloned() else {
        info!("No Google places within {} m", query.radius_m);
        return Err(AppError::no_results(query.radius_m));
    };

    // details only enrich the nearest entry; the ranked list stands without them
    let details = match maps_service.get_place_details(&nearest.place_id).await {
        Ok(details) => Some(GooglePlaceDetailsData::from(details)),
        Err(e) => {
            warn!("Failed to fetch details for {}: {}", nearest.place_id, e);
            None
        }
    };

    let message = found_message(places.len(), nearest.name.as_deref(), &nearest.distance);
    info!("{}", message);

    Ok((
        StatusCode::OK,
        Json(GetNearestGooglePlaceResponse {
            data: GetNearestGooglePlaceResponseData {
                location: query.location,
                radius: query.radius_m,
                place_type: query.amenity,
                searched_at: Utc::now().to_rfc3339(),
                message,
                nearest: GoogleNearestPlaceResponse {
                    place: nearest,
                    details,
                },
                places,
            },
        }),
    )
        .into_response())
}
