use serde::{Deserialize, Serialize};

use super::google_nearby_search_response::GoogleOpeningHours;

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<GoogleOpeningHours>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<GooglePlaceDetailsResult>,
}
