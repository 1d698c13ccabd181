use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GoogleLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLatLng,
}

#[derive(Serialize, Deserialize)]
pub struct GoogleOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct GoogleNearbySearchResult {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<GoogleGeometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub opening_hours: Option<GoogleOpeningHours>,
}

#[derive(Serialize, Deserialize)]
pub struct GoogleNearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GoogleNearbySearchResult>,
}
