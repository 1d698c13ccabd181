use crate::services::{
    maps_client::maps_service::MapsService, overpass_client::overpass_service::OverpassService,
};

#[derive(Clone)]
pub struct AppState {
    pub overpass_service: OverpassService,
    pub maps_service: Option<MapsService>,
    pub auth_key: Option<String>,
}
