pub mod maps_client;
pub mod overpass_client;
pub mod place_search;
