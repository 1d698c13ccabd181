pub mod amenity_type;
pub mod app_state;
pub mod geo_point;
pub mod place_query;
