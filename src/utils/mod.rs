pub mod app_error;
pub mod nearest_place_resolver;
pub mod validated_query;
