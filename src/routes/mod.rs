use axum::{routing::get, Router};

use crate::types::app_state::AppState;

mod get_nearest_google_place;
mod get_nearest_place;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route(
        "/nearest-place",
        get(get_nearest_place::get_nearest_place),
    )
    .route(
        "/google/nearest-place",
        get(get_nearest_google_place::get_nearest_google_place),
    )
}
