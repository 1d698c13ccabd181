use std::env;

use crate::{
    middlewares::auth::auth_middleware,
    routes::apply_routes,
    services::{
        maps_client::maps_service::{MapsService, MapsServiceConfig, DEFAULT_MAPS_HOST},
        overpass_client::overpass_service::{
            OverpassService, OverpassServiceConfig, DEFAULT_OVERPASS_HOST,
        },
    },
    types::app_state::AppState,
};
use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

pub struct AppConfig {
    pub overpass_host: String,
    pub maps_host: String,
    pub maps_key: Option<String>,
    pub auth_key: Option<String>,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            overpass_host: non_empty_var("OVERPASS_HOST")
                .unwrap_or_else(|| DEFAULT_OVERPASS_HOST.to_string()),
            maps_host: non_empty_var("GOOGLE_MAPS_HOST")
                .unwrap_or_else(|| DEFAULT_MAPS_HOST.to_string()),
            maps_key: non_empty_var("GOOGLE_MAPS_API_KEY"),
            auth_key: non_empty_var("AUTH_KEY"),
        }
    }
}

pub fn gen_app(config: AppConfig) -> Router {
    let cors_middleware = CorsLayer::new();
    let state = AppState {
        overpass_service: OverpassService::new(OverpassServiceConfig {
            host: config.overpass_host,
        }),
        // the Google provider is only available with an API key
        maps_service: config.maps_key.map(|api_key| {
            MapsService::new(MapsServiceConfig {
                api_key,
                host: config.maps_host,
            })
        }),
        auth_key: config.auth_key,
    };

    apply_routes(Router::new())
        .route("/", get(root))
        .layer(cors_middleware)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn root() -> &'static str {
    "OK"
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub overpass_server: mockito::ServerGuard,
    pub google_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    let overpass_server = mockito::Server::new_async().await;
    let google_server = mockito::Server::new_async().await;

    let app = gen_app(AppConfig {
        overpass_host: overpass_server.url(),
        maps_host: google_server.url(),
        maps_key: Some("key".to_string()),
        auth_key: None,
    });

    MockApp {
        app,
        overpass_server,
        google_server,
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn config(auth_key: Option<String>) -> AppConfig {
        AppConfig {
            overpass_host: "http://localhost".to_string(),
            maps_host: "http://localhost".to_string(),
            maps_key: None,
            auth_key,
        }
    }

    #[tokio::test]
    async fn health_check() {
        let app = gen_app(config(None));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_missing_auth_key() {
        let app = gen_app(config(Some("secret".to_string())));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn accepts_matching_auth_key() {
        let app = gen_app(config(Some("secret".to_string())));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("authorization", "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
