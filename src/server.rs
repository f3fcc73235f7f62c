use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::movies::MovieLookup;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub favorites: Arc<FavoritesStore>,
    pub movies: Arc<dyn MovieLookup>,
}

impl AppState {
    pub fn new(
        config: Config,
        favorites: Arc<FavoritesStore>,
        movies: Arc<dyn MovieLookup>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            favorites,
            movies,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let favorites_routes = Router::new()
        .route(
            "/favorites",
            get(crate::favorites::list_favorites).post(crate::favorites::add_favorite),
        )
        .route(
            "/favorites/:id",
            get(crate::favorites::get_favorite_status).delete(crate::favorites::remove_favorite),
        );

    let movies_routes = Router::new().route("/movies/search", get(crate::movies::search_movies));

    let mut router = Router::new()
        .route("/config.json", get(frontend_config_handler))
        .merge(favorites_routes)
        .merge(movies_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::access_log))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrontendConfig {
    api_base_url: String,
}

/// Settings the static frontend reads at startup.
async fn frontend_config_handler(State(state): State<AppState>) -> Json<FrontendConfig> {
    Json(FrontendConfig {
        api_base_url: state.config.publicurl.clone(),
    })
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
