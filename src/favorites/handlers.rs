use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use super::model::MovieRecord;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct FavoritesList {
    pub favorites: Vec<MovieRecord>,
}

#[derive(Debug, Serialize)]
pub struct MutationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

pub async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesList> {
    Json(FavoritesList {
        favorites: state.favorites.list().await,
    })
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(movie): Json<MovieRecord>,
) -> Response {
    match state.favorites.add(movie).await {
        Ok(()) => Json(MutationResult {
            success: true,
            error: None,
        })
        .into_response(),
        Err(e) => {
            warn!("Rejected favorite: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(MutationResult {
                    success: false,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<MutationResult> {
    Json(MutationResult {
        success: state.favorites.remove(&id).await,
        error: None,
    })
}

pub async fn get_favorite_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<FavoriteStatus> {
    Json(FavoriteStatus {
        is_favorite: state.favorites.contains(&id).await,
    })
}
