use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::gateway::LookupError;
use super::types::{SearchPage, MAX_PAGE};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub page: Option<String>,
}

impl SearchParams {
    /// Requested page, 1 when absent or not a number, clamped to what the
    /// catalog serves.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_PAGE)
    }
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, LookupError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Ok(Json(SearchPage::empty(1)));
    }

    let page = state.movies.search(query, params.page()).await?;
    Ok(Json(page))
}
