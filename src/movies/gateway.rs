use std::time::Duration;

use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use super::types::*;
use crate::config::OmdbConfig;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid OMDb API key, get a valid key from https://www.omdbapi.com/apikey.aspx")]
    InvalidApiKey,
    #[error("Failed to fetch movies from OMDb: {0}")]
    Upstream(String),
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Looks up movies by free-text query in an upstream catalog.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, LookupError>;
}

pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.baseurl.clone(),
            api_key: config.apikey.clone(),
        })
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, LookupError> {
        debug!("OMDb search {:?} page {}", query, page);

        let page_param = page.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("s", query),
                ("page", page_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching from OMDb: {}", e);
                LookupError::Upstream(e.to_string())
            })?;

        // OMDb answers bad keys with a 401 and a regular JSON body, so the
        // body is decoded regardless of status.
        let body: OmdbSearchResponse = response.json().await.map_err(|e| {
            error!("Unreadable OMDb response: {}", e);
            LookupError::Upstream(e.to_string())
        })?;

        interpret_response(body, page)
    }
}

/// Turn a decoded catalog response into a page of results. A negative
/// answer is an empty page unless it signals a bad API key.
pub fn interpret_response(body: OmdbSearchResponse, page: u32) -> Result<SearchPage, LookupError> {
    if body.response != "True" {
        let message = body.error.unwrap_or_default();
        if message.contains("Invalid API key") {
            error!("OMDb API error: {}", message);
            return Err(LookupError::InvalidApiKey);
        }
        debug!("OMDb returned no results: {}", message);
        return Ok(SearchPage::empty(page));
    }

    let total_results = body
        .total_results
        .as_deref()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0);

    Ok(SearchPage {
        movies: body.search,
        total_results,
        page,
        total_pages: total_pages(total_results),
    })
}
