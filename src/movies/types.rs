use serde::{Deserialize, Serialize};

use crate::favorites::MovieRecord;

/// Results per page returned by the catalog search endpoint.
pub const RESULTS_PER_PAGE: u32 = 10;

/// Highest page the catalog will serve.
pub const MAX_PAGE: u32 = 100;

/// Body of an OMDb `?s=` search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchResponse {
    #[serde(default)]
    pub search: Vec<MovieRecord>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// One page of search results as served to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub movies: Vec<MovieRecord>,
    pub total_results: u32,
    pub page: u32,
    pub total_pages: u32,
}

impl SearchPage {
    pub fn empty(page: u32) -> Self {
        Self {
            movies: Vec::new(),
            total_results: 0,
            page,
            total_pages: 0,
        }
    }
}

pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(RESULTS_PER_PAGE)
}
