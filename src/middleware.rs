use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

/// One log line per API call. Server errors come from the catalog
/// gateway and are logged at warn so they stand out.
pub async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if is_server_error(status) {
        warn!(method = %method, path = %path, status = status.as_u16(), elapsed_ms, "API call failed");
    } else {
        info!(method = %method, path = %path, status = status.as_u16(), elapsed_ms, "API call");
    }

    response
}

fn is_server_error(status: StatusCode) -> bool {
    status.is_server_error()
}
