// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unfurl API endpoint handler

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info, warn};

use super::request::UnfurlApiRequest;
use crate::api::http_server::AppState;
use crate::unfurl::UnfurlResult;

/// POST /v1/unfurl - Fetch link-preview metadata for a URL
///
/// # Request
/// - `url`: Absolute http(s) URL to unfurl (required, max 2048 chars)
///
/// # Response
/// - `url`: Canonical form of the fetched URL
/// - `title`, `description`, `imageUrl`, `siteName`: optional metadata;
///   absent fields mean the page did not declare them
///
/// # Errors
/// - 400 Bad Request: empty or oversized url field
/// - 422 Unprocessable Entity: invalid, unsafe, or unfetchable URL; the
///   message says which, with no internal host or transport detail
pub async fn unfurl_handler(
    State(state): State<AppState>,
    Json(request): Json<UnfurlApiRequest>,
) -> Result<Json<UnfurlResult>, (StatusCode, String)> {
    debug!("Unfurl request: {:?}", request.url);

    if let Err(e) = request.validate() {
        warn!("Unfurl validation failed: {}", e);
        return Err((StatusCode::BAD_REQUEST, e));
    }

    let result = state
        .unfurl_service
        .unfurl(&request.url)
        .await
        .map_err(|e| {
            debug!("Unfurl rejected for {}: {}", request.url, e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        })?;

    info!("Unfurl complete for {}", result.url);

    Ok(Json(result))
}
