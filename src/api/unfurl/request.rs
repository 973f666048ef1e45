// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unfurl API request types

use serde::{Deserialize, Serialize};

const MAX_URL_LENGTH: usize = 2048;

/// Request body for POST /v1/unfurl
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfurlApiRequest {
    /// URL to unfurl (required, max 2048 chars)
    pub url: String,
}

impl UnfurlApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("Url cannot be empty".to_string());
        }
        if self.url.len() > MAX_URL_LENGTH {
            return Err(format!("Url too long (max {} characters)", MAX_URL_LENGTH));
        }
        Ok(())
    }
}
