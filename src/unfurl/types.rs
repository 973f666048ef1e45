// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for URL unfurling

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Preview metadata for a single unfurled URL
///
/// All fields except `url` are optional; absence means the page did not
/// declare the tag, not that the unfurl failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfurlResult {
    /// Canonical form of the URL that was fetched
    pub url: String,
    /// Page title (og:title, falling back to the title element)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description (og:description, falling back to meta description)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preview image URL (og:image)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Site name (og:site_name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

/// Metadata fields extracted from a fetched page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    /// Page title if declared
    pub title: Option<String>,
    /// Page description if declared
    pub description: Option<String>,
    /// Preview image URL if declared, resolved to absolute form
    pub image_url: Option<String>,
    /// Site name if declared
    pub site_name: Option<String>,
}

impl PageMetadata {
    /// Combine extracted metadata with the canonical URL into the wire result
    pub fn into_result(self, canonical_url: String) -> UnfurlResult {
        UnfurlResult {
            url: canonical_url,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            site_name: self.site_name,
        }
    }
}

/// Errors that can occur during an unfurl operation
///
/// Every variant is a client-facing, user-correctable condition; transport
/// detail is logged server-side and never carried here.
#[derive(Debug, Error)]
pub enum UnfurlError {
    /// The input could not be parsed as an absolute URL
    #[error("Invalid URL: {reason}")]
    InvalidUrl {
        /// Parse failure description
        reason: String,
    },

    /// URL scheme is not http or https
    #[error("Scheme '{scheme}' is not allowed, only http and https are supported")]
    DisallowedScheme {
        /// The rejected scheme
        scheme: String,
    },

    /// Hostname or one of its resolved addresses falls in a denied range
    #[error("URL host is not allowed")]
    UnsafeHost,

    /// Redirect chain exceeded the hop limit
    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects {
        /// Configured redirect limit
        limit: usize,
    },

    /// Fetched resource is not an HTML page
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType {
        /// The Content-Type header value received
        content_type: String,
    },

    /// Response body exceeded the byte cap
    #[error("Response exceeds the {max_bytes} byte limit")]
    ResponseTooLarge {
        /// Configured byte cap
        max_bytes: usize,
    },

    /// Transport failure, timeout, or unexpected upstream status
    #[error("Upstream request failed")]
    UpstreamError,
}
