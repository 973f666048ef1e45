// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Safe URL metadata fetching (unfurling)
//!
//! Given an arbitrary, user-supplied URL, fetches the target page and
//! extracts link-preview metadata without letting the backend be used as a
//! proxy into internal networks.
//!
//! ## Architecture
//!
//! ```text
//! URL → normalize → PreviewCache → OriginSafety → PageFetcher → extract
//!                        ↑              ↑  (re-run per redirect hop)
//!                        └── store ─────┴─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = UnfurlConfig::from_env();
//! let service = UnfurlService::with_defaults(config);
//!
//! let preview = service.unfurl("https://example.com/article").await?;
//! ```

pub mod cache;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod normalize;
pub mod safety;
pub mod service;
pub mod types;

pub use cache::{CacheStats, PreviewCache};
pub use config::UnfurlConfig;
pub use extractor::extract_metadata;
pub use fetcher::{FetchedPage, HttpTransport, PageFetcher, ReqwestTransport, TransportResponse};
pub use normalize::normalize_url;
pub use safety::{DnsResolver, OriginSafety, TokioResolver};
pub use service::UnfurlService;
pub use types::{PageMetadata, UnfurlError, UnfurlResult};
