// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unfurl service orchestration
//!
//! Coordinates normalization, caching, safety checks, fetching, and
//! extraction behind a single entry point.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::cache::{CacheStats, PreviewCache};
use super::config::UnfurlConfig;
use super::extractor::extract_metadata;
use super::fetcher::{HttpTransport, PageFetcher, ReqwestTransport};
use super::normalize::normalize_url;
use super::safety::{DnsResolver, OriginSafety, TokioResolver};
use super::types::{UnfurlError, UnfurlResult};

/// Main unfurl service
///
/// The cache is the only shared mutable state; two concurrent cold-cache
/// requests for the same URL may both fetch upstream, which is accepted.
pub struct UnfurlService {
    safety: Arc<OriginSafety>,
    fetcher: PageFetcher,
    cache: PreviewCache,
}

impl UnfurlService {
    /// Create a service with injected resolver and transport
    pub fn new(
        config: UnfurlConfig,
        resolver: Arc<dyn DnsResolver>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let safety = Arc::new(OriginSafety::new(resolver));
        let fetcher = PageFetcher::new(transport, safety.clone(), &config);
        let cache = PreviewCache::new(config.cache_ttl_secs, config.max_cache_entries);

        Self {
            safety,
            fetcher,
            cache,
        }
    }

    /// Create a service with the production resolver and transport
    pub fn with_defaults(config: UnfurlConfig) -> Self {
        let transport = Arc::new(ReqwestTransport::new(&config));
        Self::new(config, Arc::new(TokioResolver), transport)
    }

    /// Unfurl a user-supplied URL into preview metadata
    ///
    /// Control flow: normalize, cache lookup, safety check, bounded fetch
    /// (which re-checks every redirect hop), extract, cache store. The
    /// result's `url` is the canonical form of the requested URL, which is
    /// also the cache key.
    pub async fn unfurl(&self, raw_url: &str) -> Result<UnfurlResult, UnfurlError> {
        let parsed = normalize_url(raw_url)?;
        let canonical = parsed.to_string();

        if let Some(hit) = self.cache.get(&canonical) {
            debug!("cache hit for {}", canonical);
            return Ok(hit);
        }

        self.safety.check(&parsed).await?;

        let start = Instant::now();
        let page = self.fetcher.fetch(&parsed).await?;
        let result = extract_metadata(&page.html, &page.url).into_result(canonical.clone());

        self.cache.insert(&canonical, result.clone());

        info!(
            "unfurled {} in {}ms (title: {})",
            canonical,
            start.elapsed().as_millis(),
            result.title.is_some()
        );

        Ok(result)
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear the response cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
