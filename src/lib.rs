// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod unfurl;
pub mod version;

// Re-export the main service surface
pub use api::{create_app, start_server, AppState};
pub use unfurl::{
    DnsResolver, HttpTransport, UnfurlConfig, UnfurlError, UnfurlResult, UnfurlService,
};
