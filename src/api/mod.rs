// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod http_server;
pub mod unfurl;

pub use http_server::{create_app, start_server, AppState, HealthResponse};
pub use unfurl::{unfurl_handler, UnfurlApiRequest};
