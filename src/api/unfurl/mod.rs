// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unfurl API endpoint
//!
//! Provides the `/v1/unfurl` HTTP endpoint for link previews.

pub mod handler;
pub mod request;

pub use handler::unfurl_handler;
pub use request::UnfurlApiRequest;
