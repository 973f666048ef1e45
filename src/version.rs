// Version information for the Unfurl Node

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-ssrf-hardening-2025-08-07";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2025-08-07";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "og-metadata",
    "ssrf-denylist",
    "dns-resolved-safety-checks",
    "manual-redirects",
    "streamed-body-cap",
    "ttl-cache",
];
