//! Origin safety checks against SSRF
//!
//! Decides whether a hostname is safe to fetch before any HTTP request is
//! made. The check is re-run for every redirect target; verdicts are never
//! cached because DNS answers can change between hops.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::{Host, Url};

use super::types::UnfurlError;

const DNS_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// DNS resolver seam for the safety checker
///
/// The production resolver uses tokio's lookup; tests inject mocks to
/// exercise the resolves-to-private-address paths without real lookups.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve a hostname to all of its addresses (A and AAAA)
    async fn resolve(&self, host: &str, port: u16) -> std::io::Result<Vec<IpAddr>>;
}

/// Production resolver backed by `tokio::net::lookup_host`
pub struct TokioResolver;

#[async_trait]
impl DnsResolver for TokioResolver {
    async fn resolve(&self, host: &str, port: u16) -> std::io::Result<Vec<IpAddr>> {
        let addrs = tokio::time::timeout(DNS_LOOKUP_TIMEOUT, tokio::net::lookup_host((host, port)))
            .await
            .map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::TimedOut, "DNS lookup timed out")
            })??;
        Ok(addrs.map(|a| a.ip()).collect())
    }
}

/// Origin safety checker
///
/// Applies a hostname-level denylist (no DNS needed), then resolves domain
/// hosts and denies the whole hostname if any resolved address is in a
/// reserved range. Resolution failure denies the host (fail closed).
pub struct OriginSafety {
    resolver: Arc<dyn DnsResolver>,
}

impl OriginSafety {
    /// Create a checker with the given resolver
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Check whether a URL's host is safe to fetch
    ///
    /// Makes no HTTP requests; DNS lookup is its only side effect. Denied
    /// hosts are logged server-side, the returned error carries no detail.
    pub async fn check(&self, url: &Url) -> Result<(), UnfurlError> {
        let host = match url.host() {
            Some(h) => h,
            None => return Err(UnfurlError::UnsafeHost),
        };

        match host {
            Host::Ipv4(v4) => {
                if is_denied_ip(IpAddr::V4(v4)) {
                    warn!("blocked fetch to denied IPv4 literal: {}", v4);
                    return Err(UnfurlError::UnsafeHost);
                }
            }
            Host::Ipv6(v6) => {
                if is_denied_ip(IpAddr::V6(v6)) {
                    warn!("blocked fetch to denied IPv6 literal: {}", v6);
                    return Err(UnfurlError::UnsafeHost);
                }
            }
            Host::Domain(domain) => {
                if is_denied_hostname(domain) {
                    warn!("blocked fetch to denied hostname: {}", domain);
                    return Err(UnfurlError::UnsafeHost);
                }

                let port = url.port_or_known_default().unwrap_or(80);
                let addrs = self.resolver.resolve(domain, port).await.map_err(|e| {
                    warn!("DNS resolution failed for {}: {}", domain, e);
                    UnfurlError::UnsafeHost
                })?;

                if addrs.is_empty() {
                    warn!("DNS returned no addresses for {}", domain);
                    return Err(UnfurlError::UnsafeHost);
                }

                // One denied address denies the hostname; a round-robin mix
                // of public and private answers must not slip through.
                for ip in addrs {
                    if is_denied_ip(ip) {
                        warn!("{} resolves to denied address {}", domain, ip);
                        return Err(UnfurlError::UnsafeHost);
                    }
                }

                debug!("host {} passed safety check", domain);
            }
        }

        Ok(())
    }
}

/// Hostname-level denylist, evaluated without DNS
fn is_denied_hostname(domain: &str) -> bool {
    let lower = domain.to_ascii_lowercase();
    let lower = lower.trim_end_matches('.');
    lower == "localhost"
        || lower.ends_with(".localhost")
        || lower.ends_with(".local")
        || lower.ends_with(".internal")
}

fn is_carrier_grade_nat(v4: Ipv4Addr) -> bool {
    let octets = v4.octets();
    octets[0] == 100 && (64..=127).contains(&octets[1])
}

fn is_v6_unique_local(v6: &Ipv6Addr) -> bool {
    (v6.segments()[0] & 0xfe00) == 0xfc00
}

fn is_v6_link_local(v6: &Ipv6Addr) -> bool {
    (v6.segments()[0] & 0xffc0) == 0xfe80
}

/// IP-level denylist: loopback, private, link-local, unspecified, CGN
fn is_denied_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.octets()[0] == 0
                || is_carrier_grade_nat(v4)
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || is_v6_unique_local(&v6)
                || is_v6_link_local(&v6)
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_denied_ip(IpAddr::V4(v4)))
        }
    }
}
