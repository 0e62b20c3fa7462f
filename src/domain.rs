// domain.rs - Target domain validation
// Purpose: Hostname grammar check plus DNS existence check before any probing

use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::*;

use crate::error::ScanError;

lazy_static::lazy_static! {
    // Labels of 1-63 alnum/hyphen chars, no leading/trailing hyphen, alphabetic TLD
    static ref RE_HOSTNAME: Regex = Regex::new(
        r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$"
    ).unwrap();
}

const MAX_HOSTNAME_LEN: usize = 253;
const DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// A domain that passed the hostname grammar. DNS existence is checked
/// separately through a [`DomainResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    pub fn parse(input: &str) -> Result<Self, ScanError> {
        let candidate = input.trim();

        if candidate.is_empty() {
            return Err(invalid(input, "empty domain"));
        }
        if candidate.len() > MAX_HOSTNAME_LEN {
            return Err(invalid(input, "longer than 253 characters"));
        }
        if !RE_HOSTNAME.is_match(candidate) {
            return Err(invalid(input, "does not match hostname syntax"));
        }

        Ok(Domain(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid(domain: &str, reason: &str) -> ScanError {
    ScanError::InvalidDomain {
        domain: domain.to_string(),
        reason: reason.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// DNS EXISTENCE CHECK
// ═══════════════════════════════════════════════════════════════════

#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// Ok when the domain resolves to at least one address; Err carries the cause.
    async fn resolves(&self, domain: &Domain) -> Result<(), String>;
}

/// Resolves through trust-dns with the system-independent default config.
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
}

impl DnsResolver {
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainResolver for DnsResolver {
    async fn resolves(&self, domain: &Domain) -> Result<(), String> {
        match timeout(DNS_TIMEOUT, self.resolver.lookup_ip(domain.as_str())).await {
            Ok(Ok(lookup)) => {
                if lookup.iter().next().is_some() {
                    Ok(())
                } else {
                    Err("no addresses returned".to_string())
                }
            }
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("DNS lookup timed out after {}s", DNS_TIMEOUT.as_secs())),
        }
    }
}

/// Grammar check then DNS check. Any failure is reported as `InvalidDomain`.
pub async fn validate_domain(input: &str, resolver: &dyn DomainResolver) -> Result<Domain, ScanError> {
    let domain = Domain::parse(input)?;
    resolver
        .resolves(&domain)
        .await
        .map_err(|cause| invalid(domain.as_str(), &format!("DNS resolution failed: {}", cause)))?;
    Ok(domain)
}
