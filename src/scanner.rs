// scanner.rs - Scan driver
// Purpose: Validate the domain, probe every candidate URL with bounded
//          concurrency, and collect the publicly accessible ones in generation order

use futures::stream::{self, StreamExt};
use std::fmt;
use std::time::Duration;

use crate::candidates::{CandidateGenerator, ProbeTarget};
use crate::classifier::{Classifier, Verdict};
use crate::domain::{self, Domain, DomainResolver};
use crate::error::ScanError;
use crate::fetch::Fetcher;
use crate::observer::ScanObserver;

// ═══════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Maximum probes in flight
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 6,
            timeout: Duration::from_secs(10),
            user_agent: format!("bucketrecon/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScanConfig {
    /// One probe at a time.
    pub fn sequential() -> Self {
        Self {
            concurrency: 1,
            ..Self::default()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// REPORT
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub domain: Domain,
    /// Accessible targets, ordered by generation index
    pub accessible: Vec<ProbeTarget>,
    pub probed: usize,
    pub denied: usize,
    pub inconclusive: usize,
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accessible.is_empty() {
            return writeln!(f, "No publicly accessible buckets found for domain {}.", self.domain);
        }

        writeln!(f)?;
        writeln!(f, "Publicly accessible buckets found for domain {}:", self.domain)?;
        for target in &self.accessible {
            writeln!(f, "- {}", target.url)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════
// DRIVER
// ═══════════════════════════════════════════════════════════════════

pub struct Scanner<'a> {
    config: ScanConfig,
    generator: CandidateGenerator,
    fetcher: &'a dyn Fetcher,
    resolver: &'a dyn DomainResolver,
    observer: &'a dyn ScanObserver,
}

impl<'a> Scanner<'a> {
    pub fn new(
        config: ScanConfig,
        fetcher: &'a dyn Fetcher,
        resolver: &'a dyn DomainResolver,
        observer: &'a dyn ScanObserver,
    ) -> Self {
        Self {
            config,
            generator: CandidateGenerator::default(),
            fetcher,
            resolver,
            observer,
        }
    }

    pub fn with_generator(mut self, generator: CandidateGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Validates `domain_text`, then probes every generated target exactly once.
    /// An invalid domain aborts before any probe is issued.
    pub async fn scan(&self, domain_text: &str) -> Result<ScanReport, ScanError> {
        let domain = domain::validate_domain(domain_text, self.resolver).await?;
        let targets = self.generator.targets(&domain);
        let probed = targets.len();

        self.observer.scan_started(&domain, probed);

        let classifier = Classifier::new(self.fetcher);
        let workers = self.config.concurrency.max(1);

        let results: Vec<(ProbeTarget, Verdict)> = stream::iter(targets)
            .map(|target| {
                let classifier = &classifier;
                async move {
                    let verdict = classifier.classify(&target, self.observer).await.verdict;
                    (target, verdict)
                }
            })
            .buffer_unordered(workers)
            .collect()
            .await;

        let mut report = ScanReport {
            domain,
            accessible: Vec::new(),
            probed,
            denied: 0,
            inconclusive: 0,
        };

        for (target, verdict) in results {
            match verdict {
                Verdict::Accessible => report.accessible.push(target),
                Verdict::Denied => report.denied += 1,
                Verdict::Inconclusive => report.inconclusive += 1,
            }
        }
        report.accessible.sort_by_key(|t| t.index);

        self.observer.scan_finished(&report);
        Ok(report)
    }
}
