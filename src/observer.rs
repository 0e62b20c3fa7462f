// observer.rs - Per-probe diagnostic sink
// Purpose: Injected observer so the scan pipeline never touches global logging state

use indicatif::{ProgressBar, ProgressStyle};

use crate::candidates::ProbeTarget;
use crate::classifier::{Classification, Evidence};
use crate::domain::Domain;
use crate::scanner::ScanReport;

pub trait ScanObserver: Send + Sync {
    fn scan_started(&self, _domain: &Domain, _targets: usize) {}

    /// Called exactly once per probe, after classification.
    fn probe_classified(&self, target: &ProbeTarget, classification: &Classification);

    fn scan_finished(&self, _report: &ScanReport) {}
}

/// Forwards records to `tracing`, optionally driving a progress bar.
pub struct TracingObserver {
    progress: ProgressBar,
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self { progress: ProgressBar::hidden() }
    }
}

impl TracingObserver {
    /// Observer with a visible progress bar on stderr.
    pub fn with_progress() -> Self {
        let progress = ProgressBar::new(0);
        let style = ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} probes {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        progress.set_style(style);
        Self { progress }
    }
}

// A scan that aborts before probing never reaches `scan_finished`.
impl Drop for TracingObserver {
    fn drop(&mut self) {
        if !self.progress.is_finished() {
            self.progress.finish_and_clear();
        }
    }
}

impl ScanObserver for TracingObserver {
    fn scan_started(&self, domain: &Domain, targets: usize) {
        self.progress.set_length(targets as u64);
        self.progress.set_message(domain.to_string());
        self.progress.suspend(|| {
            tracing::info!("Probing {} candidate URLs for {}", targets, domain);
        });
    }

    fn probe_classified(&self, target: &ProbeTarget, classification: &Classification) {
        self.progress.suspend(|| match &classification.evidence {
            Evidence::ListingSignature(rule) => {
                tracing::info!(
                    "Bucket {} is publicly listable ({}, matched {}).",
                    target.url,
                    target.provider,
                    rule
                );
            }
            Evidence::DenialSignature { rule, snippet } => {
                tracing::debug!(
                    "Bucket {} is likely not publicly accessible or doesn't exist ({}). Received: {}...",
                    target.url,
                    rule,
                    snippet
                );
            }
            Evidence::NoSignature { snippet } => {
                tracing::debug!(
                    "Bucket {} does not appear to be publicly accessible. Received: {}...",
                    target.url,
                    snippet
                );
            }
            Evidence::TransportFailure(cause) => {
                tracing::error!("Error checking bucket {}: {}", target.url, cause);
            }
        });
        self.progress.inc(1);
    }

    fn scan_finished(&self, report: &ScanReport) {
        self.progress.finish_and_clear();
        tracing::debug!(
            "Scan of {} finished: {} probed, {} accessible, {} denied, {} inconclusive",
            report.domain,
            report.probed,
            report.accessible.len(),
            report.denied,
            report.inconclusive
        );
    }
}
