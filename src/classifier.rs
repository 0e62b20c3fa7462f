// classifier.rs - Accessibility classification of probe responses
// Purpose: One fetch per target, response body reduced to a verdict via ordered signatures

use std::fmt;

use crate::candidates::ProbeTarget;
use crate::fetch::Fetcher;
use crate::observer::ScanObserver;

/// Characters of body kept as diagnostic context.
pub const SNIPPET_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accessible,
    Denied,
    Inconclusive,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Accessible => "accessible",
            Verdict::Denied => "denied",
            Verdict::Inconclusive => "inconclusive",
        };
        f.write_str(s)
    }
}

/// Why a verdict was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    TransportFailure(String),
    ListingSignature(&'static str),
    DenialSignature { rule: &'static str, snippet: String },
    NoSignature { snippet: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub evidence: Evidence,
}

impl Classification {
    pub fn is_accessible(&self) -> bool {
        self.verdict == Verdict::Accessible
    }
}

// ═══════════════════════════════════════════════════════════════════
// SIGNATURE RULES (first match wins)
// ═══════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
pub struct SignatureRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub verdict: Verdict,
}

impl fmt::Debug for SignatureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureRule")
            .field("name", &self.name)
            .field("verdict", &self.verdict)
            .finish()
    }
}

pub const SIGNATURE_RULES: &[SignatureRule] = &[
    SignatureRule {
        name: "s3-list-bucket-result",
        matches: |body| body.contains("ListBucketResult"),
        verdict: Verdict::Accessible,
    },
    // Plain substring heuristic, prone to false positives on any JSON/XML
    // carrying both words.
    SignatureRule {
        name: "gcs-contents-and-name",
        matches: |body| body.contains("Contents") && body.contains("Name"),
        verdict: Verdict::Accessible,
    },
    SignatureRule {
        name: "azure-enumeration-results",
        matches: |body| body.contains("EnumerationResults"),
        verdict: Verdict::Accessible,
    },
    SignatureRule {
        name: "access-denied-or-no-such-bucket",
        matches: |body| body.contains("AccessDenied") || body.contains("NoSuchBucket"),
        verdict: Verdict::Denied,
    },
];

/// First `SNIPPET_CHARS` characters, never splitting a code point.
pub fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}

/// Evaluates the rule table against a response body. Pure.
pub fn classify_body(body: &str) -> Classification {
    classify_body_with(SIGNATURE_RULES, body)
}

pub fn classify_body_with(rules: &[SignatureRule], body: &str) -> Classification {
    for rule in rules {
        if (rule.matches)(body) {
            let evidence = match rule.verdict {
                Verdict::Accessible => Evidence::ListingSignature(rule.name),
                Verdict::Denied => Evidence::DenialSignature {
                    rule: rule.name,
                    snippet: snippet(body),
                },
                Verdict::Inconclusive => Evidence::NoSignature { snippet: snippet(body) },
            };
            return Classification { verdict: rule.verdict, evidence };
        }
    }

    Classification {
        verdict: Verdict::Inconclusive,
        evidence: Evidence::NoSignature { snippet: snippet(body) },
    }
}

// ═══════════════════════════════════════════════════════════════════
// CLASSIFIER
// ═══════════════════════════════════════════════════════════════════

pub struct Classifier<'a> {
    fetcher: &'a dyn Fetcher,
    rules: &'a [SignatureRule],
}

impl<'a> Classifier<'a> {
    pub fn new(fetcher: &'a dyn Fetcher) -> Self {
        Self { fetcher, rules: SIGNATURE_RULES }
    }

    pub fn with_rules(fetcher: &'a dyn Fetcher, rules: &'a [SignatureRule]) -> Self {
        Self { fetcher, rules }
    }

    /// Exactly one fetch. Never fails: transport errors become `Denied`.
    pub async fn classify(&self, target: &ProbeTarget, observer: &dyn ScanObserver) -> Classification {
        let classification = match self.fetcher.fetch(&target.url).await {
            Ok(response) => classify_body_with(self.rules, &response.body),
            Err(e) => Classification {
                verdict: Verdict::Denied,
                evidence: Evidence::TransportFailure(e.to_string()),
            },
        };

        observer.probe_classified(target, &classification);
        classification
    }
}
