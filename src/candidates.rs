// candidates.rs - Bucket name generation and provider URL expansion
// Purpose: Turn one domain into the ordered list of storage URLs to probe

use std::fmt;

use crate::domain::Domain;

// ═══════════════════════════════════════════════════════════════════
// NAMING TRANSFORMS
// ═══════════════════════════════════════════════════════════════════

/// A naming convention that derives one bucket name from a domain.
#[derive(Clone, Copy)]
pub struct NameTransform {
    pub label: &'static str,
    pub apply: fn(&str) -> String,
}

impl fmt::Debug for NameTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTransform").field("label", &self.label).finish()
    }
}

pub const DEFAULT_TRANSFORMS: &[NameTransform] = &[
    NameTransform { label: "identity", apply: |d| d.to_string() },
    NameTransform { label: "suffix-bucket", apply: |d| format!("{}-bucket", d) },
    NameTransform { label: "prefix-bucket", apply: |d| format!("bucket-{}", d) },
    NameTransform { label: "dots-to-hyphens", apply: |d| d.replace('.', "-") },
    NameTransform { label: "suffix-public", apply: |d| format!("{}-public", d) },
    NameTransform { label: "prefix-public", apply: |d| format!("public-{}", d) },
];

// ═══════════════════════════════════════════════════════════════════
// PROVIDER ENDPOINTS
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    AwsS3,
    GoogleCloudStorage,
    AzureBlob,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::AwsS3 => "AWS S3",
            Provider::GoogleCloudStorage => "Google Cloud Storage",
            Provider::AzureBlob => "Azure Blob Storage",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy)]
pub struct ProviderEndpoint {
    pub provider: Provider,
    pub url_for: fn(&str) -> String,
}

impl fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEndpoint").field("provider", &self.provider).finish()
    }
}

pub const DEFAULT_ENDPOINTS: &[ProviderEndpoint] = &[
    // Virtual-hosted style
    ProviderEndpoint { provider: Provider::AwsS3, url_for: |b| format!("https://{}.s3.amazonaws.com", b) },
    // Path style
    ProviderEndpoint {
        provider: Provider::GoogleCloudStorage,
        url_for: |b| format!("https://storage.googleapis.com/{}", b),
    },
    // Storage account host
    ProviderEndpoint {
        provider: Provider::AzureBlob,
        url_for: |b| format!("https://{}.blob.core.windows.net", b),
    },
];

// ═══════════════════════════════════════════════════════════════════
// GENERATOR
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCandidate {
    pub name: String,
    pub transform: &'static str,
}

/// One concrete URL to probe. `index` is its position in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub index: usize,
    pub bucket_name: String,
    pub provider: Provider,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    transforms: Vec<NameTransform>,
    endpoints: Vec<ProviderEndpoint>,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFORMS.to_vec(), DEFAULT_ENDPOINTS.to_vec())
    }
}

impl CandidateGenerator {
    pub fn new(transforms: Vec<NameTransform>, endpoints: Vec<ProviderEndpoint>) -> Self {
        Self { transforms, endpoints }
    }

    /// One candidate per transform, in table order. No dedup, no filtering.
    pub fn generate(&self, domain: &Domain) -> Vec<BucketCandidate> {
        self.transforms
            .iter()
            .map(|t| BucketCandidate {
                name: (t.apply)(domain.as_str()),
                transform: t.label,
            })
            .collect()
    }

    /// One target per endpoint for a single candidate. Indices start at `first_index`.
    pub fn expand(&self, candidate: &BucketCandidate, first_index: usize) -> Vec<ProbeTarget> {
        self.endpoints
            .iter()
            .enumerate()
            .map(|(offset, endpoint)| ProbeTarget {
                index: first_index + offset,
                bucket_name: candidate.name.clone(),
                provider: endpoint.provider,
                url: (endpoint.url_for)(&candidate.name),
            })
            .collect()
    }

    /// Candidate-major, provider-minor cross product.
    pub fn targets(&self, domain: &Domain) -> Vec<ProbeTarget> {
        let mut targets = Vec::with_capacity(self.transforms.len() * self.endpoints.len());
        for candidate in self.generate(domain) {
            let next = targets.len();
            targets.extend(self.expand(&candidate, next));
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(s: &str) -> Domain {
        Domain::parse(s).unwrap()
    }

    #[test]
    fn test_generate_six_candidates_in_order() {
        let names: Vec<String> = CandidateGenerator::default()
            .generate(&domain("example.com"))
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "example.com",
                "example.com-bucket",
                "bucket-example.com",
                "example-com",
                "example.com-public",
                "public-example.com",
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let generator = CandidateGenerator::new(
            vec![DEFAULT_TRANSFORMS[0], DEFAULT_TRANSFORMS[0]],
            DEFAULT_ENDPOINTS.to_vec(),
        );
        let candidates = generator.generate(&domain("example.com"));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], candidates[1]);
    }

    #[test]
    fn test_expand_provider_order() {
        let generator = CandidateGenerator::default();
        let candidate = BucketCandidate { name: "acme".to_string(), transform: "identity" };
        let targets = generator.expand(&candidate, 0);

        let urls: Vec<&str> = targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://acme.s3.amazonaws.com",
                "https://storage.googleapis.com/acme",
                "https://acme.blob.core.windows.net",
            ]
        );
        assert_eq!(
            targets.iter().map(|t| t.provider).collect::<Vec<_>>(),
            vec![Provider::AwsS3, Provider::GoogleCloudStorage, Provider::AzureBlob]
        );
    }

    #[test]
    fn test_eighteen_targets_deterministic() {
        let generator = CandidateGenerator::default();
        let first = generator.targets(&domain("example.com"));
        let second = generator.targets(&domain("example.com"));

        assert_eq!(first.len(), 18);
        assert_eq!(first, second);
        for (i, target) in first.iter().enumerate() {
            assert_eq!(target.index, i);
        }
        assert_eq!(first[3].url, "https://example.com-bucket.s3.amazonaws.com");
        assert_eq!(first[17].url, "https://public-example.com.blob.core.windows.net");
    }

    #[test]
    fn test_target_count_independent_of_domain_shape() {
        let generator = CandidateGenerator::default();
        for d in ["a.io", "deep.sub.example.co.uk", "with-hyphen.dev"] {
            assert_eq!(generator.targets(&domain(d)).len(), 18);
        }
    }
}
