// lib.rs - bucketrecon
// Purpose: Find publicly exposed S3, GCS and Azure Blob buckets named after a domain

pub mod candidates;
pub mod classifier;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod observer;
pub mod scanner;

pub use candidates::{BucketCandidate, CandidateGenerator, ProbeTarget, Provider};
pub use classifier::{Classification, Classifier, Evidence, Verdict};
pub use domain::{DnsResolver, Domain, DomainResolver};
pub use error::{ScanError, TransportError};
pub use fetch::{Fetcher, HttpFetcher, ProbeResponse};
pub use observer::{ScanObserver, TracingObserver};
pub use scanner::{ScanConfig, ScanReport, Scanner};
