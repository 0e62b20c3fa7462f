// fetch.rs - Unauthenticated HTTP transport for probes
// Purpose: One GET per URL, error statuses and network failures surfaced uniformly

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::TransportError;

/// Bytes of body kept per probe; listing and error signatures sit at the start of the document.
pub const MAX_BODY_BYTES: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, TransportError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse, TransportError> {
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        let status = response.status().as_u16();

        let mut buffered: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            buffered.extend_from_slice(&chunk);
            if buffered.len() >= MAX_BODY_BYTES {
                buffered.truncate(MAX_BODY_BYTES);
                break;
            }
        }

        let body = String::from_utf8_lossy(&buffered).into_owned();
        Ok(ProbeResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns its URL.
    async fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/", addr)
    }

    fn http_response(status_line: &str, body: &[u8]) -> Vec<u8> {
        let mut raw = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        )
        .into_bytes();
        raw.extend_from_slice(body);
        raw
    }

    fn fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new(timeout, "bucketrecon-test").unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_returns_body() {
        let url = serve_once(http_response("200 OK", b"<ListBucketResult></ListBucketResult>")).await;

        let response = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<ListBucketResult></ListBucketResult>");
    }

    #[tokio::test]
    async fn test_forbidden_status_is_transport_failure() {
        let url = serve_once(http_response("403 Forbidden", b"<Code>AccessDenied</Code>")).await;

        let result = fetcher(Duration::from_secs(5)).fetch(&url).await;

        assert_eq!(result, Err(TransportError::Status(403)));
    }

    #[tokio::test]
    async fn test_not_found_classifies_as_denied() {
        use crate::candidates::{ProbeTarget, Provider};
        use crate::classifier::{Classifier, Verdict};
        use crate::observer::tests::RecordingObserver;

        let url = serve_once(http_response("404 Not Found", b"")).await;
        let http = fetcher(Duration::from_secs(5));
        let target = ProbeTarget {
            index: 0,
            bucket_name: "example.com".to_string(),
            provider: Provider::AwsS3,
            url,
        };

        let c = Classifier::new(&http).classify(&target, &RecordingObserver::default()).await;

        assert_eq!(c.verdict, Verdict::Denied);
    }

    #[tokio::test]
    async fn test_closed_port_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = fetcher(Duration::from_secs(5)).fetch(&format!("http://{}/", addr)).await;

        assert!(matches!(result, Err(TransportError::Request(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_stalled_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let result = fetcher(Duration::from_millis(200)).fetch(&format!("http://{}/", addr)).await;

        assert_eq!(result, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn test_oversized_body_is_truncated() {
        let body = vec![b'a'; MAX_BODY_BYTES + 512 * 1024];
        let url = serve_once(http_response("200 OK", &body)).await;

        let response = fetcher(Duration::from_secs(10)).fetch(&url).await.unwrap();

        assert_eq!(response.body.len(), MAX_BODY_BYTES);
    }
}
