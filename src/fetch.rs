//! Input fetching primitives: local files, URLs, and piped stdin.
//!
//! [`Fetcher`] is the seam between prompt aggregation and real I/O. The
//! production implementation is [`WebFetcher`]; tests substitute their own.
//! Both primitives take the number of bytes the caller can still afford and
//! refuse to buffer more than that, so an oversized source is rejected
//! without being read or downloaded in full.

use std::io::{IsTerminal, Read};
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::constants::FETCH_TIMEOUT;
use crate::error::{QueryError, SourceKind};

/// Failure modes of the low-level fetch primitives.
///
/// `TooLarge` is turned into a budget error naming the offending source by
/// the aggregator; the other variants travel as the cause of a read or
/// fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Content does not fit in the byte limit handed to the primitive.
    #[error("content exceeds the input size limit")]
    TooLarge,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GET returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Reads reference content for the prompt aggregator.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Reads a local file as UTF-8 text, refusing files larger than `limit`.
    async fn read_file(&self, path: &Path, limit: usize) -> Result<String, FetchError>;

    /// Fetches the body of an http(s) URL as text, abandoning the transfer
    /// once more than `limit` bytes have arrived.
    async fn fetch_url(&self, url: &str, limit: usize) -> Result<String, FetchError>;
}

/// Production [`Fetcher`] backed by the local filesystem and reqwest.
pub struct WebFetcher {
    client: reqwest::Client,
}

impl WebFetcher {
    pub fn new() -> Result<Self, QueryError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for WebFetcher {
    async fn read_file(&self, path: &Path, limit: usize) -> Result<String, FetchError> {
        // Size check before reading so an oversized file is never buffered.
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > limit as u64 {
            return Err(FetchError::TooLarge);
        }
        Ok(std::fs::read_to_string(path)?)
    }

    async fn fetch_url(&self, url: &str, limit: usize) -> Result<String, FetchError> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Stream chunkwise and stop once over budget rather than trusting
        // Content-Length, which servers may omit or understate.
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::TooLarge);
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Reads piped stdin, bounded at `limit` bytes.
///
/// Returns `None` when stdin is an interactive terminal or the pipe is
/// empty, so terminal runs fall through to file/URL arguments alone.
pub fn read_piped_stdin(limit: usize) -> Result<Option<String>, QueryError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buf = String::new();
    stdin
        .lock()
        .take(limit as u64 + 1)
        .read_to_string(&mut buf)
        .map_err(|e| QueryError::File {
            path: "stdin".to_string(),
            source: FetchError::Io(e),
        })?;

    if buf.len() > limit {
        return Err(QueryError::InputTooLarge {
            category: SourceKind::Stdin,
            reference: None,
            limit,
        });
    }
    if buf.is_empty() {
        Ok(None)
    } else {
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// Serves one hand-written HTTP response on a background thread and
    /// returns the bound address. With `stall` the socket is held open after
    /// the body piece, so only a client that stops reading early returns.
    fn serve_once(head: &'static str, body: &'static [u8], stall: bool) -> std::net::SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            // Drain the request head first; answering before it arrives makes
            // hyper fail the exchange with `UnexpectedMessage`.
            let mut request = Vec::new();
            let mut byte = [0u8; 1];
            while !request.ends_with(b"\r\n\r\n") {
                match stream.read(&mut byte) {
                    Ok(1) => request.push(byte[0]),
                    _ => break,
                }
            }
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
            let _ = stream.flush();
            if stall {
                let mut buf = [0u8; 1];
                let _ = stream.read(&mut buf);
            }
        });
        addr
    }

    #[tokio::test]
    async fn reads_a_file_within_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let fetcher = WebFetcher::new().unwrap();
        let content = fetcher.read_file(&path, 1024).await.unwrap();
        assert_eq!(content, "line one\nline two\n");
    }

    #[tokio::test]
    async fn rejects_a_file_larger_than_the_limit_without_reading_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "0123456789").unwrap();

        let fetcher = WebFetcher::new().unwrap();
        let err = fetcher.read_file(&path, 9).await.unwrap_err();
        assert!(matches!(err, FetchError::TooLarge));

        // Exactly at the limit is still allowed.
        assert!(fetcher.read_file(&path, 10).await.is_ok());
    }

    #[tokio::test]
    async fn missing_file_reports_the_io_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let fetcher = WebFetcher::new().unwrap();
        let err = fetcher.read_file(&path, 1024).await.unwrap_err();
        match err {
            FetchError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetches_a_url_body_within_the_limit() {
        let addr = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\n",
            b"page body",
            false,
        );

        let fetcher = WebFetcher::new().unwrap();
        let body = fetcher
            .fetch_url(&format!("http://{addr}/x"), 1024)
            .await
            .unwrap();
        assert_eq!(body, "page body");
    }

    #[tokio::test]
    async fn url_fetch_maps_a_non_success_status() {
        let addr = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            b"",
            false,
        );

        let fetcher = WebFetcher::new().unwrap();
        let err = fetcher
            .fetch_url(&format!("http://{addr}/missing"), 1024)
            .await
            .unwrap_err();
        match err {
            FetchError::Status(status) => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn url_fetch_abandons_an_oversized_body_mid_stream() {
        // The head promises a megabyte but the server sends only the first
        // piece and then stalls. A client that drained the whole body before
        // checking the limit would hang here instead of returning.
        let addr = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 1048576\r\nConnection: close\r\n\r\n",
            &[b'x'; 8192],
            true,
        );

        let fetcher = WebFetcher::new().unwrap();
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            fetcher.fetch_url(&format!("http://{addr}/big"), 1024),
        )
        .await
        .expect("transfer was drained instead of abandoned");
        assert!(matches!(result, Err(FetchError::TooLarge)));
    }
}
