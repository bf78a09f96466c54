//! In-memory fetcher for tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{GrabpodError, Result};
use crate::fetcher::Fetcher;

enum MockResponse {
    Body(Vec<u8>),
    /// Writes the bytes, then fails as if the connection dropped.
    Truncated(Vec<u8>),
}

/// Serves canned bodies by URL and records every request. Unknown URLs fail.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Body(body.into()));
        self
    }

    pub fn with_truncated(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Truncated(body.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => {
                std::fs::write(dest, body)?;
                Ok(body.len() as u64)
            }
            Some(MockResponse::Truncated(body)) => {
                std::fs::write(dest, body)?;
                Err(GrabpodError::Other(format!("connection reset fetching {}", url)))
            }
            None => Err(GrabpodError::Other(format!("404 Not Found: {}", url))),
        }
    }
}
