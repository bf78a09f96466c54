use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::app::Result;
use crate::fetcher::Fetcher;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed fetcher. Redirects are followed by the client's default
/// policy.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("grabpod/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        tracing::debug!("GET {}", url);
        let mut response = self.client.get(url).send().await?.error_for_status()?;

        if response.url().as_str() != url {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        // Only touch the destination once the server has answered successfully.
        let mut file = File::create(dest).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!("Wrote {} bytes to {}", written, dest.display());
        Ok(written)
    }
}
