use std::future::Future;
use std::time::{Duration, Instant};

use futures::TryStreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}")]
    Status { status: StatusCode, url: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Size and wall-clock time of one completed body transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub bytes: u64,
    pub elapsed: Duration,
}

/// Anything able to fetch a URL in full and time it
pub trait HttpClient {
    fn get(&self, url: &str) -> impl Future<Output = Result<Transfer>>;
}

impl<T: HttpClient> HttpClient for &T {
    fn get(&self, url: &str) -> impl Future<Output = Result<Transfer>> {
        (**self).get(url)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Build a client; `timeout` bounds each whole request when set
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl HttpClient for ApiClient {
    /// Download the body chunk by chunk, counting bytes without keeping them
    async fn get(&self, url: &str) -> Result<Transfer> {
        debug!(%url, "starting transfer");
        let start = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        let mut stream = response.bytes_stream();
        let mut bytes = 0u64;
        while let Some(chunk) = stream.try_next().await? {
            bytes += chunk.len() as u64;
        }
        let elapsed = start.elapsed();

        debug!(%url, bytes, elapsed_ms = elapsed.as_millis() as u64, "transfer complete");
        Ok(Transfer { bytes, elapsed })
    }
}
