use tracing::{info, warn};

use crate::{
    api::{HttpClient, SpeedtestConfig},
    domain::{AppError, Category, Result, Sample},
};

/// Takes single measurements against the configured category URLs
pub struct Sampler<C> {
    client: C,
    config: SpeedtestConfig,
}

impl<C: HttpClient> Sampler<C> {
    pub fn new(client: C, config: SpeedtestConfig) -> Self {
        Self { client, config }
    }

    /// Download the file for `category` once and measure it
    pub async fn sample(&self, category: Category) -> Result<Sample> {
        let url = self.config.url_for(category);

        let transfer = self.client.get(url).await.map_err(|source| {
            warn!(%category, %url, error = %source, "download failed");
            AppError::DownloadFailed { category, source }
        })?;

        let sample = Sample::new(transfer.bytes, transfer.elapsed.as_secs_f64())?;
        info!(
            %category,
            bytes = sample.bytes_downloaded(),
            seconds = sample.duration_seconds(),
            speed_mbps = sample.speed_mbps(),
            "sample complete"
        );
        Ok(sample)
    }
}
