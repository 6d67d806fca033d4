use crate::weather_data::error::FetchError;
use crate::weather_data::extractor::observation_frame_from_slice;
use crate::weather_data::request::{FetchConfig, PointRequest};
use log::{info, warn};
use polars::frame::DataFrame;
use reqwest::Client;
use tokio::task;

/// Issues daily point requests against the POWER API and reshapes each
/// response into an observation table.
///
/// One call to [`PointFetcher::fetch`] is exactly one HTTP GET. There is no
/// retry, no backoff and no caching.
pub struct PointFetcher {
    config: FetchConfig,
    download_client: Client,
}

impl PointFetcher {
    pub fn new(config: FetchConfig) -> Result<PointFetcher, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let download_client = builder
            .build()
            .map_err(|e| FetchError::NetworkRequest(config.base_url.clone(), e))?;
        Ok(PointFetcher {
            config,
            download_client,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub async fn fetch(&self, request: &PointRequest) -> Result<DataFrame, FetchError> {
        let body = self.download(request).await?;

        let owned_request = request.clone();
        let mask_fill_values = self.config.mask_fill_values;
        let frame = task::spawn_blocking(move || {
            observation_frame_from_slice(&body, &owned_request, mask_fill_values)
        })
        .await??;

        info!(
            "Fetched {} daily rows for '{}' ({} to {})",
            frame.height(),
            request.location,
            request.start,
            request.end
        );
        Ok(frame)
    }

    async fn download(&self, request: &PointRequest) -> Result<Vec<u8>, FetchError> {
        let http_request = self
            .download_client
            .get(&self.config.base_url)
            .query(&request.query_pairs(&self.config.community))
            .build()
            .map_err(|e| FetchError::NetworkRequest(self.config.base_url.clone(), e))?;
        let url = http_request.url().to_string();
        info!("Requesting POWER daily point data from {}", url);

        let response = self
            .download_client
            .execute(http_request)
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        Ok(body.to_vec())
    }
}
