use crate::error::{GalleryError, Result};
use image::DynamicImage;
use log::debug;
use std::time::Duration;

const USER_AGENT: &str = concat!("sheet-gallery/", env!("CARGO_PKG_VERSION"));

/// Timeouts applied to every image request.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Downloads and decodes images over plain HTTP(S).
///
/// No authentication headers are sent and redirects follow the client's
/// default policy.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|source| GalleryError::Fetch {
                url: String::new(),
                source,
            })?;

        Ok(Self { client })
    }

    /// GET `url` and decode the body as an image.
    ///
    /// A non-success status, a transport failure and an undecodable body are
    /// all reported as errors naming the URL.
    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage> {
        let fetch_err = |source| GalleryError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_err)?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        image::load_from_memory(&body).map_err(|source| GalleryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
