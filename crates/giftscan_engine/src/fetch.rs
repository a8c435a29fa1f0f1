use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use giftscan_core::{item_link, ItemRecord, LabelWindowExtractor, Owner, OwnerExtractor};

use crate::{FailureKind, FetchError};

/// Page fragments that mean the item's owner is not public.
pub const PRIVACY_MARKERS: [&str; 2] = ["User hidden", "This channel is private"];

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Item pages live at `{base_url}/{model}-{id}`.
    pub base_url: String,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://t.me/nft".to_string(),
            request_timeout: Duration::from_secs(5),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ItemFetcher: Send + Sync {
    /// One request, no retry. `Ok` only for an item with a known owner.
    async fn fetch(&self, model: &str, id: u64) -> Result<ItemRecord, FetchError>;
}

#[derive(Clone)]
pub struct ReqwestItemFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
    extractor: Arc<dyn OwnerExtractor>,
}

impl ReqwestItemFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        // A redirect is a non-success status for our purposes.
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            client,
            extractor: Arc::new(LabelWindowExtractor::new()),
        })
    }

    pub fn with_extractor(mut self, extractor: impl OwnerExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn item_url(&self, model: &str, id: u64) -> String {
        item_link(&self.settings.base_url, model, id)
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait::async_trait]
impl ItemFetcher for ReqwestItemFetcher {
    async fn fetch(&self, model: &str, id: u64) -> Result<ItemRecord, FetchError> {
        let url = self.item_url(model, id);
        let body = self.download(&url).await?;

        if let Some(marker) = PRIVACY_MARKERS.into_iter().find(|m| body.contains(m)) {
            return Err(FetchError::new(FailureKind::PrivacyMarker, marker));
        }

        match self.extractor.extract(&body) {
            Owner::Handle(owner) => Ok(ItemRecord {
                model: model.to_string(),
                id,
                owner,
                link: url,
            }),
            Owner::Unknown => Err(FetchError::new(
                FailureKind::OwnerUnresolved,
                "no owner link near the owner label",
            )),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
