//! HTTP client for the integration sync service

use crate::error::{Result, SyncError};
use async_trait::async_trait;
use marquee_core::types::IntegrationId;
use marquee_core::{IntegrationRecord, IntegrationService};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Wire shape of the metadata endpoint
#[derive(Debug, Deserialize)]
struct MetadataResponse {
    app: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    metadata: serde_json::Value,
}

/// reqwest-backed client for the integration sync/metadata endpoints
///
/// # Example
///
/// ```ignore
/// let service = HttpIntegrationService::new("https://api.example.com")?;
/// let payload = service.trigger_sync(&IntegrationId::new("weather-1")).await?;
/// ```
pub struct HttpIntegrationService {
    http: Client,
    base_url: String,
}

impl HttpIntegrationService {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base_url).map_err(|e| SyncError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SyncError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MarqueePlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SyncError::Request)?;

        Ok(Self { http, base_url })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SyncError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn trigger_sync_inner(&self, id: &IntegrationId) -> Result<serde_json::Value> {
        let url = format!("{}/integrations/{}/sync", self.base_url, id);
        debug!(url = %url, "triggering integration sync");

        let response = Self::check(self.http.post(&url).send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| SyncError::ParseError(format!("sync response: {e}")))
    }

    async fn get_metadata_inner(&self, id: &IntegrationId) -> Result<IntegrationRecord> {
        let url = format!("{}/integrations/{}", self.base_url, id);
        debug!(url = %url, "fetching integration metadata");

        let response = Self::check(self.http.get(&url).send().await?).await?;
        let body: MetadataResponse = response
            .json()
            .await
            .map_err(|e| SyncError::ParseError(format!("metadata response: {e}")))?;

        Ok(IntegrationRecord {
            app: body.app,
            category: body.category,
            metadata: body.metadata,
        })
    }
}

#[async_trait]
impl IntegrationService for HttpIntegrationService {
    async fn trigger_sync(&self, id: &IntegrationId) -> marquee_core::Result<serde_json::Value> {
        self.trigger_sync_inner(id).await.map_err(Into::into)
    }

    async fn get_metadata(&self, id: &IntegrationId) -> marquee_core::Result<IntegrationRecord> {
        self.get_metadata_inner(id).await.map_err(Into::into)
    }
}
