use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ActivitiesError {
    #[error("activities base url cannot take path segments: {0}")]
    InvalidBaseUrl(String),
    #[error("activities request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Upstream service holding per-user activity feeds.
#[async_trait]
pub trait ActivitiesClient: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<Value, ActivitiesError>;
}

#[derive(Clone)]
pub struct HttpActivitiesClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpActivitiesClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!(ActivitiesError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// `<base>/user_activities/<user_id>`, with the id encoded as one segment.
    pub fn activities_url(&self, user_id: &str) -> Result<Url, ActivitiesError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ActivitiesError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("user_activities")
            .push(user_id);
        Ok(url)
    }
}

#[async_trait]
impl ActivitiesClient for HttpActivitiesClient {
    async fn fetch(&self, user_id: &str) -> Result<Value, ActivitiesError> {
        let url = self.activities_url(user_id)?;
        debug!(%url, "fetching user activities");
        let activities = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(activities)
    }
}
