//! Qiita API v2 article client.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use crate::base::{config::Config, types::Res};

use super::{ArticleClient, GenericArticleClient};

/// Qiita API base URL.
const QIITA_API_BASE: &str = "https://qiita.com/api/v2";

// Extra methods on `ArticleClient` applied by the Qiita implementation.

impl ArticleClient {
    /// Creates a new Qiita article client.
    pub fn qiita(config: &Config) -> Res<Self> {
        let client = QiitaArticleClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Qiita client implementation.
#[derive(Clone)]
pub struct QiitaArticleClient {
    http: reqwest::Client,
    token: String,
}

impl QiitaArticleClient {
    /// Create a new Qiita article client.
    #[instrument(name = "QiitaArticleClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(config.gateway_timeout_secs)).build()?;

        Ok(Self {
            http,
            token: config.qiita_token.clone(),
        })
    }
}

/// The slice of the item response the bot cares about.
#[derive(Debug, Deserialize)]
struct QiitaItem {
    body: String,
}

#[async_trait]
impl GenericArticleClient for QiitaArticleClient {
    #[instrument(skip(self))]
    async fn fetch_body(&self, id: &str) -> Res<String> {
        let url = format!("{QIITA_API_BASE}/items/{id}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch article {id}: {e}"))?
            .error_for_status()?;

        let item: QiitaItem = response.json().await?;

        Ok(item.body)
    }
}
