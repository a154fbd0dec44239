use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::template::error::TemplateError;

/// Fixed, well-known path of the article template on the asset host.
pub const TEMPLATE_PATH: &str = "/article.html";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the raw article template.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch_template(&self, origin: &str) -> Result<String, TemplateError>;
}

/// Fetches the template over HTTP, from the configured asset base when one
/// is set and from the requesting origin otherwise.
pub struct HttpTemplateSource {
    client: Client,
    base_override: Option<String>,
}

impl HttpTemplateSource {
    pub fn new(base_override: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_override,
        }
    }

    fn template_url(&self, origin: &str) -> String {
        let base = self.base_override.as_deref().unwrap_or(origin);
        format!("{}{}", base.trim_end_matches('/'), TEMPLATE_PATH)
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch_template(&self, origin: &str) -> Result<String, TemplateError> {
        let url = self.template_url(origin);
        debug!("fetching article template from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(TemplateError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TemplateError::Status { status });
        }

        response.text().await.map_err(TemplateError::Fetch)
    }
}
