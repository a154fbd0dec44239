use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::template::error::TemplateError;
use crate::template::fetch::TemplateSource;

/// Process-wide holder of the article template.
///
/// Populated on the first successful fetch and reused for every later
/// request until the process restarts. A failed fetch leaves the cell
/// empty so the next request retries.
pub struct TemplateCache {
    source: Arc<dyn TemplateSource>,
    html: OnceCell<String>,
}

impl TemplateCache {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self {
            source,
            html: OnceCell::new(),
        }
    }

    /// Return the template, fetching it on first use.
    ///
    /// Concurrent cold-start callers coalesce on the cell, so the source
    /// sees at most one in-flight fetch at a time.
    pub async fn get(&self, origin: &str) -> Result<&str, TemplateError> {
        self.html
            .get_or_try_init(|| async {
                debug!("template cache cold, fetching from asset host");
                self.source.fetch_template(origin).await
            })
            .await
            .map(String::as_str)
    }
}
