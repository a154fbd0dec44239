use std::time::Duration;

use axum::http::StatusCode;
use reqwest::Client;
use tracing::debug;

use crate::config::AppConfig;
use crate::supabase::error::SupabaseError;
use crate::supabase::types::{ArticleMeta, ArticleRecord};

/// Columns fetched for preview rendering, author join included.
const SELECT_FIELDS: &str = "title,excerpt,image_url,authors(full_name)";

/// PostgREST single-object mode; a filter matching zero rows answers 406
/// instead of an empty array.
const ACCEPT_OBJECT: &str = "application/vnd.pgrst.object+json";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the article collection behind the Supabase REST
/// endpoint.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    /// Look up one article's display metadata by exact slug match.
    pub async fn article_by_slug(&self, slug: &str) -> Result<ArticleMeta, SupabaseError> {
        let url = format!("{}/rest/v1/posts", self.base_url);
        debug!("looking up article metadata for slug {}", slug);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("slug", format!("eq.{slug}")),
                ("select", SELECT_FIELDS.to_string()),
            ])
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Accept", ACCEPT_OBJECT)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(SupabaseError::Transport)?;

        let status = response.status();
        if status == StatusCode::NOT_ACCEPTABLE {
            return Err(SupabaseError::NotFound {
                slug: slug.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Status { status, body });
        }

        let record = response
            .json::<ArticleRecord>()
            .await
            .map_err(SupabaseError::Decode)?;

        record.into_meta()
    }
}
