use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::PageError;
use crate::http::origin::Origin;
use crate::meta::inject;
use crate::supabase::SupabaseClient;
use crate::template::{HttpTemplateSource, TemplateCache};

#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<SupabaseClient>,
    pub template: Arc<TemplateCache>,
    pub public_origin: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let source = Arc::new(HttpTemplateSource::new(config.assets_base_url.clone()));

        Self {
            articles: Arc::new(SupabaseClient::new(config)),
            template: Arc::new(TemplateCache::new(source)),
            public_origin: config.public_origin.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/article", get(missing_slug))
        .route("/article/", get(missing_slug))
        .route("/article/{*slug}", get(article))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// The article route hit without any slug segment.
async fn missing_slug() -> PageError {
    PageError::MissingSlug
}

/// Render the article page with its head tags filled in.
async fn article(
    Path(slug_path): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let origin = Origin::from_request(&headers, state.public_origin.as_deref());

    // The wildcard may span several segments; only the first one names the
    // article.
    let slug = slug_path.split('/').next().unwrap_or_default();
    if slug.is_empty() {
        return Err(PageError::MissingSlug);
    }

    let meta = state
        .articles
        .article_by_slug(slug)
        .await
        .map_err(|source| PageError::from_lookup(slug, origin.site_root(), source))?;

    let template = state.template.get(origin.as_str()).await?;
    let html = inject(template, &meta, &origin.page_url(slug));

    info!("rendered article page for slug {}", slug);

    Ok(([(header::CONTENT_TYPE, "text/html;charset=UTF-8")], html).into_response())
}

/// Outermost boundary: a panicking handler still answers with the generic
/// internal-error page.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };

    error!("request handler panicked: {}", detail);
    PageError::internal_response()
}
