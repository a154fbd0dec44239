use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::supabase::SupabaseError;
use crate::template::TemplateError;

/// Body of every internal failure; details stay in the logs.
const INTERNAL_ERROR_BODY: &str = "An internal error occurred while processing the article.";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("article slug is missing")]
    MissingSlug,

    /// The article is absent or the backend could not answer; both fall
    /// back to the site root.
    #[error("article {slug:?} unavailable")]
    ArticleUnavailable {
        slug: String,
        site_root: String,
        #[source]
        source: SupabaseError,
    },

    /// The backend answered with a record this service cannot render.
    #[error("article record for {slug:?} is malformed")]
    MalformedArticle {
        slug: String,
        #[source]
        source: SupabaseError,
    },

    #[error("article template unavailable")]
    Template(#[from] TemplateError),
}

impl PageError {
    /// Classify a metadata lookup failure: malformed records escalate to
    /// the internal-error path, everything else redirects to the site root.
    pub fn from_lookup(slug: &str, site_root: String, source: SupabaseError) -> Self {
        if source.is_malformed() {
            Self::MalformedArticle {
                slug: slug.to_string(),
                source,
            }
        } else {
            Self::ArticleUnavailable {
                slug: slug.to_string(),
                site_root,
                source,
            }
        }
    }

    /// Generic 500, shared with the panic boundary.
    pub fn internal_response() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::MissingSlug => {
                (StatusCode::BAD_REQUEST, "Article slug is missing.").into_response()
            }
            PageError::ArticleUnavailable {
                slug,
                site_root,
                source,
            } => {
                match &source {
                    SupabaseError::NotFound { .. } => {
                        warn!("no article for slug {}, redirecting to site root", slug)
                    }
                    other => warn!(
                        "article lookup for slug {} failed, redirecting to site root: {:?}",
                        slug, other
                    ),
                }
                redirect_to(&site_root)
            }
            PageError::MalformedArticle { slug, source } => {
                error!("article record for slug {} is malformed: {:?}", slug, source);
                Self::internal_response()
            }
            PageError::Template(source) => {
                error!("article template unavailable: {:?}", source);
                Self::internal_response()
            }
        }
    }
}

/// 302 to the given absolute URL. Axum's redirect helpers answer 303 or
/// 307; the article fallback is a plain found-elsewhere.
fn redirect_to(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
