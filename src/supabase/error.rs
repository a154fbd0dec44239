use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("no article found for slug {slug:?}")]
    NotFound { slug: String },

    #[error("article lookup answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("article lookup request failed")]
    Transport(#[source] reqwest::Error),

    #[error("article record could not be decoded")]
    Decode(#[source] reqwest::Error),

    #[error("article record has no joined author")]
    MissingAuthor,
}

impl SupabaseError {
    /// Malformed records are a contract breach with the backend and take
    /// the internal-error path instead of the redirect fallback.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SupabaseError::Decode(_) | SupabaseError::MissingAuthor)
    }
}
