use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template fetch failed")]
    Fetch(#[source] reqwest::Error),

    #[error("template fetch answered {status}")]
    Status { status: StatusCode },
}
