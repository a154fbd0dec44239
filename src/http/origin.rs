use axum::http::{header, HeaderMap};

/// The scheme-plus-authority base that every absolute URL on the page is
/// built from.
///
/// A configured public origin wins; otherwise the origin is reconstructed
/// from the forwarded proto and the Host header of the request.
#[derive(Debug, Clone)]
pub struct Origin(String);

impl Origin {
    pub fn from_request(headers: &HeaderMap, public_origin: Option<&str>) -> Self {
        if let Some(origin) = public_origin {
            return Self(origin.trim_end_matches('/').to_string());
        }

        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("http");
        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");

        Self(format!("{proto}://{host}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL of the site root, the redirect target for unavailable
    /// articles.
    pub fn site_root(&self) -> String {
        format!("{}/", self.0)
    }

    /// Canonical URL of one article page.
    pub fn page_url(&self, slug: &str) -> String {
        format!("{}/article/{}", self.0, slug)
    }
}
