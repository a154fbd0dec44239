use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

/// Process-wide settings, read once at startup.
///
/// Deliberately no `Debug` derive: the service key must never leak into
/// logs or panic messages.
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the Supabase project, e.g. `https://abc.supabase.co`.
    pub supabase_url: String,
    /// Service-role key, sent as both `apikey` and bearer token.
    pub supabase_service_key: String,
    /// Canonical public origin of the site. When unset, the origin is
    /// reconstructed from request headers.
    pub public_origin: Option<String>,
    /// Where to fetch `/article.html` from. When unset, the requesting
    /// origin doubles as the asset host.
    pub assets_base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let supabase_url = std::env::var("SUPABASE_URL")
            .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_service_key = std::env::var("SUPABASE_SERVICE_KEY")
            .map_err(|_| ConfigError::Missing("SUPABASE_SERVICE_KEY"))?;
        let public_origin = std::env::var("PUBLIC_ORIGIN").ok();
        let assets_base_url = std::env::var("ASSETS_BASE_URL").ok();

        Ok(Self {
            supabase_url,
            supabase_service_key,
            public_origin,
            assets_base_url,
        })
    }
}
