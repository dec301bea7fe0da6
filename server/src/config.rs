use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL used when composing short links, e.g. "https://go.example.com".
    /// Never has a trailing slash. When unset, the request's Host header is used.
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let base_url = std::env::var("BASE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty());

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            base_url,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base for short URLs: the configured `BASE_URL`, else `http://<host>`.
    pub fn public_base(&self, request_host: Option<&str>) -> String {
        match (&self.base_url, request_host) {
            (Some(base), _) => base.clone(),
            (None, Some(host)) => format!("http://{}", host.trim_end_matches('/')),
            (None, None) => format!("http://localhost:{}", self.port),
        }
    }
}
