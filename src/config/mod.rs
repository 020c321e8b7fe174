/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub page_url: String,
    pub refresh_every_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("LAUNCH_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Absolute page URL embedded in share text, so share targets that
        // only honor a text field still carry the link.
        let page_url =
            env::var("PAGE_URL").unwrap_or_else(|_| "http://localhost:3000/".to_string());

        let refresh_every_seconds = env_u64("REFRESH_EVERY_SECONDS", 300);

        Ok(Self {
            api_base_url,
            bind_addr,
            page_url,
            refresh_every_seconds,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
