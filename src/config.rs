use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

/// Fixed backend address used whenever we are not running in production.
pub const DEV_BACKEND_URL: &str = "http://localhost:8000";

/// Production fallback when BACKEND_SERVICE_URL is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://backend:8000";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        environment: get_env_or_default("ENVIRONMENT", "development"),
        backend_service_url: env::var("BACKEND_SERVICE_URL").ok(),
        host: get_env_or_default("HOST", "0.0.0.0"),
        port: get_env_or_default("PORT", "3000")
            .parse()
            .unwrap_or_else(|_| panic!("PORT must be a valid port number")),
    }
});

pub struct Config {
    pub environment: String,
    pub backend_service_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Backend base URL: the fixed local address in development, the
    /// BACKEND_SERVICE_URL override (or the fixed fallback) in production.
    pub fn backend_base_url(&self) -> String {
        if self.is_production() {
            self.backend_service_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
        } else {
            DEV_BACKEND_URL.to_string()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
