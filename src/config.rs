use crate::crops::DEFAULT_MODEL;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub app_name: String,
    pub deployment: String,
    pub api_base_url: String, // Base URL the client sends requests to
    pub port: u16,            // Port the recommendation service listens on
    pub default_model: String,
    pub log_format: LogFormat,
    pub tests_running: bool, // Flag to indicate if tests are running
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PORT: u16 = 5001;

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available

        Config {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "cropwise-api".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            api_base_url: env::var("CROPWISE_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            default_model: env::var("DEFAULT_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            log_format: env::var("LOG_FORMAT")
                .map(|s| LogFormat::from_env_value(&s))
                .unwrap_or(LogFormat::Pretty),
            tests_running: false, // Always false if using Config from_env
        }
    }

    pub fn for_tests() -> Self {
        Config {
            app_name: "cropwise-api-test".to_string(),
            deployment: "test".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: 0,
            default_model: DEFAULT_MODEL.to_string(),
            log_format: LogFormat::Pretty,
            tests_running: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["CROPWISE_API_URL", "PORT", "DEFAULT_MODEL", "LOG_FORMAT"] {
            // SAFETY: env-mutating tests are serialized
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.default_model, "best_overall");
        assert!(!config.tests_running);
    }

    #[test]
    #[serial]
    fn test_reads_environment() {
        clear_env();
        unsafe {
            env::set_var("CROPWISE_API_URL", "https://crops.example.org/api");
            env::set_var("PORT", "8080");
            env::set_var("LOG_FORMAT", "JSON");
        }
        let config = Config::from_env();
        assert_eq!(config.api_base_url, "https://crops.example.org/api");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back_to_default() {
        clear_env();
        unsafe { env::set_var("PORT", "not-a-port") };
        assert_eq!(Config::from_env().port, DEFAULT_PORT);
        clear_env();
    }
}
