use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub reports: ReportConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fixed API root every request path is joined onto (e.g. `http://host/api`)
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the two credential files
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PROFISSIONAIS_API_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("PROFISSIONAIS_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("PROFISSIONAIS_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("PROFISSIONAIS_CONFIG_DIR") {
            self.storage.config_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PROFISSIONAIS_REPORT_DIR") {
            self.reports.output_dir = PathBuf::from(v);
        }

        self
    }

    /// Configuration pointing at an explicit API root, used by embedders and tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = base_url.into().trim_end_matches('/').to_string();
        config
    }

    fn default_config_dir() -> PathBuf {
        match env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config").join("profissionais"),
            Err(_) => PathBuf::from(".profissionais"),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                request_timeout_secs: 30,
                enable_request_logging: true,
            },
            storage: StorageConfig {
                config_dir: Self::default_config_dir(),
            },
            reports: ReportConfig {
                output_dir: PathBuf::from("."),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.example.com/api".to_string(),
                request_timeout_secs: 20,
                enable_request_logging: true,
            },
            storage: StorageConfig {
                config_dir: Self::default_config_dir(),
            },
            reports: ReportConfig {
                output_dir: PathBuf::from("."),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://app.example.com/api".to_string(),
                request_timeout_secs: 15,
                enable_request_logging: false,
            },
            storage: StorageConfig {
                config_dir: Self::default_config_dir(),
            },
            reports: ReportConfig {
                output_dir: PathBuf::from("."),
            },
        }
    }
}

// Global config for the binary - library types take an explicit &AppConfig
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert!(config.api.enable_request_logging);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.api.request_timeout_secs, 15);
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = AppConfig::with_base_url("http://127.0.0.1:9000/api/");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
    }
}
