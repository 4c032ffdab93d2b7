use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct KirConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub allowed_origins: Vec<String>,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    pub uri: Option<String>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    /// Both halves of the connection settings, or `None` when either is
    /// missing. Without them the process runs with no store: data endpoints
    /// answer 500 and `/test` reports the store as not initialized.
    pub fn connection(&self) -> Option<(&str, &str)> {
        match (self.uri.as_deref(), self.name.as_deref()) {
            (Some(uri), Some(name)) => Some((uri, name)),
            _ => None,
        }
    }
}

impl KirConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(KirConfig {
            common: common_config,
            service_name: get_env("SERVICE_NAME", Some("kir-service"), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            allowed_origins: parse_origins(&get_env("CORS_ALLOWED_ORIGINS", Some("*"), false)?),
            database: load_database(is_prod)?,
        })
    }
}

fn load_database(is_prod: bool) -> Result<DatabaseConfig, AppError> {
    if is_prod {
        return Ok(DatabaseConfig {
            uri: Some(get_env("DATABASE_URL", None, true)?),
            name: Some(get_env("DATABASE_NAME", None, true)?),
        });
    }

    Ok(DatabaseConfig {
        uri: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
        name: env::var("DATABASE_NAME").ok().filter(|v| !v.is_empty()),
    })
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
