use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::infrastructure::repositories::DEFAULT_EDGE_ENDPOINT;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Expected value of the `token` header or query parameter
    pub token: String,
    pub synthesis_endpoint: String,
    pub synthesis_attempt_timeout_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            token: env::var("TOKEN").context("TOKEN must be set")?,
            synthesis_endpoint: env::var("SYNTHESIS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_EDGE_ENDPOINT.to_string()),
            synthesis_attempt_timeout_secs: env::var("SYNTHESIS_ATTEMPT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("SYNTHESIS_ATTEMPT_TIMEOUT_SECS must be a whole number of seconds")?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        if config.synthesis_attempt_timeout_secs == 0 {
            anyhow::bail!("SYNTHESIS_ATTEMPT_TIMEOUT_SECS must be greater than zero");
        }

        Ok(config)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_attempt_timeout_secs)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
