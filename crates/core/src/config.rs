use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_engine_url() -> String {
    "http://127.0.0.1:9090".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Connection settings for the external automation-engine sidecar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default = "default_engine_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// LLM credential forwarded to the engine. Never logged.
    #[serde(skip_serializing)]
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub engine: EngineConfig,
}

impl Config {
    /// Build the process configuration from the environment, once at startup.
    /// `OPENAI_API_KEY` is the only required variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("OPENAI_API_KEY is not set".to_string()))?;

        Ok(Self {
            gateway: GatewayConfig::default(),
            engine: EngineConfig {
                url: lookup("TASKPILOT_ENGINE_URL")
                    .filter(|v| !v.is_empty())
                    .map(|v| v.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_engine_url),
                model: lookup("TASKPILOT_MODEL")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(default_model),
                api_key,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let vars = env(&[]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_defaults_apply() {
        let vars = env(&[("OPENAI_API_KEY", "sk-test")]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.engine.url, "http://127.0.0.1:9090");
        assert_eq!(config.engine.model, "gpt-4o");
    }

    #[test]
    fn test_engine_url_trailing_slash_is_trimmed() {
        let vars = env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TASKPILOT_ENGINE_URL", "https://engine.internal/"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.engine.url, "https://engine.internal");
    }
}
