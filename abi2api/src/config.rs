//! Process configuration.
//!
//! A single JSON file listing the apps to serve, the listen port and the
//! execution service URL. Every field except `apps` has a default.

use crate::error::ApiError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_executor_url")]
    pub executor_url: String,
    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub contract_address: String,
    /// Remote URL or local path of the ABI JSON.
    pub abi_path: String,
}

fn default_port() -> u16 {
    8080
}

fn default_executor_url() -> String {
    "http://127.0.0.1:9472/execute".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            executor_url: default_executor_url(),
            apps: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Config, ApiError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| ApiError::BadConfig(e.to_string()))
    }
}

#[test]
fn minimal_config_uses_defaults() {
    let config: Config = serde_json::from_str(r#"{}"#).unwrap();
    assert_eq!(config.port, 8080);
    assert!(config.apps.is_empty());
}

#[test]
fn full_config_parses() {
    let config: Config = serde_json::from_str(
        r#"{
            "port": 9000,
            "executor_url": "http://executor.local/execute",
            "apps": [
                {
                    "name": "GXY",
                    "contract_address": "erd1qqqqqqqqqqqqqpgqsrpfn4rzp0me4qrhpguznvsjrugmzez0u7zs2a0cu0",
                    "abi_path": "gxy.abi.json"
                }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.apps.len(), 1);
    assert_eq!(config.apps[0].name, "GXY");
}
