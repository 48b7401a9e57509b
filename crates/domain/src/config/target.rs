use serde::{Deserialize, Serialize};

/// Resolver under test
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Host name or IP literal (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// UDP port (default: 256)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-query reply timeout in milliseconds (default: 5000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    256
}

fn default_timeout_ms() -> u64 {
    5000
}
