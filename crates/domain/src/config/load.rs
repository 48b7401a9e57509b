use serde::{Deserialize, Serialize};

/// Load shape of a run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoadConfig {
    /// Names to query; duplicates multiply load
    #[serde(default = "default_names")]
    pub names: Vec<String>,

    /// Sequential queries per name (default: 1)
    #[serde(default = "default_repeat")]
    pub repeat: u32,

    /// Maximum number of names dispatched at once.
    /// Unset means every name runs concurrently.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            names: default_names(),
            repeat: default_repeat(),
            max_concurrency: None,
        }
    }
}

fn default_names() -> Vec<String> {
    vec!["google.com".to_string()]
}

fn default_repeat() -> u32 {
    1
}
