use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Application configuration, loaded from `dreamai.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub enable_dashboard: bool,
    pub dashboard_host: String,
    pub dashboard_port: u16,
    pub enable_logging: bool,
    pub log_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_dashboard: false,
            dashboard_host: "127.0.0.1".to_string(),
            dashboard_port: 5000,
            enable_logging: true,
            log_dir: "logs".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with the chain: `./dreamai.toml` -> `~/dreamai.toml` -> defaults.
    pub fn load() -> Self {
        let candidates = Self::config_paths();
        for path in &candidates {
            if let Ok(contents) = fs::read_to_string(path) {
                match toml::from_str::<AppConfig>(&contents) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("dreamai.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join("dreamai.toml"));
        }
        paths
    }

    /// `host:port` the web page listens on.
    pub fn dashboard_addr(&self) -> String {
        format!("{}:{}", self.dashboard_host, self.dashboard_port)
    }
}

// ── API keys ────────────────────────────────────────────────────────────

/// Known providers and the environment variable each key is read from.
pub const PROVIDERS: [(&str, &str); 6] = [
    ("openai", "OPENAI_API_KEY"),
    ("deepseek", "DEEPSEEK_API_KEY"),
    ("vidqu", "VIDQU_API_KEY"),
    ("kling", "KLING_API_KEY"),
    ("pika", "PIKA_API_KEY"),
    ("runway", "RUNWAY_API_KEY"),
];

/// Provider name → secret. Always holds one entry per provider in [`PROVIDERS`];
/// a missing variable yields an empty string.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    keys: BTreeMap<String, String>,
}

/// Whether a provider has a non-empty key. Safe to render or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
}

impl ApiKeys {
    /// Read every provider key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the map from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let keys = PROVIDERS
            .iter()
            .map(|(provider, var)| (provider.to_string(), lookup(var).unwrap_or_default()))
            .collect();
        Self { keys }
    }

    pub fn get(&self, provider: &str) -> Option<&str> {
        self.keys.get(provider).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Configured flags in [`PROVIDERS`] order.
    pub fn statuses(&self) -> Vec<ProviderStatus> {
        PROVIDERS
            .iter()
            .map(|(provider, _)| ProviderStatus {
                name: provider.to_string(),
                configured: self.get(provider).is_some_and(|k| !k.is_empty()),
            })
            .collect()
    }
}

// Keys never show up in logs or panics.
impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (provider, key) in &self.keys {
            map.entry(provider, &if key.is_empty() { "<unset>" } else { "<redacted>" });
        }
        map.finish()
    }
}
