use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8350;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (salescope.toml + SALESCOPE_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SalescopeConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub report: ReportDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Defaults applied when an upload omits the optional report fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportDefaults {
    /// Fallback output directory for generated PDFs. When unset here and in
    /// the upload form, artifacts land in the working directory.
    pub output_dir: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_db_path() -> String {
    "salescope.db".to_string()
}

impl SalescopeConfig {
    /// Load config from a TOML file with SALESCOPE_* env var overrides.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(|| "salescope.toml".to_string());

        let config: SalescopeConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("SALESCOPE_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }
}
