// ============================================================
// APPLICATION CONFIGURATION
// ============================================================
// Layered configuration: built-in defaults, then statusdiff.toml,
// then STATUSDIFF_* environment variables

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::protocol::{CompareConfig, SourceLayout};

/// Where the HTTP shell listens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,

    /// Column layout of the carrier CSV
    pub carrier: SourceLayout,

    /// Column layout of the internal XLSX
    pub internal: SourceLayout,

    /// Status comparison settings
    pub compare: CompareConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            carrier: SourceLayout::carrier(),
            internal: SourceLayout::internal(),
            compare: CompareConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, overridden by `statusdiff.toml`,
    /// overridden by `STATUSDIFF_*` environment variables
    /// (nested keys split on `__`, e.g. STATUSDIFF_SERVER__PORT=8080)
    pub fn load() -> Result<Self> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("statusdiff.toml"))
            .merge(Env::prefixed("STATUSDIFF_").split("__"))
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Reject layouts and synonym tables that could never match a sheet
    pub fn validate(&self) -> Result<()> {
        self.carrier.validate().map_err(AppError::Config)?;
        self.internal.validate().map_err(AppError::Config)?;
        self.compare.validate().map_err(AppError::Config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_known_exports() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.carrier.protocol_column, 2);
        assert_eq!(config.carrier.status_column, 19);
        assert_eq!(config.internal.protocol_column, 3);
        assert_eq!(config.internal.status_column, 0);
        assert_eq!(
            config.compare.synonyms.get("FECHADO").map(String::as_str),
            Some("INSTALADO")
        );
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_layout_with_overlapping_columns() {
        let mut config = AppConfig::default();
        config.carrier.status_column = config.carrier.protocol_column;

        assert!(matches!(
            config.validate().unwrap_err(),
            AppError::Config(_)
        ));
    }

    #[test]
    fn test_rejects_lowercase_synonym_entries() {
        let mut config = AppConfig::default();
        config
            .compare
            .synonyms
            .insert("fechado".to_string(), "INSTALADO".to_string());

        assert!(matches!(
            config.validate().unwrap_err(),
            AppError::Config(_)
        ));
    }
}
