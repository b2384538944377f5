// ============================================================
// COMPARE CONFIGURATION
// ============================================================
// Synonym table applied to statuses before equality is decided

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Synonyms shipped with the application. The carrier reports finished
/// installations as FECHADO while the internal sheet calls the same
/// state INSTALADO.
static BUILTIN_SYNONYMS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    HashMap::from([("FECHADO".to_string(), "INSTALADO".to_string())])
});

/// Configuration for status comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Status values rewritten to a canonical form before comparing.
    /// Entries must be trimmed and uppercase; they are applied to both
    /// sides independently, never chained.
    pub synonyms: HashMap<String, String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            synonyms: BUILTIN_SYNONYMS.clone(),
        }
    }
}

impl CompareConfig {
    /// Create a new config with the built-in synonym table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with no synonym rewrites at all
    pub fn strict() -> Self {
        Self {
            synonyms: HashMap::new(),
        }
    }

    /// Canonical form of a normalized status value
    pub fn canonical<'a>(&'a self, status: &'a str) -> &'a str {
        self.synonyms
            .get(status)
            .map(String::as_str)
            .unwrap_or(status)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        for (alias, canonical) in &self.synonyms {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err("synonym entries must not be empty".to_string());
            }
            if alias != &alias.trim().to_uppercase() {
                return Err(format!("synonym '{}' must be trimmed and uppercase", alias));
            }
            if canonical != &canonical.trim().to_uppercase() {
                return Err(format!(
                    "canonical value '{}' must be trimmed and uppercase",
                    canonical
                ));
            }
        }
        Ok(())
    }
}
