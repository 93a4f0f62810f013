//! Engine configuration
//!
//! Deserializable settings for the completion engine: the result cap and the
//! per-filetype boundary patterns that seed the trigger table. Patterns are
//! compiled (and rejected) at engine construction, not at query time.

use std::collections::HashMap;

use serde::Deserialize;

use crate::completion::query::TriggerTable;
use crate::error::ConfigError;

/// Maximum ranked results pushed to the native list and the overlay.
pub const DEFAULT_MAX_RESULTS: usize = 8;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Upper bound on ranked results per pass.
    pub max_results: usize,

    /// Filetype → boundary pattern (characters that terminate a token).
    /// Filetypes without an entry fall back to the default boundary.
    pub triggers: HashMap<String, String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        let mut triggers = HashMap::new();
        // TODO: populate per-language entries from language-server trigger
        // character registration once semantic sources exist.
        triggers.insert("javascript".to_string(), r"[^\w$\-]".to_string());
        Self { max_results: DEFAULT_MAX_RESULTS, triggers }
    }
}

impl CompletionConfig {
    /// Compile the configured patterns into a [`TriggerTable`].
    pub fn trigger_table(&self) -> Result<TriggerTable, ConfigError> {
        let mut table = TriggerTable::empty();
        for (filetype, pattern) in &self.triggers {
            table
                .register(filetype, pattern)
                .map_err(|source| ConfigError::InvalidTrigger {
                    filetype: filetype.clone(),
                    source,
                })?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_compiles() {
        let config = CompletionConfig::default();
        assert_eq!(config.max_results, 8);
        let table = config.trigger_table().unwrap();
        assert!(table.has_entry("javascript"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let mut config = CompletionConfig::default();
        config.triggers.insert("python".to_string(), "[unclosed".to_string());
        let err = config.trigger_table().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTrigger { ref filetype, .. } if filetype == "python"));
    }

    #[test]
    fn deserialize_overrides_defaults() {
        let config: CompletionConfig =
            serde_json::from_str(r#"{ "max_results": 4 }"#).unwrap();
        assert_eq!(config.max_results, 4);
        assert!(config.triggers.contains_key("javascript"));
    }
}
