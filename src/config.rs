// ⚙️ Parser configuration - extra modality aliases as data
//
// {
//   "aliases": { "CENT": "CENTENA", "MIL": "MILHAR", "BICHO": "GRUPO" }
// }

use crate::modality::{Modality, ModalityResolver};
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Env var the CLI reads the alias file path from
pub const ALIASES_FILE_ENV: &str = "PANDA_ALIASES_FILE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Extra alias token → canonical modality label
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl ParserConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read parser config: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse parser config JSON")
    }

    /// Built-in resolver extended with the configured aliases
    ///
    /// Every alias must point at a canonical label ("CENTENA", "DEZENA ESQ", ...).
    pub fn resolver(&self) -> Result<ModalityResolver> {
        let mut resolver = ModalityResolver::new();

        for (token, target) in &self.aliases {
            let modality = Modality::from_canonical(target).with_context(|| {
                format!("Alias {:?} points at unknown modality {:?}", token, target)
            })?;
            resolver.add_alias(token, modality);
        }

        Ok(resolver)
    }
}

// ============================================================================
// TESTS
// ============================================================================
