//! Configuração do anotador, carregável de TOML.
//!
//! ```toml
//! engine = "lexicon"
//! language_threshold = 0.6
//! lexicon_path = "names.json"
//!
//! [default_options]
//! omit_whitespace = true
//!
//! [extra_names]
//! places = ["Hampi", "Coorg"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::EngineKind;
use crate::error::{AnnotationError, Result};
use crate::language::DEFAULT_THRESHOLD;
use crate::options::Options;
use crate::rule_based::ExtraNames;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub engine: EngineKind,
    /// Confiança mínima para o detector de idioma devolver um código.
    pub language_threshold: f64,
    /// Opções usadas quando a requisição não traz as suas.
    pub default_options: Options,
    pub extra_names: ExtraNames,
    /// Arquivo JSON com mais nomes, no mesmo formato de `extra_names`.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            language_threshold: DEFAULT_THRESHOLD,
            default_options: Options::default(),
            extra_names: ExtraNames::default(),
            lexicon_path: None,
        }
    }
}

impl AnnotatorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| AnnotationError::configuration(format!("TOML inválido: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnnotationError::configuration(format!("não foi possível ler {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.language_threshold) {
            return Err(AnnotationError::configuration(format!(
                "language_threshold fora de [0, 1]: {}",
                self.language_threshold
            )));
        }
        Ok(())
    }
}
