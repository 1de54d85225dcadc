//! # Motores de Tagging
//!
//! O [`Annotator`](crate::annotator::Annotator) não faz análise linguística
//! nenhuma: ele delega para um [`TaggingEngine`] e normaliza a saída. Qualquer
//! backend que implemente o trait pode ser plugado.
//!
//! ## Backends embutidos
//!
//! | Backend           | Esquemas                                   | Unidades                 |
//! |-------------------|--------------------------------------------|--------------------------|
//! | [`LexiconEngine`] | todos                                      | Word (todas p/ tokens)   |
//! | [`BasicEngine`]   | `LanguageDetection`, `Tokenization`        | Word, Document           |
//!
//! O backend é escolhido em tempo de configuração via [`EngineKind`], não em
//! tempo de compilação.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::basic::BasicEngine;
use crate::config::AnnotatorConfig;
use crate::error::{AnnotationError, Result};
use crate::language::{LanguageDetector, LanguageHypothesis};
use crate::lexicon::Lexicon;
use crate::rule_based::{ExtraNames, NameRules};
use crate::tagger::{RawTag, Scheme};
use crate::tokenizer::{segment, TokenKind, TokenUnit};

/// Capacidade de tagging consumida pelo [`Annotator`](crate::annotator::Annotator).
///
/// Contrato:
/// - `tag` recebe o texto já recortado e devolve pares (intervalo de **bytes**,
///   tag opcional) em ordem de texto, cobrindo o texto inteiro.
/// - Para `LanguageDetection`, no máximo um `RawTag` cobrindo o texto todo;
///   `tag: None` significa "analisado, sem idioma confiável".
/// - `supports` precisa ser consistente com `tag`: o Annotator só chama `tag`
///   para combinações suportadas.
pub trait TaggingEngine: Send + Sync {
    /// Nome curto do backend (para logs e respostas HTTP).
    fn name(&self) -> &'static str;

    fn supports(&self, scheme: Scheme, unit: TokenUnit) -> bool;

    fn tag(&self, text: &str, scheme: Scheme, unit: TokenUnit) -> Result<Vec<RawTag>>;

    /// Até `max` hipóteses de idioma, da mais provável para a menos provável.
    fn language_hypotheses(&self, text: &str, max: usize) -> Result<Vec<LanguageHypothesis>>;
}

/// Seleção do backend em tempo de configuração.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Léxico + gazetteers + segmentação Unicode.
    #[default]
    Lexicon,
    /// Backend legado: só idioma e tokens, com o divisor manual.
    Basic,
}

impl EngineKind {
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Lexicon => "lexicon",
            EngineKind::Basic => "basic",
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lexicon" => Ok(EngineKind::Lexicon),
            "basic" => Ok(EngineKind::Basic),
            other => Err(AnnotationError::configuration(format!(
                "motor desconhecido: {other} (use \"lexicon\" ou \"basic\")"
            ))),
        }
    }
}

/// Constrói o backend descrito pela configuração.
///
/// Falhas ao carregar recursos (ex: arquivo de léxico extra ilegível) viram
/// [`AnnotationError::EngineUnavailable`].
pub fn build_engine(config: &AnnotatorConfig) -> Result<Arc<dyn TaggingEngine>> {
    let detector = LanguageDetector::new(config.language_threshold);
    let engine: Arc<dyn TaggingEngine> = match config.engine {
        EngineKind::Lexicon => {
            let mut extra = config.extra_names.clone();
            if let Some(path) = &config.lexicon_path {
                let loaded = load_extra_names(path)?;
                extra.persons.extend(loaded.persons);
                extra.places.extend(loaded.places);
                extra.organizations.extend(loaded.organizations);
            }
            Arc::new(LexiconEngine::with_names(detector, &extra))
        }
        EngineKind::Basic => {
            if config.lexicon_path.is_some() || !config.extra_names.is_empty() {
                info!("motor basic ignora nomes extras e lexicon_path");
            }
            Arc::new(BasicEngine::new(detector))
        }
    };
    info!(engine = engine.name(), "motor de tagging pronto");
    Ok(engine)
}

fn load_extra_names(path: &std::path::Path) -> Result<ExtraNames> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AnnotationError::engine_unavailable(format!("não foi possível ler {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AnnotationError::engine_unavailable(format!("léxico inválido em {}: {e}", path.display()))
    })
}

/// Backend completo: léxico inglês, gazetteers de nomes e segmentação UAX #29.
#[derive(Debug, Clone)]
pub struct LexiconEngine {
    detector: LanguageDetector,
    lexicon: Lexicon,
    names: NameRules,
}

impl LexiconEngine {
    pub fn new(detector: LanguageDetector) -> Self {
        Self {
            detector,
            lexicon: Lexicon::build(),
            names: NameRules::build(),
        }
    }

    pub fn with_names(detector: LanguageDetector, extra: &ExtraNames) -> Self {
        let mut engine = Self::new(detector);
        engine.names.extend(extra);
        engine
    }
}

impl Default for LexiconEngine {
    fn default() -> Self {
        Self::new(LanguageDetector::default())
    }
}

impl TaggingEngine for LexiconEngine {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn supports(&self, scheme: Scheme, unit: TokenUnit) -> bool {
        match scheme {
            Scheme::LanguageDetection | Scheme::Tokenization => true,
            Scheme::Lemmatization | Scheme::NameType | Scheme::LexicalClass => unit == TokenUnit::Word,
        }
    }

    fn tag(&self, text: &str, scheme: Scheme, unit: TokenUnit) -> Result<Vec<RawTag>> {
        if text.is_empty() {
            return Ok(vec![]);
        }
        let tokens = segment(text, unit);
        debug!(scheme = %scheme, unit = unit.name(), tokens = tokens.len(), "texto segmentado");

        let tags: Vec<Option<String>> = match scheme {
            Scheme::LanguageDetection => return Ok(language_tag(&self.detector, text)),
            Scheme::Tokenization => tokens
                .iter()
                .map(|t| (unit == TokenUnit::Word).then(|| t.kind.name().to_string()))
                .collect(),
            Scheme::Lemmatization => tokens
                .iter()
                .map(|t| match t.kind {
                    TokenKind::Word => self.lexicon.lemma(&t.text),
                    _ => None,
                })
                .collect(),
            Scheme::NameType => {
                let matches = self.names.apply(&tokens);
                tokens
                    .iter()
                    .zip(matches)
                    .map(|(t, m)| match (m, t.kind) {
                        (Some(m), _) => Some(m.kind.name().to_string()),
                        (None, TokenKind::Word) => Some("OtherWord".to_string()),
                        (None, _) => None,
                    })
                    .collect()
            }
            Scheme::LexicalClass => self
                .lexicon
                .lexical_classes(&tokens)
                .into_iter()
                .map(|c| Some(c.name().to_string()))
                .collect(),
        };

        Ok(tokens
            .into_iter()
            .zip(tags)
            .map(|(t, tag)| RawTag::new(t.start..t.end, tag, t.kind))
            .collect())
    }

    fn language_hypotheses(&self, text: &str, max: usize) -> Result<Vec<LanguageHypothesis>> {
        Ok(self.detector.hypotheses(text, max))
    }
}

/// Um único tag cobrindo o texto: o idioma dominante ou `None` (inconclusivo).
pub(crate) fn language_tag(detector: &LanguageDetector, text: &str) -> Vec<RawTag> {
    vec![RawTag::new(
        0..text.len(),
        detector.dominant_language(text),
        TokenKind::Word,
    )]
}
