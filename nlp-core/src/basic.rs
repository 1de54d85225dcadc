//! Backend mínimo: detecção de idioma e tokenização com o divisor manual
//! [`segment_standard`], sem léxico.
//!
//! Os tokens saem sem tag, então o `Annotator` os rotula como
//! [`Label::Unlabeled`](crate::tagger::Label::Unlabeled).

use tracing::debug;

use crate::engine::{language_tag, TaggingEngine};
use crate::error::{AnnotationError, Result};
use crate::language::{LanguageDetector, LanguageHypothesis};
use crate::tagger::{RawTag, Scheme};
use crate::tokenizer::{segment_standard, TokenKind, TokenUnit};

#[derive(Debug, Clone, Default)]
pub struct BasicEngine {
    detector: LanguageDetector,
}

impl BasicEngine {
    pub fn new(detector: LanguageDetector) -> Self {
        Self { detector }
    }
}

impl TaggingEngine for BasicEngine {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn supports(&self, scheme: Scheme, unit: TokenUnit) -> bool {
        match scheme {
            Scheme::LanguageDetection => true,
            Scheme::Tokenization => matches!(unit, TokenUnit::Word | TokenUnit::Document),
            _ => false,
        }
    }

    fn tag(&self, text: &str, scheme: Scheme, unit: TokenUnit) -> Result<Vec<RawTag>> {
        if !self.supports(scheme, unit) {
            return Err(AnnotationError::configuration(format!(
                "motor basic não suporta {scheme} com unidade {}",
                unit.name()
            )));
        }
        if text.is_empty() {
            return Ok(vec![]);
        }
        match (scheme, unit) {
            (Scheme::LanguageDetection, _) => Ok(language_tag(&self.detector, text)),
            (_, TokenUnit::Document) => Ok(vec![RawTag::new(0..text.len(), None, TokenKind::Word)]),
            _ => {
                let tokens = segment_standard(text);
                debug!(tokens = tokens.len(), "divisor manual");
                Ok(tokens
                    .into_iter()
                    .map(|t| RawTag::new(t.start..t.end, None, t.kind))
                    .collect())
            }
        }
    }

    fn language_hypotheses(&self, text: &str, max: usize) -> Result<Vec<LanguageHypothesis>> {
        Ok(self.detector.hypotheses(text, max))
    }
}
