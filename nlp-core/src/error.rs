//! # Erros do Pipeline de Anotação
//!
//! Apenas duas situações interrompem uma chamada de anotação:
//!
//! | Variante              | Quando ocorre                                              |
//! |-----------------------|------------------------------------------------------------|
//! | `Configuration`       | Combinação esquema/unidade/opções que o motor não atende    |
//! | `EngineUnavailable`   | O motor de tagging não inicializou ou falhou durante a chamada |
//!
//! Um resultado inconclusivo (ex: idioma não identificado) **não** é erro:
//! ele aparece como [`Label::Unknown`](crate::tagger::Label::Unknown).

use thiserror::Error;

/// Erro retornado por [`Annotator::annotate`](crate::annotator::Annotator::annotate)
/// e pelos motores de tagging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// O chamador pediu algo que o motor não suporta (ex: `NameType` por sentença).
    #[error("configuração inválida: {0}")]
    Configuration(String),

    /// O motor de tagging não está disponível para esta chamada.
    #[error("motor de tagging indisponível: {0}")]
    EngineUnavailable(String),
}

impl AnnotationError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        AnnotationError::Configuration(msg.into())
    }

    pub fn engine_unavailable(msg: impl Into<String>) -> Self {
        AnnotationError::EngineUnavailable(msg.into())
    }

    /// Nome curto da variante, usado nos eventos de streaming e nas respostas HTTP.
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationError::Configuration(_) => "configuration",
            AnnotationError::EngineUnavailable(_) => "engine_unavailable",
        }
    }
}

/// Atalho para resultados do crate.
pub type Result<T> = std::result::Result<T, AnnotationError>;
