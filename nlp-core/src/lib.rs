//! # nlp-core — Anotação Linguística de Texto
//!
//! Este crate anota texto segundo cinco esquemas: idioma dominante,
//! tokenização, lemas, tipos de nome (pessoa, lugar, organização) e classes
//! gramaticais. Toda a análise fica atrás do trait [`TaggingEngine`]; o
//! [`Annotator`] só normaliza o que o motor devolve.
//!
//! ## Fluxo
//!
//! 1.  **Entrada**: texto + [`Scheme`] + [`Options`].
//! 2.  **Recorte**: a `range` opcional (em grafemas) limita o trecho analisado.
//! 3.  **Motor** ([`engine`]): devolve intervalos de bytes com tag opcional.
//! 4.  **Normalização** ([`annotator`]): grafemas, omissões, allow-list,
//!     lemas ausentes, fusão de nomes.
//! 5.  **Saída**: lista de [`Annotation`] (span + [`Label`] + trecho).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nlp_core::{Annotator, Options, Scheme};
//!
//! let annotator = Annotator::default();
//! let text = "Steve Jobs was born in California";
//!
//! let names = annotator
//!     .annotate(text, Scheme::NameType, &Options::tagging().join_names(true))
//!     .unwrap();
//!
//! for name in names {
//!     println!("{} {} -> {}", name.span, name.text, name.label);
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`annotator`]: fachada e eventos de streaming.
//! - [`engine`] / [`basic`]: os dois motores embutidos.
//! - [`tokenizer`]: segmentação UAX #29 e o divisor manual.
//! - [`language`]: detecção de idioma por escrita e stop-words.
//! - [`lexicon`] / [`rule_based`]: lemas, classes e gazetteers de nomes.

pub mod annotator;
pub mod basic;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod options;
pub mod rule_based;
pub mod span;
pub mod tagger;
pub mod tokenizer;

pub use annotator::{AnnotationEvent, Annotator};
pub use config::AnnotatorConfig;
pub use engine::{build_engine, EngineKind, LexiconEngine, TaggingEngine};
pub use basic::BasicEngine;
pub use error::{AnnotationError, Result};
pub use language::{LanguageDetector, LanguageHypothesis};
pub use options::Options;
pub use span::{GraphemeIndex, Span};
pub use tagger::{Annotation, Label, LexicalClass, NameKind, RawTag, Scheme};
pub use tokenizer::{Token, TokenKind, TokenUnit};
