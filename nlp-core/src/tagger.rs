//! # Esquemas de Anotação, Rótulos e Resultados
//!
//! Define o vocabulário comum entre o [`Annotator`](crate::annotator::Annotator)
//! e os motores de tagging:
//!
//! | Esquema             | Rótulos                                             | Exemplo                 |
//! |---------------------|-----------------------------------------------------|-------------------------|
//! | `LanguageDetection` | código de idioma ou `unknown`                       | "en", "kn", "hi"        |
//! | `Tokenization`      | [`TokenKind`](crate::tokenizer::TokenKind)          | "word", "emoji"         |
//! | `Lemmatization`     | a forma canônica da palavra                         | "runs" → "run"          |
//! | `NameType`          | [`NameKind`]                                        | "Steve" → PersonalName  |
//! | `LexicalClass`      | [`LexicalClass`]                                    | "the" → Determiner      |
//!
//! Cada esquema tem seu próprio vocabulário; rótulos de esquemas diferentes
//! não são intercambiáveis.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::span::{GraphemeIndex, Span};
use crate::tokenizer::TokenKind;

/// O tipo de análise linguística pedida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Idioma dominante do texto inteiro.
    #[serde(alias = "language")]
    LanguageDetection,
    /// Segmentação com classificação do tipo de token.
    #[serde(alias = "token_type")]
    Tokenization,
    /// Forma canônica (raiz) de cada palavra.
    #[serde(alias = "lemma")]
    Lemmatization,
    /// Pessoas, lugares e organizações.
    NameType,
    /// Classe gramatical (part-of-speech).
    LexicalClass,
}

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::LanguageDetection => "language",
            Scheme::Tokenization => "token_type",
            Scheme::Lemmatization => "lemma",
            Scheme::NameType => "name_type",
            Scheme::LexicalClass => "lexical_class",
        }
    }

    pub fn all() -> [Scheme; 5] {
        [
            Scheme::LanguageDetection,
            Scheme::Tokenization,
            Scheme::Lemmatization,
            Scheme::NameType,
            Scheme::LexicalClass,
        ]
    }

    /// Aceita tanto o nome curto ("lemma") quanto o snake_case da variante.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "language" | "language_detection" => Some(Scheme::LanguageDetection),
            "token_type" | "tokenization" => Some(Scheme::Tokenization),
            "lemma" | "lemmatization" => Some(Scheme::Lemmatization),
            "name_type" => Some(Scheme::NameType),
            "lexical_class" => Some(Scheme::LexicalClass),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tipos de nome reconhecidos pelo esquema `NameType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NameKind {
    /// **Pessoa**: "Steve Jobs", "PV Sindhu".
    #[serde(alias = "person")]
    PersonalName,
    /// **Lugar**: "California", "San Francisco", "Mysuru".
    #[serde(alias = "place")]
    PlaceName,
    /// **Organização**: "Apple Inc", "ISRO".
    #[serde(alias = "organization")]
    OrganizationName,
}

impl NameKind {
    /// Nome do rótulo como aparece nas anotações.
    pub fn name(&self) -> &'static str {
        match self {
            NameKind::PersonalName => "PersonalName",
            NameKind::PlaceName => "PlaceName",
            NameKind::OrganizationName => "OrganizationName",
        }
    }

    pub fn all() -> [NameKind; 3] {
        [
            NameKind::PersonalName,
            NameKind::PlaceName,
            NameKind::OrganizationName,
        ]
    }

    /// Aceita os nomes dos rótulos e os apelidos curtos ("person", "place", "organization").
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "PersonalName" | "person" => Some(NameKind::PersonalName),
            "PlaceName" | "place" => Some(NameKind::PlaceName),
            "OrganizationName" | "organization" => Some(NameKind::OrganizationName),
            _ => None,
        }
    }
}

/// Classes gramaticais do esquema `LexicalClass`.
///
/// Inclui classes para pontuação e espaço, de modo que todo token de palavra
/// recebe exatamente uma classe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Particle,
    Preposition,
    Number,
    Conjunction,
    Interjection,
    Classifier,
    Idiom,
    OtherWord,
    SentenceTerminator,
    OpenQuote,
    CloseQuote,
    OpenParenthesis,
    CloseParenthesis,
    WordJoiner,
    Dash,
    OtherPunctuation,
    ParagraphBreak,
    OtherWhitespace,
}

impl LexicalClass {
    pub fn name(&self) -> &'static str {
        match self {
            LexicalClass::Noun => "Noun",
            LexicalClass::Verb => "Verb",
            LexicalClass::Adjective => "Adjective",
            LexicalClass::Adverb => "Adverb",
            LexicalClass::Pronoun => "Pronoun",
            LexicalClass::Determiner => "Determiner",
            LexicalClass::Particle => "Particle",
            LexicalClass::Preposition => "Preposition",
            LexicalClass::Number => "Number",
            LexicalClass::Conjunction => "Conjunction",
            LexicalClass::Interjection => "Interjection",
            LexicalClass::Classifier => "Classifier",
            LexicalClass::Idiom => "Idiom",
            LexicalClass::OtherWord => "OtherWord",
            LexicalClass::SentenceTerminator => "SentenceTerminator",
            LexicalClass::OpenQuote => "OpenQuote",
            LexicalClass::CloseQuote => "CloseQuote",
            LexicalClass::OpenParenthesis => "OpenParenthesis",
            LexicalClass::CloseParenthesis => "CloseParenthesis",
            LexicalClass::WordJoiner => "WordJoiner",
            LexicalClass::Dash => "Dash",
            LexicalClass::OtherPunctuation => "OtherPunctuation",
            LexicalClass::ParagraphBreak => "ParagraphBreak",
            LexicalClass::OtherWhitespace => "OtherWhitespace",
        }
    }
}

impl std::fmt::Display for LexicalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rótulo de uma anotação.
///
/// Os dois sentinelas são variantes explícitas para que "analisado, sem
/// resposta confiável" (`Unknown`) nunca se confunda com "este esquema não
/// tem classificador" (`Unlabeled`) nem com um valor real.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Label {
    Value(String),
    Unknown,
    Unlabeled,
}

impl Label {
    /// Texto exibido para o sentinela `Unknown`.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn value(s: impl Into<String>) -> Self {
        Label::Value(s.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Label::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Value(s) => s,
            Label::Unknown => Self::UNKNOWN,
            Label::Unlabeled => "",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Saída crua de um motor: intervalo de **bytes**, tag opcional e tipo do token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTag {
    pub range: Range<usize>,
    pub tag: Option<String>,
    pub kind: TokenKind,
}

impl RawTag {
    pub fn new(range: Range<usize>, tag: Option<String>, kind: TokenKind) -> Self {
        Self { range, tag, kind }
    }
}

/// Um resultado do pipeline: trecho do texto + rótulo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub span: Span,
    pub label: Label,
    /// Substring do texto original coberta por `span`.
    pub text: String,
}

impl Annotation {
    pub fn new(source: &str, index: &GraphemeIndex, span: Span, label: Label) -> Self {
        Self {
            span,
            label,
            text: index.slice(source, span).to_string(),
        }
    }
}

/// Junta anotações consecutivas com o mesmo rótulo em uma só.
///
/// Duas anotações são "consecutivas" quando só há espaço em branco entre elas
/// no texto original. É a máquina de estados do BIO sem as tags B/I: cada
/// troca de rótulo (ou trecho não-branco no meio) fecha a entidade corrente.
///
/// # Exemplo
/// `[Steve/PersonalName, Jobs/PersonalName, California/PlaceName]`
/// → `[Steve Jobs/PersonalName, California/PlaceName]`
pub fn join_adjacent(annotations: Vec<Annotation>, source: &str, index: &GraphemeIndex) -> Vec<Annotation> {
    let mut joined: Vec<Annotation> = Vec::with_capacity(annotations.len());

    for ann in annotations {
        if let Some(last) = joined.last_mut() {
            let gap = index.slice(source, Span::new(last.span.end, ann.span.start.max(last.span.end)));
            let contiguous = ann.span.start >= last.span.end && gap.chars().all(char::is_whitespace);
            if contiguous && last.label == ann.label {
                last.span = Span::new(last.span.start, ann.span.end);
                last.text = index.slice(source, last.span).to_string();
                continue;
            }
        }
        joined.push(ann);
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_names_roundtrip() {
        for scheme in Scheme::all() {
            assert_eq!(Scheme::from_name(scheme.name()), Some(scheme));
        }
        assert_eq!(Scheme::from_name("pos"), None);
    }

    #[test]
    fn test_name_kind_aliases() {
        assert_eq!(NameKind::from_name("person"), Some(NameKind::PersonalName));
        assert_eq!(NameKind::from_name("PlaceName"), Some(NameKind::PlaceName));
        assert_eq!(NameKind::from_name("city"), None);
    }

    #[test]
    fn test_label_sentinels_are_distinct() {
        assert_eq!(Label::Unknown.as_str(), "unknown");
        assert_eq!(Label::Unlabeled.as_str(), "");
        assert_ne!(Label::Unknown, Label::value("unknown"));
        assert!(Label::Unknown.is_unknown());
        assert!(!Label::value("en").is_unknown());
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&Label::value("en")).unwrap();
        assert_eq!(json, r#"{"kind":"value","value":"en"}"#);
        let json = serde_json::to_string(&Label::Unknown).unwrap();
        assert_eq!(json, r#"{"kind":"unknown"}"#);
    }

    #[test]
    fn test_join_adjacent() {
        let text = "Steve Jobs, California";
        let index = GraphemeIndex::new(text);
        let person = Label::value("PersonalName");
        let place = Label::value("PlaceName");
        let anns = vec![
            Annotation::new(text, &index, Span::new(0, 5), person.clone()),
            Annotation::new(text, &index, Span::new(6, 10), person.clone()),
            Annotation::new(text, &index, Span::new(12, 22), place.clone()),
        ];
        let joined = join_adjacent(anns, text, &index);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].text, "Steve Jobs");
        assert_eq!(joined[0].span, Span::new(0, 10));
        assert_eq!(joined[1].text, "California");
    }

    #[test]
    fn test_join_adjacent_stops_at_punctuation() {
        let text = "Delhi, Bengaluru";
        let index = GraphemeIndex::new(text);
        let place = Label::value("PlaceName");
        let anns = vec![
            Annotation::new(text, &index, Span::new(0, 5), place.clone()),
            Annotation::new(text, &index, Span::new(7, 16), place.clone()),
        ];
        assert_eq!(join_adjacent(anns, text, &index).len(), 2);
    }
}
