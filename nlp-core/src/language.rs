//! # Detecção de Idioma Dominante
//!
//! Estratégia em duas etapas, sem modelos estatísticos:
//!
//! 1. **Censo de escritas**: cada letra do texto é atribuída a uma escrita
//!    Unicode (Latina, Kannada, Devanagari, Hangul...). A escrita com mais
//!    letras vence. Para escritas usadas por praticamente um só idioma o código
//!    sai direto (Kannada → `kn`).
//! 2. **Perfis de stop-words**: quando vence a escrita latina, as palavras são
//!    comparadas com listas de palavras funcionais de cada idioma.
//!
//! O resultado é uma lista de hipóteses `(código, probabilidade)`. O idioma
//! dominante só é declarado quando a melhor hipótese passa do limiar de
//! confiança; caso contrário o resultado é **inconclusivo** (texto só com
//! emojis, números, ou algo como "ssssssssssss").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Limiar padrão de confiança para declarar um idioma dominante.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Uma hipótese de idioma com sua probabilidade (0.0 a 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageHypothesis {
    pub language: String,
    pub probability: f64,
}

/// Escritas reconhecidas pelo censo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Script {
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Georgian,
    Hangul,
    Kana,
    Han,
}

impl Script {
    fn of(c: char) -> Option<Script> {
        let script = match c as u32 {
            0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F | 0x1E00..=0x1EFF => Script::Latin,
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
            0x0400..=0x052F => Script::Cyrillic,
            0x0530..=0x058F => Script::Armenian,
            0x0590..=0x05FF => Script::Hebrew,
            0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
            0x0900..=0x097F => Script::Devanagari,
            0x0980..=0x09FF => Script::Bengali,
            0x0A00..=0x0A7F => Script::Gurmukhi,
            0x0A80..=0x0AFF => Script::Gujarati,
            0x0B00..=0x0B7F => Script::Oriya,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0C00..=0x0C7F => Script::Telugu,
            0x0C80..=0x0CFF => Script::Kannada,
            0x0D00..=0x0D7F => Script::Malayalam,
            0x0D80..=0x0DFF => Script::Sinhala,
            0x0E00..=0x0E7F => Script::Thai,
            0x10A0..=0x10FF => Script::Georgian,
            0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Hangul,
            0x3040..=0x30FF => Script::Kana,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF => Script::Han,
            _ => return None,
        };
        Some(script)
    }

    /// Idioma associado a uma escrita usada (quase) por um só idioma.
    fn sole_language(&self) -> Option<&'static str> {
        match self {
            Script::Latin | Script::Cyrillic | Script::Arabic | Script::Han | Script::Kana => None,
            Script::Greek => Some("el"),
            Script::Armenian => Some("hy"),
            Script::Hebrew => Some("he"),
            Script::Devanagari => Some("hi"),
            Script::Bengali => Some("bn"),
            Script::Gurmukhi => Some("pa"),
            Script::Gujarati => Some("gu"),
            Script::Oriya => Some("or"),
            Script::Tamil => Some("ta"),
            Script::Telugu => Some("te"),
            Script::Kannada => Some("kn"),
            Script::Malayalam => Some("ml"),
            Script::Sinhala => Some("si"),
            Script::Thai => Some("th"),
            Script::Georgian => Some("ka"),
            Script::Hangul => Some("ko"),
        }
    }
}

/// Palavras funcionais por idioma (minúsculas).
const STOPWORDS: &[(&str, &[&str])] = &[
    ("en", &[
        "the", "of", "and", "to", "in", "is", "was", "are", "a", "an", "that", "it",
        "for", "on", "with", "as", "by", "at", "from", "he", "she", "his", "her",
        "i", "you", "we", "they", "not", "be", "this", "but", "or", "have", "has",
        "had", "am", "could", "would", "your", "my", "their", "between", "except",
    ]),
    ("pt", &[
        "o", "a", "os", "as", "de", "do", "da", "dos", "das", "em", "no", "na",
        "que", "é", "um", "uma", "para", "com", "não", "por", "se", "foi", "ao",
        "mais", "mas", "pelo", "pela", "seu", "sua", "ele", "ela", "são",
    ]),
    ("es", &[
        "el", "la", "los", "las", "de", "del", "en", "que", "es", "un", "una",
        "por", "con", "no", "para", "se", "al", "lo", "su", "como", "pero", "fue",
        "y", "muy", "está", "son",
    ]),
    ("fr", &[
        "le", "la", "les", "de", "des", "du", "un", "une", "et", "est", "en",
        "que", "qui", "dans", "pour", "pas", "sur", "au", "aux", "avec", "ce",
        "il", "elle", "je", "nous", "vous", "ils", "sont",
    ]),
    ("de", &[
        "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "zu", "den",
        "dem", "mit", "von", "auf", "für", "sich", "des", "auch", "es", "ich",
        "sie", "wir", "sind", "war",
    ]),
    ("it", &[
        "il", "lo", "la", "gli", "le", "di", "del", "della", "che", "è", "un",
        "una", "per", "con", "non", "sono", "nel", "nella", "anche", "ma", "e",
    ]),
];

/// Detector de idioma baseado em escritas e stop-words.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    threshold: f64,
}

impl LanguageDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Idioma dominante, ou `None` quando o resultado é inconclusivo.
    pub fn dominant_language(&self, text: &str) -> Option<String> {
        let best = self.hypotheses(text, 1).into_iter().next()?;
        if best.probability >= self.threshold {
            Some(best.language)
        } else {
            debug!(
                candidate = %best.language,
                probability = best.probability,
                "idioma abaixo do limiar de confiança"
            );
            None
        }
    }

    /// Até `max` hipóteses, ordenadas da mais para a menos provável.
    ///
    /// As probabilidades somam no máximo 1.0; a parte que falta é a massa
    /// atribuída a "nenhum idioma conhecido".
    pub fn hypotheses(&self, text: &str, max: usize) -> Vec<LanguageHypothesis> {
        let mut census: HashMap<Script, usize> = HashMap::new();
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            if let Some(script) = Script::of(c) {
                *census.entry(script).or_insert(0) += 1;
            }
        }
        let total_letters: usize = census.values().sum();
        if total_letters == 0 || max == 0 {
            return vec![];
        }

        let mut scores: HashMap<String, f64> = HashMap::new();
        for (script, count) in &census {
            let share = *count as f64 / total_letters as f64;
            match script {
                Script::Latin => {
                    for (lang, p) in latin_profile(text) {
                        *scores.entry(lang.to_string()).or_insert(0.0) += share * p;
                    }
                }
                Script::Kana => *scores.entry("ja".to_string()).or_insert(0.0) += share,
                Script::Han => {
                    // Kanji com kana ao lado é japonês
                    let lang = if census.contains_key(&Script::Kana) { "ja" } else { "zh" };
                    *scores.entry(lang.to_string()).or_insert(0.0) += share;
                }
                Script::Cyrillic => *scores.entry("ru".to_string()).or_insert(0.0) += share,
                Script::Arabic => *scores.entry("ar".to_string()).or_insert(0.0) += share,
                other => {
                    if let Some(lang) = other.sole_language() {
                        *scores.entry(lang.to_string()).or_insert(0.0) += share;
                    }
                }
            }
        }

        let mut hypotheses: Vec<LanguageHypothesis> = scores
            .into_iter()
            .filter(|(_, p)| *p > 0.0)
            .map(|(language, probability)| LanguageHypothesis { language, probability })
            .collect();
        hypotheses.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.language.cmp(&b.language))
        });
        hypotheses.truncate(max);
        hypotheses
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Distribuição sobre idiomas latinos a partir dos acertos em stop-words.
///
/// A massa total é a fração de palavras que são stop-words de algum idioma,
/// escalada para que um texto comum (≈ 1/3 de palavras funcionais) chegue
/// perto de 1.0. Texto sem nenhuma stop-word produz distribuição vazia.
fn latin_profile(text: &str) -> Vec<(&'static str, f64)> {
    let words: Vec<String> = text
        .unicode_words()
        .filter(|w| w.chars().any(|c| matches!(Script::of(c), Some(Script::Latin))))
        .map(|w| w.to_lowercase())
        .collect();
    if words.is_empty() {
        return vec![];
    }

    let mut hits: Vec<(&'static str, usize)> = STOPWORDS
        .iter()
        .map(|(lang, list)| {
            let n = words.iter().filter(|w| list.contains(&w.as_str())).count();
            (*lang, n)
        })
        .filter(|(_, n)| *n > 0)
        .collect();
    let total_hits: usize = hits.iter().map(|(_, n)| n).sum();
    if total_hits == 0 {
        return vec![];
    }

    let best_hits = hits.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let coverage = (best_hits as f64 * 3.0 / words.len() as f64).min(1.0);
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    hits.into_iter()
        .map(|(lang, n)| (lang, coverage * n as f64 / total_hits as f64))
        .collect()
}
