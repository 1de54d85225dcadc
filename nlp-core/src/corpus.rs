//! # Textos de Demonstração
//!
//! Frases fixas usadas pelo playground e pela rota `/demo-texts`. Cada uma
//! exercita um caso da anotação: escritas não latinas, mistura de escritas,
//! emoji, números, texto sem idioma, lemas, nomes e classes gramaticais.

use serde::Serialize;

use crate::tagger::Scheme;

/// Uma frase de demonstração e os esquemas que ela ilustra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoText {
    pub name: &'static str,
    pub text: &'static str,
    pub schemes: &'static [Scheme],
}

const LANGUAGE_AND_TOKENS: &[Scheme] = &[Scheme::LanguageDetection, Scheme::Tokenization];

pub fn demo_texts() -> Vec<DemoText> {
    vec![
        DemoText {
            name: "english",
            text: "The city of Mysuru is the cultural capital of Karnataka",
            schemes: LANGUAGE_AND_TOKENS,
        },
        DemoText {
            name: "kannada",
            text: "ಮೈಸೂರು ನಿಮ್ಮನ್ನು ಸ್ವಾಗತಿಸುತ್ತದೆ",
            schemes: LANGUAGE_AND_TOKENS,
        },
        DemoText {
            name: "devanagari",
            text: "सत्यमेव जयते",
            schemes: LANGUAGE_AND_TOKENS,
        },
        // Duas escritas: vence a que tem mais letras
        DemoText {
            name: "mixed",
            text: "Mysuru ನಿಮ್ಮನ್ನು ಸ್ವಾಗತಿಸುತ್ತದೆ",
            schemes: LANGUAGE_AND_TOKENS,
        },
        DemoText {
            name: "emoji",
            text: "🇫🇷 🏆 ⚽️ 🏃‍♂️",
            schemes: LANGUAGE_AND_TOKENS,
        },
        DemoText {
            name: "number",
            text: "25082018",
            schemes: LANGUAGE_AND_TOKENS,
        },
        DemoText {
            name: "gibberish",
            text: "ssssssssssss",
            schemes: &[Scheme::LanguageDetection],
        },
        DemoText {
            name: "lemma",
            text: "Rajdhani runs between Bengaluru and Delhi daily except on Tuesdays",
            schemes: &[Scheme::Lemmatization],
        },
        DemoText {
            name: "possessive",
            text: "PV Sindhu's hard work fetched her a medal in Olympics",
            schemes: &[Scheme::Lemmatization],
        },
        DemoText {
            name: "names",
            text: "Steve Jobs was born in Silicon valley, a place near San Francisco Bay Area in the northern part of the U.S. state of California. He co-founded Apple Inc along with Steve Wozniak.",
            schemes: &[Scheme::NameType],
        },
        DemoText {
            name: "lexical",
            text: "Hey, I am extremely disappointed that you could not figure out such an easy assignment on your own.",
            schemes: &[Scheme::LexicalClass],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::Annotator;
    use crate::options::Options;

    #[test]
    fn test_demo_names_are_unique() {
        let demos = demo_texts();
        let mut names: Vec<&str> = demos.iter().map(|d| d.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), demos.len());
    }

    #[test]
    fn test_every_demo_annotates() {
        let annotator = Annotator::default();
        for demo in demo_texts() {
            for &scheme in demo.schemes {
                let result = annotator.annotate(demo.text, scheme, &Options::tagging());
                assert!(result.is_ok(), "{} falhou em {scheme}", demo.name);
            }
        }
    }
}
