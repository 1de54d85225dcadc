//! # Annotator — Fachada de Anotação
//!
//! Recebe texto + esquema + opções, delega a análise para um
//! [`TaggingEngine`] e normaliza a saída crua:
//!
//! 1. Recorta o texto pela `range` pedida (em grafemas).
//! 2. Chama o motor e valida a saída (ordem, sobreposição, limites).
//! 3. Converte intervalos de bytes em [`Span`]s de grafemas no texto completo.
//! 4. Aplica as omissões (pontuação, espaço, símbolos/emoji).
//! 5. Converte cada tag em [`Label`] conforme o esquema, descartando lemas
//!    ausentes e nomes fora da allow-list.
//! 6. Opcionalmente funde nomes adjacentes (`join_names`).
//!
//! Além do caminho síncrono, [`Annotator::annotate_streaming`] emite
//! [`AnnotationEvent`]s por um canal `mpsc`, para o servidor WebSocket.

use std::sync::{mpsc, Arc};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnnotatorConfig;
use crate::engine::{build_engine, LexiconEngine, TaggingEngine};
use crate::error::{AnnotationError, Result};
use crate::language::LanguageHypothesis;
use crate::options::Options;
use crate::span::{GraphemeIndex, Span};
use crate::tagger::{join_adjacent, Annotation, Label, NameKind, RawTag, Scheme};
use crate::tokenizer::{TokenKind, TokenUnit};

/// Eventos emitidos por [`Annotator::annotate_streaming`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AnnotationEvent {
    /// A chamada começou; `graphemes` é o tamanho do texto completo.
    Started {
        scheme: Scheme,
        engine: String,
        graphemes: usize,
    },
    /// Uma anotação final, na ordem do texto.
    Annotated {
        index: usize,
        annotation: Annotation,
    },
    Done {
        total: usize,
        processing_ms: u64,
    },
    /// Falha de configuração ou do motor; nenhuma anotação foi emitida.
    Error {
        kind: String,
        message: String,
    },
}

/// Fachada reutilizável; o único estado é o handle do motor.
#[derive(Clone)]
pub struct Annotator {
    engine: Arc<dyn TaggingEngine>,
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(Arc::new(LexiconEngine::default()))
    }
}

impl Annotator {
    pub fn new(engine: Arc<dyn TaggingEngine>) -> Self {
        Self { engine }
    }

    pub fn from_config(config: &AnnotatorConfig) -> Result<Self> {
        Ok(Self::new(build_engine(config)?))
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Anota `text` segundo `scheme`.
    ///
    /// Texto vazio devolve `Ok(vec![])` para qualquer esquema. Combinações
    /// esquema/unidade não suportadas, allow-list de nomes vazia ou `range`
    /// fora do texto viram [`AnnotationError::Configuration`], sem resultado
    /// parcial.
    pub fn annotate(&self, text: &str, scheme: Scheme, options: &Options) -> Result<Vec<Annotation>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let index = GraphemeIndex::new(text);
        let window = match options.range {
            Some(range) => range,
            None => index.full_span(),
        };
        let bytes = index.byte_range(window).ok_or_else(|| {
            AnnotationError::configuration(format!(
                "range {window} fora do texto ({} grafemas)",
                index.len()
            ))
        })?;
        if scheme == Scheme::NameType && options.name_kinds.is_empty() {
            return Err(AnnotationError::configuration(
                "name_kinds vazio: nenhum tipo de nome aceito",
            ));
        }

        // Idioma é sempre do trecho inteiro
        let unit = match scheme {
            Scheme::LanguageDetection => TokenUnit::Document,
            _ => options.unit,
        };
        if !self.engine.supports(scheme, unit) {
            return Err(AnnotationError::configuration(format!(
                "motor {} não suporta {scheme} com unidade {}",
                self.engine.name(),
                unit.name()
            )));
        }

        if bytes.is_empty() {
            return Ok(vec![]);
        }
        let slice = &text[bytes.clone()];
        let raw = self.engine.tag(slice, scheme, unit)?;
        check_raw_tags(&raw, slice.len(), scheme)?;
        debug!(
            engine = self.engine.name(),
            scheme = %scheme,
            raw = raw.len(),
            "saída crua do motor"
        );

        let mut annotations = Vec::with_capacity(raw.len());
        let mut previous: Option<Span> = None;
        for tag in raw {
            let range = (bytes.start + tag.range.start)..(bytes.start + tag.range.end);
            let span = index.span_for(&range);
            if span.is_empty() {
                continue;
            }
            // Intervalos de bytes disjuntos ainda podem cair no mesmo grafema
            if let Some(prev) = previous.filter(|p| p.overlaps(&span)) {
                return Err(AnnotationError::engine_unavailable(format!(
                    "tokens {prev} e {span} dividem um grafema"
                )));
            }
            previous = Some(span);

            if scheme != Scheme::LanguageDetection && omitted(tag.kind, options) {
                continue;
            }
            let Some(label) = label_for(scheme, tag.tag, options) else {
                continue;
            };
            annotations.push(Annotation::new(text, &index, span, label));
        }

        if scheme == Scheme::NameType && options.join_names {
            annotations = join_adjacent(annotations, text, &index);
        }
        Ok(annotations)
    }

    /// Mesma computação de [`annotate`](Self::annotate), publicada como eventos.
    ///
    /// Envios falhos (receptor descartado) são ignorados.
    pub fn annotate_streaming(
        &self,
        text: &str,
        scheme: Scheme,
        options: &Options,
        tx: mpsc::Sender<AnnotationEvent>,
    ) {
        let start = Instant::now();
        let _ = tx.send(AnnotationEvent::Started {
            scheme,
            engine: self.engine.name().to_string(),
            graphemes: GraphemeIndex::new(text).len(),
        });

        match self.annotate(text, scheme, options) {
            Ok(annotations) => {
                let total = annotations.len();
                for (index, annotation) in annotations.into_iter().enumerate() {
                    let _ = tx.send(AnnotationEvent::Annotated { index, annotation });
                }
                let _ = tx.send(AnnotationEvent::Done {
                    total,
                    processing_ms: start.elapsed().as_millis() as u64,
                });
            }
            Err(e) => {
                let _ = tx.send(AnnotationEvent::Error {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Até `max` hipóteses de idioma, da mais provável para a menos provável.
    pub fn language_hypotheses(&self, text: &str, max: usize) -> Result<Vec<LanguageHypothesis>> {
        self.engine.language_hypotheses(text, max)
    }
}

/// Rejeita saída de motor fora de ordem, sobreposta ou fora do texto.
fn check_raw_tags(raw: &[RawTag], len: usize, scheme: Scheme) -> Result<()> {
    if scheme == Scheme::LanguageDetection && raw.len() > 1 {
        return Err(AnnotationError::engine_unavailable(format!(
            "detecção de idioma devolveu {} resultados",
            raw.len()
        )));
    }
    let mut previous_end = 0;
    for tag in raw {
        let r = &tag.range;
        if r.start > r.end || r.end > len {
            return Err(AnnotationError::engine_unavailable(format!(
                "intervalo {}..{} fora do texto ({len} bytes)",
                r.start, r.end
            )));
        }
        if r.start < previous_end {
            return Err(AnnotationError::engine_unavailable(format!(
                "intervalo {}..{} sobrepõe o anterior ou está fora de ordem",
                r.start, r.end
            )));
        }
        previous_end = r.end;
    }
    Ok(())
}

fn omitted(kind: TokenKind, options: &Options) -> bool {
    match kind {
        TokenKind::Punctuation => options.omit_punctuation,
        TokenKind::Whitespace => options.omit_whitespace,
        k if k.is_other() => options.omit_other,
        _ => false,
    }
}

/// Rótulo final de um tag cru; `None` descarta a anotação.
fn label_for(scheme: Scheme, tag: Option<String>, options: &Options) -> Option<Label> {
    match scheme {
        Scheme::LanguageDetection | Scheme::LexicalClass => {
            Some(tag.map(Label::Value).unwrap_or(Label::Unknown))
        }
        Scheme::Tokenization => Some(tag.map(Label::Value).unwrap_or(Label::Unlabeled)),
        Scheme::Lemmatization => tag.map(Label::Value),
        Scheme::NameType => {
            let kind = NameKind::from_name(tag.as_deref()?)?;
            options
                .name_kinds
                .contains(&kind)
                .then(|| Label::value(kind.name()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::BasicEngine;
    use crate::language::LanguageDetector;

    const NAMES: &str = "Steve Jobs was born in Silicon valley, a place near San Francisco Bay Area in the northern part of the U.S. state of California. He co-founded Apple Inc along with Steve Wozniak.";

    /// Motor que devolve sempre a mesma saída, para testar a normalização.
    struct ScriptedEngine {
        output: Vec<RawTag>,
    }

    impl TaggingEngine for ScriptedEngine {
        fn name(&self) -> &'static str {
            "scripted"
        }
        fn supports(&self, _: Scheme, _: TokenUnit) -> bool {
            true
        }
        fn tag(&self, _: &str, _: Scheme, _: TokenUnit) -> Result<Vec<RawTag>> {
            Ok(self.output.clone())
        }
        fn language_hypotheses(&self, _: &str, _: usize) -> Result<Vec<LanguageHypothesis>> {
            Ok(vec![])
        }
    }

    struct BrokenEngine;

    impl TaggingEngine for BrokenEngine {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn supports(&self, _: Scheme, _: TokenUnit) -> bool {
            true
        }
        fn tag(&self, _: &str, _: Scheme, _: TokenUnit) -> Result<Vec<RawTag>> {
            Err(AnnotationError::engine_unavailable("modelo não carregado"))
        }
        fn language_hypotheses(&self, _: &str, _: usize) -> Result<Vec<LanguageHypothesis>> {
            Err(AnnotationError::engine_unavailable("modelo não carregado"))
        }
    }

    fn scripted(output: Vec<RawTag>) -> Annotator {
        Annotator::new(Arc::new(ScriptedEngine { output }))
    }

    fn labels(annotations: &[Annotation]) -> Vec<String> {
        annotations.iter().map(|a| a.label.to_string()).collect()
    }

    #[test]
    fn test_empty_text_is_empty_for_every_scheme() {
        let annotator = Annotator::default();
        for scheme in Scheme::all() {
            let result = annotator.annotate("", scheme, &Options::default()).unwrap();
            assert!(result.is_empty(), "{scheme} deveria ser vazio");
        }
    }

    #[test]
    fn test_tokenization_partitions_text() {
        let annotator = Annotator::default();
        let text = "🇫🇷 🏆 ⚽️ 🏃‍♂️\n\nPV Sindhu's hard work. Fetched a medal!";
        let graphemes = GraphemeIndex::new(text).len();
        for unit in TokenUnit::all() {
            let opts = Options::default().with_unit(unit);
            let result = annotator.annotate(text, Scheme::Tokenization, &opts).unwrap();
            let mut cursor = 0;
            for a in &result {
                assert_eq!(a.span.start, cursor, "buraco ou sobreposição em {unit:?}");
                cursor = a.span.end;
            }
            assert_eq!(cursor, graphemes, "{unit:?} deve cobrir o texto");
            let joined: String = result.iter().map(|a| a.text.as_str()).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_tokenization_labels() {
        let annotator = Annotator::default();
        let result = annotator
            .annotate("🇫🇷 🏆 ⚽️ 🏃‍♂️", Scheme::Tokenization, &Options::default())
            .unwrap();
        let emoji: Vec<&Annotation> = result.iter().filter(|a| a.label.as_str() == "emoji").collect();
        assert_eq!(emoji.len(), 4);
        assert!(emoji.iter().all(|a| a.span.len() == 1), "cada emoji é um grafema");

        let result = annotator
            .annotate("One. Two.", Scheme::Tokenization, &Options::default().with_unit(TokenUnit::Sentence))
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|a| a.label == Label::Unlabeled));
    }

    #[test]
    fn test_omission_options() {
        let annotator = Annotator::default();
        let text = "Hey, I am here 🏆.";
        let opts = Options::tagging().omit_other(true);
        let result = annotator.annotate(text, Scheme::Tokenization, &opts).unwrap();
        let pieces: Vec<&str> = result.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(pieces, vec!["Hey", "I", "am", "here"]);
    }

    #[test]
    fn test_mixed_script_single_language_annotation() {
        let annotator = Annotator::default();
        let text = "Mysuru ನಿಮ್ಮನ್ನು ಸ್ವಾಗತಿಸುತ್ತದೆ";
        let result = annotator
            .annotate(text, Scheme::LanguageDetection, &Options::default().with_unit(TokenUnit::Sentence))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].span, GraphemeIndex::new(text).full_span());
        assert_eq!(result[0].label, Label::value("kn"));
    }

    #[test]
    fn test_gibberish_and_digits_are_unknown() {
        let annotator = Annotator::default();
        for text in ["ssssssssssss", "25082018", "🇫🇷 🏆 ⚽️ 🏃‍♂️", "   "] {
            let result = annotator
                .annotate(text, Scheme::LanguageDetection, &Options::default())
                .unwrap();
            assert_eq!(result.len(), 1, "{text:?}");
            assert_eq!(result[0].label, Label::Unknown, "{text:?}");
        }
    }

    #[test]
    fn test_lemmatization_drops_unknown_words() {
        let annotator = Annotator::default();
        let result = annotator
            .annotate("Rajdhani runs daily", Scheme::Lemmatization, &Options::default())
            .unwrap();
        let pairs: Vec<(&str, &str)> = result.iter().map(|a| (a.text.as_str(), a.label.as_str())).collect();
        assert_eq!(pairs, vec![("runs", "run"), ("daily", "daily")]);
        assert_eq!(result[0].span, Span::new(9, 13));
    }

    #[test]
    fn test_name_type_allow_list_is_subset() {
        let annotator = Annotator::default();
        let all = annotator.annotate(NAMES, Scheme::NameType, &Options::default()).unwrap();
        assert!(labels(&all).contains(&"PersonalName".to_string()));
        assert!(labels(&all).contains(&"OrganizationName".to_string()));

        let opts = Options::default().with_name_kinds([NameKind::PlaceName]);
        let places = annotator.annotate(NAMES, Scheme::NameType, &opts).unwrap();
        assert!(!places.is_empty());
        assert!(places.iter().all(|a| a.label.as_str() == "PlaceName"));
        assert!(places.iter().all(|p| all.contains(p)), "allow-list só remove");
    }

    #[test]
    fn test_join_names() {
        let annotator = Annotator::default();
        let opts = Options::tagging().join_names(true);
        let result = annotator.annotate(NAMES, Scheme::NameType, &opts).unwrap();
        let pairs: Vec<(&str, &str)> = result.iter().map(|a| (a.text.as_str(), a.label.as_str())).collect();
        assert_eq!(pairs[0], ("Steve Jobs", "PersonalName"));
        assert!(pairs.contains(&("San Francisco Bay Area", "PlaceName")));
        assert!(pairs.contains(&("Apple Inc", "OrganizationName")));
        assert_eq!(result[0].span, Span::new(0, 10));
    }

    #[test]
    fn test_empty_name_kinds_is_configuration_error() {
        let annotator = Annotator::default();
        let opts = Options::default().with_name_kinds([]);
        assert!(matches!(
            annotator.annotate(NAMES, Scheme::NameType, &opts),
            Err(AnnotationError::Configuration(_))
        ));
    }

    #[test]
    fn test_lexical_class_sequence() {
        let annotator = Annotator::default();
        let result = annotator
            .annotate("The city of Mysuru is the capital of Karnataka", Scheme::LexicalClass, &Options::tagging())
            .unwrap();
        assert_eq!(
            labels(&result),
            vec!["Determiner", "Noun", "Preposition", "Noun", "Verb", "Determiner", "Noun", "Preposition", "Noun"]
        );
    }

    #[test]
    fn test_unsupported_combination_is_configuration_error() {
        let annotator = Annotator::default();
        let opts = Options::default().with_unit(TokenUnit::Sentence);
        assert!(matches!(
            annotator.annotate("Hello there.", Scheme::NameType, &opts),
            Err(AnnotationError::Configuration(_))
        ));

        let basic = Annotator::new(Arc::new(BasicEngine::new(LanguageDetector::default())));
        assert!(matches!(
            basic.annotate("Hello there.", Scheme::LexicalClass, &Options::default()),
            Err(AnnotationError::Configuration(_))
        ));
    }

    #[test]
    fn test_basic_engine_tokens_are_unlabeled() {
        let basic = Annotator::new(Arc::new(BasicEngine::default()));
        let result = basic
            .annotate("Dr. Rao", Scheme::Tokenization, &Options::default())
            .unwrap();
        assert_eq!(result[0].text, "Dr.");
        assert!(result.iter().all(|a| a.label == Label::Unlabeled));
    }

    #[test]
    fn test_range_restricts_analysis() {
        let annotator = Annotator::default();
        let text = "Steve Jobs was born in California";
        let opts = Options::default().with_range(Span::new(11, 33));
        let result = annotator.annotate(text, Scheme::NameType, &opts).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].span, Span::new(23, 33));
        assert_eq!(result[0].text, "California");

        let opts = Options::default().with_range(Span::new(5, 99));
        assert!(matches!(
            annotator.annotate(text, Scheme::Tokenization, &opts),
            Err(AnnotationError::Configuration(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let annotator = Annotator::default();
        for scheme in Scheme::all() {
            let first = annotator.annotate(NAMES, scheme, &Options::default()).unwrap();
            let second = annotator.annotate(NAMES, scheme, &Options::default()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_missing_lexical_class_is_unknown() {
        let annotator = scripted(vec![
            RawTag::new(0..2, Some("Noun".into()), TokenKind::Word),
            RawTag::new(2..3, None, TokenKind::Word),
        ]);
        let result = annotator.annotate("abc", Scheme::LexicalClass, &Options::default()).unwrap();
        assert_eq!(result[1].label, Label::Unknown);
    }

    #[test]
    fn test_malformed_engine_output_is_rejected() {
        let overlapping = scripted(vec![
            RawTag::new(0..3, Some("a".into()), TokenKind::Word),
            RawTag::new(2..4, Some("b".into()), TokenKind::Word),
        ]);
        assert!(matches!(
            overlapping.annotate("abcd", Scheme::Tokenization, &Options::default()),
            Err(AnnotationError::EngineUnavailable(_))
        ));

        let too_long = scripted(vec![RawTag::new(0..10, None, TokenKind::Word)]);
        assert!(matches!(
            too_long.annotate("abcd", Scheme::Tokenization, &Options::default()),
            Err(AnnotationError::EngineUnavailable(_))
        ));
    }

    #[test]
    fn test_engine_split_inside_grapheme_is_rejected() {
        // "🏃" ocupa 4 bytes; o resto da sequência ZWJ cai no mesmo grafema
        let text = "🏃\u{200D}\u{2642}\u{FE0F}";
        let split = scripted(vec![
            RawTag::new(0..4, Some("emoji".into()), TokenKind::Emoji),
            RawTag::new(4..text.len(), Some("symbol".into()), TokenKind::Symbol),
        ]);
        assert!(matches!(
            split.annotate(text, Scheme::Tokenization, &Options::default()),
            Err(AnnotationError::EngineUnavailable(_))
        ));
    }

    #[test]
    fn test_basic_engine_partitions_complex_scripts() {
        let basic = Annotator::new(Arc::new(BasicEngine::default()));
        for text in [
            "ಮೈಸೂರು ನಿಮ್ಮನ್ನು ಸ್ವಾಗತಿಸುತ್ತದೆ",
            "सत्यमेव जयते",
            "🇫🇷 🏆 ⚽️ 🏃‍♂️",
            "🏃‍♂️ ok",
            "café\u{301} x",
        ] {
            let result = basic.annotate(text, Scheme::Tokenization, &Options::default()).unwrap();
            let mut cursor = 0;
            for a in &result {
                assert_eq!(a.span.start, cursor, "buraco ou sobreposição em {text:?}");
                assert!(!a.span.is_empty());
                cursor = a.span.end;
            }
            assert_eq!(cursor, GraphemeIndex::new(text).len(), "{text:?} deve ser coberto");
        }

        let result = basic
            .annotate("🏃‍♂️ ok", Scheme::Tokenization, &Options::default())
            .unwrap();
        let spans: Vec<Span> = result.iter().map(|a| a.span).collect();
        assert_eq!(spans, vec![Span::new(0, 1), Span::new(1, 2), Span::new(2, 4)]);
    }

    #[test]
    fn test_engine_failure_propagates() {
        let annotator = Annotator::new(Arc::new(BrokenEngine));
        assert!(matches!(
            annotator.annotate("text", Scheme::Tokenization, &Options::default()),
            Err(AnnotationError::EngineUnavailable(_))
        ));
        assert!(annotator.language_hypotheses("text", 3).is_err());
    }

    #[test]
    fn test_streaming_events() {
        let annotator = Annotator::default();
        let (tx, rx) = mpsc::channel();
        annotator.annotate_streaming("Hello world", Scheme::Tokenization, &Options::default(), tx);
        let events: Vec<AnnotationEvent> = rx.iter().collect();

        assert!(matches!(events[0], AnnotationEvent::Started { graphemes: 11, .. }));
        let annotated = events
            .iter()
            .filter(|e| matches!(e, AnnotationEvent::Annotated { .. }))
            .count();
        assert_eq!(annotated, 3);
        assert!(matches!(events.last(), Some(AnnotationEvent::Done { total: 3, .. })));
    }

    #[test]
    fn test_streaming_error_event() {
        let annotator = Annotator::default();
        let (tx, rx) = mpsc::channel();
        let opts = Options::default().with_unit(TokenUnit::Paragraph);
        annotator.annotate_streaming("Hello", Scheme::Lemmatization, &opts, tx);
        let events: Vec<AnnotationEvent> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        match &events[1] {
            AnnotationEvent::Error { kind, .. } => assert_eq!(kind, "configuration"),
            other => panic!("esperava Error, veio {other:?}"),
        }
    }

    #[test]
    fn test_language_hypotheses_sorted() {
        let annotator = Annotator::default();
        let hyps = annotator
            .language_hypotheses("The city of Mysuru is the cultural capital of Karnataka", 3)
            .unwrap();
        assert!(!hyps.is_empty() && hyps.len() <= 3);
        assert_eq!(hyps[0].language, "en");
        assert!(hyps.windows(2).all(|w| w[0].probability >= w[1].probability));
    }
}
