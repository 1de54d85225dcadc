//! # Léxico Inglês — Lemas e Classes Gramaticais
//!
//! O motor [`LexiconEngine`](crate::engine::LexiconEngine) não tem modelo
//! estatístico: ele combina três fontes de conhecimento explícito.
//!
//! 1. **Palavras fechadas**: determinantes, pronomes, preposições, conjunções,
//!    interjeições e auxiliares, com classe fixa.
//! 2. **Vocabulário aberto conhecido**: substantivos, verbos, adjetivos e
//!    advérbios frequentes, mais formas irregulares ("was" → "be").
//! 3. **Regras de sufixo**: "-ly" → advérbio, "-ment" → substantivo,
//!    "fetched" → "fetch", "Tuesdays" → "Tuesday".
//!
//! Onde o léxico não cobre, o contexto decide (palavra depois de modal é verbo,
//! particípio depois de "am/is/was" é adjetivo, e assim por diante).

use std::collections::HashMap;

use crate::tagger::LexicalClass;
use crate::tokenizer::{Token, TokenKind};

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "these", "those", "my", "your", "his", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "either",
    "neither", "another", "many", "few", "several", "much",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them",
    "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves",
    "who", "whom", "whose", "what", "which", "mine", "yours", "hers", "ours",
    "theirs", "someone", "anyone", "everyone", "nobody", "something", "anything",
    "everything", "nothing",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "over", "under", "near", "along", "across", "behind", "beyond",
    "except", "without", "within", "among", "around", "since", "until", "upon",
    "via", "per", "out", "off",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "because", "although", "though", "while",
    "if", "unless", "whereas", "than", "whether",
];

const INTERJECTIONS: &[&str] = &[
    "hey", "hi", "hello", "oh", "ah", "wow", "oops", "ouch", "alas", "hmm", "ok",
    "okay", "yes", "bye",
];

/// Auxiliares e modais (sempre verbo).
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "can", "could", "will", "would", "shall", "should", "may",
    "might", "must",
];

const MODALS: &[&str] = &[
    "can", "could", "will", "would", "shall", "should", "may", "might", "must", "do",
    "does", "did",
];

const COPULAS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "seem", "seems",
    "seemed", "feel", "feels", "felt", "look", "looks", "looked", "become",
    "became", "get", "got",
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "never", "always", "often", "daily", "here", "there",
    "now", "then", "too", "quite", "just", "only", "again", "soon", "almost",
    "already", "still", "even", "together", "away", "back", "so", "well",
    "yesterday", "today", "tomorrow",
];

const ADJECTIVES: &[&str] = &[
    "easy", "hard", "good", "bad", "big", "small", "new", "old", "own", "great",
    "high", "low", "long", "short", "such", "northern", "southern", "eastern",
    "western", "happy", "sad", "free", "full", "young", "important", "cultural",
    "other", "same", "best", "better",
];

const NOUNS: &[&str] = &[
    "city", "capital", "state", "place", "part", "work", "medal", "assignment",
    "valley", "area", "bay", "time", "day", "year", "people", "man", "woman",
    "child", "world", "country", "train", "word", "language", "name", "home",
    "team", "company", "game", "student", "teacher", "school", "house", "water",
    "book", "thing", "way", "life", "hand", "family",
];

const VERBS: &[&str] = &[
    "run", "go", "come", "make", "take", "get", "know", "see", "think", "say",
    "find", "give", "tell", "work", "call", "try", "ask", "need", "feel", "leave",
    "put", "mean", "keep", "let", "begin", "help", "show", "hear", "play", "move",
    "live", "believe", "bring", "happen", "write", "sit", "stand", "lose", "pay",
    "meet", "fetch", "figure", "found", "bear", "win", "welcome", "disappoint",
];

/// Formas irregulares → lema.
const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
    ("does", "do"), ("did", "do"), ("done", "do"), ("went", "go"), ("gone", "go"),
    ("ran", "run"), ("born", "bear"), ("got", "get"), ("made", "make"),
    ("took", "take"), ("taken", "take"), ("saw", "see"), ("seen", "see"),
    ("came", "come"), ("thought", "think"), ("said", "say"), ("found", "find"),
    ("won", "win"), ("began", "begin"), ("begun", "begin"), ("brought", "bring"),
    ("bought", "buy"), ("knew", "know"), ("known", "know"), ("wrote", "write"),
    ("written", "write"), ("gave", "give"), ("given", "give"), ("sold", "sell"),
    ("told", "tell"), ("left", "leave"), ("felt", "feel"), ("kept", "keep"),
    ("held", "hold"), ("stood", "stand"), ("children", "child"), ("men", "man"),
    ("women", "woman"), ("mice", "mouse"), ("feet", "foot"), ("teeth", "tooth"),
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("her", "she"), ("him", "he"), ("them", "they"), ("us", "we"), ("me", "i"),
];

/// Nomes próprios com lema conhecido (dias da semana, meses).
const PROPER: &[&str] = &[
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    "January", "February", "March", "April", "June", "July", "August",
    "September", "October", "November", "December",
];

/// Terminações depois das quais um "e" final foi removido ("figur" → "figure").
const E_RESTORE: &[&str] = &["ur", "iz", "iv", "ov", "us", "os", "uc", "ag", "ar", "at", "id", "ak"];

/// Léxico compilado para consulta rápida.
#[derive(Debug, Clone)]
pub struct Lexicon {
    classes: HashMap<&'static str, LexicalClass>,
    irregular: HashMap<&'static str, &'static str>,
    proper: HashMap<String, &'static str>,
}

impl Lexicon {
    /// Constrói o léxico padrão. A ordem importa: listas posteriores
    /// sobrescrevem anteriores ("that" termina como determinante só se nenhuma
    /// regra de contexto disser o contrário).
    pub fn build() -> Self {
        let mut classes = HashMap::new();
        let groups: [(&[&str], LexicalClass); 10] = [
            (NOUNS, LexicalClass::Noun),
            (VERBS, LexicalClass::Verb),
            (ADJECTIVES, LexicalClass::Adjective),
            (ADVERBS, LexicalClass::Adverb),
            (PREPOSITIONS, LexicalClass::Preposition),
            (CONJUNCTIONS, LexicalClass::Conjunction),
            (INTERJECTIONS, LexicalClass::Interjection),
            (PRONOUNS, LexicalClass::Pronoun),
            (DETERMINERS, LexicalClass::Determiner),
            (AUXILIARIES, LexicalClass::Verb),
        ];
        for (words, class) in groups {
            for w in words {
                classes.insert(*w, class);
            }
        }
        classes.insert("that", LexicalClass::Determiner);

        Self {
            classes,
            irregular: IRREGULAR.iter().copied().collect(),
            proper: PROPER.iter().map(|p| (p.to_lowercase(), *p)).collect(),
        }
    }

    /// Classe fixa de uma palavra, se o léxico a conhece.
    pub fn lookup(&self, word: &str) -> Option<LexicalClass> {
        self.classes.get(word.to_lowercase().as_str()).copied()
    }

    /// Lema (forma canônica) de uma palavra.
    ///
    /// Retorna `None` quando a palavra não pode ser resolvida: tipicamente
    /// nomes próprios fora do léxico ("Rajdhani", "Sindhu's").
    pub fn lemma(&self, word: &str) -> Option<String> {
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("\u{2019}s"))
            .unwrap_or(word);
        if word.is_empty() || !word.chars().any(char::is_alphabetic) {
            return None;
        }
        let lower = word.to_lowercase();
        let capitalized = word.chars().next().map(char::is_uppercase).unwrap_or(false);

        if let Some(lemma) = self.irregular.get(lower.as_str()) {
            return Some(lemma.to_string());
        }
        if let Some(proper) = self.proper.get(&lower) {
            return Some(proper.to_string());
        }
        if self.classes.contains_key(lower.as_str()) {
            return Some(lower);
        }

        for candidate in strip_inflection(&lower) {
            if let Some(proper) = self.proper.get(&candidate) {
                return Some(proper.to_string());
            }
            if self.classes.contains_key(candidate.as_str()) {
                return Some(candidate);
            }
            if let Some(lemma) = self.irregular.get(candidate.as_str()) {
                return Some(lemma.to_string());
            }
        }

        if capitalized {
            // Nome próprio desconhecido: sem lema
            return None;
        }
        if lower.ends_with("ly") {
            return Some(lower);
        }
        // Palavra minúscula fora do léxico: melhor palpite pela regra de sufixo
        Some(strip_inflection(&lower).into_iter().next().unwrap_or(lower))
    }

    /// Classe gramatical de cada token, usando léxico + contexto.
    ///
    /// Retorna um vetor alinhado com `tokens` (uma classe por token).
    pub fn lexical_classes(&self, tokens: &[Token]) -> Vec<LexicalClass> {
        let mut classes: Vec<LexicalClass> = Vec::with_capacity(tokens.len());
        // Índice do último token não-branco, para olhar o contexto à esquerda
        let mut prev_word: Option<usize> = None;

        for (i, token) in tokens.iter().enumerate() {
            let class = match token.kind {
                TokenKind::Whitespace => {
                    if token.text.contains('\n') || token.text.contains('\u{2029}') {
                        LexicalClass::ParagraphBreak
                    } else {
                        LexicalClass::OtherWhitespace
                    }
                }
                TokenKind::Punctuation => punctuation_class(&token.text, i == 0 || tokens[i - 1].kind == TokenKind::Whitespace),
                TokenKind::Number => LexicalClass::Number,
                TokenKind::Emoji => LexicalClass::OtherWord,
                TokenKind::Symbol => {
                    if token.text == "\u{2060}" || token.text == "\u{200D}" {
                        LexicalClass::WordJoiner
                    } else {
                        LexicalClass::OtherWord
                    }
                }
                TokenKind::Word => {
                    let prev = prev_word.map(|p| (p, classes[p]));
                    let next = next_word(tokens, i);
                    self.word_class(tokens, &token.text, prev, next, &classes)
                }
            };
            classes.push(class);
            if token.kind != TokenKind::Whitespace {
                prev_word = Some(i);
            }
        }

        classes
    }

    fn word_class(
        &self,
        tokens: &[Token],
        word: &str,
        prev: Option<(usize, LexicalClass)>,
        next: Option<&Token>,
        classes: &[LexicalClass],
    ) -> LexicalClass {
        let lower = word.to_lowercase();
        let prev_class = prev.map(|(_, c)| c);
        let prev_text = prev.map(|(p, _)| tokens[p].text.to_lowercase());

        match lower.as_str() {
            "that" => {
                return match prev_class {
                    Some(LexicalClass::Adjective) | Some(LexicalClass::Verb) => LexicalClass::Conjunction,
                    _ => LexicalClass::Determiner,
                };
            }
            "to" => {
                let next_is_verb = next
                    .map(|t| self.lookup(&t.text) == Some(LexicalClass::Verb))
                    .unwrap_or(false);
                return if next_is_verb { LexicalClass::Particle } else { LexicalClass::Preposition };
            }
            "out" | "up" | "off" | "down" | "away" if prev_class == Some(LexicalClass::Verb) => {
                return LexicalClass::Particle;
            }
            _ => {}
        }

        if let Some(class) = self.lookup(&lower) {
            return class;
        }
        if self.irregular.contains_key(lower.as_str()) {
            return LexicalClass::Verb;
        }

        // "could figure", "could not figure", "to figure"
        let after_modal = match prev_text.as_deref() {
            Some("to") => true,
            Some("not") => prev
                .and_then(|(p, _)| previous_significant(classes, tokens, p))
                .map(|q| MODALS.contains(&tokens[q].text.to_lowercase().as_str()))
                .unwrap_or(false),
            Some(p) => MODALS.contains(&p),
            None => false,
        };
        if after_modal && !word.chars().next().map(char::is_uppercase).unwrap_or(false) {
            return LexicalClass::Verb;
        }

        if lower.ends_with("ed") && lower.len() > 4 {
            return if self.follows_copula(tokens, classes, prev) {
                LexicalClass::Adjective
            } else {
                LexicalClass::Verb
            };
        }
        if lower.ends_with("ly") && lower.len() > 4 {
            return LexicalClass::Adverb;
        }
        if lower.ends_with("ing") && lower.len() > 5 {
            return LexicalClass::Verb;
        }
        const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish"];
        if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) && lower.len() > 4 {
            return LexicalClass::Adjective;
        }
        LexicalClass::Noun
    }

    /// "am extremely disappointed": ignora advérbios entre a cópula e o particípio.
    fn follows_copula(&self, tokens: &[Token], classes: &[LexicalClass], prev: Option<(usize, LexicalClass)>) -> bool {
        let mut cursor = prev;
        while let Some((p, class)) = cursor {
            if COPULAS.contains(&tokens[p].text.to_lowercase().as_str()) {
                return true;
            }
            if class != LexicalClass::Adverb {
                return false;
            }
            cursor = previous_significant(classes, tokens, p).map(|q| (q, classes[q]));
        }
        false
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::build()
    }
}

fn next_word(tokens: &[Token], i: usize) -> Option<&Token> {
    tokens[i + 1..].iter().find(|t| t.kind != TokenKind::Whitespace)
}

fn previous_significant(classes: &[LexicalClass], tokens: &[Token], i: usize) -> Option<usize> {
    (0..i).rev().find(|&j| j < classes.len() && tokens[j].kind != TokenKind::Whitespace)
}

fn punctuation_class(text: &str, after_space: bool) -> LexicalClass {
    match text {
        "." | "!" | "?" | "।" | "॥" | "。" => LexicalClass::SentenceTerminator,
        "“" | "«" | "‘" => LexicalClass::OpenQuote,
        "”" | "»" | "’" => LexicalClass::CloseQuote,
        "\"" | "'" => {
            if after_space {
                LexicalClass::OpenQuote
            } else {
                LexicalClass::CloseQuote
            }
        }
        "(" | "[" | "{" => LexicalClass::OpenParenthesis,
        ")" | "]" | "}" => LexicalClass::CloseParenthesis,
        "-" | "–" | "—" | "‐" => LexicalClass::Dash,
        _ => LexicalClass::OtherPunctuation,
    }
}

/// Candidatos a lema por remoção de flexão, do mais ao menos provável.
fn strip_inflection(lower: &str) -> Vec<String> {
    let mut out = Vec::new();
    let len = lower.chars().count();

    if len > 4 && lower.ends_with("ies") {
        out.push(format!("{}y", &lower[..lower.len() - 3]));
    } else if len > 4 && (lower.ends_with("sses") || lower.ends_with("ches") || lower.ends_with("shes") || lower.ends_with("xes")) {
        out.push(lower[..lower.len() - 2].to_string());
    } else if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && !lower.ends_with("is") {
        out.push(lower[..lower.len() - 1].to_string());
    }

    if len > 4 && lower.ends_with("ied") {
        out.push(format!("{}y", &lower[..lower.len() - 3]));
    } else if len > 4 && lower.ends_with("ed") {
        out.extend(restore_stem(&lower[..lower.len() - 2]));
    }

    if len > 5 && lower.ends_with("ing") {
        out.extend(restore_stem(&lower[..lower.len() - 3]));
    }

    out
}

/// "stopp" → "stop", "figur" → "figure", "fetch" → "fetch".
fn restore_stem(stem: &str) -> Vec<String> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1].is_ascii_alphabetic() && bytes[n - 1] == bytes[n - 2] && !matches!(bytes[n - 1], b'l' | b's' | b'z' | b'e' | b'o') {
        return vec![stem[..n - 1].to_string()];
    }
    if E_RESTORE.iter().any(|end| stem.ends_with(end)) {
        return vec![stem.to_string(), format!("{stem}e")];
    }
    vec![stem.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{segment, TokenUnit};

    fn word_classes(text: &str) -> Vec<(String, LexicalClass)> {
        let lexicon = Lexicon::build();
        let tokens = segment(text, TokenUnit::Word);
        let classes = lexicon.lexical_classes(&tokens);
        tokens
            .into_iter()
            .zip(classes)
            .filter(|(t, _)| t.kind == TokenKind::Word || t.kind == TokenKind::Number)
            .map(|(t, c)| (t.text, c))
            .collect()
    }

    #[test]
    fn test_lemma_inflections() {
        let lexicon = Lexicon::build();
        assert_eq!(lexicon.lemma("runs").as_deref(), Some("run"));
        assert_eq!(lexicon.lemma("fetched").as_deref(), Some("fetch"));
        assert_eq!(lexicon.lemma("was").as_deref(), Some("be"));
        assert_eq!(lexicon.lemma("Tuesdays").as_deref(), Some("Tuesday"));
        assert_eq!(lexicon.lemma("figured").as_deref(), Some("figure"));
        assert_eq!(lexicon.lemma("daily").as_deref(), Some("daily"));
        assert_eq!(lexicon.lemma("The").as_deref(), Some("the"));
    }

    #[test]
    fn test_lemma_unknown_proper_nouns() {
        let lexicon = Lexicon::build();
        assert_eq!(lexicon.lemma("Rajdhani"), None);
        assert_eq!(lexicon.lemma("Sindhu's"), None);
        assert_eq!(lexicon.lemma("2018"), None);
        assert_eq!(lexicon.lemma(""), None);
    }

    #[test]
    fn test_lexical_class_capital_sentence() {
        let classes: Vec<LexicalClass> = word_classes("The city of X is the capital of Y")
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        assert_eq!(
            classes,
            vec![
                LexicalClass::Determiner,
                LexicalClass::Noun,
                LexicalClass::Preposition,
                LexicalClass::Noun,
                LexicalClass::Verb,
                LexicalClass::Determiner,
                LexicalClass::Noun,
                LexicalClass::Preposition,
                LexicalClass::Noun,
            ]
        );
    }

    #[test]
    fn test_lexical_class_context_rules() {
        let tagged = word_classes(
            "Hey, I am extremely disappointed that you could not figure out such an easy assignment",
        );
        let get = |w: &str| tagged.iter().find(|(t, _)| t == w).map(|(_, c)| *c);
        assert_eq!(get("Hey"), Some(LexicalClass::Interjection));
        assert_eq!(get("I"), Some(LexicalClass::Pronoun));
        assert_eq!(get("extremely"), Some(LexicalClass::Adverb));
        assert_eq!(get("disappointed"), Some(LexicalClass::Adjective));
        assert_eq!(get("that"), Some(LexicalClass::Conjunction));
        assert_eq!(get("figure"), Some(LexicalClass::Verb));
        assert_eq!(get("out"), Some(LexicalClass::Particle));
        assert_eq!(get("assignment"), Some(LexicalClass::Noun));
    }

    #[test]
    fn test_punctuation_and_whitespace_classes() {
        let lexicon = Lexicon::build();
        let tokens = segment("Hi (there).\n\nBye", TokenUnit::Word);
        let classes = lexicon.lexical_classes(&tokens);
        assert_eq!(classes.len(), tokens.len());
        assert!(classes.contains(&LexicalClass::OpenParenthesis));
        assert!(classes.contains(&LexicalClass::CloseParenthesis));
        assert!(classes.contains(&LexicalClass::SentenceTerminator));
        assert!(classes.contains(&LexicalClass::ParagraphBreak));
    }
}
