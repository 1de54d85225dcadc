//! # Segmentação de Texto
//!
//! Divide o texto bruto em unidades ([`TokenUnit`]): palavras, sentenças,
//! parágrafos ou o documento inteiro. Diferente de um tokenizador para
//! modelos, aqui **nada é descartado**: espaços e pontuação também viram tokens,
//! de modo que a sequência de tokens particiona o texto original byte a byte.
//! Quem decide o que omitir é o [`Annotator`](crate::annotator::Annotator).
//!
//! ## Estratégias
//!
//! - [`segment`]: fronteiras Unicode (UAX #29) via `unicode-segmentation`.
//!   Lida com emojis compostos ("🏃‍♂️", bandeiras) e escritas indianas.
//! - [`segment_standard`]: divisor manual por grafemas, com abreviações e
//!   números decimais preservados. É o tokenizador do motor legado
//!   ([`BasicEngine`](crate::basic::BasicEngine)).
//!
//! ```rust
//! use nlp_core::tokenizer::{segment, TokenKind, TokenUnit};
//!
//! let tokens = segment("Mysuru 2018 🏆", TokenUnit::Word);
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Word, TokenKind::Whitespace, TokenKind::Number, TokenKind::Whitespace, TokenKind::Emoji]
//! );
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Granularidade da segmentação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenUnit {
    /// Palavras, espaços, pontuação e emojis separados.
    #[default]
    Word,
    /// Sentenças (incluindo o espaço que as segue).
    Sentence,
    /// Parágrafos, terminados por uma ou mais quebras de linha.
    Paragraph,
    /// O texto inteiro como um único token.
    Document,
}

impl TokenUnit {
    pub fn name(&self) -> &'static str {
        match self {
            TokenUnit::Word => "word",
            TokenUnit::Sentence => "sentence",
            TokenUnit::Paragraph => "paragraph",
            TokenUnit::Document => "document",
        }
    }

    pub fn all() -> [TokenUnit; 4] {
        [
            TokenUnit::Word,
            TokenUnit::Sentence,
            TokenUnit::Paragraph,
            TokenUnit::Document,
        ]
    }
}

/// Classificação grosseira de um token; é o vocabulário de rótulos do esquema
/// `Tokenization`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Number,
    Emoji,
    Symbol,
    Punctuation,
    Whitespace,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::Emoji => "emoji",
            TokenKind::Symbol => "symbol",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Whitespace => "whitespace",
        }
    }

    /// Emojis e símbolos são "outros" (opção `omit_other`).
    pub fn is_other(&self) -> bool {
        matches!(self, TokenKind::Emoji | TokenKind::Symbol)
    }
}

/// Um token extraído do texto original.
///
/// `start`/`end` são offsets de **byte**; a conversão para grafemas fica com o
/// [`GraphemeIndex`](crate::span::GraphemeIndex).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Mysuru", " ", "🏆").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    pub kind: TokenKind,
}

/// Abreviações que não terminam no ponto (modo standard).
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Mr", "Mrs", "Ms", "Prof", "St", "Sr", "Jr", "Inc", "Ltd", "Co",
    "Corp", "Gen", "Gov", "Sen", "Rep", "Capt", "Lt", "Col", "vs", "etc",
    "e.g", "i.e", "U.S", "U.K", "No", "Fig", "Vol", "approx",
];

/// Segmenta o texto usando as regras Unicode de fronteira (UAX #29).
pub fn segment(text: &str, unit: TokenUnit) -> Vec<Token> {
    let pieces: Vec<(usize, &str)> = match unit {
        TokenUnit::Word => text.split_word_bound_indices().collect(),
        TokenUnit::Sentence => text.split_sentence_bound_indices().collect(),
        TokenUnit::Paragraph => split_paragraphs(text),
        TokenUnit::Document if text.is_empty() => vec![],
        TokenUnit::Document => vec![(0, text)],
    };

    pieces
        .into_iter()
        .map(|(start, piece)| Token {
            text: piece.to_string(),
            start,
            end: start + piece.len(),
            kind: match unit {
                TokenUnit::Word => classify(piece),
                _ => classify_block(piece),
            },
        })
        .collect()
}

/// Tokenizador manual por grafemas.
///
/// Agrupa letras/dígitos em palavras, mantém abreviações conhecidas ("Dr.") e
/// números com separador ("3.14") num só token, junta espaços consecutivos e
/// emite cada outro grafema isolado. Anda por clusters estendidos, então toda
/// fronteira de token é fronteira de grafema ("🏃‍♂️" e "ನ್ನು" não se partem).
pub fn segment_standard(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut current_start = 0;
    let mut current = String::new();
    let mut space_start: Option<usize> = None;

    let first_char = |i: usize| graphemes.get(i).and_then(|(_, g)| g.chars().next());

    for (i, &(byte_pos, g)) in graphemes.iter().enumerate() {
        let Some(ch) = g.chars().next() else {
            continue;
        };
        let is_space = g.chars().all(char::is_whitespace);

        if !is_space {
            if let Some(s) = space_start.take() {
                push_token(&mut tokens, &text[s..byte_pos], s);
            }
        }

        if ch.is_alphanumeric() || (ch == '-' || ch == '\'' || ch == '\u{2019}') && !current.is_empty() {
            if current.is_empty() {
                current_start = byte_pos;
            }
            current.push_str(g);
        } else if g == "." && !current.is_empty() {
            let is_abbrev = ABBREVIATIONS.contains(&current.as_str());
            let current_is_num = current.chars().all(char::is_numeric);
            let next_is_num = first_char(i + 1).map(char::is_numeric).unwrap_or(false);
            let next_is_upper_dot = first_char(i + 1).map(char::is_uppercase).unwrap_or(false)
                && graphemes.get(i + 2).map(|(_, g)| *g == ".").unwrap_or(false);

            if current_is_num && next_is_num || next_is_upper_dot {
                // "3.14", "U.S"
                current.push('.');
            } else if is_abbrev {
                current.push('.');
                flush(&mut tokens, &mut current, current_start);
            } else {
                flush(&mut tokens, &mut current, current_start);
                push_token(&mut tokens, ".", byte_pos);
            }
        } else if is_space {
            flush(&mut tokens, &mut current, current_start);
            if space_start.is_none() {
                space_start = Some(byte_pos);
            }
        } else {
            flush(&mut tokens, &mut current, current_start);
            push_token(&mut tokens, g, byte_pos);
        }
    }

    flush(&mut tokens, &mut current, current_start);
    if let Some(s) = space_start {
        push_token(&mut tokens, &text[s..], s);
    }

    tokens
}

/// Classifica um segmento de palavra.
pub fn classify(piece: &str) -> TokenKind {
    if piece.chars().all(char::is_whitespace) {
        return TokenKind::Whitespace;
    }
    if number_pattern().is_match(piece) {
        return TokenKind::Number;
    }
    if piece.chars().any(char::is_alphanumeric) {
        return TokenKind::Word;
    }
    if piece.chars().any(is_emoji_char) {
        return TokenKind::Emoji;
    }
    if piece.chars().all(is_punctuation_char) {
        return TokenKind::Punctuation;
    }
    TokenKind::Symbol
}

/// Blocos maiores que palavras só distinguem "tem conteúdo" de "só espaço".
fn classify_block(piece: &str) -> TokenKind {
    if piece.chars().all(char::is_whitespace) {
        TokenKind::Whitespace
    } else {
        TokenKind::Word
    }
}

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?\p{Nd}+(?:[.,:/]\p{Nd}+)*%?$").expect("regex de número válida")
    })
}

/// Aproximação dos blocos de emoji (pictogramas, bandeiras, dingbats).
pub fn is_emoji_char(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1FAFF |  // pictogramas, emoticons, transporte, bandeiras
        0x2600..=0x27BF |    // símbolos diversos e dingbats
        0x2B00..=0x2BFF      // setas e estrelas
    )
}

pub fn is_punctuation_char(c: char) -> bool {
    matches!(c,
        '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | ',' | '-' | '.' | '/'
        | ':' | ';' | '?' | '@' | '[' | '\\' | ']' | '_' | '{' | '}' | '¡' | '¿' | '«' | '»'
        | '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' | '\u{3001}'..='\u{3003}'
        | '\u{0964}' | '\u{0965}'
    )
}

/// Parágrafos terminam depois da última quebra de linha de uma sequência.
fn split_paragraphs(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_break = false;

    for (i, c) in text.char_indices() {
        let is_break = c == '\n' || c == '\r' || c == '\u{2029}';
        if in_break && !is_break {
            out.push((start, &text[start..i]));
            start = i;
        }
        in_break = is_break;
    }
    if start < text.len() {
        out.push((start, &text[start..]));
    }
    out
}

fn flush(tokens: &mut Vec<Token>, current: &mut String, start: usize) {
    if !current.is_empty() {
        let end = start + current.len();
        tokens.push(Token {
            text: current.clone(),
            start,
            end,
            kind: classify(current),
        });
        current.clear();
    }
}

fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize) {
    tokens.push(Token {
        text: text.to_string(),
        start,
        end: start + text.len(),
        kind: classify(text),
    });
}
