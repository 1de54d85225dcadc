//! # Spans em Clusters de Grafemas
//!
//! Todo resultado do pipeline aponta para o texto original através de um [`Span`].
//! Os offsets contam **clusters de grafemas estendidos** (UAX #29), não bytes nem
//! code points. Assim, "🏃‍♂️" (cinco code points, treze bytes) ocupa exatamente uma
//! posição, e uma sílaba kannada com sinais vocálicos combinantes também.
//!
//! Os motores de tagging trabalham com offsets de byte (mais baratos em Rust);
//! o [`GraphemeIndex`] faz a conversão de um para o outro.
//!
//! ```rust
//! use nlp_core::span::{GraphemeIndex, Span};
//!
//! let text = "🇫🇷 🏆";
//! let index = GraphemeIndex::new(text);
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.slice(text, Span::new(2, 3)), "🏆");
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Intervalo semiaberto `[start, end)` em clusters de grafemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span invertido: {start}..{end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` se os dois spans compartilham pelo menos um grafema.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Tabela de fronteiras de grafemas de um texto.
///
/// `boundaries[i]` é o offset de byte onde começa o grafema `i`; o último
/// elemento é sempre `text.len()`, de modo que o texto tem `boundaries.len() - 1`
/// grafemas.
#[derive(Debug, Clone)]
pub struct GraphemeIndex {
    boundaries: Vec<usize>,
}

impl GraphemeIndex {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Número de grafemas do texto.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Span cobrindo o texto inteiro.
    pub fn full_span(&self) -> Span {
        Span::new(0, self.len())
    }

    /// Converte um offset de byte para grafema, arredondando para baixo
    /// quando o byte cai no meio de um cluster.
    pub fn grapheme_floor(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Como [`grapheme_floor`](Self::grapheme_floor), mas arredonda para cima.
    pub fn grapheme_ceil(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.min(self.len()),
        }
    }

    /// Converte um intervalo de bytes vindo do motor em um [`Span`] de grafemas.
    /// O span resultante nunca é menor que o intervalo original.
    pub fn span_for(&self, range: &Range<usize>) -> Span {
        let start = self.grapheme_floor(range.start);
        let end = self.grapheme_ceil(range.end).max(start);
        Span::new(start, end)
    }

    /// Intervalo de bytes correspondente a um span de grafemas.
    /// Retorna `None` se o span ultrapassa o fim do texto.
    pub fn byte_range(&self, span: Span) -> Option<Range<usize>> {
        if span.start > span.end || span.end > self.len() {
            return None;
        }
        Some(self.boundaries[span.start]..self.boundaries[span.end])
    }

    /// Substring do texto coberta pelo span (vazia se o span for inválido).
    pub fn slice<'a>(&self, text: &'a str, span: Span) -> &'a str {
        self.byte_range(span)
            .and_then(|r| text.get(r))
            .unwrap_or("")
    }
}
