//! Opções de anotação por chamada.

use serde::{Deserialize, Serialize};

use crate::span::Span;
use crate::tagger::NameKind;
use crate::tokenizer::TokenUnit;

/// Como segmentar e o que filtrar em uma chamada de `annotate`.
///
/// O padrão não omite nada, então a tokenização cobre o texto inteiro.
/// [`Options::tagging`] reproduz o perfil típico de tagging (sem pontuação e
/// sem espaços).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub unit: TokenUnit,
    pub omit_punctuation: bool,
    pub omit_whitespace: bool,
    /// Descarta símbolos e emoji.
    pub omit_other: bool,
    /// Funde palavras adjacentes com o mesmo tipo de nome ("San Francisco").
    pub join_names: bool,
    /// Tipos de nome aceitos em `NameType`; vazio é erro de configuração.
    pub name_kinds: Vec<NameKind>,
    /// Sub-intervalo (em grafemas) a analisar. Spans continuam relativos ao
    /// texto completo.
    pub range: Option<Span>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unit: TokenUnit::Word,
            omit_punctuation: false,
            omit_whitespace: false,
            omit_other: false,
            join_names: false,
            name_kinds: NameKind::all().to_vec(),
            range: None,
        }
    }
}

impl Options {
    pub fn tagging() -> Self {
        Self {
            omit_punctuation: true,
            omit_whitespace: true,
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: TokenUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn omit_punctuation(mut self, omit: bool) -> Self {
        self.omit_punctuation = omit;
        self
    }

    pub fn omit_whitespace(mut self, omit: bool) -> Self {
        self.omit_whitespace = omit;
        self
    }

    pub fn omit_other(mut self, omit: bool) -> Self {
        self.omit_other = omit;
        self
    }

    pub fn join_names(mut self, join: bool) -> Self {
        self.join_names = join;
        self
    }

    pub fn with_name_kinds(mut self, kinds: impl IntoIterator<Item = NameKind>) -> Self {
        self.name_kinds = kinds.into_iter().collect();
        self
    }

    pub fn with_range(mut self, range: Span) -> Self {
        self.range = Some(range);
        self
    }
}
