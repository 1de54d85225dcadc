//! # Motor de Regras para Nomes — Gazetteers e Padrões
//!
//! Reconhece pessoas, lugares e organizações sem modelo estatístico:
//! listas de nomes conhecidos (gazetteers) e padrões de contexto.
//!
//! ## Regras, em ordem de prioridade
//!
//! 1. Gazetteer de organizações (n-gramas): "Apple Inc" → ORG.
//! 2. Gazetteer de lugares (n-gramas): "San Francisco", "Silicon Valley" → LOC.
//! 3. Gazetteer de primeiros nomes + sobrenomes capitalizados: "Steve Jobs" → PER.
//! 4. Título antes de nome: "Dr Rao" → PER.
//! 5. Sufixo de organização: "Infosys Ltd" → ORG.
//!
//! Uma regra nunca sobrescreve um token já marcado por regra anterior.

use serde::{Deserialize, Serialize};

use crate::tagger::NameKind;
use crate::tokenizer::{Token, TokenKind};

/// Uma correspondência de regra: qual token foi marcado e com qual tipo de nome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameMatch {
    pub token_index: usize,
    pub kind: NameKind,
    pub rule_name: String,
}

/// Entradas extras de gazetteer, vindas da configuração ou de um arquivo JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraNames {
    pub persons: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
}

impl ExtraNames {
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.places.is_empty() && self.organizations.is_empty()
    }
}

/// Motor de regras com gazetteers e padrões de contexto
#[derive(Debug, Clone)]
pub struct NameRules {
    /// Primeiros nomes conhecidos (lowercase)
    person_names: Vec<String>,
    /// Lugares (lowercase, pode ser múltiplas palavras)
    place_names: Vec<Vec<String>>,
    /// Organizações (lowercase, pode ser múltiplas palavras)
    org_names: Vec<Vec<String>>,
    /// Títulos que precedem nomes de pessoas
    person_titles: Vec<String>,
    /// Palavras que indicam organização à esquerda
    org_indicators: Vec<String>,
}

impl NameRules {
    pub fn new() -> Self {
        Self {
            person_names: vec![],
            place_names: vec![],
            org_names: vec![],
            person_titles: [
                "mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam", "president",
                "senator", "governor", "minister", "mayor", "general", "captain",
                "ceo", "founder", "coach", "judge", "king", "queen", "prince",
                "princess", "saint", "st",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_indicators: [
                "inc", "corp", "corporation", "ltd", "llc", "plc", "co", "company",
                "group", "holdings", "foundation", "institute", "university", "bank",
                "gmbh", "sa",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Regras com os gazetteers padrão (figuras e lugares das frases de demonstração
    /// e uma lista curta de nomes frequentes).
    pub fn build() -> Self {
        let mut rules = Self::new();

        let persons = [
            "Steve", "Bill", "Tim", "Larry", "Sergey", "Mark", "Elon", "Jeff",
            "Sundar", "Satya", "John", "Mary", "James", "Robert", "Michael",
            "David", "Sarah", "Linda", "Bharath", "Rahul", "Priya", "Anil",
            "Sachin", "Virat", "Sindhu", "Narendra", "Indira", "Mahatma",
        ];
        for p in persons {
            rules.add_person(p);
        }

        let places = [
            "California", "San Francisco", "Bay Area", "Silicon Valley", "U.S",
            "United States", "America", "New York", "London", "Paris", "France",
            "Germany", "Japan", "China", "India", "Karnataka", "Mysuru", "Mysore",
            "Bengaluru", "Bangalore", "Delhi", "New Delhi", "Mumbai", "Chennai",
            "Kolkata", "Hyderabad", "Kerala", "Europe", "Asia", "Africa", "Brazil",
            "São Paulo", "Tokyo", "Beijing", "Cupertino", "Seattle", "Texas",
        ];
        for p in places {
            rules.add_place(p);
        }

        let orgs = [
            "Apple", "Apple Inc", "Google", "Microsoft", "Amazon", "Facebook",
            "Infosys", "Wipro", "ISRO", "NASA", "UNESCO", "United Nations", "FIFA",
            "BBC", "Reuters", "Tata Motors", "Indian Railways",
        ];
        for o in orgs {
            rules.add_org(o);
        }

        rules
    }

    pub fn add_person(&mut self, name: &str) {
        // Só o primeiro nome entra no gazetteer; sobrenomes vêm pela regra de continuação
        for part in name.split_whitespace() {
            let lower = part.to_lowercase();
            if !self.person_names.contains(&lower) {
                self.person_names.push(lower);
            }
        }
    }

    pub fn add_place(&mut self, name: &str) {
        let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
        if !parts.is_empty() && !self.place_names.contains(&parts) {
            self.place_names.push(parts);
        }
    }

    pub fn add_org(&mut self, name: &str) {
        let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
        if !parts.is_empty() && !self.org_names.contains(&parts) {
            self.org_names.push(parts);
        }
    }

    pub fn extend(&mut self, extra: &ExtraNames) {
        for p in &extra.persons {
            self.add_person(p);
        }
        for p in &extra.places {
            self.add_place(p);
        }
        for o in &extra.organizations {
            self.add_org(o);
        }
    }

    /// Aplica todas as regras à sequência de tokens.
    ///
    /// `tokens` pode conter espaços e pontuação; as regras olham apenas os
    /// tokens de palavra, mas o vetor retornado é alinhado com a entrada
    /// (posição `i` → token `i`).
    pub fn apply(&self, tokens: &[Token]) -> Vec<Option<NameMatch>> {
        let mut result: Vec<Option<NameMatch>> = vec![None; tokens.len()];
        // Posições (em `tokens`) das palavras; n-gramas só atravessam espaço em branco
        let words: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Word)
            .map(|(i, _)| i)
            .collect();

        // 1. e 2. Gazetteers de n-gramas (organizações têm prioridade)
        for (gazetteer, kind, rule_name) in [
            (&self.org_names, NameKind::OrganizationName, "org_gazetteer"),
            (&self.place_names, NameKind::PlaceName, "place_gazetteer"),
        ] {
            let mut w = 0;
            while w < words.len() {
                let best = gazetteer
                    .iter()
                    .filter(|parts| self.ngram_matches(tokens, &words, w, parts, &result))
                    .map(|parts| parts.len())
                    .max();
                match best {
                    Some(len) => {
                        for &ti in &words[w..w + len] {
                            result[ti] = Some(NameMatch {
                                token_index: ti,
                                kind,
                                rule_name: rule_name.to_string(),
                            });
                        }
                        w += len;
                    }
                    None => w += 1,
                }
            }
        }

        // 3. Primeiro nome + sobrenomes capitalizados
        let mut w = 0;
        while w < words.len() {
            let ti = words[w];
            if result[ti].is_none() && self.person_names.contains(&tokens[ti].text.to_lowercase()) && is_capitalized(&tokens[ti].text) {
                result[ti] = Some(person_match(ti, "person_gazetteer"));
                let mut k = w + 1;
                while k < words.len()
                    && only_space_between(tokens, words[k - 1], words[k])
                    && result[words[k]].is_none()
                    && is_capitalized(&tokens[words[k]].text)
                {
                    result[words[k]] = Some(person_match(words[k], "surname_continuation"));
                    k += 1;
                }
                w = k;
            } else {
                w += 1;
            }
        }

        // 4. Título: "Dr Rao" → Rao é PER
        for pair in words.windows(2) {
            let (title, name) = (pair[0], pair[1]);
            if result[name].is_some() || !self.person_titles.contains(&tokens[title].text.to_lowercase()) {
                continue;
            }
            if is_capitalized(&tokens[name].text) && gap_is_title_separator(tokens, title, name) {
                result[name] = Some(person_match(name, "title_pattern"));
            }
        }

        // 5. Indicadores de organização: "Infosys Ltd" → Infosys é ORG
        for pair in words.windows(2) {
            let (prev, ind) = (pair[0], pair[1]);
            if !self.org_indicators.contains(&tokens[ind].text.to_lowercase()) || !is_capitalized(&tokens[ind].text) {
                continue;
            }
            if result[prev].is_none() && is_capitalized(&tokens[prev].text) && only_space_between(tokens, prev, ind) {
                for ti in [prev, ind] {
                    result[ti] = Some(NameMatch {
                        token_index: ti,
                        kind: NameKind::OrganizationName,
                        rule_name: "org_suffix_pattern".to_string(),
                    });
                }
            }
        }

        result
    }

    fn ngram_matches(
        &self,
        tokens: &[Token],
        words: &[usize],
        w: usize,
        parts: &[String],
        result: &[Option<NameMatch>],
    ) -> bool {
        if w + parts.len() > words.len() {
            return false;
        }
        let window = &words[w..w + parts.len()];
        // O n-grama precisa começar com maiúscula para não casar "apple" (a fruta)
        is_capitalized(&tokens[window[0]].text)
            && window.iter().all(|&ti| result[ti].is_none())
            && window.windows(2).all(|p| only_space_between(tokens, p[0], p[1]))
            && window
                .iter()
                .zip(parts)
                .all(|(&ti, part)| tokens[ti].text.to_lowercase() == *part)
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::new()
    }
}

fn person_match(token_index: usize, rule_name: &str) -> NameMatch {
    NameMatch {
        token_index,
        kind: NameKind::PersonalName,
        rule_name: rule_name.to_string(),
    }
}

fn is_capitalized(s: &str) -> bool {
    s.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

/// Entre os tokens `a` e `b` só há espaço em branco.
fn only_space_between(tokens: &[Token], a: usize, b: usize) -> bool {
    tokens[a + 1..b].iter().all(|t| t.kind == TokenKind::Whitespace)
}

/// "Dr Rao" e "Dr. Rao" são aceitos.
fn gap_is_title_separator(tokens: &[Token], a: usize, b: usize) -> bool {
    tokens[a + 1..b]
        .iter()
        .all(|t| t.kind == TokenKind::Whitespace || t.text == ".")
}
