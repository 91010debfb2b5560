use std::fmt::{Display, Formatter};

/// Sigil that marks AutoIt variables (`$name`).
pub const VARIABLE_SIGIL: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Variable,
    Function,
}

/// The word under the cursor, classified once at request entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    text: String,
    kind: IdentifierKind,
}

impl Identifier {
    /// Classify a word: a leading `$` makes it a variable, anything else is
    /// treated as a function name. Empty words and a lone sigil are rejected.
    pub fn classify(word: &str) -> Option<Self> {
        let word = word.trim();
        let kind = match word.strip_prefix(VARIABLE_SIGIL) {
            Some("") => return None,
            Some(_) => IdentifierKind::Variable,
            None if word.is_empty() => return None,
            None => IdentifierKind::Function,
        };
        Some(Self {
            text: word.to_owned(),
            kind,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn is_variable(&self) -> bool {
        self.kind == IdentifierKind::Variable
    }
}

impl Display for Identifier {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/identifier_tests.rs"]
mod tests;
