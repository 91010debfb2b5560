//! Declaration search patterns.
//!
//! A [`SearchPattern`] finds the first declaration-like occurrence of one
//! identifier while skipping commented-out code. Comment exclusion lives in the
//! pattern itself:
//!
//! - the match is anchored at a line start and the text before it on the same
//!   line may not contain `;`, `#cs` or `#comments-start` (tempered negative
//!   lookahead);
//! - the text after it, up to the next `#`, may not be `#ce` or
//!   `#comments-end`, which is how an open block comment is detected.
//!
//! Only lines that contain the identifier are tried: a plain [`regex`]
//! prefilter finds them and the declaration pattern runs anchored at each
//! such line start. The anchored pattern ends in an empty alternative, so a
//! line without a declaration still matches at its start (with no `decl`
//! group) instead of being retried from every later offset.
//!
//! This is an approximation: markers inside strings or nested blocks are not
//! understood, matching how AutoIt tooling has traditionally behaved.

use std::fmt::{Display, Formatter};

use fancy_regex::{Regex, RegexBuilder};

use crate::definition::identifier::{Identifier, IdentifierKind};

const COMMENT_FREE_LINE_PREFIX: &str = r"(?:(?!;|#cs|#comments-start)[^\n])*?";
const NOT_IN_BLOCK_COMMENT: &str = r"(?!(?>[^#]*)(?:#ce|#comments-end))";
const BACKTRACK_LIMIT: usize = 1_000_000;

#[derive(Debug)]
pub enum PatternError {
    Build(fancy_regex::Error),
    Prefilter(regex::Error),
    Search(fancy_regex::Error),
}

impl Display for PatternError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            PatternError::Build(error) => write!(f, "failed to build declaration pattern: {error}"),
            PatternError::Prefilter(error) => write!(f, "failed to build identifier prefilter: {error}"),
            PatternError::Search(error) => write!(f, "declaration search aborted: {error}"),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Build(error) | PatternError::Search(error) => Some(error),
            PatternError::Prefilter(error) => Some(error),
        }
    }
}

/// First declaration found by a [`SearchPattern`], in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// Start of the declaration text: the keyword when present, else the name.
    pub start: usize,
    /// Length of the captured keyword including trailing whitespace.
    pub keyword_len: usize,
    /// `start + keyword_len`, i.e. where the declared name begins.
    pub offset: usize,
    /// Length of the declared name as written in the source.
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct SearchPattern {
    kind: IdentifierKind,
    regex: Regex,
    prefilter: regex::Regex,
}

impl SearchPattern {
    pub fn build(identifier: &Identifier) -> Result<Self, PatternError> {
        let source = pattern_source(identifier);
        let regex = RegexBuilder::new(&source).backtrack_limit(BACKTRACK_LIMIT).build().map_err(PatternError::Build)?;
        let prefilter = regex::RegexBuilder::new(&regex::escape(identifier.text()))
            .case_insensitive(identifier.kind() == IdentifierKind::Variable)
            .build()
            .map_err(PatternError::Prefilter)?;
        Ok(Self {
            kind: identifier.kind(),
            regex,
            prefilter,
        })
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn find(
        &self,
        text: &str,
    ) -> Result<Option<PatternMatch>, PatternError> {
        let mut tried_line = None;
        for occurrence in self.prefilter.find_iter(text) {
            let line_start = text[..occurrence.start()].rfind('\n').map_or(0, |newline| newline + 1);
            if tried_line == Some(line_start) {
                continue;
            }
            tried_line = Some(line_start);

            if let Some(found) = self.match_at_line(text, line_start)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn match_at_line(
        &self,
        text: &str,
        line_start: usize,
    ) -> Result<Option<PatternMatch>, PatternError> {
        let Some(captures) = self.regex.captures(&text[line_start..]).map_err(PatternError::Search)? else {
            return Ok(None);
        };
        let (Some(decl), Some(name)) = (captures.name("decl"), captures.name("name")) else {
            return Ok(None);
        };
        let keyword_len = captures.name("keyword").map_or(0, |keyword| keyword.as_str().len());
        let start = line_start + decl.start();

        Ok(Some(PatternMatch {
            start,
            keyword_len,
            offset: start + keyword_len,
            len: name.as_str().len(),
        }))
    }
}

fn pattern_source(identifier: &Identifier) -> String {
    let name = fancy_regex::escape(identifier.text());
    let declaration = match identifier.kind() {
        IdentifierKind::Variable => format!(
            r"(?P<decl>(?P<keyword>(?:Local|Global|Const)[ \t]*)?(?P<name>{name})\b(?:\[[\w\\$]+\])?[ \t]*=?.*)"
        ),
        IdentifierKind::Function => format!(r"(?P<decl>(?P<keyword>Func[ \t]+)(?P<name>{name})[ \t]*\()"),
    };
    let flags = match identifier.kind() {
        IdentifierKind::Variable => "(?i)",
        IdentifierKind::Function => "",
    };
    format!(r"{flags}\A(?:{COMMENT_FREE_LINE_PREFIX}{declaration}{NOT_IN_BLOCK_COMMENT}|)")
}

#[cfg(test)]
#[path = "../../tests/src/definition/pattern_tests.rs"]
mod tests;
