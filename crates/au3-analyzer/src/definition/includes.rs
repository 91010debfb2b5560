//! `#include` directive extraction and resolution.
//!
//! Only the directives written in the requesting document are followed;
//! includes of included scripts are not expanded.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    definition::{document_view::DocumentView, scanner::ScriptCandidate},
    vfs::normalized_path,
};

static INCLUDE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*#include\s*(?:"(?P<double>[^"]+)"|'(?P<single>[^']+)'|<(?P<library>[^>]+)>)"#)
        .expect("include directive regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    /// `#include "file.au3"` / `#include 'file.au3'`: script directory first.
    Quoted,
    /// `#include <file.au3>`: library directories first.
    Library,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub raw_target: String,
    pub kind: IncludeKind,
    /// Zero-based line of the directive.
    pub line: u32,
}

impl IncludeDirective {
    /// The target as a relative path, accepting both `\` and `/` separators.
    pub fn target_path(&self) -> PathBuf {
        let raw = self.raw_target.trim();
        if Path::new(raw).is_absolute() {
            return PathBuf::from(raw);
        }
        raw.split(['\\', '/']).filter(|segment| !segment.is_empty()).collect()
    }
}

/// Parse one line as an include directive.
pub fn parse_include_line(
    line: &str,
    line_number: u32,
) -> Option<IncludeDirective> {
    let captures = INCLUDE_DIRECTIVE.captures(line)?;
    let (raw_target, kind) = if let Some(target) = captures.name("double").or_else(|| captures.name("single")) {
        (target.as_str(), IncludeKind::Quoted)
    } else {
        (captures.name("library")?.as_str(), IncludeKind::Library)
    };
    let raw_target = raw_target.trim();
    if raw_target.is_empty() {
        return None;
    }
    Some(IncludeDirective {
        raw_target: raw_target.to_owned(),
        kind,
        line: line_number,
    })
}

/// Collect the include directives of `text` in source order.
///
/// Directives inside `#cs`/`#ce` (or `#comments-start`/`#comments-end`) blocks
/// are ignored. Line comments never match because directives must start the line.
pub fn parse_include_directives(text: &str) -> Vec<IncludeDirective> {
    let mut directives = Vec::new();
    let mut block_depth = 0usize;

    for (line_number, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_start();
        if starts_with_marker(line, &["#comments-start", "#cs"]) {
            block_depth += 1;
            continue;
        }
        if starts_with_marker(line, &["#comments-end", "#ce"]) {
            block_depth = block_depth.saturating_sub(1);
            continue;
        }
        if block_depth > 0 {
            continue;
        }
        if let Some(directive) = parse_include_line(line, line_number as u32) {
            directives.push(directive);
        }
    }
    directives
}

fn starts_with_marker(
    line: &str,
    markers: &[&str],
) -> bool {
    markers.iter().any(|marker| {
        line.get(..marker.len()).is_some_and(|head| head.eq_ignore_ascii_case(marker))
            && line[marker.len()..].chars().next().is_none_or(|c| !c.is_alphanumeric() && c != '-' && c != '_')
    })
}

/// Resolve one directive to an index into `normalized_candidates`.
///
/// Quoted targets try the document directory before the library search;
/// library targets try the other way round. The library search takes the
/// first candidate whose path ends with the target's components.
pub fn resolve_include(
    directive: &IncludeDirective,
    document_dir: Option<&Path>,
    normalized_candidates: &[PathBuf],
) -> Option<usize> {
    let target = normalized_path(&directive.target_path());
    if target.as_os_str().is_empty() {
        return None;
    }

    let relative = || {
        let joined = if target.is_absolute() {
            target.clone()
        } else {
            normalized_path(&document_dir?.join(&target))
        };
        normalized_candidates.iter().position(|candidate| *candidate == joined)
    };
    let library = || {
        if target.is_absolute() {
            return None;
        }
        normalized_candidates.iter().position(|candidate| candidate.ends_with(&target))
    };

    match directive.kind {
        IncludeKind::Quoted => relative().or_else(library),
        IncludeKind::Library => library().or_else(relative),
    }
}

/// Narrow `candidates` to the scripts referenced by the document's own
/// include directives, in order of first reference and without duplicates.
/// Directives that resolve to no candidate are dropped.
pub fn filter_included(
    text: &str,
    candidates: &[ScriptCandidate],
    document: &DocumentView<'_>,
) -> Vec<ScriptCandidate> {
    let normalized: Vec<PathBuf> = candidates.iter().map(|candidate| normalized_path(&candidate.path)).collect();
    let document_dir = document.directory();

    let mut seen = HashSet::new();
    let mut included = Vec::new();
    for directive in parse_include_directives(text) {
        match resolve_include(&directive, document_dir, &normalized) {
            Some(idx) => {
                if seen.insert(idx) {
                    included.push(candidates[idx].clone());
                }
            },
            None => {
                debug!(
                    "[includes] unresolved include '{}' on line {} of {}",
                    directive.raw_target,
                    directive.line + 1,
                    document.uri
                );
            },
        }
    }
    included
}

#[cfg(test)]
#[path = "../../tests/src/definition/includes_tests.rs"]
mod tests;
