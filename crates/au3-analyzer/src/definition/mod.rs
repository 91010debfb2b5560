//! Go-to-definition for AutoIt scripts.
//!
//! Resolution order for a word under the cursor:
//! 1. the requesting document;
//! 2. the scripts it includes, looked up among every script under the
//!    project's `src` and sibling `lib` trees.

mod cross_file;
mod document_view;
mod identifier;
mod includes;
mod layout;
mod local;
mod pattern;
mod perf;
mod provider;
mod scanner;

pub use cross_file::{
    CrossFileResult, ScanStats, ScriptMatch, find_matching_script, included_scripts, materialize,
    resolve_across_files,
};
pub use document_view::DocumentView;
pub use identifier::{Identifier, IdentifierKind, VARIABLE_SIGIL};
pub use includes::{
    IncludeDirective, IncludeKind, filter_included, parse_include_directives, parse_include_line, resolve_include,
};
pub use layout::{
    DEFAULT_LIBRARY_DIR, DEFAULT_SCRIPT_EXTENSION, DEFAULT_SOURCE_DIR, ProjectLayout, ProjectRoots,
    resolve_ancestor_dir, sibling_root,
};
pub use local::resolve_local;
pub use pattern::{PatternError, PatternMatch, SearchPattern};
pub use provider::DefinitionProvider;
pub use scanner::{ScriptCandidate, list_scripts_recursive};
