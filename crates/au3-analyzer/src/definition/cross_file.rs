//! Search across the scripts a document includes.
//!
//! The search is split in two steps: [`find_matching_script`] walks the
//! included scripts in order and stops at the first one whose content matches,
//! and [`materialize`] turns that winner into a location inside the winner's
//! own content.

use tracing::{debug, warn};

use crate::{
    definition::{
        document_view::DocumentView,
        includes::filter_included,
        layout::ProjectLayout,
        local::match_range,
        pattern::{PatternMatch, SearchPattern},
        scanner::{ScriptCandidate, list_scripts_recursive},
    },
    ide::navigation::IdeLocation,
    vfs::Vfs,
};

/// Counters describing how much work one cross-file search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub candidates: usize,
    pub included: usize,
    pub scripts_read: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMatch {
    pub script: ScriptCandidate,
    pub content: String,
    pub found: PatternMatch,
}

#[derive(Debug, Clone, Default)]
pub struct CrossFileResult {
    pub location: Option<IdeLocation>,
    pub stats: ScanStats,
}

/// Scripts under the project's source and library roots that the document
/// includes directly. Empty when the document is not inside a source tree.
pub fn included_scripts(
    vfs: &dyn Vfs,
    document: &DocumentView<'_>,
    layout: &ProjectLayout,
    stats: &mut ScanStats,
) -> Vec<ScriptCandidate> {
    let Some(path) = document.path.as_deref() else {
        debug!("[goto-def] {} is not a file, skipping include search", document.uri);
        return Vec::new();
    };
    let Some(roots) = layout.roots_for(path) else {
        debug!("[goto-def] no '{}' ancestor for {}, skipping include search", layout.source_dir, path.display());
        return Vec::new();
    };

    let mut candidates = list_scripts_recursive(vfs, &roots.source, &layout.script_extension);
    candidates.extend(list_scripts_recursive(vfs, &roots.library, &layout.script_extension));
    stats.candidates = candidates.len();

    let included = filter_included(document.text, &candidates, document);
    stats.included = included.len();
    included
}

/// Load each script in order and return the first whose content matches.
///
/// Every script is read at most once; unreadable scripts count as non-matches.
pub fn find_matching_script(
    vfs: &dyn Vfs,
    scripts: &[ScriptCandidate],
    pattern: &SearchPattern,
    stats: &mut ScanStats,
) -> Option<ScriptMatch> {
    for script in scripts {
        let content = match vfs.read_to_string(&script.path) {
            Ok(content) => content,
            Err(error) => {
                debug!("[goto-def] skipping unreadable script {}: {error}", script.path.display());
                continue;
            },
        };
        stats.scripts_read += 1;

        match pattern.find(&content) {
            Ok(Some(found)) => {
                return Some(ScriptMatch {
                    script: script.clone(),
                    content,
                    found,
                });
            },
            Ok(None) => {},
            Err(error) => {
                warn!("[goto-def] search in {} failed: {error}", script.path.display());
            },
        }
    }
    None
}

/// Location of a cross-file match, projected onto the matched script's text.
pub fn materialize(script_match: &ScriptMatch) -> Option<IdeLocation> {
    let range = match_range(&script_match.content, &script_match.found);
    IdeLocation::from_path(&script_match.script.path, range)
}

pub fn resolve_across_files(
    vfs: &dyn Vfs,
    document: &DocumentView<'_>,
    pattern: &SearchPattern,
    layout: &ProjectLayout,
) -> CrossFileResult {
    let mut stats = ScanStats::default();
    let included = included_scripts(vfs, document, layout, &mut stats);
    if included.is_empty() {
        return CrossFileResult {
            location: None,
            stats,
        };
    }

    let location = find_matching_script(vfs, &included, pattern, &mut stats).and_then(|script_match| {
        debug!(
            "[goto-def] include match in {} at byte {}",
            script_match.script.path.display(),
            script_match.found.offset
        );
        materialize(&script_match)
    });

    CrossFileResult {
        location,
        stats,
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/cross_file_tests.rs"]
mod tests;
