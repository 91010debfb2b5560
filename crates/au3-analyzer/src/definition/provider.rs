//! Definition provider implementation.

use std::{path::PathBuf, sync::Arc, time::Instant};

use tracing::{debug, warn};

use crate::{
    definition::{
        cross_file::{ScanStats, resolve_across_files},
        document_view::DocumentView,
        identifier::Identifier,
        includes::{parse_include_line, resolve_include},
        layout::ProjectLayout,
        local::resolve_local,
        pattern::SearchPattern,
        perf::{GotoDefPerf, ResolvedBy},
        scanner::list_scripts_recursive,
    },
    ide::navigation::{IdeLocation, IdePosition, IdeRange},
    text_pos::{byte_offset_at, line_at, word_at},
    vfs::{OsVfs, Vfs, normalized_path},
};

/// Provides go-to-definition for AutoIt scripts.
///
/// Nothing is cached between requests: every call re-derives the project
/// roots, re-scans them and re-reads the scripts it searches.
pub struct DefinitionProvider {
    vfs: Arc<dyn Vfs>,
    goto_def_perf: GotoDefPerf,
}

impl Default for DefinitionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionProvider {
    pub fn new() -> Self {
        Self::with_vfs(Arc::new(OsVfs))
    }

    pub fn with_vfs(vfs: Arc<dyn Vfs>) -> Self {
        Self {
            vfs,
            goto_def_perf: GotoDefPerf::default(),
        }
    }

    pub fn log_perf_summary(&self) {
        self.goto_def_perf.log_summary();
    }

    pub fn requests_served(&self) -> u64 {
        self.goto_def_perf.requests()
    }

    /// Resolve the definition of whatever is under `position`.
    pub fn provide(
        &self,
        document: &DocumentView<'_>,
        position: IdePosition,
        layout: &ProjectLayout,
    ) -> Option<IdeLocation> {
        let started = Instant::now();
        let (result, resolved_by, stats) = self.provide_inner(document, position, layout);
        self.goto_def_perf.record(started.elapsed(), resolved_by, stats);
        result
    }

    /// Resolve the definition of an already classified identifier.
    pub fn provide_for_identifier(
        &self,
        document: &DocumentView<'_>,
        identifier: &Identifier,
        layout: &ProjectLayout,
    ) -> Option<IdeLocation> {
        let started = Instant::now();
        let (result, resolved_by, stats) = self.resolve_identifier(document, identifier, layout);
        self.goto_def_perf.record(started.elapsed(), resolved_by, stats);
        result
    }

    fn provide_inner(
        &self,
        document: &DocumentView<'_>,
        position: IdePosition,
        layout: &ProjectLayout,
    ) -> (Option<IdeLocation>, ResolvedBy, ScanStats) {
        // TIER-0: cursor on an #include line jumps to the included script.
        if let Some(location) = self.resolve_include_line(document, position, layout) {
            return (Some(location), ResolvedBy::Include, ScanStats::default());
        }

        let Some((word, _)) = word_at(document.text, position) else {
            debug!("[goto-def] no word at {}:{}", position.line + 1, position.character + 1);
            return (None, ResolvedBy::Nothing, ScanStats::default());
        };
        let Some(identifier) = Identifier::classify(&word) else {
            return (None, ResolvedBy::Nothing, ScanStats::default());
        };

        self.resolve_identifier(document, &identifier, layout)
    }

    fn resolve_identifier(
        &self,
        document: &DocumentView<'_>,
        identifier: &Identifier,
        layout: &ProjectLayout,
    ) -> (Option<IdeLocation>, ResolvedBy, ScanStats) {
        let pattern = match SearchPattern::build(identifier) {
            Ok(pattern) => pattern,
            Err(error) => {
                warn!("[goto-def] cannot search for '{identifier}': {error}");
                return (None, ResolvedBy::Nothing, ScanStats::default());
            },
        };

        // TIER-1: the document itself.
        if let Some(location) = resolve_local(document, &pattern) {
            debug!("[goto-def] TIER-1 '{identifier}' ({:?}) resolved locally", identifier.kind());
            return (Some(location), ResolvedBy::Local, ScanStats::default());
        }

        if !layout.search_includes {
            debug!("[goto-def] include search disabled, '{identifier}' unresolved");
            return (None, ResolvedBy::Nothing, ScanStats::default());
        }

        // TIER-2: scripts included by the document.
        let result = resolve_across_files(self.vfs.as_ref(), document, &pattern, layout);
        let stats = result.stats;
        match result.location {
            Some(location) => {
                debug!(
                    "[goto-def] TIER-2 '{identifier}' resolved in {} ({} candidates, {} included, {} read)",
                    location.uri, stats.candidates, stats.included, stats.scripts_read
                );
                (Some(location), ResolvedBy::CrossFile, stats)
            },
            None => {
                debug!(
                    "[goto-def] '{identifier}' unresolved ({} candidates, {} included, {} read)",
                    stats.candidates, stats.included, stats.scripts_read
                );
                (None, ResolvedBy::Nothing, stats)
            },
        }
    }

    fn resolve_include_line(
        &self,
        document: &DocumentView<'_>,
        position: IdePosition,
        layout: &ProjectLayout,
    ) -> Option<IdeLocation> {
        let offset = byte_offset_at(document.text, position)?;
        let directive = parse_include_line(line_at(document.text, offset), position.line)?;
        let document_path = document.path.as_deref()?;
        let document_dir = document_path.parent();

        let from_candidates = layout.roots_for(document_path).and_then(|roots| {
            let mut candidates = list_scripts_recursive(self.vfs.as_ref(), &roots.source, &layout.script_extension);
            candidates.extend(list_scripts_recursive(self.vfs.as_ref(), &roots.library, &layout.script_extension));
            let normalized: Vec<PathBuf> =
                candidates.iter().map(|candidate| normalized_path(&candidate.path)).collect();
            resolve_include(&directive, document_dir, &normalized).map(|idx| candidates[idx].path.clone())
        });

        let target = from_candidates.or_else(|| {
            let target = directive.target_path();
            let joined = if target.is_absolute() {
                target
            } else {
                document_dir?.join(target)
            };
            let joined = normalized_path(&joined);
            self.vfs.is_file(&joined).then_some(joined)
        })?;

        debug!("[goto-def] TIER-0 include '{}' -> {}", directive.raw_target, target.display());
        IdeLocation::from_path(&target, IdeRange::default())
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/provider_tests.rs"]
mod tests;
