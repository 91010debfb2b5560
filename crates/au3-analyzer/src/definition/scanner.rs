use std::path::{Path, PathBuf};

use tracing::debug;

use crate::vfs::{EntryKind, Vfs};

const MAX_SCAN_DEPTH: usize = 32;

/// A script file discovered under a project root. Its text is loaded only when
/// the file is actually searched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptCandidate {
    pub path: PathBuf,
}

impl ScriptCandidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

/// Recursively list every script with `extension` below `root`.
///
/// Unreadable or missing directories contribute nothing; a missing `lib` tree
/// must never block resolution through `src`.
pub fn list_scripts_recursive(
    vfs: &dyn Vfs,
    root: &Path,
    extension: &str,
) -> Vec<ScriptCandidate> {
    list_scripts_at_depth(vfs, root, extension, 0)
}

fn list_scripts_at_depth(
    vfs: &dyn Vfs,
    root: &Path,
    extension: &str,
    depth: usize,
) -> Vec<ScriptCandidate> {
    // Listings follow symlinks, so a link cycle would otherwise recurse forever.
    if depth > MAX_SCAN_DEPTH {
        debug!("[scan] depth limit reached at {}", root.display());
        return Vec::new();
    }

    let entries = match vfs.read_dir(root) {
        Ok(entries) => entries,
        Err(error) => {
            debug!("[scan] skipping {}: {error}", root.display());
            return Vec::new();
        },
    };

    let mut scripts = Vec::new();
    for entry in entries {
        match entry.kind {
            EntryKind::File if has_extension(&entry.path, extension) => {
                scripts.push(ScriptCandidate::new(entry.path));
            },
            EntryKind::Directory => {
                scripts.extend(list_scripts_at_depth(vfs, &entry.path, extension, depth + 1));
            },
            _ => {},
        }
    }
    scripts
}

fn has_extension(
    path: &Path,
    extension: &str,
) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
#[path = "../../tests/src/definition/scanner_tests.rs"]
mod tests;
