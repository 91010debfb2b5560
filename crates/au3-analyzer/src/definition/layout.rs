use std::{
    ffi::OsStr,
    path::{Component, Path, PathBuf},
};

pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_LIBRARY_DIR: &str = "lib";
pub const DEFAULT_SCRIPT_EXTENSION: &str = "au3";

/// Project layout conventions used to discover include candidates.
///
/// Scripts live under a `src` tree, with shared code in a sibling `lib` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub source_dir: String,
    pub library_dir: String,
    pub script_extension: String,
    pub search_includes: bool,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.to_owned(),
            library_dir: DEFAULT_LIBRARY_DIR.to_owned(),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_owned(),
            search_includes: true,
        }
    }
}

/// The two roots whose scripts form the include candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoots {
    pub source: PathBuf,
    pub library: PathBuf,
}

impl ProjectLayout {
    /// `None` when `file` has no ancestor directory named like the source dir.
    pub fn roots_for(
        &self,
        file: &Path,
    ) -> Option<ProjectRoots> {
        let source = resolve_ancestor_dir(file, &self.source_dir)?;
        let library = sibling_root(&source, &self.library_dir);
        Some(ProjectRoots {
            source,
            library,
        })
    }
}

/// Return the path of the nearest ancestor directory of `file_path` named
/// `dir_name`, including that directory itself.
///
/// Trailing components are discarded until `dir_name` is reached. The file's
/// own name never counts as a match.
pub fn resolve_ancestor_dir(
    file_path: &Path,
    dir_name: &str,
) -> Option<PathBuf> {
    let parent = file_path.parent()?;
    let components: Vec<Component<'_>> = parent.components().collect();
    let idx = components.iter().rposition(|component| component.as_os_str() == OsStr::new(dir_name))?;
    Some(components[..=idx].iter().collect())
}

/// Swap the last component of `ancestor` for `sibling_name`.
///
/// This is a naming convention only; the sibling may not exist.
pub fn sibling_root(
    ancestor: &Path,
    sibling_name: &str,
) -> PathBuf {
    ancestor.with_file_name(sibling_name)
}

#[cfg(test)]
#[path = "../../tests/src/definition/layout_tests.rs"]
mod tests;
