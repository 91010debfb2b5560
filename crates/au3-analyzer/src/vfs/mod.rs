//! Filesystem capability consumed by the definition engine.
//!
//! The engine never touches `std::fs` directly; it lists directories and reads
//! scripts through [`Vfs`].

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use walkdir::WalkDir;

/// Kind of a directory entry as reported by [`Vfs::read_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl VfsEntry {
    pub fn new(
        path: impl Into<PathBuf>,
        kind: EntryKind,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

pub trait Vfs: Send + Sync {
    /// List the immediate children of `dir`.
    fn read_dir(
        &self,
        dir: &Path,
    ) -> io::Result<Vec<VfsEntry>>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> io::Result<String>;

    fn is_file(
        &self,
        path: &Path,
    ) -> bool;
}

/// [`Vfs`] backed by the real filesystem.
///
/// Listings follow symlinks and are sorted by file name so that discovery
/// order does not depend on the platform's directory iteration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsVfs;

impl Vfs for OsVfs {
    fn read_dir(
        &self,
        dir: &Path,
    ) -> io::Result<Vec<VfsEntry>> {
        let metadata = std::fs::metadata(dir)?;
        if !metadata.is_dir() {
            return Err(io::Error::other(format!("{} is not a directory", dir.display())));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => return Err(error.into()),
                Err(_) => continue,
            };
            let file_type = entry.file_type();
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };
            entries.push(VfsEntry::new(entry.into_path(), kind));
        }
        Ok(entries)
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(
        &self,
        path: &Path,
    ) -> bool {
        path.is_file()
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component. Root and prefix components are preserved.
pub fn normalized_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                } else if !matches!(components.last(), Some(Component::RootDir | Component::Prefix(_))) {
                    components.push(component);
                }
            },
            other => components.push(other),
        }
    }
    components.iter().collect()
}

#[cfg(test)]
#[path = "../../tests/src/vfs_tests.rs"]
mod tests;
