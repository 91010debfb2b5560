#![allow(dead_code)]

use std::{
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use au3_analyzer::{OsVfs, Vfs, VfsEntry};
use tower_lsp::lsp_types::{Position, Url};

/// An on-disk AutoIt project in a temporary directory.
pub struct TempProject {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

impl TempProject {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let root = dir.path().canonicalize().expect("canonical tempdir");
        let project = Self {
            _dir: dir,
            root,
        };
        for (relative, content) in files {
            project.write(relative, content);
        }
        project
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(
        &self,
        relative: &str,
    ) -> PathBuf {
        self.root.join(relative)
    }

    pub fn uri(
        &self,
        relative: &str,
    ) -> Url {
        Url::from_file_path(self.path(relative)).expect("project path is valid file:// URI")
    }

    pub fn read(
        &self,
        relative: &str,
    ) -> String {
        std::fs::read_to_string(self.path(relative)).expect("project file must exist")
    }

    pub fn write(
        &self,
        relative: &str,
        content: &str,
    ) {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().expect("file has a parent")).expect("create parent dirs");
        std::fs::write(path, content).expect("write project file");
    }
}

/// A [`Vfs`] over the real filesystem that records every script read.
#[derive(Default)]
pub struct RecordingVfs {
    reads: Mutex<Vec<PathBuf>>,
}

impl RecordingVfs {
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().expect("reads lock").clone()
    }
}

impl Vfs for RecordingVfs {
    fn read_dir(
        &self,
        dir: &Path,
    ) -> io::Result<Vec<VfsEntry>> {
        OsVfs.read_dir(dir)
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> io::Result<String> {
        self.reads.lock().expect("reads lock").push(path.to_path_buf());
        OsVfs.read_to_string(path)
    }

    fn is_file(
        &self,
        path: &Path,
    ) -> bool {
        OsVfs.is_file(path)
    }
}

pub fn position_of(
    source: &str,
    needle: &str,
) -> Position {
    position_of_nth(source, needle, 0)
}

pub fn position_of_nth(
    source: &str,
    needle: &str,
    nth: usize,
) -> Position {
    assert!(!needle.is_empty(), "needle must not be empty");
    let mut from = 0usize;
    let mut current = 0usize;

    loop {
        let Some(idx) = source[from..].find(needle) else {
            panic!("needle not found: {needle}");
        };
        let absolute = from + idx;
        if current == nth {
            let before = &source[..absolute];
            let line = before.as_bytes().iter().filter(|&&b| b == b'\n').count() as u32;
            let col = before
                .rsplit_once('\n')
                .map(|(_, tail)| tail.encode_utf16().count() as u32)
                .unwrap_or_else(|| before.encode_utf16().count() as u32);
            return Position::new(line, col);
        }
        current += 1;
        from = absolute + needle.len();
    }
}
