use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::Url;

/// Read-only view of the document a definition request was made from.
#[derive(Debug, Clone)]
pub struct DocumentView<'a> {
    pub uri: &'a Url,
    pub text: &'a str,
    /// Filesystem path, when the document lives on disk.
    pub path: Option<PathBuf>,
}

impl<'a> DocumentView<'a> {
    pub fn new(
        uri: &'a Url,
        text: &'a str,
    ) -> Self {
        Self {
            uri,
            text,
            path: uri.to_file_path().ok(),
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}
