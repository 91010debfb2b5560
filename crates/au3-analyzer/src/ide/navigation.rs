use std::path::Path;

use tower_lsp::lsp_types::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct IdePosition {
    pub line: u32,
    pub character: u32,
}

impl IdePosition {
    pub const fn new(
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            line,
            character,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IdeRange {
    pub start: IdePosition,
    pub end: IdePosition,
}

impl IdeRange {
    pub const fn new(
        start: IdePosition,
        end: IdePosition,
    ) -> Self {
        Self {
            start,
            end,
        }
    }
}

/// A single navigation target: a document plus the range of the declared name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdeLocation {
    pub uri: Url,
    pub range: IdeRange,
}

impl IdeLocation {
    pub fn new(
        uri: Url,
        range: IdeRange,
    ) -> Self {
        Self {
            uri,
            range,
        }
    }

    /// Location inside a file on disk; `None` for relative paths.
    pub fn from_path(
        path: &Path,
        range: IdeRange,
    ) -> Option<Self> {
        let uri = Url::from_file_path(path).ok()?;
        Some(Self::new(uri, range))
    }
}
