use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

use crate::{
    definition::DocumentView,
    ide::lsp::lsp_position_to_ide,
    text_pos::byte_offset_at,
};

/// Snapshot of a single open text document.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: Url,
    /// Full source text (always kept up-to-date).
    pub text: String,
    /// Document version as reported by the client.
    pub version: i32,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        Self {
            uri,
            text,
            version,
        }
    }

    pub fn view(&self) -> DocumentView<'_> {
        DocumentView::new(&self.uri, &self.text)
    }

    /// Convert an LSP `Position` (UTF-16 based) to a byte offset.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        byte_offset_at(&self.text, lsp_position_to_ide(pos))
    }

    /// Apply a list of incremental or full-content changes and bump version.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            match change.range {
                Some(range) => {
                    if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end))
                        && start <= end
                    {
                        self.text.replace_range(start..end, &change.text);
                    }
                },
                None => self.text = change.text,
            }
        }
        self.version = version;
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
