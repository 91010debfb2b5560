pub mod definition;
pub mod document;
pub mod ide;
pub mod server;
pub mod text_pos;
pub mod vfs;

pub use definition::{DefinitionProvider, DocumentView, Identifier, IdentifierKind, ProjectLayout, SearchPattern};
pub use ide::{IdeLocation, IdePosition, IdeRange};
pub use server::Au3LanguageServer;
pub use vfs::{EntryKind, OsVfs, Vfs, VfsEntry};
