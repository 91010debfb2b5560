pub(crate) mod handler;
pub(crate) mod settings;
pub(crate) mod state;

pub use state::Au3LanguageServer;
