use tracing::{debug, warn};

use crate::{
    definition::{
        document_view::DocumentView,
        pattern::{PatternMatch, SearchPattern},
    },
    ide::navigation::{IdeLocation, IdeRange},
    text_pos::position_at,
};

/// Search the requesting document itself.
pub fn resolve_local(
    document: &DocumentView<'_>,
    pattern: &SearchPattern,
) -> Option<IdeLocation> {
    let found = match pattern.find(document.text) {
        Ok(found) => found?,
        Err(error) => {
            warn!("[goto-def] local search in {} failed: {error}", document.uri);
            return None;
        },
    };
    debug!("[goto-def] local match in {} at byte {}", document.uri, found.offset);
    Some(IdeLocation::new(document.uri.clone(), match_range(document.text, &found)))
}

/// Range of the declared name inside `text`.
pub(crate) fn match_range(
    text: &str,
    found: &PatternMatch,
) -> IdeRange {
    IdeRange::new(position_at(text, found.offset), position_at(text, found.offset + found.len))
}

#[cfg(test)]
#[path = "../../tests/src/definition/local_tests.rs"]
mod tests;
