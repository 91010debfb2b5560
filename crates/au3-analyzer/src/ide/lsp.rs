use tower_lsp::lsp_types::{GotoDefinitionResponse, Location, Position, Range};

use crate::ide::navigation::{IdeLocation, IdePosition, IdeRange};

pub fn lsp_position_to_ide(position: Position) -> IdePosition {
    IdePosition::new(position.line, position.character)
}

pub fn ide_position_to_lsp(position: IdePosition) -> Position {
    Position::new(position.line, position.character)
}

pub fn ide_range_to_lsp(range: IdeRange) -> Range {
    Range::new(ide_position_to_lsp(range.start), ide_position_to_lsp(range.end))
}

pub fn ide_location_to_lsp(location: IdeLocation) -> Location {
    Location {
        uri: location.uri,
        range: ide_range_to_lsp(location.range),
    }
}

pub fn definition_response(location: IdeLocation) -> GotoDefinitionResponse {
    GotoDefinitionResponse::Scalar(ide_location_to_lsp(location))
}
