use crate::{
    definition::VARIABLE_SIGIL,
    ide::navigation::{IdePosition, IdeRange},
};

/// Project a byte offset onto a zero-based line/character position.
///
/// The line is the number of `\n` before `offset`; the character is the UTF-16
/// length of the text between the last `\n` and `offset`. Offsets past the end
/// are clamped, and offsets inside a multi-byte character snap back to its start.
pub fn position_at(
    text: &str,
    byte_offset: usize,
) -> IdePosition {
    let mut offset = byte_offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let prefix = &text[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() as u32;
    let line_start = prefix.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let character = prefix[line_start..].encode_utf16().count() as u32;

    IdePosition::new(line, character)
}

/// Inverse of [`position_at`]; `None` when the line does not exist.
///
/// Characters past the end of the line clamp to the line end.
pub fn byte_offset_at(
    text: &str,
    position: IdePosition,
) -> Option<usize> {
    let mut line_start = 0usize;
    for _ in 0..position.line {
        line_start += text[line_start..].find('\n')? + 1;
    }

    let line_end = text[line_start..].find('\n').map(|idx| line_start + idx).unwrap_or(text.len());
    let mut utf16_offset = 0u32;
    let mut byte_offset = line_start;
    for ch in text[line_start..line_end].chars() {
        if utf16_offset >= position.character {
            break;
        }
        utf16_offset += ch.len_utf16() as u32;
        byte_offset += ch.len_utf8();
    }

    Some(byte_offset)
}

/// The text of the line containing `byte_offset`, without its line break.
pub fn line_at(
    text: &str,
    byte_offset: usize,
) -> &str {
    let offset = byte_offset.min(text.len());
    let start = text[..offset].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let end = text[offset..].find('\n').map(|idx| offset + idx).unwrap_or(text.len());
    text[start..end].trim_end_matches('\r')
}

/// Extract the word under the cursor together with its range.
///
/// Words are runs of alphanumerics and `_`; a `$` directly before the run is
/// part of the word so that variables keep their sigil. A cursor right after
/// a word, or on the sigil itself, still selects that word.
pub fn word_at(
    text: &str,
    position: IdePosition,
) -> Option<(String, IdeRange)> {
    let offset = byte_offset_at(text, position)?;
    let line_start = text[..offset].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let chars: Vec<char> = line_at(text, offset).chars().collect();
    let mut idx = text[line_start..offset].chars().count();

    if chars.get(idx) == Some(&VARIABLE_SIGIL) && chars.get(idx + 1).copied().is_some_and(is_word_char) {
        idx += 1;
    } else if !chars.get(idx).copied().is_some_and(is_word_char) {
        if idx > 0 && chars.get(idx - 1).copied().is_some_and(is_word_char) {
            idx -= 1;
        } else {
            return None;
        }
    }

    let mut start = idx;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    if start > 0 && chars[start - 1] == VARIABLE_SIGIL {
        start -= 1;
    }
    let mut end = idx + 1;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    let word: String = chars[start..end].iter().collect();
    let start_utf16: u32 = chars[..start].iter().map(|c| c.len_utf16() as u32).sum();
    let end_utf16: u32 = chars[..end].iter().map(|c| c.len_utf16() as u32).sum();
    let range = IdeRange::new(IdePosition::new(position.line, start_utf16), IdePosition::new(position.line, end_utf16));
    Some((word, range))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "../tests/src/text_pos_tests.rs"]
mod tests;
