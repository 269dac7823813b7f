use super::*;
use pretty_assertions::assert_eq;

#[test]
fn eat_comment_stops_at_newline() {
    let mut cursor = Cursor::new("; note\nx");
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.current(), Some(b'\n'));
}

#[test]
fn eat_comment_at_eof() {
    let mut cursor = Cursor::new("; trailing");
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.current(), None);
}

#[test]
fn string_delims() {
    let mut cursor = Cursor::new("abc^\"def\"");
    assert_eq!(cursor.skip_to_string_delim(), Some(b'^'));
    assert_eq!(cursor.pos(), 3);
    cursor.advance();
    cursor.advance();
    assert_eq!(cursor.skip_to_string_delim(), Some(b'"'));
    assert_eq!(cursor.slice_from(0), "abc^\"def");
}

#[test]
fn advance_char_handles_multibyte() {
    let mut cursor = Cursor::new("éa");
    cursor.advance_char();
    assert_eq!(cursor.current_char(), Some('a'));
    cursor.advance_char();
    assert_eq!(cursor.current_char(), None);
    cursor.advance_char();
    assert_eq!(cursor.pos(), 3);
}
