//! RFC 5545 content lines: folding and line endings.
//!
//! TEXT escaping itself is done by icalendar on output and by its parser on
//! input.

/// Maximum length of a content line in octets, excluding the CRLF.
pub const MAX_LINE_OCTETS: usize = 75;

pub const CRLF: &str = "\r\n";

/// Line breaks of a TEXT value as single LFs, which icalendar escapes as `\n`.
pub fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

/// Append `line` to `out` terminated by CRLF, folding it at 75 octets.
///
/// Continuation lines start with a single space, which counts towards their
/// own 75 octets. Splits never land inside a UTF-8 sequence.
pub fn push_folded_line(out: &mut String, line: &str) {
    let mut rest = line;
    let mut limit = MAX_LINE_OCTETS;

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str(CRLF);
        out.push(' ');
        rest = &rest[cut..];
        limit = MAX_LINE_OCTETS - 1;
    }

    out.push_str(rest);
    out.push_str(CRLF);
}

/// Normalize any mix of LF and CRLF line endings to CRLF.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\n', CRLF)
}
