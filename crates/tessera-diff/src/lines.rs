use std::borrow::Cow;

/// Decode stored bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_content(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Split content into lines on `'\n'`.
///
/// Trailing empty segments are dropped, so `"a\nb\n"` gives `["a", "b"]` and
/// `"\n\n"` gives nothing at all. Text without any newline comes back as a
/// single line, which makes `""` a one-element `[""]`. Carriage returns are
/// kept as part of the line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if !text.contains('\n') {
        return vec![text];
    }
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
