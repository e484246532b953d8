//! CV text handling. Uploads are read as raw text; no format-specific parsing.

/// Only this many characters of the CV ever reach a prompt.
pub const CV_EXCERPT_CHARS: usize = 500;

/// Decodes an uploaded CV as lossy UTF-8 and keeps a bounded, printable prefix.
pub fn excerpt(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect::<String>()
        .trim()
        .chars()
        .take(CV_EXCERPT_CHARS)
        .collect()
}
