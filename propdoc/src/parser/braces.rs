//! Delimiter matching.
//!
//! Every higher-level scanner uses this to find where a body or a value
//! ends. A call tracks exactly one delimiter pair; mixed-kind nesting is the
//! caller's business.

/// Find the index just past the closer matching an already-consumed opener.
///
/// `start` must point immediately after the opener. The running depth starts
/// at 1 and only `open` / `close` move it. Returns `content.len()` when the
/// body is unterminated; use [`scan_to_close`] to tell that apart from a
/// closer sitting at the very end of the input.
pub fn find_matching_close(content: &str, start: usize, open: char, close: char) -> usize {
    scan_to_close(content, start, open, close).unwrap_or(content.len())
}

/// Like [`find_matching_close`], but `None` when no matching closer exists.
pub fn scan_to_close(content: &str, start: usize, open: char, close: char) -> Option<usize> {
    let rest = content.get(start..)?;
    let mut depth = 1usize;

    for (offset, ch) in rest.char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(start + offset + ch.len_utf8());
            }
        }
    }

    None
}
