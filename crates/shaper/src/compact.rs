//! Compact-snippet generation.
//!
//! Every stored memory item carries a short form of its body. When the
//! caller does not provide one, `compact` derives it: truncate, then back
//! up to a natural boundary so the snippet does not end mid-sentence.

/// Default maximum length (in characters) of an auto-generated snippet.
pub const COMPACT_MAX_CHARS: usize = 200;

/// Break candidates, checked in priority order.
const BREAKS: [&str; 4] = ["\n", ". ", "! ", "? "];

/// Produce a compact form of `content` at most `max_chars` characters long
/// (plus a trailing ellipsis when truncated).
///
/// Trimmed input that already fits is returned unchanged. Otherwise the
/// text is cut at `max_chars` characters and the cut is pulled back to the
/// last newline or sentence end, provided that boundary lies in the
/// trailing half of the cut. Deterministic: same input, same output.
pub fn compact(content: &str, max_chars: usize) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let cut_end = trimmed
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let mut cut = &trimmed[..cut_end];

    let midpoint = cut.len() / 2;
    for brk in BREAKS {
        if let Some(pos) = cut.rfind(brk) {
            if pos > midpoint {
                // Keep sentence punctuation, drop a newline.
                cut = if brk == "\n" { &cut[..pos] } else { &cut[..pos + 1] };
                break;
            }
        }
    }

    format!("{}…", cut.trim_end())
}

/// Rough token estimate for budget accounting: one token per four
/// characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    (chars + 3) / 4
}
