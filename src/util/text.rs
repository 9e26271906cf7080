//! Utility functions for buffer and output text

use std::sync::OnceLock;

use regex::Regex;

/// Opening or closing fence of a Markdown code block, with its info string
/// and the rest of the fence line
fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"```[A-Za-z0-9_+\-#]*[ \t]*\r?\n?").expect("code fence pattern is valid")
    })
}

/// Remove fenced-code-block markers from service output
///
/// Remote services often wrap program output in Markdown fences. Only the
/// markers are removed; the text between them is kept verbatim.
pub fn strip_code_fences(text: &str) -> String {
    if !text.contains("```") {
        return text.to_string();
    }
    code_fence().replace_all(text, "").into_owned()
}

/// Shorten text to at most `max_chars` characters for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
