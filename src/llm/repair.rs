// src/llm/repair.rs

//! Best-effort cleanup of model output before strict JSON parsing.
//!
//! Order of operations:
//! 1. drop markdown code fences
//! 2. cut out the first balanced `[...]` or `{...}` span
//! 3. strip control characters other than tab, LF and CR
//! 4. escape bare CR/LF inside string literals

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:[A-Za-z]+)?").expect("fence pattern is a valid regex")
});

static CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0b\x0c\x0e-\x1f\x7f]").expect("control pattern is a valid regex")
});

/// Apply every repair step and return the cleaned text.
pub fn repair_json_text(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    let span = extract_json_span(&unfenced);
    let cleaned = CONTROL_RE.replace_all(span, "");
    escape_newlines_in_strings(&cleaned)
}

/// Repair `raw` and parse it strictly.
pub fn parse_json_lenient(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&repair_json_text(raw))
}

pub fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// The first balanced JSON array or object in `text`.
///
/// Brackets inside string literals are ignored. If the opener is never
/// balanced, everything up to the last matching closer is returned; if there
/// is no opener at all, the whole text is.
pub fn extract_json_span(text: &str) -> &str {
    let Some(start) = text.find(['[', '{']) else {
        return text;
    };

    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' => stack.push(b']'),
            b'{' => stack.push(b'}'),
            b']' | b'}' => {
                if stack.pop() != Some(*byte) {
                    break;
                }
                if stack.is_empty() {
                    return &text[start..=start + offset];
                }
            }
            _ => {}
        }
    }

    let closer = if text.as_bytes()[start] == b'[' { ']' } else { '}' };
    match text.rfind(closer) {
        Some(end) if end > start => &text[start..=end],
        _ => &text[start..],
    }
}

/// Replace literal CR/LF characters that sit inside string literals with
/// their escaped forms. Newlines between tokens are left alone.
pub fn escape_newlines_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(ch);
                continue;
            }
            match ch {
                '\\' => {
                    escaped = true;
                    out.push(ch);
                }
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                _ => out.push(ch),
            }
        } else {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
        }
    }
    out
}
