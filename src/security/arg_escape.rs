//! Escaping of free-text values bound for the external command line
//!
//! Every value-bearing flag of the dispatched command carries one escaped
//! string. Arguments are always passed as discrete argv entries through
//! `tokio::process::Command` and never interpolated into a shell string, so
//! escaping here is a wire contract with the receiving workflow rather than
//! shell-quoting: embedded double quotes cannot terminate the argument's
//! quoting on the far side, and line breaks are folded to a literal `\n`
//! sequence so no value can inject additional tokens or corrupt single-line
//! logging of the invocation.
//!
//! The receiving workflow unescapes `\n` back to a line break; `unescape`
//! documents that inverse. This is not a general-purpose encoder: carriage
//! returns are normalized to line feeds on the way out, and the fixed command
//! name and flag names are compile-time constants that are never escaped.

/// Escape a free-text value for embedding as one flag argument
///
/// `"` becomes `\"`; CRLF, LF and CR each become the two characters `\n`.
///
/// # Examples
///
/// ```
/// use action_trigger::security::arg_escape::escape;
///
/// assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape("line one\nline two"), r"line one\nline two");
/// ```
pub fn escape(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let mut out = String::with_capacity(normalized.len());

    for ch in normalized.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }

    out
}

/// Receiving-side inverse of [`escape`]
///
/// Resolves `\"` back to `"` and `\n` back to a line feed. Round-trips any
/// input whose line breaks are line feeds.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
