//! Terminal rendering of the audit response.
//!
//! The rubric instructs the model to emit color codes as the escaped
//! literal `\033[` rather than raw control bytes, since the model's own
//! output layer tends to mangle control characters. The renderer performs
//! one global literal substitution to turn those tokens back into real
//! escape sequences. That is the whole feature — exactly one pattern, one
//! pass, everything else printed verbatim.

/// The escaped token the model is told to emit.
const ESCAPED_TOKEN: &str = "\\033[";

/// The real terminal control sequence introducer.
const CONTROL_SEQUENCE: &str = "\u{1b}[";

/// Replace every escaped color-code token with the real control sequence.
///
/// All other text is left byte-for-byte unchanged. The substitution is
/// idempotent: the literal token is consumed on the first pass, so a second
/// pass finds nothing to replace.
pub fn unescape_color_codes(text: &str) -> String {
    text.replace(ESCAPED_TOKEN, CONTROL_SEQUENCE)
}
