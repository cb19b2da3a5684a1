//! SQL string literal quoting
//!
//! Values rendered inline into SQL text must go through [`quote`]. The result
//! is only safe in string-literal position, never as an identifier or an
//! unquoted fragment.

/// Wrap a value in single quotes, doubling any embedded single quote.
pub fn quote(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    output.push('\'');
    for c in value.chars() {
        if c == '\'' {
            output.push('\'');
        }
        output.push(c);
    }
    output.push('\'');
    output
}

/// Build a case-insensitive substring `LIKE` pattern: the term is uppercased
/// and surrounded by `%` wildcards.
///
/// Wildcards inside the term (`%`, `_`) are passed through unchanged.
pub fn like_contains(term: &str) -> String {
    format!("%{}%", term.to_uppercase())
}
