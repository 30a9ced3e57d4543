//! Markup stripping for textual input fields.
//!
//! # Design
//! Validated text still has to be neutralized before persistence so a
//! stored title cannot smuggle script content back out to a client.
//! The stripper removes every `<...>` tag span, keeping the text
//! between tags. A `<` that never closes discards the remainder of the
//! input rather than letting a half-open tag through. The output never
//! contains `<`, which makes the function idempotent.

/// Strip embedded markup from `input`, returning the cleaned text.
///
/// Idempotent on already-clean input.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
