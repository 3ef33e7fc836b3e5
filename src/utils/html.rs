//! HTML rendering for hotlinks.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `tag()` - generic element with attributes
//! - `anchor()` - `<a href=...>` element

use std::borrow::Cow;

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape HTML attribute values.
///
/// Identical to `escape()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Render attributes as ` name="value"` pairs, in the given order.
fn push_attributes(out: &mut String, attrs: &[(&str, &str)]) {
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
}

/// Render `<name attrs>text</name>`. The text is escaped.
pub fn tag(name: &str, text: &str, attrs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(name.len() * 2 + text.len() + 5);
    out.push('<');
    out.push_str(name);
    push_attributes(&mut out, attrs);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
    out
}

/// Render `<a href="href" attrs>text</a>`.
///
/// `href` comes first; an `href` in `attrs` is ignored.
pub fn anchor(text: &str, href: &str, attrs: &[(&str, &str)]) -> String {
    let attrs: Vec<(&str, &str)> = std::iter::once(("href", href))
        .chain(attrs.iter().copied().filter(|(name, _)| *name != "href"))
        .collect();
    tag("a", text, &attrs)
}
