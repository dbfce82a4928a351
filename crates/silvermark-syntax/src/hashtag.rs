//! Hashtag name helpers shared by the parser and by indexers.
//!
//! A tag name in the bare form `#name` consists of letters, combining marks,
//! numbers and the [`TAG_CONNECTORS`]. Anything else needs the escaped form
//! `#<name>`. These helpers convert between raw tag text and names:
//!
//! ```
//! use silvermark_syntax::hashtag::{extract_hashtag, render_hashtag};
//!
//! assert_eq!(render_hashtag("level/beginner"), "#level/beginner");
//! assert_eq!(render_hashtag("with spaces"), "#<with spaces>");
//! assert_eq!(extract_hashtag("#<with spaces>"), "with spaces");
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// Non-alphanumeric characters allowed inside a bare tag name.
pub const TAG_CONNECTORS: [char; 4] = ['-', '_', '/', '\''];

/// A complete bare tag name: letters, marks, numbers and the connectors.
///
/// The letter part matches the lexer's `TEXT` token class.
pub const TAG_NAME_PATTERN: &str = r"^[\p{L}\p{M}\p{N}_/'\-]+$";

fn tag_name_regex() -> &'static Regex {
    static TAG_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_NAME_REGEX.get_or_init(|| Regex::new(TAG_NAME_PATTERN).expect("Invalid tag name regex"))
}

/// Whether `c` may appear in a bare tag name.
pub fn is_tag_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    tag_name_regex().is_match(c.encode_utf8(&mut buf))
}

/// Whether `name` can be written without the `#<…>` escape.
fn is_bare_name(name: &str) -> bool {
    tag_name_regex().is_match(name) && !name.chars().all(char::is_numeric)
}

/// Tag name from raw hashtag text: strips `#`, then the `<…>` escape if present.
///
/// Text without a leading `#` is returned unchanged apart from the escape.
pub fn extract_hashtag(raw: &str) -> &str {
    let name = raw.strip_prefix('#').unwrap_or(raw);
    name.strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(name)
}

/// Raw hashtag text for a tag name, escaping it when the bare form would not
/// parse back to the same name.
pub fn render_hashtag(name: &str) -> String {
    if is_bare_name(name) {
        format!("#{name}")
    } else {
        format!("#<{name}>")
    }
}
