//! Hashtags: `#name` and the escaped form `#<any name>`.
//!
//! A bare name is a run of `TEXT` tokens and tag connectors; the first other
//! character ends it, so `#idea!` is the tag `#idea` followed by `!`. A name
//! made only of digits (`#1`, `#123`) is not a tag.

use crate::hashtag::TAG_CONNECTORS;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::is_line_end;

/// Token count of a bare tag name starting at offset `from`.
fn bare_name_len(p: &Parser<'_, '_>, from: usize) -> usize {
    let mut i = from;
    let mut numeric = true;
    loop {
        let text = p.nth_text(i);
        if p.nth(i) == SyntaxKind::TEXT {
            numeric &= text.chars().all(char::is_numeric);
        } else if is_connector(text) {
            numeric = false;
        } else {
            break;
        }
        i += 1;
    }
    if numeric { 0 } else { i - from }
}

fn is_connector(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if TAG_CONNECTORS.contains(&c)) && chars.next().is_none()
}

/// Token count of `<…>` starting at offset `from`, angle brackets included.
///
/// Nested `<`/`>` pairs are part of the name; the name is non-empty and on
/// one line.
fn escaped_len(p: &Parser<'_, '_>, from: usize) -> usize {
    if p.nth(from) != SyntaxKind::LT {
        return 0;
    }
    let mut depth = 1usize;
    let mut i = from + 1;
    loop {
        match p.nth(i) {
            SyntaxKind::LT => depth += 1,
            SyntaxKind::GT => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            kind if is_line_end(kind) => return 0,
            _ => {}
        }
        i += 1;
    }
    if i == from + 1 { 0 } else { i + 1 - from }
}

pub(super) fn hashtag(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(SyntaxKind::HASH) {
        return false;
    }
    let len = match escaped_len(p, 1) {
        0 => bare_name_len(p, 1),
        n => n,
    };
    if len == 0 {
        return false;
    }

    let m = p.start();
    p.bump_n(1 + len, SyntaxKind::TEXT);
    m.complete(p, SyntaxKind::HASHTAG);
    true
}
