//! Inline attributes: `[name: value]` and `[name:: value]`.
//!
//! The value is bracket-depth aware, so `[array: [1, 2, 3]]` keeps its inner
//! brackets. When the bracket is also the label of a link,
//! `[name: value](url)`, the ATTRIBUTE node is preceded by a LINK.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{inline, is_line_end};

struct Shape {
    name: usize,
    colon: usize,
    space: usize,
    value: usize,
}

/// Token count of an attribute name starting at offset `from`.
///
/// Names start with a letter or `_` and continue with letters, digits, `_`
/// and `-`.
fn name_len(p: &Parser<'_, '_>, from: usize) -> usize {
    let starts_word = match p.nth(from) {
        SyntaxKind::TEXT => p.nth_text(from).starts_with(char::is_alphabetic),
        SyntaxKind::UNDERSCORE => true,
        _ => false,
    };
    if !starts_word {
        return 0;
    }
    let mut i = from + 1;
    while matches!(
        p.nth(i),
        SyntaxKind::TEXT | SyntaxKind::UNDERSCORE | SyntaxKind::DASH
    ) {
        i += 1;
    }
    i - from
}

fn probe(p: &Parser<'_, '_>) -> Option<Shape> {
    if !p.at(SyntaxKind::LBRACKET) {
        return None;
    }

    let name = name_len(p, 1);
    if name == 0 {
        return None;
    }
    let colon = match (p.nth(1 + name), p.nth(2 + name)) {
        (SyntaxKind::COLON, SyntaxKind::COLON) => 2,
        (SyntaxKind::COLON, _) => 1,
        _ => return None,
    };
    let space = usize::from(p.nth(1 + name + colon) == SyntaxKind::WHITESPACE);

    let start = 1 + name + colon + space;
    let mut depth = 0usize;
    let mut i = start;
    loop {
        match p.nth(i) {
            SyntaxKind::LBRACKET => depth += 1,
            SyntaxKind::RBRACKET if depth == 0 => break,
            SyntaxKind::RBRACKET => depth -= 1,
            kind if is_line_end(kind) => return None,
            _ => {}
        }
        i += 1;
    }

    Some(Shape {
        name,
        colon,
        space,
        value: i - start,
    })
}

pub(super) fn attribute(p: &mut Parser<'_, '_>) -> bool {
    let Some(shape) = probe(p) else {
        return false;
    };

    let m = p.start();
    p.bump_n(1, SyntaxKind::ATTRIBUTE_MARK);

    let name = p.start();
    p.bump_n(shape.name, SyntaxKind::TEXT);
    name.complete(p, SyntaxKind::ATTRIBUTE_NAME);

    p.bump_n(shape.colon, SyntaxKind::ATTRIBUTE_COLON);
    p.bump_each(shape.space);

    let value = p.start();
    p.bump_n(shape.value, SyntaxKind::TEXT);
    value.complete(p, SyntaxKind::ATTRIBUTE_VALUE);

    p.bump_n(1, SyntaxKind::ATTRIBUTE_MARK);
    let attribute = m.complete(p, SyntaxKind::ATTRIBUTE);

    if let Some(url) = inline::destination_len(p, 0) {
        let link = attribute.precede(p);
        inline::destination(p, url);
        link.complete(p, SyntaxKind::LINK);
    }
    true
}
