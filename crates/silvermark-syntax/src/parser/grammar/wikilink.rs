//! Wiki links: `[[page]]` and `[[page|alias]]`.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::is_line_end;

struct Shape {
    page: usize,
    alias: Option<usize>,
}

/// Measure a wiki link: the first `|` splits page from alias, the first `]]`
/// closes. The page must contain something besides whitespace.
fn probe(p: &Parser<'_, '_>) -> Option<Shape> {
    if p.nth(0) != SyntaxKind::LBRACKET || p.nth(1) != SyntaxKind::LBRACKET {
        return None;
    }

    let mut i = 2;
    let mut pipe = None;
    let close = loop {
        match p.nth(i) {
            SyntaxKind::RBRACKET if p.nth(i + 1) == SyntaxKind::RBRACKET => break i,
            SyntaxKind::PIPE if pipe.is_none() => pipe = Some(i),
            kind if is_line_end(kind) => return None,
            _ => {}
        }
        i += 1;
    };

    let page_end = pipe.unwrap_or(close);
    let blank = (2..page_end).all(|i| p.nth(i) == SyntaxKind::WHITESPACE);
    if blank {
        return None;
    }

    Some(Shape {
        page: page_end - 2,
        alias: pipe.map(|pipe| close - pipe - 1),
    })
}

pub(super) fn wiki_link(p: &mut Parser<'_, '_>) -> bool {
    let Some(shape) = probe(p) else {
        return false;
    };

    let m = p.start();
    p.bump_n(2, SyntaxKind::WIKILINK_MARK);

    let page = p.start();
    p.bump_n(shape.page, SyntaxKind::TEXT);
    page.complete(p, SyntaxKind::WIKILINK_PAGE);

    if let Some(alias_len) = shape.alias {
        p.bump_n(1, SyntaxKind::WIKILINK_MARK);
        let alias = p.start();
        p.bump_n(alias_len, SyntaxKind::TEXT);
        alias.complete(p, SyntaxKind::WIKILINK_ALIAS);
    }

    p.bump_n(2, SyntaxKind::WIKILINK_MARK);
    m.complete(p, SyntaxKind::WIKILINK);
    true
}
