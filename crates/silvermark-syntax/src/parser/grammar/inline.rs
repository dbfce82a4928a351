//! # Inline-Level Grammar
//!
//! Inline elements are the formatting within blocks: links, emphasis, code
//! spans, and the note-taking extensions. Unlike blocks, inline parsing is
//! driven by **special characters** rather than line-start patterns.
//!
//! ## Dispatch Logic
//!
//! [`inline_element`] walks [`INLINE_RULES`] in order and takes the first rule
//! that matches at the current token:
//!
//! | Rule | Starts with | Extension |
//! |------|-------------|-----------|
//! | code span | `` ` `` | |
//! | escape | `\` | |
//! | wiki link | `[[` | wiki links |
//! | command link | `{[` | command links |
//! | template | `{{` | directives |
//! | Lua directive | `${` | Lua directives |
//! | attribute | `[` | attributes |
//! | image | `![` | |
//! | link | `[` | |
//! | autolink | `<` | |
//! | hashtag | `#` | hashtags |
//! | emphasis | `*` `_` | |
//! | strikethrough | `~~` | |
//!
//! A token no rule claims is plain text.
//!
//! ## Nesting
//!
//! Constructs with inline content (emphasis, link text, inline template
//! bodies) find their closing delimiter first, then parse the content inside
//! [`Parser::limited`], so nested rules cannot run past the closer.
//!
//! Nothing inline ever crosses a line break.

use crate::options::Extension;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{attribute, command_link, hashtag, is_line_end, run_len, template, wikilink};

struct InlineRule {
    extension: Option<Extension>,
    parse: fn(&mut Parser<'_, '_>) -> bool,
}

/// Inline rules in precedence order.
const INLINE_RULES: &[InlineRule] = &[
    InlineRule {
        extension: None,
        parse: code_span,
    },
    InlineRule {
        extension: None,
        parse: escape,
    },
    InlineRule {
        extension: Some(Extension::WikiLinks),
        parse: wikilink::wiki_link,
    },
    InlineRule {
        extension: Some(Extension::CommandLinks),
        parse: command_link::command_link,
    },
    InlineRule {
        extension: Some(Extension::Directives),
        parse: template::template_inline,
    },
    InlineRule {
        extension: Some(Extension::LuaDirectives),
        parse: template::lua_directive,
    },
    InlineRule {
        extension: Some(Extension::Attributes),
        parse: attribute::attribute,
    },
    InlineRule {
        extension: None,
        parse: image,
    },
    InlineRule {
        extension: None,
        parse: link,
    },
    InlineRule {
        extension: None,
        parse: autolink,
    },
    InlineRule {
        extension: Some(Extension::Hashtags),
        parse: hashtag::hashtag,
    },
    InlineRule {
        extension: None,
        parse: emphasis,
    },
    InlineRule {
        extension: None,
        parse: strikethrough,
    },
];

/// Parse inline content until newline or EOF.
///
/// This is the main entry point called by block parsers.
pub(super) fn inline_until_newline(p: &mut Parser<'_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        inline_element(p);
    }
}

/// Parse inline content up to the parser's current limit.
pub(super) fn inline_until_end(p: &mut Parser<'_, '_>) {
    while !p.at_end() {
        if !p.eat(SyntaxKind::NEWLINE) {
            inline_element(p);
        }
    }
}

/// Parse a single inline element.
fn inline_element(p: &mut Parser<'_, '_>) {
    for rule in INLINE_RULES {
        if rule.extension.is_none_or(|ext| p.allows(ext)) && (rule.parse)(p) {
            return;
        }
    }
    p.bump();
}

/// Token count of the code span starting at offset `from`, delimiters
/// included.
///
/// The closing run must have exactly as many backticks as the opening one
/// and sit on the same line.
pub(super) fn code_span_len(p: &Parser<'_, '_>, from: usize) -> Option<usize> {
    let open = run_len(p, from, SyntaxKind::BACKTICK);
    if open == 0 {
        return None;
    }

    let mut i = from + open;
    loop {
        match p.nth(i) {
            SyntaxKind::BACKTICK => {
                let run = run_len(p, i, SyntaxKind::BACKTICK);
                if run == open {
                    return Some(i + run - from);
                }
                i += run;
            }
            kind if is_line_end(kind) => return None,
            _ => i += 1,
        }
    }
}

/// Parse a code span `code`. An unmatched backtick run is plain text as a
/// whole.
fn code_span(p: &mut Parser<'_, '_>) -> bool {
    let open = run_len(p, 0, SyntaxKind::BACKTICK);
    if open == 0 {
        return false;
    }
    let Some(len) = code_span_len(p, 0) else {
        p.bump_each(open);
        return true;
    };

    let m = p.start();
    p.bump_n(open, SyntaxKind::CODE_MARK);
    p.bump_n(len - 2 * open, SyntaxKind::TEXT);
    p.bump_n(open, SyntaxKind::CODE_MARK);
    m.complete(p, SyntaxKind::CODE_SPAN);
    true
}

/// Whether offset `from` holds `\` followed by an ASCII punctuation character.
pub(super) fn is_escape(p: &Parser<'_, '_>, from: usize) -> bool {
    if p.nth(from) != SyntaxKind::BACKSLASH {
        return false;
    }
    let mut next = p.nth_text(from + 1).chars();
    matches!(next.next(), Some(c) if c.is_ascii_punctuation()) && next.next().is_none()
}

/// Parse a backslash escape.
fn escape(p: &mut Parser<'_, '_>) -> bool {
    let escapable = is_escape(p, 0);
    if escapable {
        p.bump_n(2, SyntaxKind::ESCAPE);
    }
    escapable
}

/// Token count of a bracketed link label whose `[` is at offset `from`.
///
/// Brackets nest; the label ends at the matching `]` on the same line.
pub(super) fn link_label_len(p: &Parser<'_, '_>, from: usize) -> Option<usize> {
    if p.nth(from) != SyntaxKind::LBRACKET {
        return None;
    }
    let mut depth = 0usize;
    let mut i = from + 1;
    loop {
        match p.nth(i) {
            SyntaxKind::LBRACKET => depth += 1,
            SyntaxKind::RBRACKET if depth == 0 => return Some(i - from - 1),
            SyntaxKind::RBRACKET => depth -= 1,
            kind if is_line_end(kind) => return None,
            _ => {}
        }
        i += 1;
    }
}

/// Token count of a `(url)` destination whose `(` is at offset `from`.
pub(super) fn destination_len(p: &Parser<'_, '_>, from: usize) -> Option<usize> {
    if p.nth(from) != SyntaxKind::LPAREN {
        return None;
    }
    let mut depth = 0usize;
    let mut i = from + 1;
    loop {
        match p.nth(i) {
            SyntaxKind::LPAREN => depth += 1,
            SyntaxKind::RPAREN if depth == 0 => return Some(i - from - 1),
            SyntaxKind::RPAREN => depth -= 1,
            kind if is_line_end(kind) => return None,
            _ => {}
        }
        i += 1;
    }
}

/// Emit `(`, the URL and `)` for a destination measured by [`destination_len`].
pub(super) fn destination(p: &mut Parser<'_, '_>, url: usize) {
    p.bump_n(1, SyntaxKind::LINK_MARK);
    let m = p.start();
    p.bump_n(url, SyntaxKind::TEXT);
    m.complete(p, SyntaxKind::URL);
    p.bump_n(1, SyntaxKind::LINK_MARK);
}

/// Parse a standard link `[text](url)`.
///
/// Without a destination the `[` stays plain text and the label is parsed
/// as ordinary inline content.
fn link(p: &mut Parser<'_, '_>) -> bool {
    labelled_link(p, 0, SyntaxKind::LINK)
}

/// Parse an image `![alt](url)`.
fn image(p: &mut Parser<'_, '_>) -> bool {
    p.at(SyntaxKind::BANG) && labelled_link(p, 1, SyntaxKind::IMAGE)
}

fn labelled_link(p: &mut Parser<'_, '_>, prefix: usize, kind: SyntaxKind) -> bool {
    let Some(label) = link_label_len(p, prefix) else {
        return false;
    };
    let Some(url) = destination_len(p, prefix + label + 2) else {
        return false;
    };

    let m = p.start();
    p.bump_n(prefix + 1, SyntaxKind::LINK_MARK);
    p.limited(label, inline_until_end);
    p.bump_n(1, SyntaxKind::LINK_MARK);
    destination(p, url);
    m.complete(p, kind);
    true
}

/// Parse an autolink `<scheme:address>` or `<user@host>`.
fn autolink(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(SyntaxKind::LT) {
        return false;
    }

    let mut i = 1;
    let mut has_scheme = false;
    loop {
        match p.nth(i) {
            SyntaxKind::GT => break,
            SyntaxKind::LT | SyntaxKind::WHITESPACE => return false,
            kind if is_line_end(kind) => return false,
            SyntaxKind::COLON if i > 1 => has_scheme = true,
            _ if p.nth_text(i) == "@" && i > 1 => has_scheme = true,
            _ => {}
        }
        i += 1;
    }
    if !has_scheme {
        return false;
    }

    let m = p.start();
    p.bump_n(1, SyntaxKind::LINK_MARK);
    let url = p.start();
    p.bump_n(i - 1, SyntaxKind::TEXT);
    url.complete(p, SyntaxKind::URL);
    p.bump_n(1, SyntaxKind::LINK_MARK);
    m.complete(p, SyntaxKind::AUTOLINK);
    true
}

/// Parse emphasis `*text*` or strong `**text**` (or underscore variants).
///
/// The opener must be followed by non-whitespace and the closer preceded by
/// non-whitespace, both on the same line. Underscores do not open or close
/// inside a word. A delimiter run that finds no closer is plain text.
fn emphasis(p: &mut Parser<'_, '_>) -> bool {
    let delimiter = p.current();
    if !matches!(delimiter, SyntaxKind::STAR | SyntaxKind::UNDERSCORE) {
        return false;
    }
    let run = run_len(p, 0, delimiter);
    let open = run.min(2);
    let intraword = delimiter == SyntaxKind::UNDERSCORE && p.prev() == SyntaxKind::TEXT;
    let next = p.nth(run);
    if intraword || next == SyntaxKind::WHITESPACE || is_line_end(next) {
        return false;
    }

    let mut i = open;
    let close = loop {
        let kind = p.nth(i);
        if is_line_end(kind) {
            break None;
        }
        if kind != delimiter {
            i += 1;
            continue;
        }
        let closer = run_len(p, i, delimiter);
        let at = i + closer - open;
        let flanked = p.nth(i - 1) != SyntaxKind::WHITESPACE;
        let word_follows =
            delimiter == SyntaxKind::UNDERSCORE && p.nth(i + closer) == SyntaxKind::TEXT;
        if closer >= open && at > open && flanked && !word_follows {
            break Some(at);
        }
        i += closer;
    };

    let Some(close) = close else {
        p.bump_each(run);
        return true;
    };

    let m = p.start();
    p.bump_n(open, SyntaxKind::EMPHASIS_MARK);
    p.limited(close - open, inline_until_end);
    p.bump_n(open, SyntaxKind::EMPHASIS_MARK);
    let kind = if open == 2 {
        SyntaxKind::STRONG
    } else {
        SyntaxKind::EMPHASIS
    };
    m.complete(p, kind);
    true
}

/// Parse strikethrough `~~text~~`.
fn strikethrough(p: &mut Parser<'_, '_>) -> bool {
    if run_len(p, 0, SyntaxKind::TILDE) != 2 {
        return false;
    }

    let mut i = 2;
    let close = loop {
        match p.nth(i) {
            SyntaxKind::TILDE if p.nth(i + 1) == SyntaxKind::TILDE && i > 2 => break Some(i),
            kind if is_line_end(kind) => break None,
            _ => i += 1,
        }
    };

    let Some(close) = close else {
        p.bump_each(2);
        return true;
    };

    let m = p.start();
    p.bump_n(2, SyntaxKind::STRIKETHROUGH_MARK);
    p.limited(close - 2, inline_until_end);
    p.bump_n(2, SyntaxKind::STRIKETHROUGH_MARK);
    m.complete(p, SyntaxKind::STRIKETHROUGH);
    true
}
