//! Block-level grammar rules.
//!
//! Blocks are recognized at line start by walking [`BLOCK_RULES`] in order;
//! a line no rule claims starts a paragraph.

use crate::options::Extension;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{blank_rest, inline, is_char, is_line_end, line_len, run_len, task, template};

struct BlockRule {
    extension: Option<Extension>,
    parse: fn(&mut Parser<'_, '_>) -> bool,
}

/// Block rules in precedence order.
const BLOCK_RULES: &[BlockRule] = &[
    BlockRule {
        extension: Some(Extension::Directives),
        parse: template::template_block,
    },
    BlockRule {
        extension: None,
        parse: heading,
    },
    BlockRule {
        extension: None,
        parse: fenced_code,
    },
    BlockRule {
        extension: None,
        parse: thematic_break,
    },
    BlockRule {
        extension: None,
        parse: list,
    },
    BlockRule {
        extension: None,
        parse: blockquote,
    },
];

/// Parse a block element, or a blank line.
pub(super) fn block(p: &mut Parser<'_, '_>) {
    if let Some(ws) = blank_rest(p, 0) {
        p.bump_each(ws);
        p.bump();
        return;
    }

    for rule in BLOCK_RULES {
        if rule.extension.is_none_or(|ext| p.allows(ext)) && (rule.parse)(p) {
            return;
        }
    }

    paragraph(p);
}

/// Number of `#` in an ATX heading opener.
fn heading_level(p: &Parser<'_, '_>) -> Option<usize> {
    let level = run_len(p, 0, SyntaxKind::HASH);
    let terminated = matches!(p.nth(level), SyntaxKind::WHITESPACE) || is_line_end(p.nth(level));
    ((1..=6).contains(&level) && terminated).then_some(level)
}

/// Parse an ATX heading.
fn heading(p: &mut Parser<'_, '_>) -> bool {
    let Some(level) = heading_level(p) else {
        return false;
    };

    let m = p.start();
    p.bump_n(level, SyntaxKind::HEADING_MARK);
    p.eat(SyntaxKind::WHITESPACE);
    inline::inline_until_newline(p);
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::HEADING);
    true
}

/// Check if position `from` starts a code fence; returns marker kind and length.
fn code_fence(p: &Parser<'_, '_>, from: usize) -> Option<(SyntaxKind, usize)> {
    let marker = p.nth(from);
    if !matches!(marker, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return None;
    }
    let len = run_len(p, from, marker);
    (len >= 3).then_some((marker, len))
}

/// Marker kind and length of a fence opening at `from`, with the token count
/// of its info string. Backtick fences cannot carry backticks in the info.
fn opening_fence(p: &Parser<'_, '_>, from: usize) -> Option<(SyntaxKind, usize, usize)> {
    let (marker, open) = code_fence(p, from)?;
    let info = line_len(p, from + open);
    let start = from + open;
    if marker == SyntaxKind::BACKTICK && (start..start + info).any(|i| p.nth(i) == marker) {
        return None;
    }
    Some((marker, open, info))
}

/// Closing fence at `from` for an opener of `marker` × `open`: its length
/// and trailing whitespace.
fn closing_fence(p: &Parser<'_, '_>, from: usize, marker: SyntaxKind, open: usize) -> Option<(usize, usize)> {
    let (kind, close) = code_fence(p, from)?;
    if kind != marker || close < open {
        return None;
    }
    Some((close, blank_rest(p, from + close)?))
}

/// Token count of the fenced code block starting at `from`, closing fence
/// line included.
pub(super) fn fenced_code_len(p: &Parser<'_, '_>, from: usize) -> Option<usize> {
    let (marker, open, info) = opening_fence(p, from)?;
    let mut i = from + open + info;
    loop {
        if p.nth(i) == SyntaxKind::EOF {
            return Some(i - from);
        }
        i += 1;
        if let Some((close, trailing)) = closing_fence(p, i, marker, open) {
            i += close + trailing;
            if p.nth(i) == SyntaxKind::NEWLINE {
                i += 1;
            }
            return Some(i - from);
        }
        i += line_len(p, i);
    }
}

/// Parse a fenced code block.
///
/// Body lines are opaque `TEXT`, so no inline syntax is recognized inside.
/// An unclosed fence runs to the end of the input.
fn fenced_code(p: &mut Parser<'_, '_>) -> bool {
    let Some((marker, open, info)) = opening_fence(p, 0) else {
        return false;
    };

    let m = p.start();
    p.bump_n(open, SyntaxKind::CODE_MARK);
    let lead = run_len(p, 0, SyntaxKind::WHITESPACE);
    p.bump_each(lead);
    p.bump_n(info - lead, SyntaxKind::CODE_INFO);
    p.eat(SyntaxKind::NEWLINE);

    while !p.at_end() {
        if let Some((close, trailing)) = closing_fence(p, 0, marker, open) {
            p.bump_n(close, SyntaxKind::CODE_MARK);
            p.bump_each(trailing);
            p.eat(SyntaxKind::NEWLINE);
            break;
        }

        let len = line_len(p, 0);
        p.bump_n(len, SyntaxKind::TEXT);
        p.eat(SyntaxKind::NEWLINE);
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
    true
}

/// Check if current position is a thematic break (---, ***, ___)
fn is_thematic_break(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    if !matches!(
        marker,
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE
    ) {
        return false;
    }

    let mut count = 0;
    let mut i = 0;
    while !is_line_end(p.nth(i)) {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
        i += 1;
    }

    count >= 3
}

/// Parse a thematic break.
fn thematic_break(p: &mut Parser<'_, '_>) -> bool {
    if !is_thematic_break(p) {
        return false;
    }

    let m = p.start();
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::THEMATIC_BREAK);
    true
}

/// Indentation and marker token counts if the line starts a list item.
///
/// Bullets are `-`, `*` and `+`; ordered markers are up to nine digits
/// followed by `.` or `)`. The marker must be followed by whitespace or the
/// end of the line.
fn list_marker(p: &Parser<'_, '_>) -> Option<(usize, usize)> {
    let indent = usize::from(p.at(SyntaxKind::WHITESPACE));
    let marker = match p.nth(indent) {
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => 1,
        SyntaxKind::TEXT
            if is_ordinal(p.nth_text(indent))
                && (is_char(p, indent + 1, '.') || p.nth(indent + 1) == SyntaxKind::RPAREN) =>
        {
            2
        }
        _ => return None,
    };
    let after = p.nth(indent + marker);
    (after == SyntaxKind::WHITESPACE || is_line_end(after)).then_some((indent, marker))
}

fn is_ordinal(text: &str) -> bool {
    (1..=9).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a run of list items into a LIST.
fn list(p: &mut Parser<'_, '_>) -> bool {
    if list_marker(p).is_none() {
        return false;
    }

    let m = p.start();
    while let Some((indent, marker)) = list_marker(p) {
        list_item(p, indent, marker);
    }
    m.complete(p, SyntaxKind::LIST);
    true
}

/// Parse a list item.
fn list_item(p: &mut Parser<'_, '_>, indent: usize, marker: usize) {
    let m = p.start();

    p.bump_each(indent);
    p.bump_n(marker, SyntaxKind::LIST_MARK);
    p.eat(SyntaxKind::WHITESPACE);

    if !(p.allows(Extension::Tasks) && task::task(p)) {
        inline::inline_until_newline(p);
    }

    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::LIST_ITEM);
}

/// Parse a blockquote.
///
/// The content of each quote line is parsed as a block confined to that
/// line, so `> - [ ] call` holds a list with a task and `> > x` nests.
fn blockquote(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(SyntaxKind::GT) {
        return false;
    }

    let m = p.start();
    loop {
        p.bump_n(1, SyntaxKind::QUOTE_MARK);
        p.eat(SyntaxKind::WHITESPACE);
        let content = line_len(p, 0);
        if content > 0 {
            p.limited(content, block);
        }

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }
        // Continuation line, possibly indented
        if p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::GT {
            p.bump();
        }
        if !p.at(SyntaxKind::GT) {
            break;
        }
    }
    m.complete(p, SyntaxKind::BLOCK_QUOTE);
    true
}

/// Check for block-level constructs that interrupt a paragraph.
fn interrupts_paragraph(p: &Parser<'_, '_>) -> bool {
    if p.at_end() || blank_rest(p, 0).is_some() {
        return true;
    }

    match p.current() {
        SyntaxKind::HASH => heading_level(p).is_some(),
        SyntaxKind::GT => true,
        SyntaxKind::BACKTICK | SyntaxKind::TILDE => code_fence(p, 0).is_some(),
        SyntaxKind::LBRACE => p.allows(Extension::Directives) && template::starts_block(p),
        _ => {
            is_thematic_break(p)
                || list_marker(p).is_some_and(|(indent, marker)| {
                    p.nth(indent + marker) == SyntaxKind::WHITESPACE
                })
        }
    }
}

/// Parse a paragraph (default block).
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();
    loop {
        inline::inline_until_newline(p);
        if !p.eat(SyntaxKind::NEWLINE) || interrupts_paragraph(p) {
            break;
        }
    }
    m.complete(p, SyntaxKind::PARAGRAPH);
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, parse_with_options};
    use crate::options::{Extension, ParseOptions};
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block_kinds(input: &str) -> Vec<SyntaxKind> {
        parse(input).children().map(|n| n.kind()).collect()
    }

    #[test]
    fn parse_heading() {
        let tree = parse("# Heading\n");
        assert_eq!(tree.kind(), SyntaxKind::ROOT);

        let heading = tree.children().next().unwrap();
        assert_eq!(heading.kind(), SyntaxKind::HEADING);
        assert!(heading.text().to_string().contains("Heading"));
    }

    #[rstest]
    #[case("## Second\n", SyntaxKind::HEADING)]
    #[case("###### Six\n", SyntaxKind::HEADING)]
    #[case("#\n", SyntaxKind::HEADING)]
    #[case("####### Seven\n", SyntaxKind::PARAGRAPH)]
    #[case("#hashtag\n", SyntaxKind::PARAGRAPH)]
    #[case("> quoted text\n", SyntaxKind::BLOCK_QUOTE)]
    #[case("- item\n", SyntaxKind::LIST)]
    #[case("2) item\n", SyntaxKind::LIST)]
    #[case("---\n", SyntaxKind::THEMATIC_BREAK)]
    #[case("* * *\n", SyntaxKind::THEMATIC_BREAK)]
    #[case("___\n", SyntaxKind::THEMATIC_BREAK)]
    #[case("```rust\ncode\n```\n", SyntaxKind::FENCED_CODE)]
    #[case("~~~\ncode\n", SyntaxKind::FENCED_CODE)]
    #[case("Just some text.\n", SyntaxKind::PARAGRAPH)]
    #[case("-not a list\n", SyntaxKind::PARAGRAPH)]
    fn first_block_kind(#[case] input: &str, #[case] expected: SyntaxKind) {
        assert_eq!(block_kinds(input)[0], expected);
    }

    #[test]
    fn parse_multiple_blocks() {
        let input = "# Heading\n\nParagraph text.\n\n- list item\n";
        assert_eq!(
            block_kinds(input),
            vec![SyntaxKind::HEADING, SyntaxKind::PARAGRAPH, SyntaxKind::LIST]
        );
    }

    #[test]
    fn list_groups_consecutive_items() {
        let tree = parse("- one\n- two\n  - nested\n1. three\n\nafter\n");
        let list = tree.children().next().unwrap();
        assert_eq!(list.kind(), SyntaxKind::LIST);
        let items: Vec<_> = list
            .children()
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(items, vec!["- one\n", "- two\n", "  - nested\n", "1. three\n"]);
        assert_eq!(tree.children().last().unwrap().kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn paragraph_interrupted_by_block_openers() {
        let input = "text\n# Heading\ntext\n> quote\ntext\n- item\n";
        assert_eq!(
            block_kinds(input),
            vec![
                SyntaxKind::PARAGRAPH,
                SyntaxKind::HEADING,
                SyntaxKind::PARAGRAPH,
                SyntaxKind::BLOCK_QUOTE,
                SyntaxKind::PARAGRAPH,
                SyntaxKind::LIST,
            ]
        );
    }

    #[test]
    fn paragraph_continues_across_lines() {
        let tree = parse("one\ntwo #tag\nthree\n");
        assert_eq!(tree.children().count(), 1);
    }

    #[test]
    fn fenced_code_body_is_opaque() {
        let tree = parse("```\n#tag [[link]] {{x}}\n```\n");
        let code = tree.children().next().unwrap();
        assert_eq!(code.kind(), SyntaxKind::FENCED_CODE);
        assert_eq!(code.children().count(), 0);
        let info: Vec<_> = code
            .children_with_tokens()
            .map(|e| e.kind())
            .collect();
        assert_eq!(
            info,
            vec![
                SyntaxKind::CODE_MARK,
                SyntaxKind::NEWLINE,
                SyntaxKind::TEXT,
                SyntaxKind::NEWLINE,
                SyntaxKind::CODE_MARK,
                SyntaxKind::NEWLINE,
            ]
        );
    }

    #[test]
    fn fenced_code_keeps_info_string() {
        let tree = parse("``` rust  \nfn main() {}\n```");
        let code = tree.children().next().unwrap();
        let info = code
            .children_with_tokens()
            .find(|e| e.kind() == SyntaxKind::CODE_INFO)
            .unwrap();
        assert_eq!(info.as_token().unwrap().text(), "rust  ");
    }

    #[test]
    fn tasks_disabled_leave_plain_items() {
        let options = ParseOptions::all().with(Extension::Tasks, false);
        let tree = parse_with_options("- [x] done\n", &options);
        assert!(tree.descendants().all(|n| n.kind() != SyntaxKind::TASK));
    }

    #[test]
    fn quote_lines_hold_blocks() {
        let input = "> - [ ] task\n> # Title\n> > nested\n";
        let tree = parse(input);
        let quote = tree.children().next().unwrap();
        assert_eq!(quote.kind(), SyntaxKind::BLOCK_QUOTE);
        assert_eq!(
            quote.children().map(|n| n.kind()).collect::<Vec<_>>(),
            vec![SyntaxKind::LIST, SyntaxKind::HEADING, SyntaxKind::BLOCK_QUOTE]
        );
        assert!(quote.descendants().any(|n| n.kind() == SyntaxKind::TASK));
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn text_preservation() {
        let input = "# Heading\n\n> Quote\n  > more\n\n- Item\n   \n```\ncode\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }
}
