//! # Template Directives
//!
//! ```text
//! {{ expression }}
//! {{#each expr}} … {{/each}}
//! {{#if expr}} … {{else}} … {{/if}}
//! {{#let @name = expr}} … {{/let}}
//! ${ lua expression }
//! ```
//!
//! A directive's expression is scanned with a brace-depth counter, so
//! `{{count({ page })}}` closes at the final `}}`. Block openers are matched
//! to closers with a keyword stack: nested blocks of the same keyword pair up
//! innermost first, and `{{else}}` belongs to an `if` only at that block's own
//! depth. Openers without a closer, stray closers and stray `{{else}}` are
//! plain text, as are unknown keywords like `{{#foo}}`.
//!
//! Pairing happens once per parse, in [`pair_directives`], before any block
//! is parsed. That pass steps over fenced code, code spans and escapes, so a
//! `{{/if}}` shown as code never closes a block.
//!
//! Blocks come in two forms. Inline, the whole block sits on one line and the
//! bodies are inline content. As a block, each directive sits alone on its own
//! line and the bodies are parsed as blocks, so a template can wrap lists and
//! paragraphs.

use std::collections::HashMap;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{blank_rest, block, inline, is_char, is_line_end, line_len, run_len};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Each,
    If,
    Let,
}

impl Keyword {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "each" => Some(Self::Each),
            "if" => Some(Self::If),
            "let" => Some(Self::Let),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Expression,
    Open(Keyword),
    Else,
    Close(Keyword),
    /// Shaped like a keyword directive but not a valid one.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    /// Tokens from `{{` through `}}`.
    len: usize,
    role: Role,
    /// Whitespace tokens between `{{` and the keyword.
    lead: usize,
    /// Tokens making up the keyword: `#if`, `/if`, `else`.
    keyword: usize,
}

impl Directive {
    /// Tokens between the delimiters.
    fn inner(&self) -> usize {
        self.len - 4
    }
}

/// Offsets of the `{{else}}` and closing directive, from the opener's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Matched {
    else_at: Option<usize>,
    close_at: usize,
}

/// Measure and classify a `{{…}}` directive starting at offset `from`.
fn directive_at(p: &Parser<'_, '_>, from: usize) -> Option<Directive> {
    if p.nth(from) != SyntaxKind::LBRACE || p.nth(from + 1) != SyntaxKind::LBRACE {
        return None;
    }

    let start = from + 2;
    let mut depth = 0usize;
    let mut i = start;
    let close = loop {
        match p.nth(i) {
            SyntaxKind::LBRACE => depth += 1,
            SyntaxKind::RBRACE if depth > 0 => depth -= 1,
            SyntaxKind::RBRACE if p.nth(i + 1) == SyntaxKind::RBRACE => break i,
            kind if is_line_end(kind) => return None,
            _ => {}
        }
        i += 1;
    };

    let lead = run_len(p, start, SyntaxKind::WHITESPACE);
    let at = start + lead;
    if at == close {
        return None;
    }
    let blank_from = |n: usize| (n..close).all(|i| p.nth(i) == SyntaxKind::WHITESPACE);
    let keyword_at = |n: usize| {
        (p.nth(n) == SyntaxKind::TEXT)
            .then(|| Keyword::from_name(p.nth_text(n)))
            .flatten()
    };

    let (role, keyword) = match p.nth(at) {
        SyntaxKind::HASH => match keyword_at(at + 1) {
            Some(kw) if valid_arguments(p, kw, at + 2, close) => (Role::Open(kw), 2),
            _ => (Role::Invalid, 0),
        },
        _ if is_char(p, at, '/') => match keyword_at(at + 1) {
            Some(kw) if blank_from(at + 2) => (Role::Close(kw), 2),
            _ => (Role::Invalid, 0),
        },
        SyntaxKind::TEXT if p.nth_text(at) == "else" && blank_from(at + 1) => (Role::Else, 1),
        _ => (Role::Expression, 0),
    };

    Some(Directive {
        len: close + 2 - from,
        role,
        lead: if role == Role::Expression { 0 } else { lead },
        keyword,
    })
}

/// `#each` and `#if` need an expression; `#let` needs `@name = expr`.
fn valid_arguments(p: &Parser<'_, '_>, keyword: Keyword, from: usize, close: usize) -> bool {
    let first = (from..close).find(|&i| p.nth(i) != SyntaxKind::WHITESPACE);
    match (keyword, first) {
        (_, None) => false,
        (Keyword::Each | Keyword::If, Some(_)) => true,
        (Keyword::Let, Some(at)) => {
            is_char(p, at, '@')
                && p.nth(at + 1) == SyntaxKind::TEXT
                && (at + 2..close).any(|i| is_char(p, i, '='))
        }
    }
}

/// Block openers paired with their `{{else}}` and closer, keyed by the
/// opener's absolute token index.
#[derive(Debug, Default)]
pub(crate) struct DirectivePairs {
    blocks: HashMap<usize, Matched>,
}

/// Tokens to step over without looking for directives: fenced code at a line
/// start, code spans, escapes.
fn verbatim_len(p: &Parser<'_, '_>, at: usize, line_start: bool) -> Option<usize> {
    if let Some(len) = line_start.then(|| block::fenced_code_len(p, at)).flatten() {
        return Some(len);
    }
    match p.nth(at) {
        SyntaxKind::BACKTICK => {
            Some(inline::code_span_len(p, at).unwrap_or_else(|| run_len(p, at, SyntaxKind::BACKTICK)))
        }
        SyntaxKind::BACKSLASH if inline::is_escape(p, at) => Some(2),
        _ => None,
    }
}

/// Pair every block opener from the current position to the end of input in
/// one pass over a keyword stack.
///
/// A closer only pops an opener of its own keyword, and `{{else}}` attaches
/// to an `if` on top of the stack. Openers left on the stack stay unpaired.
pub(super) fn pair_directives(p: &mut Parser<'_, '_>) {
    struct Open {
        at: usize,
        keyword: Keyword,
        else_at: Option<usize>,
    }

    let base = p.position();
    let mut stack: Vec<Open> = Vec::new();
    let mut blocks = HashMap::new();
    let mut i = 0;
    while p.nth(i) != SyntaxKind::EOF {
        let line_start = if i == 0 {
            p.at_line_start()
        } else {
            p.nth(i - 1) == SyntaxKind::NEWLINE
        };
        if let Some(len) = verbatim_len(p, i, line_start) {
            i += len;
            continue;
        }
        let Some(d) = directive_at(p, i) else {
            i += 1;
            continue;
        };

        match d.role {
            Role::Open(keyword) => stack.push(Open {
                at: i,
                keyword,
                else_at: None,
            }),
            Role::Close(keyword) if stack.last().is_some_and(|open| open.keyword == keyword) => {
                if let Some(open) = stack.pop() {
                    blocks.insert(
                        base + open.at,
                        Matched {
                            else_at: open.else_at.map(|at| at - open.at),
                            close_at: i - open.at,
                        },
                    );
                }
            }
            Role::Else => {
                let top = stack.last_mut();
                if let Some(open) = top.filter(|open| open.keyword == Keyword::If && open.else_at.is_none()) {
                    open.else_at = Some(i);
                }
            }
            _ => {}
        }
        i += d.len;
    }

    log::trace!("paired {} template blocks", blocks.len());
    p.directives = DirectivePairs { blocks };
}

/// The pairing of the opener at the current position, if its closer is
/// visible. Inline blocks must also close on the opener's line.
fn match_block(p: &Parser<'_, '_>, multiline: bool) -> Option<Matched> {
    let matched = *p.directives.blocks.get(&p.position())?;
    directive_at(p, matched.close_at)?;
    if !multiline && matched.close_at >= line_len(p, 0) {
        return None;
    }
    Some(matched)
}

fn emit_directive(p: &mut Parser<'_, '_>, d: &Directive) {
    let m = p.start();
    p.bump_n(2, SyntaxKind::TEMPLATE_DIRECTIVE_MARK);
    if d.role == Role::Expression {
        expression(p, d.inner());
    } else {
        p.bump_each(d.lead);
        p.bump_n(d.keyword, SyntaxKind::TEMPLATE_KEYWORD);
        let rest = d.inner() - d.lead - d.keyword;
        let space = run_len(p, 0, SyntaxKind::WHITESPACE).min(rest);
        p.bump_each(space);
        expression(p, rest - space);
    }
    p.bump_n(2, SyntaxKind::TEMPLATE_DIRECTIVE_MARK);
    m.complete(p, SyntaxKind::TEMPLATE_DIRECTIVE);
}

fn expression(p: &mut Parser<'_, '_>, n: usize) {
    if n == 0 {
        return;
    }
    let m = p.start();
    p.bump_n(n, SyntaxKind::TEXT);
    m.complete(p, SyntaxKind::TEMPLATE_EXPRESSION);
}

/// Emit the directive at the current position, if there is one.
fn emit_next_directive(p: &mut Parser<'_, '_>) {
    if let Some(d) = directive_at(p, 0) {
        emit_directive(p, &d);
    }
}

fn body(p: &mut Parser<'_, '_>, end: usize, content: fn(&mut Parser<'_, '_>)) {
    let m = p.start();
    let n = end.saturating_sub(p.position());
    p.limited(n, content);
    m.complete(p, SyntaxKind::TEMPLATE_BODY);
}

fn blocks(p: &mut Parser<'_, '_>) {
    while !p.at_end() {
        block::block(p);
    }
}

/// Directive rule for inline scanning: expressions, one-line blocks, and
/// plain text for anything unmatched.
pub(super) fn template_inline(p: &mut Parser<'_, '_>) -> bool {
    let Some(d) = directive_at(p, 0) else {
        return false;
    };

    let matched = match d.role {
        Role::Expression => {
            emit_directive(p, &d);
            return true;
        }
        Role::Open(_) => match_block(p, false),
        Role::Else | Role::Close(_) | Role::Invalid => None,
    };
    let Some(matched) = matched else {
        p.bump_each(d.len);
        return true;
    };

    let start = p.position();
    let m = p.start();
    emit_directive(p, &d);
    body(
        p,
        start + matched.else_at.unwrap_or(matched.close_at),
        inline::inline_until_end,
    );
    if matched.else_at.is_some() {
        emit_next_directive(p);
        body(p, start + matched.close_at, inline::inline_until_end);
    }
    emit_next_directive(p);
    m.complete(p, SyntaxKind::TEMPLATE_BLOCK);
    true
}

struct BlockShape {
    opener: Directive,
    /// Whitespace after the opener on its line.
    trailing: usize,
    matched: Matched,
}

/// Whether the directive at offset `at` fills its line.
fn alone_on_line(p: &Parser<'_, '_>, at: usize) -> bool {
    let own_line = at == 0 || p.nth(at - 1) == SyntaxKind::NEWLINE;
    own_line
        && directive_at(p, at)
            .and_then(|d| blank_rest(p, at + d.len))
            .is_some()
}

fn block_shape(p: &Parser<'_, '_>) -> Option<BlockShape> {
    if !p.at_line_start() {
        return None;
    }
    let opener = directive_at(p, 0)?;
    if !matches!(opener.role, Role::Open(_)) {
        return None;
    }
    let trailing = blank_rest(p, opener.len)?;
    if p.nth(opener.len + trailing) != SyntaxKind::NEWLINE {
        return None;
    }

    let matched = match_block(p, true)?;
    let else_ok = matched.else_at.is_none_or(|at| alone_on_line(p, at));
    (else_ok && alone_on_line(p, matched.close_at)).then_some(BlockShape {
        opener,
        trailing,
        matched,
    })
}

/// Whether a block-form template starts here; it interrupts a paragraph.
pub(super) fn starts_block(p: &Parser<'_, '_>) -> bool {
    block_shape(p).is_some()
}

/// Block rule: a template block whose directives sit on their own lines.
pub(super) fn template_block(p: &mut Parser<'_, '_>) -> bool {
    let Some(shape) = block_shape(p) else {
        return false;
    };

    let start = p.position();
    let m = p.start();
    emit_directive(p, &shape.opener);
    p.bump_each(shape.trailing);
    p.eat(SyntaxKind::NEWLINE);

    let matched = shape.matched;
    body(p, start + matched.else_at.unwrap_or(matched.close_at), blocks);
    if matched.else_at.is_some() {
        directive_line(p);
        body(p, start + matched.close_at, blocks);
    }
    directive_line(p);
    m.complete(p, SyntaxKind::TEMPLATE_BLOCK);
    true
}

fn directive_line(p: &mut Parser<'_, '_>) {
    emit_next_directive(p);
    let trailing = blank_rest(p, 0).unwrap_or(0);
    p.bump_each(trailing);
    p.eat(SyntaxKind::NEWLINE);
}

/// Lua directive `${expr}`; the first `}` at brace depth zero closes it.
pub(super) fn lua_directive(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(SyntaxKind::DOLLAR) || p.nth(1) != SyntaxKind::LBRACE {
        return false;
    }

    let mut depth = 0usize;
    let mut i = 2;
    let close = loop {
        match p.nth(i) {
            SyntaxKind::LBRACE => depth += 1,
            SyntaxKind::RBRACE if depth == 0 => break i,
            SyntaxKind::RBRACE => depth -= 1,
            kind if is_line_end(kind) => return false,
            _ => {}
        }
        i += 1;
    };
    if close == 2 {
        return false;
    }

    let m = p.start();
    p.bump_n(2, SyntaxKind::LUA_DIRECTIVE_MARK);
    let expr = p.start();
    p.bump_n(close - 2, SyntaxKind::TEXT);
    expr.complete(p, SyntaxKind::LUA_EXPRESSION);
    p.bump_n(1, SyntaxKind::LUA_DIRECTIVE_MARK);
    m.complete(p, SyntaxKind::LUA_DIRECTIVE);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::options::ParseOptions;
    use crate::parser::parse;
    use crate::syntax_kind::SyntaxNode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn nodes(tree: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        tree.descendants().filter(|n| n.kind() == kind).collect()
    }

    fn role(input: &str) -> Option<Role> {
        let tokens = lex(input);
        let p = Parser::new(&tokens, ParseOptions::all());
        directive_at(&p, 0).map(|d| d.role)
    }

    #[rstest]
    #[case("{{name}}", Some(Role::Expression))]
    #[case("{{ . }}", Some(Role::Expression))]
    #[case("{{count({ page })}}", Some(Role::Expression))]
    #[case("{{#each .}}", Some(Role::Open(Keyword::Each)))]
    #[case("{{#if true}}", Some(Role::Open(Keyword::If)))]
    #[case("{{#let @p = true}}", Some(Role::Open(Keyword::Let)))]
    #[case("{{ else }}", Some(Role::Else))]
    #[case("{{/each}}", Some(Role::Close(Keyword::Each)))]
    #[case("{{#if}}", Some(Role::Invalid))]
    #[case("{{#let p}}", Some(Role::Invalid))]
    #[case("{{#foo bar}}", Some(Role::Invalid))]
    #[case("{{/if x}}", Some(Role::Invalid))]
    #[case("{{}}", None)]
    #[case("{{ }}", None)]
    #[case("{{unclosed", None)]
    #[case("{{split\n}}", None)]
    fn classifies_directives(#[case] input: &str, #[case] expected: Option<Role>) {
        assert_eq!(role(input), expected);
    }

    #[test]
    fn expression_keeps_surrounding_spaces() {
        let tree = parse("Simple {{ name }} and {{count({ page })}}");
        let exprs: Vec<_> = nodes(&tree, SyntaxKind::TEMPLATE_EXPRESSION)
            .iter()
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(exprs, vec![" name ", "count({ page })"]);
    }

    #[rstest]
    #[case("{{#each .}}Sup{{/each}}", 1)]
    #[case("{{#if true}}Sup{{/if}}", 1)]
    #[case("{{#if true}}Sup{{else}}Sup2{{/if}}", 2)]
    #[case("{{#let @p = true}}{{/let}}", 1)]
    fn inline_blocks(#[case] input: &str, #[case] bodies: usize) {
        let tree = parse(input);
        let blocks = nodes(&tree, SyntaxKind::TEMPLATE_BLOCK);
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.text().to_string(), input);
        let body_count = block
            .children()
            .filter(|n| n.kind() == SyntaxKind::TEMPLATE_BODY)
            .count();
        assert_eq!(body_count, bodies);
    }

    #[test]
    fn keyword_and_expression_nodes() {
        let tree = parse("{{#if done}}yes{{/if}}");
        let opener = nodes(&tree, SyntaxKind::TEMPLATE_DIRECTIVE)[0].clone();
        let parts: Vec<_> = opener
            .children_with_tokens()
            .map(|e| match e {
                rowan::NodeOrToken::Node(n) => (n.kind(), n.text().to_string()),
                rowan::NodeOrToken::Token(t) => (t.kind(), t.text().to_string()),
            })
            .collect();
        assert_eq!(
            parts,
            vec![
                (SyntaxKind::TEMPLATE_DIRECTIVE_MARK, "{{".to_string()),
                (SyntaxKind::TEMPLATE_KEYWORD, "#if".to_string()),
                (SyntaxKind::WHITESPACE, " ".to_string()),
                (SyntaxKind::TEMPLATE_EXPRESSION, "done".to_string()),
                (SyntaxKind::TEMPLATE_DIRECTIVE_MARK, "}}".to_string()),
            ]
        );
    }

    #[test]
    fn nested_blocks_match_innermost_first() {
        let input = "{{#if a}}x{{#if b}}y{{/if}}z{{/if}}";
        let tree = parse(input);
        let blocks = nodes(&tree, SyntaxKind::TEMPLATE_BLOCK);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text().to_string(), input);
        assert_eq!(blocks[1].text().to_string(), "{{#if b}}y{{/if}}");
    }

    #[test]
    fn else_belongs_to_its_own_depth() {
        let input = "{{#if a}}{{#each xs}}{{else}}{{/each}}{{/if}}";
        let tree = parse(input);
        let outer = nodes(&tree, SyntaxKind::TEMPLATE_BLOCK)[0].clone();
        let bodies = outer
            .children()
            .filter(|n| n.kind() == SyntaxKind::TEMPLATE_BODY)
            .count();
        assert_eq!(bodies, 1);
    }

    #[rstest]
    #[case("{{#if x}} never closed")]
    #[case("stray {{/if}} closer")]
    #[case("stray {{else}}")]
    #[case("{{#each xs}}mismatch{{/if}}")]
    #[case("{{#foo bar}}x{{/foo}}")]
    #[case("{{#if x}}split\n{{/if}}")]
    fn unmatched_directives_are_text(#[case] input: &str) {
        let tree = parse(input);
        assert!(nodes(&tree, SyntaxKind::TEMPLATE_BLOCK).is_empty());
        assert!(nodes(&tree, SyntaxKind::TEMPLATE_KEYWORD).is_empty());
        assert!(nodes(&tree, SyntaxKind::HASHTAG).is_empty());
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn block_form_bodies_are_blocks() {
        let input = "{{#if done}}\n- [x] item\n{{else}}\nNothing yet\n{{/if}}\nafter\n";
        let tree = parse(input);
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::TEMPLATE_BLOCK);
        let kinds: Vec<_> = block.children().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::TEMPLATE_DIRECTIVE,
                SyntaxKind::TEMPLATE_BODY,
                SyntaxKind::TEMPLATE_DIRECTIVE,
                SyntaxKind::TEMPLATE_BODY,
                SyntaxKind::TEMPLATE_DIRECTIVE,
            ]
        );
        let bodies: Vec<_> = block
            .children()
            .filter(|n| n.kind() == SyntaxKind::TEMPLATE_BODY)
            .map(|b| b.children().map(|n| n.kind()).collect::<Vec<_>>())
            .collect();
        assert_eq!(
            bodies,
            vec![vec![SyntaxKind::LIST], vec![SyntaxKind::PARAGRAPH]]
        );
        assert_eq!(
            tree.children().last().unwrap().kind(),
            SyntaxKind::PARAGRAPH
        );
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn block_form_interrupts_paragraph() {
        let tree = parse("intro\n{{#each pages}}\n* {{name}}\n{{/each}}\n");
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::PARAGRAPH, SyntaxKind::TEMPLATE_BLOCK]
        );
    }

    #[test]
    fn closers_inside_fenced_code_do_not_pair() {
        let input = "{{#if a}}\n```\n{{/if}}\n```\n{{/if}}\n";
        let tree = parse(input);
        let block = tree.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::TEMPLATE_BLOCK);
        assert_eq!(block.text().to_string(), input);

        let fences = nodes(&tree, SyntaxKind::FENCED_CODE);
        assert_eq!(fences.len(), 1);
        assert_eq!(fences[0].text().to_string(), "```\n{{/if}}\n```\n");
        assert_eq!(
            fences[0].parent().map(|n| n.kind()),
            Some(SyntaxKind::TEMPLATE_BODY)
        );
        assert_eq!(nodes(&tree, SyntaxKind::TEMPLATE_DIRECTIVE).len(), 2);
    }

    #[test]
    fn closers_inside_code_spans_do_not_pair() {
        let input = "{{#if a}}`{{/if}}`{{/if}}";
        let tree = parse(input);
        let spans = nodes(&tree, SyntaxKind::CODE_SPAN);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text().to_string(), "`{{/if}}`");

        let blocks = nodes(&tree, SyntaxKind::TEMPLATE_BLOCK);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text().to_string(), input);
    }

    #[test]
    fn escaped_braces_are_not_directives() {
        let tree = parse("{{#if a}}\\{{/if}}{{/if}}");
        let blocks = nodes(&tree, SyntaxKind::TEMPLATE_BLOCK);
        assert_eq!(blocks.len(), 1);
        assert_eq!(nodes(&tree, SyntaxKind::TEMPLATE_DIRECTIVE).len(), 2);
    }

    #[test]
    fn pairs_are_found_in_one_pass() {
        let tokens = lex("{{#if a}}{{#each xs}}{{else}}{{/each}}{{else}}{{/if}} {{#if open}}");
        let mut p = Parser::new(&tokens, ParseOptions::all());
        pair_directives(&mut p);

        let mut pairs: Vec<_> = p.directives.blocks.iter().map(|(&at, &m)| (at, m)).collect();
        pairs.sort_by_key(|&(at, _)| at);
        assert_eq!(
            pairs,
            vec![
                (
                    0,
                    Matched {
                        else_at: Some(27),
                        close_at: 32,
                    }
                ),
                (
                    8,
                    Matched {
                        else_at: None,
                        close_at: 13,
                    }
                ),
            ]
        );
    }

    #[test]
    fn unclosed_openers_on_every_line() {
        let input = "{{#if x}}\n".repeat(500);
        let tree = parse(&input);
        assert!(nodes(&tree, SyntaxKind::TEMPLATE_BLOCK).is_empty());
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.text().to_string(), input);
    }

    #[rstest]
    #[case("Simple ${{a=}}", "{a=}")]
    #[case("${ page.name }", " page.name ")]
    fn lua_directives(#[case] input: &str, #[case] expr: &str) {
        let tree = parse(input);
        let directive = nodes(&tree, SyntaxKind::LUA_DIRECTIVE);
        assert_eq!(directive.len(), 1);
        let expression = nodes(&tree, SyntaxKind::LUA_EXPRESSION);
        assert_eq!(expression[0].text().to_string(), expr);
        assert_eq!(tree.text().to_string(), input);
    }

    #[rstest]
    #[case("${}")]
    #[case("${open")]
    #[case("$ {spaced}")]
    fn not_lua_directives(#[case] input: &str) {
        assert!(nodes(&parse(input), SyntaxKind::LUA_DIRECTIVE).is_empty());
    }
}
