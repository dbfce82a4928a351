//! Command links: `{[Name]}` and `{[Name|Alias]}`.
//!
//! Call arguments may sit inside the braces, `{[Name]("arg", 1)}`, or follow
//! them directly, `{[Name]}("arg", 1)`. They are captured verbatim, never
//! evaluated.
//!
//! Name and alias are kept verbatim, surrounding spaces included. Inside the
//! name, `\|` is a literal pipe rather than the alias separator.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{is_char, is_line_end};

#[derive(Debug, PartialEq, Eq)]
struct Shape {
    name: usize,
    alias: Option<usize>,
    args: Option<usize>,
    /// Arguments sit between `]` and `}` rather than after `]}`.
    args_inside: bool,
}

fn probe(p: &Parser<'_, '_>) -> Option<Shape> {
    if p.nth(0) != SyntaxKind::LBRACE || p.nth(1) != SyntaxKind::LBRACKET {
        return None;
    }

    let mut i = 2;
    let mut depth = 0usize;
    let mut pipe = None;
    let mut inner_args = None;
    let close = loop {
        match p.nth(i) {
            SyntaxKind::BACKSLASH => {
                if is_line_end(p.nth(i + 1)) {
                    return None;
                }
                i += 2;
                continue;
            }
            SyntaxKind::LBRACKET => depth += 1,
            SyntaxKind::RBRACKET if depth > 0 => depth -= 1,
            SyntaxKind::RBRACKET if p.nth(i + 1) == SyntaxKind::RBRACE => break i,
            SyntaxKind::RBRACKET => {
                let args = args_len(p, i + 1).filter(|n| p.nth(i + n + 3) == SyntaxKind::RBRACE);
                if args.is_some() {
                    inner_args = args;
                    break i;
                }
            }
            SyntaxKind::PIPE if depth == 0 && pipe.is_none() => pipe = Some(i),
            kind if is_line_end(kind) => return None,
            _ => {}
        }
        i += 1;
    };

    let name = pipe.unwrap_or(close) - 2;
    if name == 0 {
        return None;
    }

    let (args, args_inside) = match inner_args {
        Some(n) => (Some(n), true),
        None => (args_len(p, close + 2), false),
    };
    Some(Shape {
        name,
        alias: pipe.map(|pipe| close - pipe - 1),
        args,
        args_inside,
    })
}

/// Token count of a call argument list whose `(` is at offset `from`.
///
/// Parentheses nest, and inside a `"…"` or `'…'` string nothing but the
/// matching quote (or a backslash escape) is significant.
fn args_len(p: &Parser<'_, '_>, from: usize) -> Option<usize> {
    if p.nth(from) != SyntaxKind::LPAREN {
        return None;
    }

    let mut i = from + 1;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    loop {
        let kind = p.nth(i);
        if is_line_end(kind) {
            return None;
        }
        match quote {
            Some(_) if kind == SyntaxKind::BACKSLASH => i += 1,
            Some(q) if is_char(p, i, q) => quote = None,
            Some(_) => {}
            None => match kind {
                SyntaxKind::LPAREN => depth += 1,
                SyntaxKind::RPAREN if depth == 0 => return Some(i - from - 1),
                SyntaxKind::RPAREN => depth -= 1,
                _ if is_char(p, i, '"') => quote = Some('"'),
                _ if is_char(p, i, '\'') => quote = Some('\''),
                _ => {}
            },
        }
        i += 1;
    }
}

pub(super) fn command_link(p: &mut Parser<'_, '_>) -> bool {
    let Some(shape) = probe(p) else {
        return false;
    };

    let m = p.start();
    p.bump_n(2, SyntaxKind::COMMAND_LINK_MARK);

    let name = p.start();
    p.bump_n(shape.name, SyntaxKind::TEXT);
    name.complete(p, SyntaxKind::COMMAND_LINK_NAME);

    if let Some(alias_len) = shape.alias {
        p.bump_n(1, SyntaxKind::COMMAND_LINK_MARK);
        let alias = p.start();
        p.bump_n(alias_len, SyntaxKind::TEXT);
        alias.complete(p, SyntaxKind::COMMAND_LINK_ALIAS);
    }

    match shape.args {
        Some(n) if shape.args_inside => {
            p.bump_n(1, SyntaxKind::COMMAND_LINK_MARK);
            call_args(p, n);
            p.bump_n(1, SyntaxKind::COMMAND_LINK_MARK);
        }
        Some(n) => {
            p.bump_n(2, SyntaxKind::COMMAND_LINK_MARK);
            call_args(p, n);
        }
        None => p.bump_n(2, SyntaxKind::COMMAND_LINK_MARK),
    }

    m.complete(p, SyntaxKind::COMMAND_LINK);
    true
}

fn call_args(p: &mut Parser<'_, '_>, n: usize) {
    p.bump_n(1, SyntaxKind::COMMAND_LINK_MARK);
    let args = p.start();
    p.bump_n(n, SyntaxKind::TEXT);
    args.complete(p, SyntaxKind::COMMAND_LINK_ARGS);
    p.bump_n(1, SyntaxKind::COMMAND_LINK_MARK);
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

    fn command_links(input: &str) -> Vec<SyntaxNode> {
        parse(input)
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::COMMAND_LINK)
            .collect()
    }

    /// Text of the `index`-th child element, as tree consumers index them.
    fn child_text(node: &SyntaxNode, index: usize) -> String {
        node.children_with_tokens()
            .nth(index)
            .map(|e| match e {
                rowan::NodeOrToken::Node(n) => n.text().to_string(),
                rowan::NodeOrToken::Token(t) => t.text().to_string(),
            })
            .unwrap_or_default()
    }

    #[test]
    fn names_and_aliases_keep_spacing() {
        let links = command_links(
            "\n{[Some: Command]}\n{[Other: Command|Alias]}\n{[Command: Space | Spaces ]}\n",
        );
        assert_eq!(links.len(), 3);
        assert_eq!(child_text(&links[0], 1), "Some: Command");
        assert_eq!(child_text(&links[1], 1), "Other: Command");
        assert_eq!(child_text(&links[1], 3), "Alias");
        assert_eq!(child_text(&links[2], 1), "Command: Space ");
        assert_eq!(child_text(&links[2], 3), " Spaces ");
    }

    #[test]
    fn arguments_follow_the_link() {
        let links = command_links(
            "\n{[Args: Command](\"with\", \"args\")}\n{[Othargs: Command|Args alias](\"other\", \"args\", 123)}\n",
        );
        assert_eq!(links.len(), 2);
        let args: Vec<_> = links
            .iter()
            .map(|link| {
                link.children()
                    .find(|n| n.kind() == SyntaxKind::COMMAND_LINK_ARGS)
                    .map(|n| n.text().to_string())
            })
            .collect();
        assert_eq!(
            args,
            vec![
                Some("\"with\", \"args\"".to_string()),
                Some("\"other\", \"args\", 123".to_string())
            ]
        );
    }

    #[rstest]
    #[case("{[Run]}(\"a)\", (1 + 2))", Some(13))]
    #[case("{[Run]}(')', \"\\\"\")", Some(9))]
    #[case("{[Run](1, \"}\")}", Some(6))]
    #[case("{[Run]}(unclosed", None)]
    #[case("{[Run]} (spaced)", None)]
    fn argument_scanning(#[case] input: &str, #[case] args: Option<usize>) {
        let tokens = lex(input);
        let p = Parser::new(&tokens, ParseOptions::all());
        assert_eq!(probe(&p).and_then(|shape| shape.args), args);
    }

    #[test]
    fn escaped_pipe_stays_in_name() {
        let tokens = lex(r"{[Split \| Join|Alias]}");
        let p = Parser::new(&tokens, ParseOptions::all());
        assert_eq!(
            probe(&p),
            Some(Shape {
                name: 6,
                alias: Some(1),
                args: None,
                args_inside: false,
            })
        );
    }

    #[rstest]
    #[case("{[]}")]
    #[case("{[|alias]}")]
    #[case("{[open")]
    #[case("{[across\nlines]}")]
    #[case("`{[in code]}`")]
    fn not_command_links(#[case] input: &str) {
        assert!(command_links(input).is_empty());
    }

    #[test]
    fn trailing_arguments() {
        let links = command_links("Run {[Build|Go]}(\"release\") now");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text().to_string(), "{[Build|Go]}(\"release\")");
        assert_eq!(child_text(&links[0], 5), "(");
        assert_eq!(child_text(&links[0], 6), "\"release\"");
    }

    #[test]
    fn inner_arguments_token_structure() {
        let links = command_links("{[Run|Go](1)}");
        let kinds: Vec<_> = links[0].children_with_tokens().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::COMMAND_LINK_MARK,
                SyntaxKind::COMMAND_LINK_NAME,
                SyntaxKind::COMMAND_LINK_MARK,
                SyntaxKind::COMMAND_LINK_ALIAS,
                SyntaxKind::COMMAND_LINK_MARK,
                SyntaxKind::COMMAND_LINK_MARK,
                SyntaxKind::COMMAND_LINK_ARGS,
                SyntaxKind::COMMAND_LINK_MARK,
                SyntaxKind::COMMAND_LINK_MARK,
            ]
        );
    }

    #[test]
    fn nested_brackets_in_name() {
        let links = command_links("{[Open [[page]]|go]}");
        assert_eq!(links.len(), 1);
        assert_eq!(child_text(&links[0], 1), "Open [[page]]");
    }
}
