//! # Grammar Rules
//!
//! This module contains the grammar rules that drive parsing. Each function
//! takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect tokens without consuming them (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.bump_n()`, `p.eat()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`)
//!
//! ## Module Structure
//!
//! - [`block`] - Block-level elements and the `BLOCK_RULES` table
//! - [`inline`] - Inline elements and the `INLINE_RULES` table
//! - [`frontmatter`] - The YAML block at the very top of a document
//! - [`task`] - `[status]` at the start of a list item
//! - [`wikilink`], [`attribute`], [`command_link`], [`hashtag`] - bracketed
//!   and `#` extensions
//! - [`template`] - `{{ }}` directives, template blocks and `${ }` Lua directives
//!
//! ## Rule Tables
//!
//! Both block and inline dispatch walk an ordered table of rules and take the
//! first one that matches. Precedence between overlapping syntaxes (a wiki
//! link versus an attribute versus a plain link, all starting with `[`) is
//! therefore the table order, not a tangle of `if`s.
//!
//! A rule returns `true` when it consumed input. A rule that returns `false`
//! must not have pushed any event, which is why every rule probes first:
//!
//! ```ignore
//! fn wiki_link(p: &mut Parser) -> bool {
//!     let Some(shape) = probe(p) else {   // 1. Pure lookahead
//!         return false;
//!     };
//!     let m = p.start();                   // 2. Emit
//!     p.bump_n(2, SyntaxKind::WIKILINK_MARK);
//!     // ...
//!     m.complete(p, SyntaxKind::WIKILINK);
//!     true
//! }
//! ```
//!
//! ## Error Recovery
//!
//! There is none to speak of: a construct that does not match is simply not
//! recognized, and its characters end up as plain text in the enclosing node.
//! The tree always covers every input byte.

mod attribute;
mod block;
mod command_link;
mod frontmatter;
mod hashtag;
mod inline;
mod task;
mod template;
mod wikilink;

pub(super) use template::DirectivePairs;

use crate::options::Extension;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
///
/// This is the entry point for parsing. It creates a ROOT node containing
/// the optional frontmatter followed by all top-level blocks.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if p.allows(Extension::FrontMatter) {
        frontmatter::frontmatter(p);
    }
    if p.allows(Extension::Directives) {
        template::pair_directives(p);
    }

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// A token that ends the current line (or the visible input).
fn is_line_end(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::NEWLINE | SyntaxKind::EOF)
}

/// Number of tokens from offset `from` up to the end of its line.
fn line_len(p: &Parser<'_, '_>, from: usize) -> usize {
    let mut i = from;
    while !is_line_end(p.nth(i)) {
        i += 1;
    }
    i - from
}

/// If only whitespace remains on the line from offset `from`, the number of
/// whitespace tokens before the line end.
fn blank_rest(p: &Parser<'_, '_>, from: usize) -> Option<usize> {
    let mut i = from;
    while p.nth(i) == SyntaxKind::WHITESPACE {
        i += 1;
    }
    is_line_end(p.nth(i)).then_some(i - from)
}

/// Number of consecutive `kind` tokens starting at offset `from`.
fn run_len(p: &Parser<'_, '_>, from: usize, kind: SyntaxKind) -> usize {
    let mut i = from;
    while p.nth(i) == kind {
        i += 1;
    }
    i - from
}

/// Single-character token whose text is `c`.
fn is_char(p: &Parser<'_, '_>, n: usize, c: char) -> bool {
    let mut chars = p.nth_text(n).chars();
    chars.next() == Some(c) && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::options::ParseOptions;

    #[test]
    fn line_helpers_stop_at_newline() {
        let tokens = lex("a b  \nc");
        let p = Parser::new(&tokens, ParseOptions::all());
        assert_eq!(line_len(&p, 0), 4);
        assert_eq!(blank_rest(&p, 3), Some(1));
        assert_eq!(blank_rest(&p, 0), None);
        assert_eq!(line_len(&p, 5), 1);
    }

    #[test]
    fn run_len_counts_repeated_tokens() {
        let tokens = lex("```x");
        let p = Parser::new(&tokens, ParseOptions::all());
        assert_eq!(run_len(&p, 0, SyntaxKind::BACKTICK), 3);
        assert_eq!(run_len(&p, 3, SyntaxKind::BACKTICK), 0);
        assert!(is_char(&p, 0, '`'));
    }
}
