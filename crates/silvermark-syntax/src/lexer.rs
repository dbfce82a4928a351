//! # Lexer - Tokenizing Source Text
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! The most important property of this lexer is that **every byte in the input
//! appears in exactly one token**. We never skip or discard characters. This
//! is what makes round-tripping possible:
//!
//! ```
//! use silvermark_syntax::lexer::lex;
//!
//! let input = "# Hello, [[world]]!\n";
//! let tokens = lex(input);
//!
//! // Concatenating all token texts gives back the original
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Why Two Token Enums?
//!
//! You'll notice we have both [`TokenKind`] (in this module) and [`SyntaxKind`]
//! (in the syntax_kind module). This is because:
//!
//! 1. **Logos requires its own enum** for the `#[derive(Logos)]` macro
//! 2. **Rowan uses our SyntaxKind** for the final tree
//!
//! The [`TokenKind::to_syntax_kind`] method converts between them.
//!
//! ## Token Design Philosophy
//!
//! Tokens are kept **minimal and context-free**. The lexer doesn't know if `[`
//! opens a wikilink, an attribute, a task checkbox or a link - that's the
//! parser's job.
//!
//! Characters with syntactic meaning get their own token types. Letters,
//! marks and numbers are grouped into `TEXT` runs. Every other character is a
//! one-character `PUNCT` token, which is what lets the hashtag rule stop in
//! the middle of `#idea!` without splitting tokens.
//!
//! The `TEXT` class (`\p{L}\p{M}\p{N}`) is the letter part of the hashtag
//! character class; keep it in sync with [`crate::hashtag::TAG_NAME_PATTERN`].
//!
//! [`SyntaxKind`]: crate::syntax_kind::SyntaxKind

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("-")]
    Dash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("_")]
    Underscore,

    #[token("`")]
    Backtick,

    #[token("~")]
    Tilde,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("|")]
    Pipe,

    #[token("#")]
    Hash,

    #[token(":")]
    Colon,

    #[token("!")]
    Bang,

    #[token("\\")]
    Backslash,

    #[token("$")]
    Dollar,

    /// Letters, combining marks and numbers in any script
    #[regex(r"[\p{L}\p{M}\p{N}]+")]
    Text,

    /// Any other single non-whitespace character
    #[regex(r"[^\s\p{L}\p{M}\p{N}<>*+_`~\[\]{}()|#:!\\$-]")]
    Punct,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::Backslash => SyntaxKind::BACKSLASH,
            TokenKind::Dollar => SyntaxKind::DOLLAR,
            TokenKind::Text => SyntaxKind::TEXT,
            TokenKind::Punct => SyntaxKind::PUNCT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unmatched input (a lone `\r`, exotic whitespace) is punctuation
            // as far as the grammar is concerned
            Err(()) => SyntaxKind::PUNCT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
