//! # Parser Events
//!
//! Grammar rules never touch Rowan. They push a flat list of events, and the
//! [`Sink`](super::sink::Sink) replays that list into a green tree:
//!
//! ```text
//! Start(WIKILINK)
//!   Token(WIKILINK_MARK, 2)   ← `[` `[` glued into one `[[` leaf
//!   Start(WIKILINK_PAGE)
//!     Token(TEXT, 3)          ← `wiki`, ` `, `link` glued into one leaf
//!   Finish
//!   Token(WIKILINK_MARK, 2)
//! Finish
//! ```
//!
//! A token event names how many raw lexer tokens it covers. Most extension
//! syntax is made of single-character lexer tokens, and gluing them keeps
//! the tree down to one leaf per meaningful piece: a whole hashtag, a whole
//! page name, a whole frontmatter body.
//!
//! ## Forward Parent Links
//!
//! `[status: done](url)` is first parsed as an ATTRIBUTE, and only once the
//! `(url)` tail is seen does it become the label of a LINK. Rather than
//! moving events around, the ATTRIBUTE's `Start` gets a `forward_parent`
//! index pointing at the LINK's `Start`; the Sink opens the chain outermost
//! first.

use crate::syntax_kind::SyntaxKind;

/// One step of tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a composite node.
    ///
    /// `forward_parent`, when set, is the index of another `Start` that must
    /// wrap this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Append one leaf built from the next `n_raw_tokens` lexer tokens.
    ///
    /// The leaf's kind may differ from the lexer kinds it covers: three
    /// `DASH` tokens become one `FRONT_MATTER_MARKER`.
    Token { kind: SyntaxKind, n_raw_tokens: u32 },

    /// Close the innermost open node.
    Finish,

    /// Reserved by `Parser::start()` until the marker completes. The Sink
    /// also leaves one behind for each forward parent it has opened.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    /// A leaf for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Self::glued(kind, 1)
    }

    /// A leaf covering `n` raw tokens.
    pub fn glued(kind: SyntaxKind, n: usize) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: n as u32,
        }
    }
}
