//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming a token stream
//! into a syntax tree using the **event-based** architecture from rust-analyzer.
//!
//! ## Why Event-Based Parsing?
//!
//! Traditional recursive descent parsers build the tree directly during parsing.
//! This has problems:
//!
//! 1. **Deep nesting can overflow the stack** (Markdown can nest arbitrarily)
//! 2. **Backtracking is expensive** when you've already built tree nodes
//! 3. **Error recovery is tricky** when partially-built nodes exist
//!
//! Instead, we emit a flat list of **events** ([`Event`]) that describe the
//! tree structure. The [`Sink`] then builds the actual Rowan tree from events.
//!
//! ## The Event Model
//!
//! Parsing produces events like:
//! ```text
//! Start(HEADING)
//! Token(HEADING_MARK)
//! Token(WHITESPACE)
//! Token(TEXT)
//! Token(NEWLINE)
//! Finish
//! ```
//!
//! The Sink processes these in order, calling `start_node()` for Start,
//! `token()` for Token, and `finish_node()` for Finish.
//!
//! ## The Marker System
//!
//! The key innovation is the [`Marker`] type. When you call `parser.start()`,
//! you get a `Marker`, and it **must** be completed with
//! `marker.complete(parser, KIND)`, which emits Start+Finish. Dropping a
//! marker without completing it **panics**, so a half-built node never
//! reaches the Sink.
//!
//! ```ignore
//! let m = parser.start();           // Get a marker
//! parser.bump();                    // Consume some tokens
//! m.complete(parser, SyntaxKind::PARAGRAPH);  // MUST complete
//! ```
//!
//! ## Forward Parent Links
//!
//! Sometimes we need to wrap an already-parsed node in a new parent. The
//! `CompletedMarker::precede()` method handles this by creating a **forward
//! parent link** that the Sink resolves when building the tree. We use it for
//! `[name: value](url)`: the bracket is parsed as an ATTRIBUTE first, and only
//! then wrapped in a LINK once the `(url)` tail is seen.
//!
//! ## Probe, Then Emit
//!
//! Extension syntax must degrade to plain text when it is malformed, and there
//! is no way to take back events once they are pushed. Grammar rules
//! therefore measure a construct with pure lookahead (`nth()`, `nth_text()`)
//! first and only start a marker once the whole construct is known to match.
//!
//! ## Module Structure
//!
//! - [`event`] - The Event enum
//! - [`sink`] - Converts events to Rowan tree
//! - `grammar` - Grammar rules (root, frontmatter, blocks, inline, extensions)
//!
//! ## Public API
//!
//! The main entry point is [`parse`]:
//!
//! ```
//! use silvermark_syntax::parse;
//!
//! let tree = parse("# Hello\n");
//! println!("{:#?}", tree);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::options::{Extension, ParseOptions};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `nth_text()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `bump_n()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`
/// - Scope a sub-parse: `limited()` hides every token past a boundary, which
///   is how emphasis, link text and template bodies parse their content
///   without running past their closing delimiter.
///
/// Template block pairs are worked out once per parse, after frontmatter, and
/// looked up by the template rules from then on.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    limit: usize,
    options: ParseOptions,
    events: Vec<Event>,
    directives: grammar::DirectivePairs,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            limit: tokens.len(),
            options,
            events: Vec::new(),
            directives: grammar::DirectivePairs::default(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Whether the given extension is switched on for this parse.
    pub fn allows(&self, extension: Extension) -> bool {
        self.options.allows(extension)
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        if self.pos + n >= self.limit {
            return SyntaxKind::EOF;
        }
        self.tokens[self.pos + n].kind
    }

    /// Text of the token n positions ahead, or `""` past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        if self.pos + n >= self.limit {
            return "";
        }
        self.tokens[self.pos + n].text
    }

    /// Concatenated text of the tokens from offset `from` up to (excluding) `to`.
    pub fn text_between(&self, from: usize, to: usize) -> String {
        (from..to).map(|i| self.nth_text(i)).collect()
    }

    /// Absolute index of the current token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Kind of the token just before the current one, ignoring any limit.
    pub fn prev(&self) -> SyntaxKind {
        match self.pos.checked_sub(1) {
            Some(i) => self.tokens[i].kind,
            None => SyntaxKind::EOF,
        }
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.limit
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as a single composite token.
    ///
    /// `n == 0` is a no-op, so empty captures never produce empty leaves.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.limit {
            self.events.push(Event::glued(kind, n));
            self.pos += n;
        }
    }

    /// Consume n tokens one by one, keeping their own kinds.
    pub fn bump_each(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    /// Check if we're at the start of a line (after newline or at start).
    pub fn at_line_start(&self) -> bool {
        matches!(self.prev(), SyntaxKind::NEWLINE | SyntaxKind::EOF)
    }

    /// Remaining tokens count.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.pos)
    }

    /// Run `f` with everything from `n` tokens ahead hidden.
    ///
    /// Limits only ever shrink: a nested call cannot see past its parent's
    /// boundary.
    pub fn limited<R>(&mut self, n: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.limit;
        self.limit = outer.min(self.pos + n);
        let result = f(self);
        self.limit = outer;
        result
    }
}

/// A marker for a node being constructed.
///
/// This is the heart of the type-safe tree building system. When you call
/// `parser.start()`, a `Placeholder` event is pushed and you get a `Marker`
/// pointing to it.
///
/// ## The Must-Use Contract
///
/// The `#[must_use]` attribute and the `Drop` impl together enforce that
/// every marker is **completed** via `marker.complete(parser, KIND)`, which
/// converts the placeholder to a `Start` event and pushes a `Finish` event.
/// Dropping a marker otherwise **panics**.
///
/// ## Example
///
/// ```ignore
/// fn paragraph(p: &mut Parser) {
///     let m = p.start();  // Reserve a spot for the node
///
///     // Parse content...
///     while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
///         p.bump();
///     }
///
///     m.complete(p, SyntaxKind::PARAGRAPH);  // Finalize the node
/// }
/// ```
#[must_use = "Markers must be completed, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    ///
    /// This:
    /// 1. Replaces the `Placeholder` at our position with `Start { kind, ... }`
    /// 2. Pushes a `Finish` event
    /// 3. Returns a `CompletedMarker` for potential `precede()` calls
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be completed");
        }
    }
}

/// A marker for a node that has been completed.
///
/// The only thing you can do with a `CompletedMarker` is call `precede()`
/// to wrap the completed node in a new parent. This is useful for handling
/// left-recursion or wrapping expressions after the fact.
///
/// ## The Precede Pattern
///
/// Sometimes you parse something and only later realize it needs a wrapper:
///
/// ```ignore
/// // We parsed "[due: friday]" as an attribute
/// let attribute = attribute(p);  // Returns CompletedMarker
///
/// // Oh, there's a "(url)" - the bracket is also a link label!
/// if p.at(SyntaxKind::LPAREN) {
///     let link = attribute.precede(p);  // Start a new node BEFORE "["
///     link_destination(p);  // parse "(url)"
///     link.complete(p, SyntaxKind::LINK);
/// }
/// // Result: LINK containing [ATTRIBUTE, "(", URL, ")"]
/// ```
///
/// This works by setting a `forward_parent` link that the Sink resolves.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    ///
    /// Returns a new `Marker` that, when completed, will become the parent
    /// of the node at `self.pos`.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        // Update the original Start event to point to this new parent
        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse source text into a syntax tree with every extension enabled.
pub fn parse(source: &str) -> SyntaxNode {
    parse_with_options(source, &ParseOptions::all())
}

/// Parse source text into a syntax tree with the given extensions.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> SyntaxNode {
    log::trace!("parsing {} bytes", source.len());
    let tokens = lex(source);
    let parser = Parser::new(&tokens, *options);
    parser.parse()
}
