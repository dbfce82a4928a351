//! # silvermark-syntax
//!
//! A lossless syntax tree for Markdown notes using [Rowan] + [Logos], following
//! the [rust-analyzer] architecture model, with the extensions note-taking
//! tools rely on: YAML frontmatter, `[[wiki links]]`, `[name: value]`
//! attributes, multi-state `[status]` tasks, `#hashtags`, `{{template}}` and
//! `${lua}` directives, and `{[command links]}`.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What is a Lossless CST?
//!
//! Unlike an Abstract Syntax Tree (AST) which discards formatting details, a
//! Concrete Syntax Tree (CST) preserves **every byte** of the original source.
//! Concatenating the leaves of a parse result gives back the input exactly,
//! for any input, malformed or not:
//!
//! ```
//! use silvermark_syntax::{parse, render_to_text};
//!
//! let input = "Half done [[link and *emphasis\n";
//! assert_eq!(render_to_text(&parse(input)), input);
//! ```
//!
//! Parsing never fails. Syntax that does not complete (an unclosed link, an
//! unknown directive) stays in the tree as plain text.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Logos splits the input into runs of letters and digits, whitespace,
//! newlines, and single punctuation characters. The lexer knows nothing about
//! Markdown; `#` is a `HASH` whether it opens a heading or a tag.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Grammar rules look ahead over the tokens, decide what construct starts
//! here, and only then emit **events** (Start, Token, Finish). A rule that
//! does not match leaves nothing behind, so the next rule can try. Each
//! extension rule is gated on [`ParseOptions`].
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! The sink turns events into a Rowan green tree. The resulting tree is
//! immutable and can be cheaply cloned and shared between threads.
//!
//! ## Module Structure
//!
//! ```text
//! silvermark-syntax/
//! ├── lib.rs           # This file - public API
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── options.rs       # Extension toggles
//! ├── hashtag.rs       # Tag name extraction and rendering
//! ├── tree.rs          # Find, collect, render and dump helpers
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs          # Root document parsing
//!         ├── frontmatter.rs  # Leading `---` YAML block
//!         ├── block.rs        # Headings, lists, quotes, code blocks, paragraphs
//!         ├── inline.rs       # Links, emphasis, code spans
//!         ├── wikilink.rs     # [[page|alias]]
//!         ├── attribute.rs    # [name: value]
//!         ├── task.rs         # [status] list items
//!         ├── hashtag.rs      # #tag and #<tag>
//!         ├── template.rs     # {{directives}}, {{#each}} blocks, ${lua}
//!         └── command_link.rs # {[Command|alias](args)}
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use silvermark_syntax::{collect_nodes_of_type, find_node_of_type, parse, SyntaxKind};
//!
//! let tree = parse("# Plan\n\n- [TODO] call [[Ada]] about #budget\n");
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//!
//! let task = find_node_of_type(&tree, SyntaxKind::TASK).unwrap();
//! let state = find_node_of_type(&task, SyntaxKind::TASK_STATE).unwrap();
//! assert_eq!(state.text().to_string(), "[TODO]");
//!
//! let tags = collect_nodes_of_type(&tree, SyntaxKind::HASHTAG);
//! assert_eq!(tags[0].text().to_string(), "#budget");
//! ```

pub mod hashtag;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod syntax_kind;
pub mod tree;

pub use hashtag::{extract_hashtag, is_tag_char, render_hashtag};
pub use options::{Extension, ParseOptions};
pub use parser::{parse, parse_with_options};
pub use syntax_kind::{
    SilvermarkLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, UnknownKind,
};
pub use tree::{collect_nodes_of_type, debug_tree, find_node_of_type, render_to_text};
