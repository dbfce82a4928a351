//! SyntaxKind enum for all tokens and nodes in the CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

macro_rules! syntax_kinds {
    (
        tokens { $($(#[$tdoc:meta])* $tok:ident => $tname:literal,)* }
        nodes { $($(#[$ndoc:meta])* $node:ident => $nname:literal,)* }
    ) => {
        /// All syntax kinds for the CST.
        ///
        /// This enum represents both tokens (lexer output, plus the composite
        /// leaves the parser glues together) and interior nodes. The `repr(u16)`
        /// ensures efficient storage in rowan's green tree.
        ///
        /// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
        #[repr(u16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(non_camel_case_types)]
        pub enum SyntaxKind {
            $($(#[$tdoc])* $tok,)*
            $($(#[$ndoc])* $node,)*
        }

        impl SyntaxKind {
            /// Every kind, indexed by its `u16` representation.
            pub const ALL: &'static [SyntaxKind] = &[
                $(SyntaxKind::$tok,)*
                $(SyntaxKind::$node,)*
            ];

            /// Stable display name, e.g. `WikiLinkPage`.
            ///
            /// These are the type identifiers external collaborators use when
            /// they do not want to depend on the enum itself.
            pub fn name(self) -> &'static str {
                match self {
                    $(SyntaxKind::$tok => $tname,)*
                    $(SyntaxKind::$node => $nname,)*
                }
            }

            /// Enum variant name, e.g. `WIKILINK_PAGE`.
            fn variant_name(self) -> &'static str {
                match self {
                    $(SyntaxKind::$tok => stringify!($tok),)*
                    $(SyntaxKind::$node => stringify!($node),)*
                }
            }
        }
    };
}

syntax_kinds! {
    tokens {
        // === Raw tokens (lexer output) ===
        /// Horizontal whitespace (spaces, tabs)
        WHITESPACE => "Whitespace",
        /// Line ending
        NEWLINE => "Newline",
        /// Run of letters, marks and numbers; also used for merged verbatim content
        TEXT => "Text",
        /// Any other single punctuation or symbol character
        PUNCT => "Punct",
        /// `>` for blockquotes and autolinks
        GT => "Gt",
        /// `<` for autolinks and escaped hashtags
        LT => "Lt",
        /// `-` for lists, thematic breaks and frontmatter fences
        DASH => "Dash",
        /// `*` for lists, emphasis and thematic breaks
        STAR => "Star",
        /// `+` for lists
        PLUS => "Plus",
        /// `_` for emphasis
        UNDERSCORE => "Underscore",
        /// Single backtick for code spans and fences
        BACKTICK => "Backtick",
        /// `~` for fenced code and strikethrough
        TILDE => "Tilde",
        /// `[`
        LBRACKET => "LBracket",
        /// `]`
        RBRACKET => "RBracket",
        /// `{`
        LBRACE => "LBrace",
        /// `}`
        RBRACE => "RBrace",
        /// `(`
        LPAREN => "LParen",
        /// `)`
        RPAREN => "RParen",
        /// `|` for aliases
        PIPE => "Pipe",
        /// `#` for headings and hashtags
        HASH => "Hash",
        /// `:` for attributes
        COLON => "Colon",
        /// `!` for images
        BANG => "Bang",
        /// `\` for escapes
        BACKSLASH => "Backslash",
        /// `$` for Lua directives
        DOLLAR => "Dollar",

        // === Composite leaves (several raw tokens glued by the parser) ===
        /// Backslash escape such as `\#`
        ESCAPE => "Escape",
        /// Run of `#` opening a heading
        HEADING_MARK => "HeaderMark",
        /// `>` opening a quote line
        QUOTE_MARK => "QuoteMark",
        /// Bullet or ordered list marker
        LIST_MARK => "ListMark",
        /// Backtick run of a code span, or a code fence
        CODE_MARK => "CodeMark",
        /// Info string after an opening code fence
        CODE_INFO => "CodeInfo",
        /// `*`, `**`, `_` or `__`
        EMPHASIS_MARK => "EmphasisMark",
        /// `~~`
        STRIKETHROUGH_MARK => "StrikethroughMark",
        /// `[`, `]`, `(`, `)`, `![`, `<` and `>` around links
        LINK_MARK => "LinkMark",
        /// `---` fencing the frontmatter
        FRONT_MATTER_MARKER => "FrontMatterMarker",
        /// `[[`, `|` and `]]`
        WIKILINK_MARK => "WikiLinkMark",
        /// `[` and `]` around an attribute
        ATTRIBUTE_MARK => "AttributeMark",
        /// `:` or `::`
        ATTRIBUTE_COLON => "AttributeColon",
        /// `[` and `]` around a task status
        TASK_MARK => "TaskMark",
        /// `{[`, `|`, `]}`, `(` and `)`
        COMMAND_LINK_MARK => "CommandLinkMark",
        /// `{{` and `}}`
        TEMPLATE_DIRECTIVE_MARK => "TemplateDirectiveMark",
        /// `#each`, `#if`, `#let`, `else`, `/each`, ...
        TEMPLATE_KEYWORD => "TemplateKeyword",
        /// `${` and `}`
        LUA_DIRECTIVE_MARK => "LuaDirectiveMark",
        /// End of file marker
        EOF => "EOF",
    }
    nodes {
        // === Composite Nodes (parser output) ===
        /// Root document node
        ROOT => "Document",
        /// Fenced key/value block at the very start of the document
        FRONT_MATTER => "FrontMatter",
        /// Opaque content between the frontmatter fences
        FRONT_MATTER_CODE => "FrontMatterCode",
        /// Paragraph block
        PARAGRAPH => "Paragraph",
        /// ATX heading (`# ...`)
        HEADING => "Heading",
        /// Blockquote container (`> ...`)
        BLOCK_QUOTE => "Blockquote",
        /// Run of consecutive list items
        LIST => "List",
        /// Individual list item
        LIST_ITEM => "ListItem",
        /// Thematic break (`---`, `***`, etc.)
        THEMATIC_BREAK => "HorizontalRule",
        /// Fenced code block
        FENCED_CODE => "FencedCode",
        /// List item content starting with a status checkbox
        TASK => "Task",
        /// `[status]` checkbox of a task
        TASK_STATE => "TaskState",
        /// Wikilink (`[[target]]` or `[[target|alias]]`)
        WIKILINK => "WikiLink",
        /// Target page of a wikilink
        WIKILINK_PAGE => "WikiLinkPage",
        /// Display alias of a wikilink
        WIKILINK_ALIAS => "WikiLinkAlias",
        /// Inline attribute (`[name: value]`)
        ATTRIBUTE => "Attribute",
        /// Attribute name
        ATTRIBUTE_NAME => "AttributeName",
        /// Attribute value
        ATTRIBUTE_VALUE => "AttributeValue",
        /// Standard link `[text](url)`
        LINK => "Link",
        /// Image `![alt](url)`
        IMAGE => "Image",
        /// Autolink `<scheme:...>`
        AUTOLINK => "Autolink",
        /// Destination of a link, image or autolink
        URL => "URL",
        /// Inline code span
        CODE_SPAN => "InlineCode",
        /// Emphasis `*text*`
        EMPHASIS => "Emphasis",
        /// Strong emphasis `**text**`
        STRONG => "StrongEmphasis",
        /// Strikethrough `~~text~~`
        STRIKETHROUGH => "Strikethrough",
        /// Hashtag, bare (`#tag`) or escaped (`#<tag>`)
        HASHTAG => "Hashtag",
        /// Command link `{[Name|Alias]}(args)`
        COMMAND_LINK => "CommandLink",
        /// Command name
        COMMAND_LINK_NAME => "CommandLinkName",
        /// Command alias
        COMMAND_LINK_ALIAS => "CommandLinkAlias",
        /// Raw call arguments
        COMMAND_LINK_ARGS => "CommandLinkArgs",
        /// A single `{{ ... }}` directive
        TEMPLATE_DIRECTIVE => "TemplateDirective",
        /// Raw expression inside a directive
        TEMPLATE_EXPRESSION => "TemplateExpression",
        /// `{{#each}}`/`{{#if}}`/`{{#let}}` block with its bodies
        TEMPLATE_BLOCK => "TemplateBlock",
        /// Content between block directives
        TEMPLATE_BODY => "TemplateBody",
        /// Lua directive `${expression}`
        LUA_DIRECTIVE => "LuaDirective",
        /// Raw expression inside a Lua directive
        LUA_EXPRESSION => "LuaExpression",
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a type identifier does not name any [`SyntaxKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown syntax kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for SyntaxKind {
    type Err = UnknownKind;

    /// Looks a kind up by its display name (`"WikiLink"`) or its variant
    /// name (`"WIKILINK"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s || kind.variant_name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SilvermarkLang {}

impl rowan::Language for SilvermarkLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::ALL[raw.0 as usize]
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<SilvermarkLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<SilvermarkLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<SilvermarkLang>;
