//! Parser options: which syntax extensions are layered on top of Markdown.
//!
//! Options are plain data copied into each parse; nothing here is global.
//! A disabled extension's syntax is simply parsed as ordinary Markdown text.

use serde::{Deserialize, Serialize};

/// A syntax extension that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    FrontMatter,
    WikiLinks,
    Attributes,
    Tasks,
    Hashtags,
    Directives,
    LuaDirectives,
    CommandLinks,
}

/// Extension toggles for [`parse_with_options`](crate::parse_with_options).
///
/// Every extension is enabled by default; missing keys in a config file
/// keep their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub frontmatter: bool,
    pub wiki_links: bool,
    pub attributes: bool,
    pub tasks: bool,
    pub hashtags: bool,
    pub directives: bool,
    pub lua_directives: bool,
    pub command_links: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl ParseOptions {
    /// Every extension enabled.
    pub const fn all() -> Self {
        Self {
            frontmatter: true,
            wiki_links: true,
            attributes: true,
            tasks: true,
            hashtags: true,
            directives: true,
            lua_directives: true,
            command_links: true,
        }
    }

    /// Plain Markdown, no extensions.
    pub const fn none() -> Self {
        Self {
            frontmatter: false,
            wiki_links: false,
            attributes: false,
            tasks: false,
            hashtags: false,
            directives: false,
            lua_directives: false,
            command_links: false,
        }
    }

    pub fn allows(&self, extension: Extension) -> bool {
        match extension {
            Extension::FrontMatter => self.frontmatter,
            Extension::WikiLinks => self.wiki_links,
            Extension::Attributes => self.attributes,
            Extension::Tasks => self.tasks,
            Extension::Hashtags => self.hashtags,
            Extension::Directives => self.directives,
            Extension::LuaDirectives => self.lua_directives,
            Extension::CommandLinks => self.command_links,
        }
    }

    /// Returns a copy with `extension` switched to `enabled`.
    pub fn with(mut self, extension: Extension, enabled: bool) -> Self {
        let flag = match extension {
            Extension::FrontMatter => &mut self.frontmatter,
            Extension::WikiLinks => &mut self.wiki_links,
            Extension::Attributes => &mut self.attributes,
            Extension::Tasks => &mut self.tasks,
            Extension::Hashtags => &mut self.hashtags,
            Extension::Directives => &mut self.directives,
            Extension::LuaDirectives => &mut self.lua_directives,
            Extension::CommandLinks => &mut self.command_links,
        };
        *flag = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_everything() {
        let options = ParseOptions::default();
        assert!(options.allows(Extension::Hashtags));
        assert!(options.allows(Extension::CommandLinks));
        assert_eq!(options, ParseOptions::all());
    }

    #[test]
    fn with_toggles_a_single_extension() {
        let options = ParseOptions::all().with(Extension::Directives, false);
        assert!(!options.allows(Extension::Directives));
        assert!(options.allows(Extension::LuaDirectives));

        let options = ParseOptions::none().with(Extension::Tasks, true);
        assert!(options.allows(Extension::Tasks));
        assert!(!options.allows(Extension::WikiLinks));
    }
}
