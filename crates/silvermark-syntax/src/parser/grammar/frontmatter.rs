//! Frontmatter: a `---` fenced YAML mapping on the first line of a document.
//!
//! ```text
//! ---
//! type: page
//! tags:
//!   - hello
//! ---
//! ```
//!
//! Recognition requires the opening fence alone on the very first line
//! (exactly `---`, nothing after it), a closing fence line of the same shape,
//! and content that `serde_yaml` reads as a mapping (or as nothing at all).
//! Anything else is left to the block rules, where `---` becomes a thematic
//! break.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{is_line_end, line_len};

pub(super) fn frontmatter(p: &mut Parser<'_, '_>) -> bool {
    let Some(content) = probe(p) else {
        return false;
    };

    let m = p.start();
    p.bump_n(3, SyntaxKind::FRONT_MATTER_MARKER);
    p.bump();

    let code = p.start();
    p.bump_n(content, SyntaxKind::TEXT);
    code.complete(p, SyntaxKind::FRONT_MATTER_CODE);

    p.bump_n(3, SyntaxKind::FRONT_MATTER_MARKER);
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::FRONT_MATTER);
    true
}

/// A fence line is exactly three dashes.
fn is_fence(p: &Parser<'_, '_>, from: usize) -> bool {
    (0..3).all(|i| p.nth(from + i) == SyntaxKind::DASH) && is_line_end(p.nth(from + 3))
}

/// Tokens between the opening fence's newline and the closing fence.
fn probe(p: &Parser<'_, '_>) -> Option<usize> {
    if p.position() != 0 || !is_fence(p, 0) || p.nth(3) != SyntaxKind::NEWLINE {
        return None;
    }

    let content_start = 4;
    let mut line = content_start;
    loop {
        if p.nth(line) == SyntaxKind::EOF {
            return None;
        }
        if is_fence(p, line) {
            break;
        }
        line += line_len(p, line);
        if p.nth(line) == SyntaxKind::EOF {
            return None;
        }
        line += 1;
    }

    let yaml = p.text_between(content_start, line);
    if !is_mapping(&yaml) {
        log::debug!("frontmatter candidate is not a YAML mapping, parsing as blocks");
        return None;
    }
    Some(line - content_start)
}

fn is_mapping(yaml: &str) -> bool {
    if yaml.trim().is_empty() {
        return true;
    }
    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(serde_yaml::Value::Mapping(_) | serde_yaml::Value::Null) => true,
        Ok(other) => {
            log::debug!("frontmatter content is a {other:?}, not a mapping");
            false
        }
        Err(err) => {
            log::debug!("frontmatter content is not valid YAML: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn front_matter_code(input: &str) -> Option<String> {
        let tree = parse(input);
        let fm = tree
            .children()
            .find(|n| n.kind() == SyntaxKind::FRONT_MATTER)?;
        let code = fm
            .children()
            .find(|n| n.kind() == SyntaxKind::FRONT_MATTER_CODE)?;
        Some(code.text().to_string())
    }

    #[test]
    fn mapping_is_frontmatter() {
        let input = "---\ntype: page\ntags:\n- hello\n- world\n---\n# Hello\n";
        assert_eq!(
            front_matter_code(input).as_deref(),
            Some("type: page\ntags:\n- hello\n- world\n")
        );
        assert_eq!(parse(input).text().to_string(), input);
    }

    #[test]
    fn empty_block_is_frontmatter() {
        assert_eq!(front_matter_code("---\n---\nBody\n").as_deref(), Some(""));
    }

    #[rstest]
    #[case("---  \nkey: value\n---\n")]
    #[case("---\nkey: value\n--- \n")]
    #[case("--- yaml\nkey: value\n---\n")]
    fn fences_are_exactly_three_dashes(#[case] input: &str) {
        assert_eq!(front_matter_code(input), None);
        assert_eq!(parse(input).text().to_string(), input);
    }

    #[test]
    fn closing_fence_at_end_of_input() {
        assert_eq!(
            front_matter_code("---\nkey: value\n---").as_deref(),
            Some("key: value\n")
        );
    }

    #[test]
    fn invalid_yaml_is_not_frontmatter() {
        let input = "---\nname: Zef\n# This is a doc\n\nSupper\n";
        let tree = parse(input);
        assert!(
            tree.descendants()
                .all(|n| n.kind() != SyntaxKind::FRONT_MATTER)
        );
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn malformed_yaml_is_not_frontmatter() {
        let input = "---\nkey: [unclosed\n---\nBody\n";
        assert_eq!(front_matter_code(input), None);
        let tree = parse(input);
        assert_eq!(
            tree.children().next().map(|n| n.kind()),
            Some(SyntaxKind::THEMATIC_BREAK)
        );
    }

    #[test]
    fn scalar_content_is_not_frontmatter() {
        assert_eq!(front_matter_code("---\njust text\n---\n"), None);
    }

    #[test]
    fn unclosed_block_is_not_frontmatter() {
        assert_eq!(front_matter_code("---\nkey: value\n"), None);
    }

    #[test]
    fn only_at_document_start() {
        assert_eq!(front_matter_code("\n---\nkey: value\n---\n"), None);
        assert_eq!(front_matter_code("---- \nkey: value\n---\n"), None);
    }
}
