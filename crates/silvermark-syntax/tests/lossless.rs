//! Every input parses, and the tree's leaves give back exactly that input.

use proptest::prelude::*;
use silvermark_syntax::{ParseOptions, SyntaxKind, parse, parse_with_options, render_to_text};

/// Fragments that open, close or half-open the syntax the parser knows about.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "---", "\n", "\r\n", " ", "\t", "#", "##", "# ", "[[", "]]", "|", "[", "]", "(", ")", "{{",
        "}}", "{[", "]}", "${", "}", "#each", "#if", "/if", "/each", "else", "#let @x = 1", ":",
        "::", "*", "**", "_", "~~", "`", "```", "~~~", ">", "- ", "1. ", "\\", "!", "<", ">",
        "word", "żółć", "井号", "x", "TODO", "'", "-", "/", "@", "http://a.b",
    ])
}

fn markup() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..64).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn markup_round_trips(input in markup()) {
        let tree = parse(&input);
        prop_assert_eq!(tree.kind(), SyntaxKind::ROOT);
        prop_assert_eq!(render_to_text(&tree), input.clone());
        prop_assert_eq!(
            render_to_text(&parse_with_options(&input, &ParseOptions::none())),
            input
        );
    }

    #[test]
    fn arbitrary_text_round_trips(input in any::<String>()) {
        prop_assert_eq!(render_to_text(&parse(&input)), input);
    }

    #[test]
    fn parse_is_deterministic(input in markup()) {
        let first = parse(&input);
        let second = parse(&input);
        prop_assert_eq!(first.green(), second.green());
    }
}
