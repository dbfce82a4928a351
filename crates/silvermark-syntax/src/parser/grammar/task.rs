//! Multi-state tasks: `[status]` at the start of a list item's content.
//!
//! The status is free text (`[ ]`, `[x]`, `[TODO]`, `[in progress]`), so a
//! task can carry any workflow state. It must be followed by whitespace or
//! the end of the line; `[due: friday]` with that spacing is a task here,
//! not an attribute.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{inline, is_line_end};

/// Token count of the status between `[` and `]`.
fn status_len(p: &Parser<'_, '_>) -> Option<usize> {
    if !p.at(SyntaxKind::LBRACKET) {
        return None;
    }
    let mut i = 1;
    loop {
        match p.nth(i) {
            SyntaxKind::RBRACKET => break,
            SyntaxKind::LBRACKET => return None,
            kind if is_line_end(kind) => return None,
            _ => i += 1,
        }
    }
    let after = p.nth(i + 1);
    let terminated = after == SyntaxKind::WHITESPACE || is_line_end(after);
    (i > 1 && terminated).then_some(i - 1)
}

pub(super) fn task(p: &mut Parser<'_, '_>) -> bool {
    let Some(status) = status_len(p) else {
        return false;
    };

    let m = p.start();

    let state = p.start();
    p.bump_n(1, SyntaxKind::TASK_MARK);
    p.bump_n(status, SyntaxKind::TEXT);
    p.bump_n(1, SyntaxKind::TASK_MARK);
    state.complete(p, SyntaxKind::TASK_STATE);

    inline::inline_until_newline(p);
    m.complete(p, SyntaxKind::TASK);
    true
}
