//! Replays parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            cursor: 0,
            events,
        }
    }

    pub fn finish(mut self) -> SyntaxNode {
        let mut chain = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    // Parents were pushed later than their children; taking
                    // them out here keeps them from being opened twice.
                    chain.push(kind);
                    let mut next = forward_parent;
                    while let Some(parent) = next {
                        match std::mem::replace(&mut self.events[parent], Event::Placeholder) {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                chain.push(kind);
                                next = forward_parent;
                            }
                            _ => unreachable!("forward parent must be a Start event"),
                        }
                    }
                    for kind in chain.drain(..).rev() {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind, n_raw_tokens } => self.leaf(kind, n_raw_tokens as usize),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    /// Glue the next `n` raw tokens into a single leaf of `kind`.
    fn leaf(&mut self, kind: SyntaxKind, n: usize) {
        let raw = &self.tokens[self.cursor..self.cursor + n];
        self.cursor += n;
        match raw {
            [single] => self.builder.token(kind.into(), single.text),
            _ => {
                let text: String = raw.iter().map(|t| t.text).collect();
                self.builder.token(kind.into(), &text);
            }
        }
    }
}
