//! Postfix evaluation of a boolean query against a loaded index.
//!
//! Evaluation runs a stack of posting sets over the postfix token stream.
//! The universe used for `NOT` is computed once per query and cached in
//! this evaluator's context, since recomputing it on every `NOT` would
//! rescan the whole index.

use std::collections::HashSet;

use crate::doc::DocId;
use crate::index::Index;
use crate::posting::PostingSet;
use crate::query::parser::Token;

pub struct QueryEvaluator<'a> {
    index: &'a Index,
    universe: Option<HashSet<DocId>>,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self {
            index,
            universe: None,
        }
    }

    fn universe(&mut self) -> &HashSet<DocId> {
        self.universe.get_or_insert_with(|| self.index.universe())
    }

    /// Evaluates a postfix token stream, tolerating malformed input: unknown
    /// terms contribute the empty set, and a stack left empty or with more
    /// than one value at the end yields the empty set or the top value
    /// respectively, never an error.
    pub fn evaluate(&mut self, postfix: &[Token]) -> HashSet<DocId> {
        let mut stack: Vec<HashSet<DocId>> = Vec::new();

        for token in postfix {
            match token {
                Token::Term(term) => {
                    let set = self
                        .index
                        .get(term)
                        .map(PostingSet::to_set)
                        .unwrap_or_default();
                    stack.push(set);
                }
                Token::And => {
                    let b = stack.pop().unwrap_or_default();
                    let a = stack.pop().unwrap_or_default();
                    stack.push(a.intersection(&b).cloned().collect());
                }
                Token::Or => {
                    let b = stack.pop().unwrap_or_default();
                    let a = stack.pop().unwrap_or_default();
                    stack.push(a.union(&b).cloned().collect());
                }
                Token::Not => {
                    let operand = stack.pop().unwrap_or_default();
                    let universe = self.universe().clone();
                    stack.push(universe.difference(&operand).cloned().collect());
                }
                Token::LParen | Token::RParen => {}
            }
        }

        stack.pop().unwrap_or_default()
    }
}
