//! Boolean query parsing and evaluation against a loaded index.

pub mod evaluator;
pub mod parser;

use std::collections::HashSet;

use crate::doc::DocId;
use crate::index::Index;
use crate::text::TextPipeline;

/// Parses and evaluates `query` against `index` in one call.
pub fn search(query: &str, index: &Index, pipeline: &TextPipeline) -> HashSet<DocId> {
    let tokens = parser::tokenize(query, pipeline);
    let postfix = parser::to_postfix(tokens);
    evaluator::QueryEvaluator::new(index).evaluate(&postfix)
}
