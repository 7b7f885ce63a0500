//! Builds the semantic filter tree from a parse tree.

use super::parser::{ParseNode, ParseTree, Quote, ValueToken};
use super::{Combinator, CompareOp, FilterNode};
use crate::attributes::{AttributeResolver, SpectrumCatalogue};
use crate::{Error, Result};

/// Turns a [`ParseTree`] into a [`FilterNode`] tree.
///
/// Holds nothing but the attribute resolver, so one builder can be reused
/// for any number of trees.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder<R = SpectrumCatalogue> {
    resolver: R,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: AttributeResolver> FilterBuilder<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn build(&self, tree: &ParseTree) -> Result<FilterNode> {
        self.visit(&tree.root, &tree.input)
    }

    fn visit(&self, node: &ParseNode, input: &str) -> Result<FilterNode> {
        match node {
            ParseNode::Group {
                keyword,
                items,
                offset,
            } => {
                let combinator = Combinator::from_keyword(keyword)
                    .ok_or_else(|| unsupported(input, *offset, "group keyword", keyword))?;
                let children = items
                    .iter()
                    .map(|item| self.visit(item, input))
                    .collect::<Result<Vec<_>>>()?;
                Ok(FilterNode::group(combinator, children))
            }
            ParseNode::Simple {
                attr,
                operator,
                value,
                operator_offset,
            } => {
                let attribute_id = self.resolver.name_to_id(attr)?;
                let op = CompareOp::from_symbol(operator)
                    .ok_or_else(|| unsupported(input, *operator_offset, "operator", operator))?;
                Ok(FilterNode::condition(attribute_id.to_string(), op, unquote(value)))
            }
        }
    }
}

/// Strip one pair of matching quotes; bare words pass through untouched.
fn unquote(token: &ValueToken) -> &str {
    let quote = match token.quote {
        Quote::None => return &token.raw,
        Quote::Single => '\'',
        Quote::Double => '"',
    };
    token
        .raw
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .unwrap_or(&token.raw)
}

fn unsupported(input: &str, offset: usize, what: &str, token: &str) -> Error {
    Error::Grammar {
        expression: input.to_string(),
        line: 1,
        column: offset + 1,
        offset,
        message: format!("unsupported {what} '{token}'"),
    }
}
