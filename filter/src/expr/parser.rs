//! Raw parse tree for filter expressions.
//!
//! The parse tree mirrors the grammar: groups and simple conditions with
//! their tokens exactly as written. Nothing is resolved here; attribute
//! names and operator symbols are interpreted by [`FilterBuilder`].
//!
//! [`FilterBuilder`]: super::FilterBuilder

use pest::error::{InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest::Parser;

use super::grammar::{describe_rule, FilterGrammar, Rule};
use crate::{Error, Result};

/// Deepest group nesting accepted by [`parse`].
pub const MAX_DEPTH: usize = 128;

/// A successfully parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    /// Normalized input: trimmed, newlines removed.
    pub input: String,
    pub root: ParseNode,
}

/// A node of the raw parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// `keyword(item, item, ...)`
    Group {
        keyword: String,
        items: Vec<ParseNode>,
        /// Offset of the keyword in the normalized input.
        offset: usize,
    },
    /// `attr op value`
    Simple {
        attr: String,
        operator: String,
        value: ValueToken,
        /// Offset of the operator in the normalized input.
        operator_offset: usize,
    },
}

/// How a value token was quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    None,
    Single,
    Double,
}

/// A value token, including its quote characters if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueToken {
    pub quote: Quote,
    pub raw: String,
}

/// Strip newlines and surrounding whitespace.
pub fn normalize(expression: &str) -> String {
    expression.replace(['\r', '\n'], "").trim().to_string()
}

/// Parse an expression into its raw parse tree.
///
/// The entire (normalized) input must match; trailing text is an error.
/// Groups nested deeper than [`MAX_DEPTH`] are rejected before parsing.
pub fn parse(expression: &str) -> Result<ParseTree> {
    let input = normalize(expression);
    check_depth(&input, expression)?;

    let mut pairs = FilterGrammar::parse(Rule::filter, &input)
        .map_err(|e| grammar_error(expression, e))?;

    let filter = next_pair(&mut pairs, expression, 0)?;
    let mut inner = filter.into_inner();
    let root = to_node(next_pair(&mut inner, expression, 0)?, expression)?;

    Ok(ParseTree { input, root })
}

fn to_node(pair: Pair<'_, Rule>, expression: &str) -> Result<ParseNode> {
    let start = pair.as_span().start();

    match pair.as_rule() {
        Rule::group_expr => {
            let mut inner = pair.into_inner().filter(|p| !is_punctuation(p.as_rule()));
            let keyword = next_pair(&mut inner, expression, start)?.as_str().to_string();
            let list = next_pair(&mut inner, expression, start)?;
            let items = list
                .into_inner()
                .filter(|p| !is_punctuation(p.as_rule()))
                .map(|item| to_node(item, expression))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParseNode::Group {
                keyword,
                items,
                offset: start,
            })
        }
        Rule::simple_expr => {
            let mut inner = pair.into_inner();
            let attr = next_pair(&mut inner, expression, start)?.as_str().to_string();
            let operator_pair = next_pair(&mut inner, expression, start)?;
            let operator_offset = operator_pair.as_span().start();
            let operator = operator_pair.as_str().to_string();
            let value_pair = next_pair(&mut inner, expression, start)?;
            let quote = match value_pair.as_rule() {
                Rule::squoted => Quote::Single,
                Rule::dquoted => Quote::Double,
                _ => Quote::None,
            };
            Ok(ParseNode::Simple {
                attr,
                operator,
                value: ValueToken {
                    quote,
                    raw: value_pair.as_str().to_string(),
                },
                operator_offset,
            })
        }
        other => Err(structure_error(
            expression,
            start,
            format!("unexpected {}", describe_rule(&other)),
        )),
    }
}

fn is_punctuation(rule: Rule) -> bool {
    matches!(rule, Rule::lparen | Rule::rparen | Rule::comma)
}

/// Reject nesting deeper than [`MAX_DEPTH`]; parentheses inside quotes don't count.
fn check_depth(input: &str, expression: &str) -> Result<()> {
    let mut depth = 0usize;
    let mut quote = None;

    for (offset, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(structure_error(
                        expression,
                        offset,
                        format!("nesting too deep (more than {MAX_DEPTH} levels)"),
                    ));
                }
            }
            (None, ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn next_pair<'i>(
    pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
    expression: &str,
    offset: usize,
) -> Result<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| structure_error(expression, offset, "incomplete expression".to_string()))
}

fn structure_error(expression: &str, offset: usize, message: String) -> Error {
    Error::Grammar {
        expression: expression.to_string(),
        line: 1,
        column: offset + 1,
        offset,
        message,
    }
}

fn grammar_error(expression: &str, err: pest::error::Error<Rule>) -> Error {
    let err = err.renamed_rules(describe_rule);

    let offset = match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let (line, column) = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };

    Error::Grammar {
        expression: expression.to_string(),
        line,
        column,
        offset,
        message: err.variant.message().into_owned(),
    }
}
