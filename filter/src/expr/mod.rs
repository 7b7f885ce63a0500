//! Filter expression language.
//!
//! # Syntax Overview
//!
//! - **Condition**: `attr op value`, e.g. `model_name ~ 'FW'`
//! - **Attributes**: catalogue name (`model_name`) or literal ID (`0x1006e`)
//! - **Operators**: `=` `!=` `~` `!~` `=~` `^=` `=$` `<` `<=` `>` `>=`
//! - **Values**: `'single'`, `"double"`, or a bare word (`23000e`, `10.1.2.3`)
//! - **Groups**: `and(...)`, `or(...)`, `not(...)` over a comma separated list
//! - **Nesting**: groups nest at most [`MAX_DEPTH`] levels deep
//!
//! ```text
//! and(model_name ~ 'FW', or(device_type = 23000e, condition != "DOWN"))
//! ```

mod builder;
mod grammar;
mod node;
mod operators;
mod parser;

use tracing::debug;

pub use builder::FilterBuilder;
pub use node::{Combinator, FilterNode};
pub use operators::CompareOp;
pub use parser::{normalize, parse, ParseNode, ParseTree, Quote, ValueToken, MAX_DEPTH};

use crate::Result;

/// Parse a filter expression into a semantic filter tree.
pub fn parse_filter(expression: &str) -> Result<FilterNode> {
    let tree = parse(expression)?;
    let filter = FilterBuilder::new().build(&tree)?;
    debug!(expression = %tree.input, nodes = filter.node_count(), "parsed filter expression");
    Ok(filter)
}
