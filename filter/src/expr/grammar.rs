//! PEG grammar for filter expressions (see `filter.pest`).

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "expr/filter.pest"]
pub(crate) struct FilterGrammar;

/// Human-readable rule names for error messages.
pub(crate) fn describe_rule(rule: &Rule) -> String {
    let name = match rule {
        Rule::EOI => "end of expression",
        Rule::group_expr => "group expression",
        Rule::group_list => "group list",
        Rule::simple_expr => "condition",
        Rule::attr => "attribute",
        Rule::group_tok => "'and', 'or' or 'not'",
        Rule::operator => "operator",
        Rule::lparen => "'('",
        Rule::rparen => "')'",
        Rule::comma => "','",
        Rule::squoted => "single-quoted value",
        Rule::dquoted => "double-quoted value",
        Rule::bare_word => "value",
        other => return format!("{:?}", other),
    };
    name.to_string()
}
