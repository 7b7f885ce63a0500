//! Comparison operators and their canonical search names.

use serde::{Serialize, Serializer};

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=` equals, ignoring case
    Eq,
    /// `!=` does not equal
    NotEq,
    /// `~` contains substring
    Contains,
    /// `!~` does not contain substring
    NotContains,
    /// `=~` matches regular expression
    Regex,
    /// `^=` starts with
    Prefix,
    /// `=$` ends with
    Suffix,
    /// `<` less than
    Lt,
    /// `<=` less or equal
    Lte,
    /// `>` greater than
    Gt,
    /// `>=` greater or equal
    Gte,
}

impl CompareOp {
    pub const ALL: [CompareOp; 11] = [
        CompareOp::Eq,
        CompareOp::NotEq,
        CompareOp::Contains,
        CompareOp::NotContains,
        CompareOp::Regex,
        CompareOp::Prefix,
        CompareOp::Suffix,
        CompareOp::Lt,
        CompareOp::Lte,
        CompareOp::Gt,
        CompareOp::Gte,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "=" => CompareOp::Eq,
            "!=" => CompareOp::NotEq,
            "~" => CompareOp::Contains,
            "!~" => CompareOp::NotContains,
            "=~" => CompareOp::Regex,
            "^=" => CompareOp::Prefix,
            "=$" => CompareOp::Suffix,
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Lte,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Gte,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Contains => "~",
            CompareOp::NotContains => "!~",
            CompareOp::Regex => "=~",
            CompareOp::Prefix => "^=",
            CompareOp::Suffix => "=$",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }

    /// Operator name as understood by the Spectrum model search.
    pub fn canonical_name(self) -> &'static str {
        match self {
            CompareOp::Eq => "equals-ignore-case",
            CompareOp::NotEq => "does-not-equal",
            CompareOp::Contains => "has-substring-ignore-case",
            CompareOp::NotContains => "does-not-have-substring-ignore-case",
            CompareOp::Regex => "has-pcre-ignore-case",
            CompareOp::Prefix => "has-prefix-ignore-case",
            CompareOp::Suffix => "has-suffix-ignore-case",
            CompareOp::Lt => "less-than",
            CompareOp::Lte => "less-than-or-equals",
            CompareOp::Gt => "greater-than",
            CompareOp::Gte => "greater-than-or-equals",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Serialize for CompareOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical_name())
    }
}
