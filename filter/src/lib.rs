//! Spectrum filter expressions.
//!
//! Parses the filter micro-language used for Spectrum model searches into a
//! nested condition tree, ready to be rendered into a search payload.
//!
//! ```text
//! and(model_name ~ 'FW', or(device_type = 23000e, condition != "DOWN"))
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod expr;
pub mod search;

pub use attributes::{
    id_str_to_name, id_to_name, name_to_id, normalize_attrs, AttrId, AttributeResolver, SpectrumAttribute,
    SpectrumCatalogue, DEFAULT_MODEL_ATTRS,
};
pub use config::Config;
pub use error::{Error, Result};
pub use expr::{
    parse, parse_filter, Combinator, CompareOp, FilterBuilder, FilterNode, ParseNode, ParseTree, MAX_DEPTH,
};
pub use search::{ModelSearch, SearchOptions};
