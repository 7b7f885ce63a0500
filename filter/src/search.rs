//! Model search requests.
//!
//! A [`ModelSearch`] bundles everything the model search payload needs:
//! the filter tree, the requested attribute IDs, the throttle size and
//! whether to restrict results to devices. Rendering it to the wire format
//! is left to the caller.

use serde::Serialize;
use tracing::debug;

use crate::attributes::{normalize_attrs, DEFAULT_MODEL_ATTRS};
use crate::config::{Config, DEFAULT_THROTTLE_SIZE};
use crate::expr::{parse_filter, FilterNode};
use crate::Result;

/// Inputs for building a [`ModelSearch`].
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Attributes always requested, by name or literal ID.
    pub base_attrs: Vec<String>,
    /// Additional attributes for this search.
    pub extra_attrs: Vec<String>,
    pub throttle_size: u32,
    pub devices_only: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            base_attrs: DEFAULT_MODEL_ATTRS.iter().map(|attr| attr.name().to_string()).collect(),
            extra_attrs: Vec::new(),
            throttle_size: DEFAULT_THROTTLE_SIZE,
            devices_only: false,
        }
    }
}

impl SearchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_attrs: config.default_attrs.clone(),
            extra_attrs: Vec::new(),
            throttle_size: config.throttle_size,
            devices_only: config.devices_only,
        }
    }

    pub fn with_attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_attrs.extend(attrs.into_iter().map(Into::into));
        self
    }
}

/// A model search ready for payload rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSearch {
    pub filter: FilterNode,
    /// Canonical hex IDs, base attributes first, without duplicates.
    pub requested_attrs: Vec<String>,
    pub throttle_size: u32,
    pub devices_only: bool,
}

impl ModelSearch {
    /// Parse `expression` and combine it with `options`.
    pub fn from_expression(expression: &str, options: &SearchOptions) -> Result<Self> {
        let filter = parse_filter(expression)?;
        Self::new(filter, options)
    }

    pub fn new(filter: FilterNode, options: &SearchOptions) -> Result<Self> {
        let mut requested_attrs: Vec<String> = Vec::new();
        for id in normalize_attrs(&options.base_attrs)?
            .into_iter()
            .chain(normalize_attrs(&options.extra_attrs)?)
        {
            if !requested_attrs.contains(&id) {
                requested_attrs.push(id);
            }
        }

        let throttle_size = if options.throttle_size == 0 {
            DEFAULT_THROTTLE_SIZE
        } else {
            options.throttle_size
        };

        debug!(attrs = requested_attrs.len(), throttle_size, "built model search");
        Ok(Self {
            filter,
            requested_attrs,
            throttle_size,
            devices_only: options.devices_only,
        })
    }
}
