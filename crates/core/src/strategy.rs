use auto_impl::auto_impl;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    context::SimulationContext,
    types::{Address, U256},
};

/// Call parameters keyed by name, in insertion order.
pub type Params = IndexMap<String, ParamValue>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Placeholder to be filled by the caller.
    Null,
    Address(Address),
    Uint(U256),
    Map(Params),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    pub fn as_map(&self) -> Option<&Params> {
        match self {
            ParamValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Builds the parameters of one contract call.
#[auto_impl(&, Box, Arc)]
pub trait Strategy {
    fn name(&self) -> &str;

    /// Returns None when the call should be skipped, e.g. no sender
    /// is available. Never returns a partially filled mapping.
    fn get_params(&self, context: &dyn SimulationContext) -> Option<Params>;
}
