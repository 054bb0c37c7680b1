use auto_impl::auto_impl;
use mockall::automock;

use crate::types::Address;

/// What a running simulation exposes to strategies.
#[auto_impl(&, Box, Arc)]
#[automock]
pub trait SimulationContext {
    /// Returns the account that should send the next call.
    /// None if the acting agent has no eligible account.
    fn get_sender(&self) -> Option<Address>;
}
