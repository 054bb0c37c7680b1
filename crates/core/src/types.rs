/// Types shared across the library.
/// Chain primitives are re-exported from alloy.
pub type Address = alloy_primitives::Address;
pub type U256 = alloy_primitives::U256;
