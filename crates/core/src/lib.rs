pub mod abi;
pub mod context;
pub mod error;
pub mod strategy;
pub mod types;
