pub mod config;
pub mod emit;
pub mod generator;
pub mod keys;
pub mod naming;
pub mod synth;
