//! Deterministic instance generation and correctness-invariant checkers for
//! benchmarking and property-testing `pcst-core`.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratedInstance, GeneratorConfig, SizeTier, generate_instance};
