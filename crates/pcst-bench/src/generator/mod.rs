//! Random PCSF/PCST instance generator.
//!
//! Produces connected graphs with realistic prize/cost spread for
//! benchmarking and property-based testing of `pcst-core::solve`.

pub mod topology;

use rand::SeedableRng;
use rand::rngs::StdRng;

use topology::build_instance;

/// Configuration for the random instance generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of nodes.
    pub num_nodes: usize,
    /// Extra non-tree edges per node, added on top of a spanning tree to
    /// keep the graph connected while still exercising cycles (0.0-1.0).
    pub mesh_density: f64,
    /// Upper bound (exclusive) on a node's prize, drawn uniformly from
    /// `[0, prize_max)`.
    pub prize_max: f64,
    /// Upper bound (exclusive) on an edge's cost, drawn uniformly from
    /// `[0, cost_max)`.
    pub cost_max: f64,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~50 nodes.
    Small,
    /// ~300 nodes.
    Medium,
    /// ~1500 nodes.
    Large,
    /// ~6000 nodes.
    XLarge,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    #[must_use]
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_nodes: 50,
                mesh_density: 0.2,
                prize_max: 20.0,
                cost_max: 10.0,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_nodes: 300,
                mesh_density: 0.15,
                prize_max: 50.0,
                cost_max: 15.0,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_nodes: 1500,
                mesh_density: 0.1,
                prize_max: 100.0,
                cost_max: 20.0,
            },
            SizeTier::XLarge => GeneratorConfig {
                seed,
                num_nodes: 6000,
                mesh_density: 0.08,
                prize_max: 200.0,
                cost_max: 25.0,
            },
        }
    }
}

/// A generated instance, owning the buffers a `pcst_core::SolveInput` would
/// otherwise only borrow.
#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    pub prizes: Vec<f64>,
    pub edges: Vec<(usize, usize)>,
    pub costs: Vec<f64>,
}

/// Generates a connected `GeneratedInstance` from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`.
#[must_use]
pub fn generate_instance(config: &GeneratorConfig) -> GeneratedInstance {
    let mut rng = StdRng::seed_from_u64(config.seed);
    build_instance(config, &mut rng)
}
