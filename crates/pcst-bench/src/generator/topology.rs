//! Random spanning tree plus mesh overlay, with uniform prize/cost draws.

use rand::Rng;
use rand::rngs::StdRng;

use super::{GeneratedInstance, GeneratorConfig};

/// Builds a connected `GeneratedInstance`: a random recursive spanning tree
/// (every node attaches to a uniformly chosen earlier node, guaranteeing
/// connectivity) overlaid with `mesh_density * num_nodes` extra random
/// edges for cycles.
pub fn build_instance(config: &GeneratorConfig, rng: &mut StdRng) -> GeneratedInstance {
    let n = config.num_nodes.max(1);

    let prizes: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..config.prize_max)).collect();

    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(n);
    let mut costs: Vec<f64> = Vec::with_capacity(n);

    for child in 1..n {
        let parent = rng.gen_range(0..child);
        edges.push((parent, child));
        costs.push(rng.gen_range(0.0..config.cost_max));
    }

    let mesh_count = (config.mesh_density * n as f64).round() as usize;
    for _ in 0..mesh_count {
        if n < 2 {
            break;
        }
        let u = rng.gen_range(0..n);
        let mut v = rng.gen_range(0..n);
        while v == u {
            v = rng.gen_range(0..n);
        }
        edges.push((u, v));
        costs.push(rng.gen_range(0.0..config.cost_max));
    }

    GeneratedInstance {
        prizes,
        edges,
        costs,
    }
}
