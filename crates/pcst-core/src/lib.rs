//! Prize-collecting Steiner forest/tree solver.
//!
//! Computes an approximate minimum-cost forest (or, for the rooted
//! variant, tree) connecting a subset of nodes so as to minimize total
//! edge cost plus the prizes forfeited by nodes left out, via the
//! Goemans-Williamson primal-dual moat-growth algorithm followed by one of
//! four pruning strategies ([`PruningMethod`]).
//!
//! The crate has no I/O, no CLI, and no wire format: callers pass plain
//! slices in and get plain index vectors back through [`solve`] or
//! [`solve_with_logger`].

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod cluster;
mod error;
mod growth;
mod indexed_pq;
mod logging;
mod pairing_heap;
mod pruning;
mod solve;
mod types;

pub use error::PcstError;
pub use logging::{LogLevel, LogSink, NullSink, StderrSink};
pub use solve::{solve, solve_with_logger};
pub use types::{PruningMethod, Solution, SolveInput};
