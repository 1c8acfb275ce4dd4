//! Real-world scenario benchmarks.
//!
//! These benchmarks model how a host drives the pool: a block of mixing after
//! a handful of note events.

mod pool;

pub use pool::bench_pool;
