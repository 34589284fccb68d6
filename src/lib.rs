pub mod adjacency;
pub mod error;
pub mod lineage;
pub mod math;
pub mod operations;
pub mod topology;

#[cfg(test)]
mod testing;

pub use error::{DefilletError, Result};
