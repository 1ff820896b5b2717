//! Store implementations.

mod memory;

pub use memory::{DirectorySeed, InMemoryDirectory, SeedAccount, sha256_hex};
