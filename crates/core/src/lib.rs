//! Domain vocabulary shared by the store and HTTP crates.

pub mod blog;
pub mod error;
pub mod types;
