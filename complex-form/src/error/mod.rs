//! Error types

mod config;
mod validation;

pub use config::*;
pub use validation::*;
