//! Test utilities for the Smart Safe.

mod executor;
mod signer;

pub use executor::*;
pub use signer::*;
