//! Contract-level artifacts for the Smart Safe.
//!
//! This crate provides the Solidity ABI surface of the Smart Safe and its proxy factory, together
//! with the EIP-1167 minimal proxy bytecode template the factory deploys.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]
#![deny(unused_must_use)]

extern crate alloc;

pub use alloy_primitives;

pub mod minimal_proxy;
pub mod proxy_factory;
pub mod smart_safe;
