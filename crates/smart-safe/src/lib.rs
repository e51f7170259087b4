//! Threshold-authorized Smart Safe and its deterministic minimal proxy factory.
//!
//! The crate is split along the two engines it implements:
//!
//! - the authorization core ([`SmartSafe`]): a one-time owner/threshold setup, a transaction
//!   nonce, and EIP-712 signature verification authorizing arbitrary outgoing calls, which are
//!   performed through an injected [`CallExecutor`];
//! - the deterministic instantiation engine ([`SmartSafeProxyFactory`]): CREATE2 address
//!   derivation and deployment of EIP-1167 minimal proxies ([`SafeProxy`]) that delegate to a
//!   shared, swappable implementation.
//!
//! [`InMemoryHost`] stands in for the chain hosting both.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub use smart_safe_contracts as contracts;

mod config;
pub use config::*;

pub mod constants;

pub mod eip712;
pub use eip712::{Domain, Eip712Value};

mod error;
pub use error::*;

mod executor;
pub use executor::*;

mod factory;
pub use factory::*;

mod host;
pub use host::*;

mod proxy;
pub use proxy::*;

mod safe;
pub use safe::*;

mod signature;
pub use signature::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod transaction;
pub use transaction::*;
