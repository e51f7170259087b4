//! The Smart Safe authorization core.
//!
//! A safe goes through two phases. It starts Uninitialized, with no owners and a threshold of
//! zero, and a one-time [`SmartSafe::setup`] moves it to Active. Once Active, the owner set and
//! threshold never change; the only state that moves is the transaction nonce, advanced by every
//! successful [`SmartSafe::execute`].
//!
//! [`SmartSafe`] is the logic only. The state it operates on lives in a [`SafeStorage`] owned by
//! the instance delegating to it, exactly like contract code running under `DELEGATECALL`.

mod logic;
mod owners;
mod storage;

pub use logic::*;
pub use owners::*;
pub use storage::*;

use alloy_primitives::Address;

/// The instance a [`SmartSafe`] is executing for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SafeContext {
    /// The instance address, which is also the EIP-712 verifying contract.
    pub address: Address,
    /// The chain the instance lives on.
    pub chain_id: u64,
}
