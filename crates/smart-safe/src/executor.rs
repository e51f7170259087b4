//! The seam through which a safe performs its authorized calls.

use alloy_primitives::{Address, Bytes, U256};
use auto_impl::auto_impl;

/// A call a safe asks its environment to perform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallRequest {
    /// The safe performing the call.
    pub from: Address,
    /// The call target.
    pub to: Address,
    /// The value transferred with the call.
    pub value: U256,
    /// The calldata.
    pub data: Bytes,
}

/// The call failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("call reverted")]
pub struct CallReverted {
    /// The revert data returned by the callee.
    pub output: Bytes,
}

/// Performs calls on behalf of a safe.
///
/// This is the environment's `CALL` instruction: the safe never interprets the target or the
/// calldata, it only hands them over once the call is authorized.
///
/// Implementations must be atomic. Returning `Err` means the call and everything it caused,
/// including nested calls back into the safe, has been discarded. The safe relies on this when it
/// rolls back its own state on failure.
#[auto_impl(&mut, Box)]
pub trait CallExecutor {
    /// Performs `request` and returns the callee's output.
    fn call(&mut self, request: CallRequest) -> Result<Bytes, CallReverted>;
}
