//! EIP-1167 minimal proxy bytecode.
//!
//! The runtime code forwards every call to a fixed implementation address with `DELEGATECALL`
//! and bubbles up the returned data or revert reason:
//!
//! ```text
//! 363d3d373d3d3d363d73 <implementation: 20 bytes> 5af43d82803e903d91602b57fd5bf3
//! ```
//!
//! The creation code prepends a 10-byte loader that copies the runtime code into memory and
//! returns it. Since the implementation address is embedded in the creation code, the CREATE2
//! address of a proxy commits to the implementation it forwards to.

use alloc::vec::Vec;

use alloy_primitives::{hex, keccak256, Address, Bytes, B256};

/// Loader that returns the 45 bytes of runtime code following it.
pub const CREATION_PREFIX: [u8; 10] = hex!("3d602d80600a3d3981f3");

/// Runtime code preceding the implementation address (ends with `PUSH20`).
pub const RUNTIME_PREFIX: [u8; 10] = hex!("363d3d373d3d3d363d73");

/// Runtime code following the implementation address.
pub const RUNTIME_SUFFIX: [u8; 15] = hex!("5af43d82803e903d91602b57fd5bf3");

/// Length of the runtime code.
pub const RUNTIME_CODE_LEN: usize = RUNTIME_PREFIX.len() + 20 + RUNTIME_SUFFIX.len();

/// Length of the creation code.
pub const CREATION_CODE_LEN: usize = CREATION_PREFIX.len() + RUNTIME_CODE_LEN;

/// Returns the runtime code of a minimal proxy forwarding to `implementation`.
pub fn runtime_code(implementation: Address) -> Bytes {
    let mut code = Vec::with_capacity(RUNTIME_CODE_LEN);
    code.extend_from_slice(&RUNTIME_PREFIX);
    code.extend_from_slice(implementation.as_slice());
    code.extend_from_slice(&RUNTIME_SUFFIX);
    code.into()
}

/// Returns the creation code of a minimal proxy forwarding to `implementation`.
pub fn creation_code(implementation: Address) -> Bytes {
    let mut code = Vec::with_capacity(CREATION_CODE_LEN);
    code.extend_from_slice(&CREATION_PREFIX);
    code.extend_from_slice(&runtime_code(implementation));
    code.into()
}

/// Returns the hash of the creation code, i.e. the code hash that enters CREATE2 address
/// derivation.
pub fn creation_code_hash(implementation: Address) -> B256 {
    keccak256(creation_code(implementation))
}

/// Extracts the implementation address from minimal proxy runtime code.
///
/// Returns `None` if `code` is not exactly the runtime code of a minimal proxy.
pub fn implementation_of(code: &[u8]) -> Option<Address> {
    if code.len() != RUNTIME_CODE_LEN {
        return None;
    }
    let (prefix, rest) = code.split_at(RUNTIME_PREFIX.len());
    let (implementation, suffix) = rest.split_at(20);
    (prefix == RUNTIME_PREFIX && suffix == RUNTIME_SUFFIX)
        .then(|| Address::from_slice(implementation))
}
