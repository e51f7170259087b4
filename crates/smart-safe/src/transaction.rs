//! The transaction intent owners sign.

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::{
    constants::eip712::SIGNATURE_TYPE,
    eip712::{hash_string, hash_struct, Domain, Eip712Value},
};

/// An outgoing call a safe is asked to perform, bound to the nonce it must be executed at.
///
/// It only exists as the message being signed and verified; nothing about it is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SafeTransaction {
    /// The safe performing the call.
    pub from: Address,
    /// The call target.
    pub to: Address,
    /// The safe nonce the transaction is valid at.
    pub nonce: u64,
    /// The value transferred with the call.
    pub value: U256,
    /// The calldata.
    pub data: Bytes,
}

impl SafeTransaction {
    /// Returns the hash of the default `Signature` struct type.
    pub fn type_hash() -> B256 {
        hash_string(SIGNATURE_TYPE)
    }

    /// Returns the EIP-712 struct hash of the transaction under the default struct type.
    pub fn struct_hash(&self) -> B256 {
        self.struct_hash_with(Self::type_hash())
    }

    /// Returns the EIP-712 struct hash of the transaction under `type_hash`.
    pub fn struct_hash_with(&self, type_hash: B256) -> B256 {
        hash_struct(
            type_hash,
            &[
                Eip712Value::Address(self.from),
                Eip712Value::Address(self.to),
                Eip712Value::Uint64(self.nonce),
                Eip712Value::Uint256(self.value),
                Eip712Value::Bytes(&self.data),
            ],
        )
    }

    /// Returns the digest owners sign to authorize the transaction in `domain`.
    pub fn signing_hash(&self, domain: &Domain) -> B256 {
        domain.digest(self.struct_hash())
    }

    /// Returns the digest owners sign to authorize the transaction in `domain` when the struct
    /// type hashes to `type_hash`.
    pub fn signing_hash_with(&self, domain: &Domain, type_hash: B256) -> B256 {
        domain.digest(self.struct_hash_with(type_hash))
    }
}
