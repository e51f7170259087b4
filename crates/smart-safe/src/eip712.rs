//! EIP-712 typed structured data hashing.
//!
//! Everything here is a pure function of its inputs. A struct is hashed as
//! `keccak256(typeHash || enc(member_1) || ... || enc(member_n))`, where every member is encoded
//! as one left-padded 32-byte word and dynamic `string`/`bytes` members are replaced by their
//! keccak256 hash. The digest an owner signs is `keccak256(0x19 0x01 || domainSeparator ||
//! structHash)`.

use alloy_primitives::{eip191_hash_message, keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::constants::eip712::{DIGEST_PREFIX, DOMAIN_TYPE};

/// Returns the keccak256 hash of the UTF-8 bytes of `value`.
///
/// Used both to derive type hashes from type strings and to encode `string` members.
#[inline]
pub fn hash_string(value: &str) -> B256 {
    keccak256(value.as_bytes())
}

/// A typed member value of an EIP-712 struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eip712Value<'a> {
    /// `address`
    Address(Address),
    /// `bool`
    Bool(bool),
    /// `uint64`
    Uint64(u64),
    /// `uint256`
    Uint256(U256),
    /// `bytes32`
    Bytes32(B256),
    /// `string`, encoded as the hash of its contents
    String(&'a str),
    /// `bytes`, encoded as the hash of its contents
    Bytes(&'a [u8]),
}

impl Eip712Value<'_> {
    /// Encodes the value as a single 32-byte word.
    pub fn encode_word(&self) -> B256 {
        match *self {
            Self::Address(address) => address.into_word(),
            Self::Bool(value) => B256::with_last_byte(value as u8),
            Self::Uint64(value) => B256::from(U256::from(value).to_be_bytes::<32>()),
            Self::Uint256(value) => B256::from(value.to_be_bytes::<32>()),
            Self::Bytes32(value) => value,
            Self::String(value) => hash_string(value),
            Self::Bytes(value) => keccak256(value),
        }
    }
}

/// Encodes a struct as its type hash followed by one word per member, in declaration order.
pub fn encode_struct(type_hash: B256, members: &[Eip712Value<'_>]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(32 * (members.len() + 1));
    encoded.extend_from_slice(type_hash.as_slice());
    for member in members {
        encoded.extend_from_slice(member.encode_word().as_slice());
    }
    encoded
}

/// Returns the struct hash of the given members under `type_hash`.
pub fn hash_struct(type_hash: B256, members: &[Eip712Value<'_>]) -> B256 {
    keccak256(encode_struct(type_hash, members))
}

/// Returns the digest to sign for a struct hash under a domain separator.
pub fn typed_data_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut buf = [0u8; 2 + 32 + 32];
    buf[..2].copy_from_slice(&DIGEST_PREFIX);
    buf[2..34].copy_from_slice(domain_separator.as_slice());
    buf[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(buf)
}

/// Returns the EIP-191 personal-message digest of a typed-data digest, i.e. what a wallet's
/// `personal_sign` over the 32 digest bytes actually signs.
#[inline]
pub fn eth_signed_digest(digest: B256) -> B256 {
    eip191_hash_message(digest)
}

/// The signing domain binding signatures to one contract instance on one chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// The user readable name of the signing domain.
    pub name: String,
    /// The current major version of the signing domain.
    pub version: String,
    /// The chain the verifying contract lives on.
    pub chain_id: u64,
    /// The address of the contract that verifies the signatures.
    pub verifying_contract: Address,
}

impl Domain {
    /// Creates a new [`Domain`].
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self { name: name.into(), version: version.into(), chain_id, verifying_contract }
    }

    /// Returns the hash of the `EIP712Domain` type.
    pub fn type_hash() -> B256 {
        hash_string(DOMAIN_TYPE)
    }

    /// Returns the domain separator.
    pub fn separator(&self) -> B256 {
        hash_struct(
            Self::type_hash(),
            &[
                Eip712Value::String(&self.name),
                Eip712Value::String(&self.version),
                Eip712Value::Uint256(U256::from(self.chain_id)),
                Eip712Value::Address(self.verifying_contract),
            ],
        )
    }

    /// Returns the digest to sign for `struct_hash` in this domain.
    pub fn digest(&self, struct_hash: B256) -> B256 {
        typed_data_digest(self.separator(), struct_hash)
    }
}
