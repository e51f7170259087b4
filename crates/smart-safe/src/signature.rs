//! Signer recovery for owner signatures.
//!
//! Signatures are 65 bytes, `r || s || v`. The recovery byte also selects which digest was
//! signed:
//!
//! | `v`        | signed digest                                             |
//! |------------|-----------------------------------------------------------|
//! | `0`, `1`   | the typed-data digest                                     |
//! | `27`, `28` | the typed-data digest                                     |
//! | `31`, `32` | the EIP-191 personal-message digest of the typed-data one |
//!
//! The last form is what wallets produce when asked to `personal_sign` the typed-data digest.

use alloy_primitives::{keccak256, Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

pub use crate::contracts::smart_safe::SignerSignature;
use crate::{
    constants::safe::{ETH_SIGN_V_OFFSET, SIGNATURE_LEN},
    eip712::eth_signed_digest,
};

/// The digest a signature was produced over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SignedDigest {
    /// The typed-data digest itself.
    TypedData,
    /// The EIP-191 personal-message digest of the typed-data digest.
    EthSign,
}

/// Reasons a signature does not yield a signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryError {
    /// The signature is not 65 bytes long.
    #[error("invalid signature length {0}, expected 65")]
    InvalidLength(usize),
    /// The recovery byte is not one of the supported values.
    #[error("unsupported recovery byte {0}")]
    InvalidRecoveryByte(u8),
    /// `r` or `s` is zero or not below the curve order.
    #[error("malformed signature scalars")]
    MalformedScalars,
    /// `s` is in the upper half of the curve order.
    #[error("non-canonical signature (high s)")]
    HighS,
    /// No public key corresponds to the signature and digest.
    #[error("public key recovery failed")]
    Unrecoverable,
}

/// Recovers the address that produced `signature` over `digest`.
///
/// `digest` is always the typed-data digest; the recovery byte decides whether it was signed
/// directly or through its personal-message digest.
pub fn recover_signer(digest: B256, signature: &[u8]) -> Result<Address, RecoveryError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(RecoveryError::InvalidLength(signature.len()));
    }

    let v = signature[64];
    let (signed, parity) = match v {
        0 | 1 => (SignedDigest::TypedData, v),
        27 | 28 => (SignedDigest::TypedData, v - 27),
        31 | 32 => (SignedDigest::EthSign, v - 27 - ETH_SIGN_V_OFFSET),
        _ => return Err(RecoveryError::InvalidRecoveryByte(v)),
    };
    let prehash = match signed {
        SignedDigest::TypedData => digest,
        SignedDigest::EthSign => eth_signed_digest(digest),
    };

    let signature =
        Signature::from_slice(&signature[..64]).map_err(|_| RecoveryError::MalformedScalars)?;
    // Reject the malleable twin `(r, n - s)` of every valid signature.
    if signature.normalize_s().is_some() {
        return Err(RecoveryError::HighS);
    }
    let recovery_id = RecoveryId::try_from(parity).map_err(|_| RecoveryError::Unrecoverable)?;

    let key = VerifyingKey::recover_from_prehash(prehash.as_slice(), &signature, recovery_id)
        .map_err(|_| RecoveryError::Unrecoverable)?;
    Ok(public_key_address(&key))
}

/// Derives the account address of a secp256k1 public key: the last 20 bytes of the keccak256
/// hash of the uncompressed point without its `0x04` prefix.
pub fn public_key_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
