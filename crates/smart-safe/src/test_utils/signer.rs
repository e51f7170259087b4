use alloy_primitives::{Address, Bytes, B256};
use k256::ecdsa::SigningKey;

use crate::{
    constants::safe::ETH_SIGN_V_OFFSET, eip712::eth_signed_digest, public_key_address, Domain,
    SafeTransaction, SignerSignature,
};

/// An owner key for tests.
#[derive(Clone, derive_more::Debug)]
pub struct TestSigner {
    #[debug(ignore)]
    key: SigningKey,
    address: Address,
}

impl TestSigner {
    /// Creates a signer whose secret key is `seed` repeated 32 times.
    pub fn from_seed(seed: u8) -> Self {
        assert_ne!(seed, 0, "zero is not a valid secret key");
        Self::new(SigningKey::from_slice(&[seed; 32]).unwrap())
    }

    fn new(key: SigningKey) -> Self {
        let address = public_key_address(key.verifying_key());
        Self { key, address }
    }

    /// Returns the signer address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Signs `digest` directly, with `v` in `{27, 28}`.
    pub fn sign_digest(&self, digest: B256) -> Bytes {
        self.sign_with_offset(digest, 27)
    }

    /// Signs the personal-message digest of `digest`, with `v` in `{31, 32}`.
    pub fn eth_sign_digest(&self, digest: B256) -> Bytes {
        self.sign_with_offset(eth_signed_digest(digest), 27 + ETH_SIGN_V_OFFSET)
    }

    /// Signs `digest` and pairs the signature with this signer.
    pub fn sign_entry(&self, digest: B256) -> SignerSignature {
        SignerSignature { signer: self.address, signature: self.sign_digest(digest) }
    }

    /// Signs `transaction` in `domain` and pairs the signature with this signer.
    pub fn sign_transaction(
        &self,
        transaction: &SafeTransaction,
        domain: &Domain,
    ) -> SignerSignature {
        self.sign_entry(transaction.signing_hash(domain))
    }

    fn sign_with_offset(&self, prehash: B256, offset: u8) -> Bytes {
        let (signature, recovery_id) =
            self.key.sign_prehash_recoverable(prehash.as_slice()).unwrap();
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recovery_id.to_byte() + offset);
        bytes.into()
    }
}
