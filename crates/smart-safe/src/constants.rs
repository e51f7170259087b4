//! Constants for the Smart Safe.
//!
//! It groups the constants by the component that owns them.

/// Typed-data signing constants.
pub mod eip712 {
    /// The EIP-712 domain type. Fields appear in this order in the domain struct hash.
    pub const DOMAIN_TYPE: &str =
        "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

    /// The type of the struct owners sign to authorize a transaction, as hashed by the Smart
    /// Safe signer tooling.
    ///
    /// Member names are omitted, so the type hash differs from the one a standard EIP-712 encoder
    /// derives for the same struct. `data` is a dynamic `bytes` member and therefore enters the
    /// struct encoding as its keccak256 hash.
    pub const SIGNATURE_TYPE: &str = "Signature(address,address,uint64,uint256,bytes)";

    /// The standard EIP-712 encoding of the [`SIGNATURE_TYPE`] struct, including member names.
    pub const NAMED_SIGNATURE_TYPE: &str =
        "Signature(address from,address to,uint64 transactionNonce,uint256 value,bytes data)";

    /// The version marker prefixed to the domain separator and struct hash of a typed-data
    /// digest.
    pub const DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];
}

/// Smart Safe implementation constants.
pub mod safe {
    /// The default EIP-712 domain name.
    pub const DOMAIN_NAME: &str = "Smart Safe Signature Manager";

    /// The default EIP-712 domain version.
    pub const DOMAIN_VERSION: &str = "1.0.0";

    /// Length of an ECDSA signature encoded as `r || s || v`.
    pub const SIGNATURE_LEN: usize = 65;

    /// Offset added to `v` to mark a signature over the EIP-191 personal-message digest of the
    /// typed-data digest rather than over the typed-data digest itself.
    pub const ETH_SIGN_V_OFFSET: u8 = 4;
}
