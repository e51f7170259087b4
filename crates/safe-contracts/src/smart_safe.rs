//! ABI of the Smart Safe implementation contract.
//!
//! Proxies deployed by the factory expose exactly this surface, since every call they receive is
//! delegated to the implementation.

use alloy_sol_types::sol;

pub use ISmartSafe::{ISmartSafeCalls as SmartSafeCall, ISmartSafeErrors as SmartSafeError};

sol! {
    /// A signature over the typed-data digest of a transaction, together with the signer it is
    /// claimed to come from.
    #[derive(Debug, PartialEq, Eq)]
    struct SignerSignature {
        address signer;
        bytes signature;
    }

    /// Threshold-authorized wallet.
    #[derive(Debug, PartialEq, Eq)]
    interface ISmartSafe {
        /// Records the owner set and threshold. Callable once.
        function setupOwners(address[] calldata owners, uint256 threshold) external;

        /// Executes `to.call{value: value}(data)` when enough owners signed the transaction at
        /// the current nonce.
        function execute(
            address to,
            uint256 value,
            bytes calldata data,
            SignerSignature[] calldata signatures
        ) external payable returns (bytes memory result);

        /// Returns the nonce the next transaction must be signed with.
        function transactionNonce() external view returns (uint64);

        /// Returns the number of distinct owner signatures an execution requires.
        function threshold() external view returns (uint256);

        /// Returns the owners in setup order.
        function getOwners() external view returns (address[] memory);

        /// Returns whether `account` is an owner.
        function isOwner(address account) external view returns (bool);

        /// Returns the EIP-712 domain separator of this instance.
        function domainSeparator() external view returns (bytes32);

        /// Returns the typed-data digest owners sign for the given transaction.
        function getTransactionHash(
            address to,
            uint256 value,
            bytes calldata data,
            uint64 nonce
        ) external view returns (bytes32);

        error AlreadyInitialized();
        error NotInitialized();
        error InvalidThreshold();
        error InvalidSignature(uint256 index);
        error ThresholdNotMet(uint256 signers, uint256 threshold);
        error ExecutionFailed(bytes output);
        error NonceExhausted();
        error MalformedCall();
    }
}
