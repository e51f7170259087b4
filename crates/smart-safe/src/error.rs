//! Error types of the Smart Safe and its proxy factory.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolError;

use crate::{
    contracts::{proxy_factory::ISmartSafeProxyFactory, smart_safe::ISmartSafe},
    RecoveryError,
};

/// The rule an owner configuration broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupViolation {
    /// The threshold is zero.
    #[error("threshold must be at least one")]
    ZeroThreshold,
    /// The threshold is larger than the number of owners.
    #[error("threshold {threshold} exceeds owner count {owners}")]
    ThresholdExceedsOwners {
        /// The requested threshold
        threshold: usize,
        /// The number of owners supplied
        owners: usize,
    },
    /// An owner is listed more than once.
    #[error("duplicate owner {0}")]
    DuplicateOwner(Address),
    /// The zero address is listed as an owner.
    #[error("the zero address cannot be an owner")]
    NullOwner,
}

/// Errors of the Smart Safe authorization core.
///
/// These map directly to the Solidity errors defined in `ISmartSafe`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SafeError {
    /// `setup` was called on an instance that already has owners.
    #[error("safe is already initialized")]
    AlreadyInitialized,
    /// An operation requiring owners was called before `setup`.
    #[error("safe is not initialized")]
    NotInitialized,
    /// The owner set or threshold given to `setup` is inconsistent.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(SetupViolation),
    /// A signature does not recover to its claimed signer.
    #[error("invalid signature at index {index}: {reason}")]
    InvalidSignature {
        /// Position of the offending signature in the supplied set
        index: usize,
        /// Why the signature was rejected
        reason: InvalidSignatureReason,
    },
    /// Fewer distinct owners signed than the threshold requires.
    #[error("{signers} distinct owner signatures, threshold is {threshold}")]
    ThresholdNotMet {
        /// Number of distinct owners that signed
        signers: usize,
        /// The threshold of the safe
        threshold: usize,
    },
    /// The authorized call failed. Nothing, including the nonce, changed.
    #[error("execution failed")]
    ExecutionFailed {
        /// The revert data returned by the call
        output: Bytes,
    },
    /// The transaction nonce cannot advance any further.
    #[error("transaction nonce exhausted")]
    NonceExhausted,
    /// Calldata forwarded to the safe does not decode as an `ISmartSafe` call.
    #[error("malformed call")]
    MalformedCall,
}

/// Why a supplied signature was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSignatureReason {
    /// No signer could be recovered.
    #[error(transparent)]
    Recovery(#[from] RecoveryError),
    /// A signer was recovered, but not the claimed one.
    #[error("recovered {recovered}, claimed {claimed}")]
    SignerMismatch {
        /// The address the signature recovers to
        recovered: Address,
        /// The address the signature was submitted for
        claimed: Address,
    },
}

impl SafeError {
    /// Encodes the error as ABI-encoded revert data.
    ///
    /// Uses the generated Solidity error bindings from `ISmartSafe`.
    pub fn abi_encode(&self) -> Bytes {
        match self {
            Self::AlreadyInitialized => ISmartSafe::AlreadyInitialized {}.abi_encode().into(),
            Self::NotInitialized => ISmartSafe::NotInitialized {}.abi_encode().into(),
            Self::InvalidThreshold(_) => ISmartSafe::InvalidThreshold {}.abi_encode().into(),
            Self::InvalidSignature { index, .. } => {
                ISmartSafe::InvalidSignature { index: U256::from(*index) }.abi_encode().into()
            }
            Self::ThresholdNotMet { signers, threshold } => ISmartSafe::ThresholdNotMet {
                signers: U256::from(*signers),
                threshold: U256::from(*threshold),
            }
            .abi_encode()
            .into(),
            Self::ExecutionFailed { output } => {
                ISmartSafe::ExecutionFailed { output: output.clone() }.abi_encode().into()
            }
            Self::NonceExhausted => ISmartSafe::NonceExhausted {}.abi_encode().into(),
            Self::MalformedCall => ISmartSafe::MalformedCall {}.abi_encode().into(),
        }
    }
}

/// Errors of the Smart Safe proxy factory.
///
/// These map directly to the Solidity errors defined in `ISmartSafeProxyFactory`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    /// A proxy already lives at the address the salt derives to.
    #[error("salt {salt} already used, {address} has code")]
    SaltAlreadyUsed {
        /// The salt of the rejected deployment
        salt: B256,
        /// The derived address
        address: Address,
    },
    /// The caller is not the factory owner.
    #[error("{caller} is not the factory owner")]
    Unauthorized {
        /// The rejected caller
        caller: Address,
    },
    /// The implementation pointer has no Smart Safe implementation behind it.
    #[error("no smart safe implementation deployed at {0}")]
    ImplementationNotDeployed(Address),
    /// Setting up the freshly created proxy failed; nothing was deployed.
    #[error("proxy setup failed: {0}")]
    Setup(#[from] SafeError),
}

impl FactoryError {
    /// Encodes the error as ABI-encoded revert data.
    ///
    /// Uses the generated Solidity error bindings from `ISmartSafeProxyFactory`.
    pub fn abi_encode(&self) -> Bytes {
        match self {
            Self::SaltAlreadyUsed { salt, .. } => {
                ISmartSafeProxyFactory::SaltAlreadyUsed { salt: *salt }.abi_encode().into()
            }
            Self::Unauthorized { caller } => {
                ISmartSafeProxyFactory::Unauthorized { caller: *caller }.abi_encode().into()
            }
            Self::ImplementationNotDeployed(implementation) => {
                ISmartSafeProxyFactory::ImplementationNotDeployed {
                    implementation: *implementation,
                }
                .abi_encode()
                .into()
            }
            Self::Setup(error) => {
                ISmartSafeProxyFactory::SetupFailed { reason: error.abi_encode() }
                    .abi_encode()
                    .into()
            }
        }
    }
}
