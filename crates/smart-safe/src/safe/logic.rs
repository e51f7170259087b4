use alloy_primitives::{map::AddressHashSet, Address, Bytes, B256, U256};
use tracing::{debug, trace, warn};

use crate::{
    eip712::hash_string, recover_signer, CallExecutor, CallRequest, CallReverted, Domain,
    InvalidSignatureReason, SafeConfig, SafeContext, SafeError, SafeOwners, SafeStorage,
    SafeTransaction, SignerSignature,
};

/// The Smart Safe implementation.
///
/// It holds no per-instance state; every operation takes the [`SafeStorage`] of the instance it
/// runs for, and the [`SafeContext`] identifying that instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmartSafe {
    config: SafeConfig,
}

impl SmartSafe {
    /// Creates a new [`SmartSafe`] with the given configuration.
    pub const fn new(config: SafeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &SafeConfig {
        &self.config
    }

    /// Returns the EIP-712 domain of the instance described by `context`.
    pub fn domain(&self, context: &SafeContext) -> Domain {
        Domain::new(
            self.config.name.clone(),
            self.config.version.clone(),
            context.chain_id,
            context.address,
        )
    }

    /// Returns the type hash of the transaction struct owners sign.
    pub fn signature_type_hash(&self) -> B256 {
        hash_string(&self.config.signature_type)
    }

    /// Records the owner set and threshold, moving the safe from Uninitialized to Active.
    ///
    /// # Errors
    ///
    /// - [`SafeError::AlreadyInitialized`] if the safe is already Active
    /// - [`SafeError::InvalidThreshold`] if the threshold is zero or larger than the number of
    ///   owners, or if an owner is duplicated or the zero address
    pub fn setup(
        &self,
        storage: &SafeStorage,
        owners: Vec<Address>,
        threshold: usize,
    ) -> Result<(), SafeError> {
        if storage.is_initialized() {
            return Err(SafeError::AlreadyInitialized);
        }
        let owners = SafeOwners::new(owners, threshold).map_err(SafeError::InvalidThreshold)?;
        debug!(target: "smart_safe", owners = ?owners.owners(), threshold, "Safe set up");
        storage.initialize(owners)
    }

    /// Executes `to.call{value}(data)` if at least `threshold` distinct owners signed it at the
    /// current nonce, and returns the call output.
    ///
    /// Signatures are checked in any order; every one of them must recover to its claimed
    /// signer, and signers that are not owners are ignored. The nonce is advanced before the call
    /// is issued, so a call back into this instance cannot replay the same signatures. If the
    /// call fails, the nonce advance is discarded together with the call.
    ///
    /// # Errors
    ///
    /// - [`SafeError::NotInitialized`] if the safe has no owners yet
    /// - [`SafeError::InvalidSignature`] if a signature does not recover to its claimed signer
    /// - [`SafeError::ThresholdNotMet`] if fewer than `threshold` distinct owners signed
    /// - [`SafeError::NonceExhausted`] if the nonce cannot advance any further
    /// - [`SafeError::ExecutionFailed`] if the call reverted
    #[allow(clippy::too_many_arguments)]
    pub fn execute(
        &self,
        context: &SafeContext,
        storage: &SafeStorage,
        executor: &mut dyn CallExecutor,
        to: Address,
        value: U256,
        data: Bytes,
        signatures: &[SignerSignature],
    ) -> Result<Bytes, SafeError> {
        let owners = storage.owners().ok_or(SafeError::NotInitialized)?;

        let transaction =
            SafeTransaction { from: context.address, to, nonce: storage.nonce(), value, data };
        let digest =
            transaction.signing_hash_with(&self.domain(context), self.signature_type_hash());

        let signers = count_owner_signatures(owners, digest, signatures)?;
        if signers < owners.threshold() {
            debug!(
                target: "smart_safe",
                safe = %context.address,
                signers,
                threshold = owners.threshold(),
                "Threshold not met"
            );
            return Err(SafeError::ThresholdNotMet { signers, threshold: owners.threshold() });
        }

        let checkpoint = storage.checkpoint();
        let nonce = storage.increment_nonce().ok_or(SafeError::NonceExhausted)?;
        trace!(target: "smart_safe", safe = %context.address, nonce, %to, %value, "Calling");

        let request = CallRequest { from: context.address, to, value, data: transaction.data };
        match executor.call(request) {
            Ok(output) => {
                debug!(target: "smart_safe", safe = %context.address, nonce, %to, "Executed");
                Ok(output)
            }
            Err(CallReverted { output }) => {
                storage.revert(checkpoint);
                warn!(
                    target: "smart_safe",
                    safe = %context.address,
                    nonce,
                    %to,
                    %output,
                    "Execution failed, nonce rolled back"
                );
                Err(SafeError::ExecutionFailed { output })
            }
        }
    }

    /// Returns the nonce the next transaction must be signed with.
    pub fn transaction_nonce(&self, storage: &SafeStorage) -> u64 {
        storage.nonce()
    }

    /// Returns the threshold, or zero while the safe is Uninitialized.
    pub fn threshold(&self, storage: &SafeStorage) -> usize {
        storage.owners().map_or(0, SafeOwners::threshold)
    }

    /// Returns the owners in setup order, or nothing while the safe is Uninitialized.
    pub fn owners<'a>(&self, storage: &'a SafeStorage) -> &'a [Address] {
        storage.owners().map(SafeOwners::owners).unwrap_or_default()
    }

    /// Returns whether `account` is an owner.
    pub fn is_owner(&self, storage: &SafeStorage, account: Address) -> bool {
        storage.owners().is_some_and(|owners| owners.contains(&account))
    }

    /// Returns the digest owners sign to authorize `to.call{value}(data)` at `nonce`.
    pub fn transaction_hash(
        &self,
        context: &SafeContext,
        to: Address,
        value: U256,
        data: Bytes,
        nonce: u64,
    ) -> B256 {
        SafeTransaction { from: context.address, to, nonce, value, data }
            .signing_hash_with(&self.domain(context), self.signature_type_hash())
    }
}

/// Verifies every signature against `digest` and returns the number of distinct owners among
/// the signers.
fn count_owner_signatures(
    owners: &SafeOwners,
    digest: B256,
    signatures: &[SignerSignature],
) -> Result<usize, SafeError> {
    let mut signers = AddressHashSet::default();
    for (index, entry) in signatures.iter().enumerate() {
        let recovered = recover_signer(digest, &entry.signature).map_err(|error| {
            SafeError::InvalidSignature { index, reason: InvalidSignatureReason::Recovery(error) }
        })?;
        if recovered != entry.signer {
            return Err(SafeError::InvalidSignature {
                index,
                reason: InvalidSignatureReason::SignerMismatch {
                    recovered,
                    claimed: entry.signer,
                },
            });
        }
        if owners.contains(&recovered) {
            signers.insert(recovered);
        }
    }
    Ok(signers.len())
}
