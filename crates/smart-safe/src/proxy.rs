//! EIP-1167 minimal proxies delegating to a Smart Safe implementation.
//!
//! A proxy owns nothing but its address, the implementation it resolved at creation and its own
//! [`SafeStorage`]. Every operation runs the implementation's logic against that storage, with
//! the proxy as the verifying contract of the signing domain.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, Selector, B256, U256};
use alloy_sol_types::{SolInterface, SolValue};
use auto_impl::auto_impl;
use tracing::trace;

use crate::{
    contracts::{
        minimal_proxy,
        smart_safe::{ISmartSafe, SmartSafeCall},
    },
    CallExecutor, Domain, SafeContext, SafeError, SafeStorage, SignerSignature, SmartSafe,
};

/// An account that delegates every call it receives to a fixed target.
#[auto_impl(&, Rc, Arc, Box)]
pub trait Forwarder {
    /// Returns the address calls are delegated to.
    fn resolve_target(&self) -> Address;
}

/// A Smart Safe instance: a minimal proxy with its own storage.
#[derive(Debug)]
pub struct SafeProxy {
    context: SafeContext,
    target: Address,
    implementation: Arc<SmartSafe>,
    storage: SafeStorage,
}

impl Forwarder for SafeProxy {
    fn resolve_target(&self) -> Address {
        self.target
    }
}

impl SafeProxy {
    /// Creates an Uninitialized proxy at `address` delegating to `implementation`, which lives at
    /// `target`.
    pub fn new(
        address: Address,
        chain_id: u64,
        target: Address,
        implementation: Arc<SmartSafe>,
    ) -> Self {
        Self {
            context: SafeContext { address, chain_id },
            target,
            implementation,
            storage: SafeStorage::default(),
        }
    }

    /// Returns the proxy address.
    pub const fn address(&self) -> Address {
        self.context.address
    }

    /// Returns the context the implementation executes in.
    pub const fn context(&self) -> &SafeContext {
        &self.context
    }

    /// Returns the implementation calls are delegated to.
    pub fn implementation(&self) -> &SmartSafe {
        &self.implementation
    }

    /// Returns the deployed bytecode of the proxy.
    pub fn runtime_code(&self) -> Bytes {
        minimal_proxy::runtime_code(self.target)
    }

    /// See [`SmartSafe::setup`].
    pub fn setup(&self, owners: Vec<Address>, threshold: usize) -> Result<(), SafeError> {
        self.implementation.setup(&self.storage, owners, threshold)
    }

    /// See [`SmartSafe::execute`].
    pub fn execute(
        &self,
        executor: &mut dyn CallExecutor,
        to: Address,
        value: U256,
        data: Bytes,
        signatures: &[SignerSignature],
    ) -> Result<Bytes, SafeError> {
        self.implementation.execute(
            &self.context,
            &self.storage,
            executor,
            to,
            value,
            data,
            signatures,
        )
    }

    /// See [`SmartSafe::transaction_nonce`].
    pub fn transaction_nonce(&self) -> u64 {
        self.implementation.transaction_nonce(&self.storage)
    }

    /// See [`SmartSafe::threshold`].
    pub fn threshold(&self) -> usize {
        self.implementation.threshold(&self.storage)
    }

    /// See [`SmartSafe::owners`].
    pub fn owners(&self) -> &[Address] {
        self.implementation.owners(&self.storage)
    }

    /// See [`SmartSafe::is_owner`].
    pub fn is_owner(&self, account: Address) -> bool {
        self.implementation.is_owner(&self.storage, account)
    }

    /// Returns the signing domain of this instance.
    pub fn domain(&self) -> Domain {
        self.implementation.domain(&self.context)
    }

    /// Returns the EIP-712 domain separator of this instance.
    pub fn domain_separator(&self) -> B256 {
        self.domain().separator()
    }

    /// See [`SmartSafe::transaction_hash`].
    pub fn transaction_hash(&self, to: Address, value: U256, data: Bytes, nonce: u64) -> B256 {
        self.implementation.transaction_hash(&self.context, to, value, data, nonce)
    }

    /// Handles ABI-encoded `ISmartSafe` calldata and returns the ABI-encoded return data.
    ///
    /// Errors are returned as [`SafeError`]; [`SafeError::abi_encode`] turns them into the revert
    /// data the contract would produce.
    pub fn forward(
        &self,
        executor: &mut dyn CallExecutor,
        input: &[u8],
    ) -> Result<Bytes, SafeError> {
        let call = SmartSafeCall::abi_decode(input, true).map_err(|_| SafeError::MalformedCall)?;
        trace!(
            target: "smart_safe::proxy",
            proxy = %self.address(),
            selector = %Selector::from(call.selector()),
            "Forwarding"
        );

        let output = match call {
            SmartSafeCall::setupOwners(ISmartSafe::setupOwnersCall { owners, threshold }) => {
                // A threshold beyond `usize` can never be met by an owner list.
                let threshold = usize::try_from(threshold).unwrap_or(usize::MAX);
                self.setup(owners, threshold)?;
                Vec::new()
            }
            SmartSafeCall::execute(ISmartSafe::executeCall { to, value, data, signatures }) => {
                self.execute(executor, to, value, data, &signatures)?.abi_encode()
            }
            SmartSafeCall::transactionNonce(_) => self.transaction_nonce().abi_encode(),
            SmartSafeCall::threshold(_) => U256::from(self.threshold()).abi_encode(),
            SmartSafeCall::getOwners(_) => self.owners().to_vec().abi_encode(),
            SmartSafeCall::isOwner(ISmartSafe::isOwnerCall { account }) => {
                self.is_owner(account).abi_encode()
            }
            SmartSafeCall::domainSeparator(_) => self.domain_separator().abi_encode(),
            SmartSafeCall::getTransactionHash(ISmartSafe::getTransactionHashCall {
                to,
                value,
                data,
                nonce,
            }) => self.transaction_hash(to, value, data, nonce).abi_encode(),
        };
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contracts::smart_safe::SmartSafeError,
        test_utils::{MockExecutor, TestSigner},
        InvalidSignatureReason, SetupViolation,
    };
    use alloy_primitives::{address, bytes};
    use alloy_sol_types::SolCall;

    const PROXY: Address = address!("0x00000000000000000000000000000000000b0b00");
    const OTHER_PROXY: Address = address!("0x00000000000000000000000000000000000b0b01");
    const TARGET: Address = address!("0x000000000000000000000000000000000000c0de");
    const RECIPIENT: Address = address!("0x8207d032322052afb9bf1463af87fd0c0097edde");

    fn proxy_at(address: Address) -> SafeProxy {
        SafeProxy::new(address, 1, TARGET, Arc::new(SmartSafe::default()))
    }

    #[test]
    fn test_proxy_resolves_fixed_target() {
        let proxy = proxy_at(PROXY);
        assert_eq!(proxy.resolve_target(), TARGET);
        assert_eq!(minimal_proxy::implementation_of(&proxy.runtime_code()), Some(TARGET));
        assert_eq!(Arc::new(proxy).resolve_target(), TARGET);
    }

    #[test]
    fn test_domain_is_bound_to_proxy_address() {
        let proxy = proxy_at(PROXY);
        assert_eq!(proxy.domain().verifying_contract, PROXY);
        assert_ne!(proxy.domain_separator(), proxy_at(OTHER_PROXY).domain_separator());
    }

    #[test]
    fn test_signatures_do_not_transfer_between_proxies() {
        let owner = TestSigner::from_seed(1);
        let first = proxy_at(PROXY);
        let second = proxy_at(OTHER_PROXY);
        first.setup(vec![owner.address()], 1).unwrap();
        second.setup(vec![owner.address()], 1).unwrap();

        let digest = first.transaction_hash(RECIPIENT, U256::ZERO, Bytes::new(), 0);
        let signatures = [owner.sign_entry(digest)];

        let mut executor = MockExecutor::default();
        let result =
            second.execute(&mut executor, RECIPIENT, U256::ZERO, Bytes::new(), &signatures);
        assert!(matches!(
            result,
            Err(SafeError::InvalidSignature {
                index: 0,
                reason: InvalidSignatureReason::SignerMismatch { .. }
            })
        ));
        first.execute(&mut executor, RECIPIENT, U256::ZERO, Bytes::new(), &signatures).unwrap();
        assert_eq!(first.transaction_nonce(), 1);
        assert_eq!(second.transaction_nonce(), 0);
    }

    #[test]
    fn test_forward_setup_and_views() {
        let owners = [TestSigner::from_seed(1), TestSigner::from_seed(2)];
        let proxy = proxy_at(PROXY);
        let mut executor = MockExecutor::default();

        let setup = ISmartSafe::setupOwnersCall {
            owners: owners.iter().map(TestSigner::address).collect(),
            threshold: U256::from(2),
        };
        assert_eq!(proxy.forward(&mut executor, &setup.abi_encode()).unwrap(), Bytes::new());

        let output = proxy
            .forward(&mut executor, &ISmartSafe::thresholdCall {}.abi_encode())
            .unwrap();
        let threshold = ISmartSafe::thresholdCall::abi_decode_returns(&output, true).unwrap();
        assert_eq!(threshold._0, U256::from(2));

        let output = proxy
            .forward(&mut executor, &ISmartSafe::getOwnersCall {}.abi_encode())
            .unwrap();
        let listed = ISmartSafe::getOwnersCall::abi_decode_returns(&output, true).unwrap();
        assert_eq!(listed._0, setup.owners);

        let is_owner = ISmartSafe::isOwnerCall { account: owners[1].address() };
        let output = proxy.forward(&mut executor, &is_owner.abi_encode()).unwrap();
        assert!(ISmartSafe::isOwnerCall::abi_decode_returns(&output, true).unwrap()._0);

        let output = proxy
            .forward(&mut executor, &ISmartSafe::domainSeparatorCall {}.abi_encode())
            .unwrap();
        assert_eq!(
            ISmartSafe::domainSeparatorCall::abi_decode_returns(&output, true).unwrap()._0,
            proxy.domain_separator()
        );
    }

    #[test]
    fn test_forward_execute_returns_encoded_output() {
        let owner = TestSigner::from_seed(1);
        let proxy = proxy_at(PROXY);
        proxy.setup(vec![owner.address()], 1).unwrap();

        let data = bytes!("d0e30db0");
        let hash_call = ISmartSafe::getTransactionHashCall {
            to: RECIPIENT,
            value: U256::from(7),
            data: data.clone(),
            nonce: 0,
        };
        let mut executor = MockExecutor::default().with_output(bytes!("cafe"));
        let output = proxy.forward(&mut executor, &hash_call.abi_encode()).unwrap();
        let digest = ISmartSafe::getTransactionHashCall::abi_decode_returns(&output, true)
            .unwrap()
            ._0;
        assert_eq!(digest, proxy.transaction_hash(RECIPIENT, U256::from(7), data.clone(), 0));

        let execute = ISmartSafe::executeCall {
            to: RECIPIENT,
            value: U256::from(7),
            data,
            signatures: vec![owner.sign_entry(digest)],
        };
        let output = proxy.forward(&mut executor, &execute.abi_encode()).unwrap();
        let result = ISmartSafe::executeCall::abi_decode_returns(&output, true).unwrap();
        assert_eq!(result.result, bytes!("cafe"));

        let output = proxy
            .forward(&mut executor, &ISmartSafe::transactionNonceCall {}.abi_encode())
            .unwrap();
        assert_eq!(
            ISmartSafe::transactionNonceCall::abi_decode_returns(&output, true).unwrap()._0,
            1
        );
    }

    #[test]
    fn test_forward_errors_encode_as_revert_data() {
        let proxy = proxy_at(PROXY);
        let mut executor = MockExecutor::default();

        let error = proxy.forward(&mut executor, &bytes!("deadbeef")).unwrap_err();
        assert_eq!(error, SafeError::MalformedCall);

        let setup = ISmartSafe::setupOwnersCall {
            owners: vec![RECIPIENT],
            threshold: U256::MAX,
        };
        let error = proxy.forward(&mut executor, &setup.abi_encode()).unwrap_err();
        assert_eq!(
            error,
            SafeError::InvalidThreshold(SetupViolation::ThresholdExceedsOwners {
                threshold: usize::MAX,
                owners: 1,
            })
        );
        assert_eq!(
            SmartSafeError::abi_decode(&error.abi_encode(), true).unwrap(),
            SmartSafeError::InvalidThreshold(ISmartSafe::InvalidThreshold {})
        );
    }
}
