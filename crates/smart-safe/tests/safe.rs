//! Tests for the setup and threshold authorization of deployed safes.

use std::rc::Rc;

use alloy_primitives::{address, bytes, Address, Bytes, B256, U256};
use rstest::rstest;
use smart_safe::{
    test_utils::{MockExecutor, TestSigner},
    FactoryError, InMemoryHost, InvalidSignatureReason, RecoveryError, SafeError, SafeProxy,
    SafeTransaction, SetupViolation, SignerSignature, SmartSafe, SmartSafeProxyFactory,
};

const DEPLOYER: Address = address!("0x00000000000000000000000000000000deadbeef");
const ADMIN: Address = address!("0x000000000000000000000000000000000000ad00");
const RECIPIENT: Address = address!("0x8207d032322052afb9bf1463af87fd0c0097edde");

fn signers(count: u8) -> Vec<TestSigner> {
    (1..=count).map(TestSigner::from_seed).collect()
}

fn addresses(signers: &[TestSigner]) -> Vec<Address> {
    signers.iter().map(TestSigner::address).collect()
}

fn host_and_factory() -> (InMemoryHost, SmartSafeProxyFactory) {
    let mut host = InMemoryHost::default();
    let implementation = host.deploy_implementation(DEPLOYER, SmartSafe::default());
    let factory = host.deploy_factory(DEPLOYER, ADMIN, implementation);
    (host, factory)
}

fn deploy(owners: &[TestSigner], threshold: usize) -> Rc<SafeProxy> {
    let (mut host, mut factory) = host_and_factory();
    let address = factory
        .deploy_smart_safe_proxy(&mut host, addresses(owners), threshold, B256::ZERO)
        .unwrap();
    host.safe(address).unwrap()
}

fn sign_all(safe: &SafeProxy, signers: &[&TestSigner], data: &Bytes) -> Vec<SignerSignature> {
    let transaction = SafeTransaction {
        from: safe.address(),
        to: RECIPIENT,
        nonce: safe.transaction_nonce(),
        value: U256::ZERO,
        data: data.clone(),
    };
    signers.iter().map(|signer| signer.sign_transaction(&transaction, &safe.domain())).collect()
}

fn execute(safe: &SafeProxy, signatures: &[SignerSignature]) -> Result<Bytes, SafeError> {
    safe.execute(&mut MockExecutor::default(), RECIPIENT, U256::ZERO, Bytes::new(), signatures)
}

#[rstest]
#[case(1, 1)]
#[case(2, 1)]
#[case(3, 2)]
#[case(3, 3)]
#[case(5, 3)]
fn test_valid_setup_succeeds_once(#[case] owners: u8, #[case] threshold: usize) {
    let owners = signers(owners);
    let safe = deploy(&owners, threshold);

    assert_eq!(safe.threshold(), threshold);
    assert_eq!(safe.owners(), addresses(&owners).as_slice());
    assert!(owners.iter().all(|owner| safe.is_owner(owner.address())));
    assert_eq!(safe.transaction_nonce(), 0);

    assert_eq!(safe.setup(addresses(&owners), threshold), Err(SafeError::AlreadyInitialized));
    assert_eq!(safe.setup(vec![RECIPIENT], 1), Err(SafeError::AlreadyInitialized));
}

#[rstest]
#[case(vec![], 1, SetupViolation::ThresholdExceedsOwners { threshold: 1, owners: 0 })]
#[case(vec![RECIPIENT], 0, SetupViolation::ZeroThreshold)]
#[case(vec![RECIPIENT], 2, SetupViolation::ThresholdExceedsOwners { threshold: 2, owners: 1 })]
#[case(vec![RECIPIENT, RECIPIENT], 1, SetupViolation::DuplicateOwner(RECIPIENT))]
#[case(vec![RECIPIENT, Address::ZERO], 1, SetupViolation::NullOwner)]
fn test_invalid_setup_is_rejected(
    #[case] owners: Vec<Address>,
    #[case] threshold: usize,
    #[case] violation: SetupViolation,
) {
    let (mut host, mut factory) = host_and_factory();
    let result = factory.deploy_smart_safe_proxy(&mut host, owners, threshold, B256::ZERO);
    assert_eq!(result, Err(FactoryError::Setup(SafeError::InvalidThreshold(violation))));
}

#[rstest]
#[case(1, 1)]
#[case(3, 2)]
#[case(4, 3)]
#[case(5, 5)]
fn test_execute_requires_threshold_distinct_owners(#[case] owners: u8, #[case] threshold: usize) {
    let owners = signers(owners);
    let safe = deploy(&owners, threshold);

    for count in 0..threshold {
        let subset: Vec<_> = owners.iter().take(count).collect();
        assert_eq!(
            execute(&safe, &sign_all(&safe, &subset, &Bytes::new())),
            Err(SafeError::ThresholdNotMet { signers: count, threshold })
        );
    }
    assert_eq!(safe.transaction_nonce(), 0);

    // Signature order does not matter.
    let subset: Vec<_> = owners.iter().take(threshold).rev().collect();
    execute(&safe, &sign_all(&safe, &subset, &Bytes::new())).unwrap();
    assert_eq!(safe.transaction_nonce(), 1);
}

#[rstest]
#[case(2)]
#[case(3)]
fn test_repeated_signatures_count_once(#[case] threshold: usize) {
    let owners = signers(3);
    let safe = deploy(&owners, threshold);

    let repeated = vec![&owners[0]; threshold];
    assert_eq!(
        execute(&safe, &sign_all(&safe, &repeated, &Bytes::new())),
        Err(SafeError::ThresholdNotMet { signers: 1, threshold })
    );
}

#[test]
fn test_eth_sign_signatures_authorize() {
    let owners = signers(2);
    let safe = deploy(&owners, 2);
    let digest = safe.transaction_hash(RECIPIENT, U256::ZERO, Bytes::new(), 0);

    let signatures = [
        owners[0].sign_entry(digest),
        SignerSignature {
            signer: owners[1].address(),
            signature: owners[1].eth_sign_digest(digest),
        },
    ];
    execute(&safe, &signatures).unwrap();
    assert_eq!(safe.transaction_nonce(), 1);
}

#[test]
fn test_malformed_signature_is_reported_with_index() {
    let owners = signers(2);
    let safe = deploy(&owners, 1);
    let mut signatures = sign_all(&safe, &[&owners[0]], &Bytes::new());
    signatures.push(SignerSignature { signer: owners[1].address(), signature: bytes!("00") });

    assert_eq!(
        execute(&safe, &signatures),
        Err(SafeError::InvalidSignature {
            index: 1,
            reason: InvalidSignatureReason::Recovery(RecoveryError::InvalidLength(1)),
        })
    );
    assert_eq!(safe.transaction_nonce(), 0);
}

#[test]
fn test_nonce_moves_only_on_success() {
    let owners = signers(1);
    let safe = deploy(&owners, 1);
    let data = bytes!("c0ffee");

    let signatures = sign_all(&safe, &[&owners[0]], &data);
    let mut executor = MockExecutor::default();
    executor.push_outcome(Err(smart_safe::CallReverted { output: bytes!("08c379a0") }));
    executor.push_outcome(Ok(bytes!("01")));

    let failed = safe.execute(&mut executor, RECIPIENT, U256::ZERO, data.clone(), &signatures);
    assert_eq!(failed, Err(SafeError::ExecutionFailed { output: bytes!("08c379a0") }));
    assert_eq!(safe.transaction_nonce(), 0);

    let output = safe.execute(&mut executor, RECIPIENT, U256::ZERO, data.clone(), &signatures);
    assert_eq!(output, Ok(bytes!("01")));
    assert_eq!(safe.transaction_nonce(), 1);

    for expected in 2..5 {
        let signatures = sign_all(&safe, &[&owners[0]], &data);
        safe.execute(&mut executor, RECIPIENT, U256::ZERO, data.clone(), &signatures).unwrap();
        assert_eq!(safe.transaction_nonce(), expected);
    }
    assert_eq!(executor.calls().len(), 5);
    assert!(executor.calls().iter().all(|call| call.from == safe.address() && call.data == data));
}

#[test]
fn test_signature_binds_every_field() {
    let owners = signers(1);
    let safe = deploy(&owners, 1);
    let signatures = sign_all(&safe, &[&owners[0]], &Bytes::new());

    let mut executor = MockExecutor::default();
    let tampered = [
        (RECIPIENT, U256::from(1), Bytes::new()),
        (ADMIN, U256::ZERO, Bytes::new()),
        (RECIPIENT, U256::ZERO, bytes!("00")),
    ];
    for (to, value, data) in tampered {
        let result = safe.execute(&mut executor, to, value, data, &signatures);
        assert!(matches!(result, Err(SafeError::InvalidSignature { index: 0, .. })));
    }
    assert!(executor.calls().is_empty());
}
