use alloy_primitives::{map::AddressHashSet, Address};

use crate::SetupViolation;

/// The owner set and threshold of an Active safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeOwners {
    /// Owners in setup order.
    owners: Vec<Address>,
    /// Owner lookup.
    members: AddressHashSet,
    threshold: usize,
}

impl SafeOwners {
    /// Validates an owner configuration.
    ///
    /// The threshold must be between one and the number of owners, and owners must be distinct
    /// and non-zero.
    pub fn new(owners: Vec<Address>, threshold: usize) -> Result<Self, SetupViolation> {
        if threshold == 0 {
            return Err(SetupViolation::ZeroThreshold);
        }
        if threshold > owners.len() {
            return Err(SetupViolation::ThresholdExceedsOwners { threshold, owners: owners.len() });
        }

        let mut members = AddressHashSet::default();
        for owner in &owners {
            if owner.is_zero() {
                return Err(SetupViolation::NullOwner);
            }
            if !members.insert(*owner) {
                return Err(SetupViolation::DuplicateOwner(*owner));
            }
        }

        Ok(Self { owners, members, threshold })
    }

    /// Returns the owners in setup order.
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Returns the number of distinct owner signatures an execution requires.
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns whether `account` is an owner.
    pub fn contains(&self, account: &Address) -> bool {
        self.members.contains(account)
    }
}
