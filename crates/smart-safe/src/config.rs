//! Configuration of Smart Safe implementations and of the in-memory host.

use serde::{Deserialize, Serialize};

use crate::constants::{
    eip712::SIGNATURE_TYPE,
    safe::{DOMAIN_NAME, DOMAIN_VERSION},
};

/// Configuration of a Smart Safe implementation.
///
/// The name and version become part of the EIP-712 domain of every instance delegating to the
/// implementation, so signatures produced for one implementation version are not accepted by
/// instances of another. The signature type selects the struct type hash owners sign; it
/// defaults to the one the Smart Safe signer tooling uses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafeConfig {
    /// EIP-712 domain name.
    pub name: String,
    /// EIP-712 domain version.
    pub version: String,
    /// Type string of the signed transaction struct.
    pub signature_type: String,
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            signature_type: SIGNATURE_TYPE.to_string(),
        }
    }
}

impl SafeConfig {
    /// Sets the domain version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the domain name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the type string of the signed transaction struct.
    pub fn with_signature_type(mut self, signature_type: impl Into<String>) -> Self {
        self.signature_type = signature_type.into();
        self
    }
}

/// Configuration of the [`InMemoryHost`](crate::InMemoryHost).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostConfig {
    /// The chain id every instance hosted here signs against.
    pub chain_id: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { chain_id: 1 }
    }
}
