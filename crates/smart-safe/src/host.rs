//! An in-memory chain hosting Smart Safe implementations, factories and proxies.

use std::{rc::Rc, sync::Arc};

use alloy_primitives::{map::AddressHashMap, Address};
use auto_impl::auto_impl;
use tracing::{debug, info};

use crate::{Forwarder, HostConfig, SafeProxy, SmartSafe, SmartSafeProxyFactory};

/// The environment a [`SmartSafeProxyFactory`] deploys into.
#[auto_impl(&mut, Box)]
pub trait DeploymentHost {
    /// Returns the chain id instances deployed here sign against.
    fn chain_id(&self) -> u64;

    /// Returns whether an account with code lives at `address`.
    fn has_code(&self, address: Address) -> bool;

    /// Returns the Smart Safe implementation deployed at `address`, if any.
    fn implementation(&self, address: Address) -> Option<Arc<SmartSafe>>;

    /// Installs a fully set up proxy at its address and returns a handle to it.
    fn install(&mut self, proxy: SafeProxy) -> Rc<SafeProxy>;
}

/// An account with code.
#[derive(Clone, Debug, derive_more::Display)]
enum Account {
    #[display("implementation")]
    Implementation(Arc<SmartSafe>),
    #[display("factory")]
    Factory,
    #[display("proxy")]
    Proxy(Rc<SafeProxy>),
}

/// A single-threaded, in-memory [`DeploymentHost`].
///
/// Implementations and factories are deployed with `CREATE` semantics, so their addresses derive
/// from the deployer and its nonce.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    config: HostConfig,
    accounts: AddressHashMap<Account>,
    nonces: AddressHashMap<u64>,
}

impl InMemoryHost {
    /// Creates an empty host.
    pub fn new(config: HostConfig) -> Self {
        Self { config, ..Default::default() }
    }

    /// Returns the host configuration.
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Returns the number of contracts `deployer` has created.
    pub fn nonce(&self, deployer: Address) -> u64 {
        self.nonces.get(&deployer).copied().unwrap_or_default()
    }

    /// Deploys `implementation` from `deployer` and returns its address.
    pub fn deploy_implementation(
        &mut self,
        deployer: Address,
        implementation: SmartSafe,
    ) -> Address {
        let address = self.next_create_address(deployer);
        info!(
            target: "smart_safe::host",
            %deployer,
            %address,
            version = %implementation.config().version,
            "Deployed smart safe implementation"
        );
        self.accounts.insert(address, Account::Implementation(Arc::new(implementation)));
        address
    }

    /// Deploys a proxy factory from `deployer`, administered by `owner` and initially pointing
    /// at `implementation`.
    pub fn deploy_factory(
        &mut self,
        deployer: Address,
        owner: Address,
        implementation: Address,
    ) -> SmartSafeProxyFactory {
        let address = self.next_create_address(deployer);
        info!(target: "smart_safe::host", %deployer, %address, %owner, "Deployed proxy factory");
        self.accounts.insert(address, Account::Factory);
        SmartSafeProxyFactory::new(address, owner, implementation)
    }

    /// Returns the Smart Safe instance at `address`, if any.
    pub fn safe(&self, address: Address) -> Option<Rc<SafeProxy>> {
        match self.accounts.get(&address)? {
            Account::Proxy(proxy) => Some(Rc::clone(proxy)),
            _ => None,
        }
    }

    /// Returns the implementation the proxy at `address` delegates to.
    pub fn proxy_target(&self, address: Address) -> Option<Address> {
        self.safe(address).map(|proxy| proxy.resolve_target())
    }

    fn next_create_address(&mut self, deployer: Address) -> Address {
        let nonce = self.nonces.entry(deployer).or_default();
        let address = deployer.create(*nonce);
        *nonce += 1;
        address
    }
}

impl DeploymentHost for InMemoryHost {
    fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    fn has_code(&self, address: Address) -> bool {
        self.accounts.contains_key(&address)
    }

    fn implementation(&self, address: Address) -> Option<Arc<SmartSafe>> {
        match self.accounts.get(&address)? {
            Account::Implementation(implementation) => Some(Arc::clone(implementation)),
            _ => None,
        }
    }

    fn install(&mut self, proxy: SafeProxy) -> Rc<SafeProxy> {
        let proxy = Rc::new(proxy);
        if let Some(replaced) =
            self.accounts.insert(proxy.address(), Account::Proxy(Rc::clone(&proxy)))
        {
            debug!(
                target: "smart_safe::host",
                address = %proxy.address(),
                %replaced,
                "Overwrote account"
            );
        }
        proxy
    }
}
