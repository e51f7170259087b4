//! The deterministic Smart Safe proxy factory.

use std::rc::Rc;

use alloy_primitives::{Address, B256};
use tracing::{debug, info};

use crate::{
    contracts::{
        minimal_proxy::creation_code_hash,
        proxy_factory::{ISmartSafeProxyFactory, ProxyFactoryEvent},
    },
    DeploymentHost, FactoryError, SafeProxy,
};

/// Returns the CREATE2 address of a minimal proxy to `implementation` deployed by `factory` with
/// `salt`.
pub fn compute_proxy_address(factory: Address, implementation: Address, salt: B256) -> Address {
    factory.create2(salt, creation_code_hash(implementation))
}

/// Deploys Smart Safe proxies at addresses derived from a salt and the current implementation
/// pointer.
///
/// The factory owner may move the pointer. Proxies already deployed keep the target they were
/// created with, only future deployments are affected.
#[derive(Debug)]
pub struct SmartSafeProxyFactory {
    address: Address,
    owner: Address,
    implementation: Address,
    events: Vec<ProxyFactoryEvent>,
}

impl SmartSafeProxyFactory {
    /// Creates a factory living at `address`, administered by `owner` and initially deploying
    /// proxies to `implementation`.
    pub const fn new(address: Address, owner: Address, implementation: Address) -> Self {
        Self { address, owner, implementation, events: Vec::new() }
    }

    /// Returns the factory address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the factory owner.
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the implementation future proxies delegate to.
    pub const fn smart_safe_implementation(&self) -> Address {
        self.implementation
    }

    /// Returns the address [`Self::deploy_smart_safe_proxy`] would deploy to with `salt` under
    /// the current implementation pointer.
    pub fn compute_address(&self, salt: B256) -> Address {
        compute_proxy_address(self.address, self.implementation, salt)
    }

    /// Deploys a proxy at [`Self::compute_address`] and sets it up with `owners` and `threshold`.
    ///
    /// The proxy is installed in `host` only once its setup succeeded, so it is never observable
    /// Uninitialized, and a failed deployment leaves nothing behind. Emits exactly one
    /// `Deployed` event on success.
    ///
    /// # Errors
    ///
    /// - [`FactoryError::SaltAlreadyUsed`] if the derived address already has code
    /// - [`FactoryError::ImplementationNotDeployed`] if the implementation pointer has no
    ///   implementation behind it
    /// - [`FactoryError::Setup`] if the owner configuration is rejected
    pub fn deploy_smart_safe_proxy<H: DeploymentHost>(
        &mut self,
        mut host: H,
        owners: Vec<Address>,
        threshold: usize,
        salt: B256,
    ) -> Result<Address, FactoryError> {
        let implementation = self.implementation;
        let address = compute_proxy_address(self.address, implementation, salt);
        if host.has_code(address) {
            return Err(FactoryError::SaltAlreadyUsed { salt, address });
        }
        let logic = host
            .implementation(implementation)
            .ok_or(FactoryError::ImplementationNotDeployed(implementation))?;

        let proxy = SafeProxy::new(address, host.chain_id(), implementation, logic);
        proxy.setup(owners, threshold).inspect_err(|error| {
            debug!(target: "smart_safe::factory", %address, %error, "Proxy setup failed");
        })?;
        let proxy: Rc<SafeProxy> = host.install(proxy);

        self.events.push(ProxyFactoryEvent::Deployed(ISmartSafeProxyFactory::Deployed {
            proxy: proxy.address(),
        }));
        info!(
            target: "smart_safe::factory",
            factory = %self.address,
            proxy = %address,
            %implementation,
            %salt,
            "Deployed smart safe proxy"
        );
        Ok(address)
    }

    /// Points future deployments at `implementation`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Unauthorized`] unless `caller` is the factory owner.
    pub fn set_smart_safe_implementation(
        &mut self,
        caller: Address,
        implementation: Address,
    ) -> Result<(), FactoryError> {
        if caller != self.owner {
            return Err(FactoryError::Unauthorized { caller });
        }
        let previous = core::mem::replace(&mut self.implementation, implementation);
        self.events.push(ProxyFactoryEvent::SmartSafeImplementationSet(
            ISmartSafeProxyFactory::SmartSafeImplementationSet {
                previous,
                current: implementation,
            },
        ));
        info!(
            target: "smart_safe::factory",
            factory = %self.address,
            %previous,
            current = %implementation,
            "Smart safe implementation updated"
        );
        Ok(())
    }

    /// Returns the events emitted so far.
    pub fn events(&self) -> &[ProxyFactoryEvent] {
        &self.events
    }

    /// Takes the events emitted so far.
    pub fn drain_events(&mut self) -> Vec<ProxyFactoryEvent> {
        core::mem::take(&mut self.events)
    }
}
