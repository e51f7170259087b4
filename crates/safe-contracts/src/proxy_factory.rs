//! ABI of the Smart Safe proxy factory.

use alloy_sol_types::sol;

pub use ISmartSafeProxyFactory::{
    ISmartSafeProxyFactoryErrors as ProxyFactoryError,
    ISmartSafeProxyFactoryEvents as ProxyFactoryEvent,
};

sol! {
    /// Deploys Smart Safe minimal proxies at CREATE2 addresses.
    #[derive(Debug, PartialEq, Eq)]
    interface ISmartSafeProxyFactory {
        /// Returns the address a proxy deployed with `salt` would get under the current
        /// implementation.
        function computeAddress(bytes32 salt) external view returns (address);

        /// Deploys a proxy at `computeAddress(salt)` and sets it up with `owners` and
        /// `threshold`.
        function deploySmartSafeProxy(
            address[] calldata owners,
            uint256 threshold,
            bytes32 salt
        ) external returns (address);

        /// Points future deployments at a new implementation. Owner only.
        function setSmartSafeImplementation(address implementation) external;

        /// Emitted once per deployed proxy.
        event Deployed(address proxy);

        /// Emitted when the owner changes the implementation pointer.
        event SmartSafeImplementationSet(address previous, address current);

        error SaltAlreadyUsed(bytes32 salt);
        error Unauthorized(address caller);
        error ImplementationNotDeployed(address implementation);
        error SetupFailed(bytes reason);
    }
}
