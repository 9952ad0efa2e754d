//! Safe deployments per network and account configuration

use crate::error::AccountError;
use alloy_chains::Chain;
use ethers::types::{Address, U256};
use lazy_static::lazy_static;
use smartacc_primitives::constants::{entry_point, safe, supported_chains::SAFE_CHAINS};
use std::{collections::HashMap, str::FromStr};
use strum_macros::{Display, EnumString, EnumVariantNames};
use tracing::debug;

/// Safe contracts versions
#[derive(
    Clone, Copy, Debug, Default, Display, EnumString, EnumVariantNames, PartialEq, Eq, Hash,
)]
pub enum SafeVersion {
    /// Safe 1.4.1 with the 4337 module v0.1
    #[default]
    #[strum(serialize = "1.4.1")]
    V1_4_1,
}

/// Addresses of the contracts a Safe account depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeAddresses {
    /// Library delegate-called during setup to enable modules
    pub add_modules_lib: Address,
    /// 4337 module, also the fallback handler of the account
    pub safe_4337_module: Address,
    /// Proxy factory deploying the account
    pub safe_proxy_factory: Address,
    /// Singleton the proxy delegates to
    pub safe_singleton: Address,
}

/// Caller supplied addresses taking precedence over the registry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SafeAddressOverrides {
    pub add_modules_lib: Option<Address>,
    pub safe_4337_module: Option<Address>,
    pub safe_proxy_factory: Option<Address>,
    pub safe_singleton: Option<Address>,
}

fn parse_address(addr: &str) -> Address {
    Address::from_str(addr).unwrap_or_default()
}

lazy_static! {
    static ref DEFAULT_DEPLOYMENTS: HashMap<(SafeVersion, u64), SafeAddresses> = {
        let addresses = SafeAddresses {
            add_modules_lib: parse_address(safe::ADD_MODULES_LIB_ADDRESS),
            safe_4337_module: parse_address(safe::SAFE_4337_MODULE_ADDRESS),
            safe_proxy_factory: parse_address(safe::SAFE_PROXY_FACTORY_ADDRESS),
            safe_singleton: parse_address(safe::SAFE_SINGLETON_ADDRESS),
        };
        SAFE_CHAINS
            .iter()
            .map(|chain| ((SafeVersion::V1_4_1, *chain as u64), addresses))
            .collect()
    };
}

/// Known Safe deployments keyed by version and chain id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRegistry {
    deployments: HashMap<(SafeVersion, u64), SafeAddresses>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self { deployments: DEFAULT_DEPLOYMENTS.clone() }
    }
}

impl NetworkRegistry {
    /// Registry without any deployment
    pub fn empty() -> Self {
        Self { deployments: HashMap::new() }
    }

    /// Adds or replaces the deployment of `version` on `chain_id`
    pub fn insert(
        &mut self,
        version: SafeVersion,
        chain_id: u64,
        addresses: SafeAddresses,
    ) -> Option<SafeAddresses> {
        self.deployments.insert((version, chain_id), addresses)
    }

    pub fn get(&self, version: SafeVersion, chain_id: u64) -> Option<&SafeAddresses> {
        self.deployments.get(&(version, chain_id))
    }

    /// Resolves every contract address, preferring `overrides` field by field
    pub fn resolve(
        &self,
        version: SafeVersion,
        chain_id: u64,
        overrides: &SafeAddressOverrides,
    ) -> Result<SafeAddresses, AccountError> {
        let deployment = self.get(version, chain_id);
        let pick = |over: Option<Address>,
                    known: fn(&SafeAddresses) -> Address,
                    contract: &'static str| {
            over.or_else(|| deployment.map(known)).ok_or(
                AccountError::UnknownNetworkConfiguration { version, chain_id, contract },
            )
        };

        Ok(SafeAddresses {
            add_modules_lib: pick(
                overrides.add_modules_lib,
                |a| a.add_modules_lib,
                "AddModulesLib",
            )?,
            safe_4337_module: pick(
                overrides.safe_4337_module,
                |a| a.safe_4337_module,
                "Safe4337Module",
            )?,
            safe_proxy_factory: pick(
                overrides.safe_proxy_factory,
                |a| a.safe_proxy_factory,
                "SafeProxyFactory",
            )?,
            safe_singleton: pick(overrides.safe_singleton, |a| a.safe_singleton, "Safe")?,
        })
    }
}

/// User facing configuration of a Safe account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeAccountConfig {
    pub chain: Chain,
    pub entry_point: Address,
    pub version: SafeVersion,
    pub salt_nonce: U256,
    pub overrides: SafeAddressOverrides,
}

impl SafeAccountConfig {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            entry_point: parse_address(entry_point::ADDRESS),
            version: SafeVersion::default(),
            salt_nonce: U256::zero(),
            overrides: SafeAddressOverrides::default(),
        }
    }

    pub fn entry_point(mut self, entry_point: Address) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn version(mut self, version: SafeVersion) -> Self {
        self.version = version;
        self
    }

    pub fn salt_nonce(mut self, salt_nonce: U256) -> Self {
        self.salt_nonce = salt_nonce;
        self
    }

    pub fn overrides(mut self, overrides: SafeAddressOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Binds the configuration to `owner`, resolving contract addresses from `registry`.
    ///
    /// Performs no chain I/O.
    pub fn resolve(
        &self,
        owner: Address,
        registry: &NetworkRegistry,
    ) -> Result<SafeAccountParams, AccountError> {
        if owner.is_zero() {
            return Err(AccountError::MissingOwner);
        }

        let chain_id = self.chain.id();
        let addresses = registry.resolve(self.version, chain_id, &self.overrides)?;
        debug!("Resolved Safe {} contracts on chain {chain_id}: {addresses:?}", self.version);

        Ok(SafeAccountParams {
            owner,
            entry_point: self.entry_point,
            chain_id,
            addresses,
            salt_nonce: self.salt_nonce,
        })
    }
}

/// Fully resolved, immutable parameters of a Safe account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeAccountParams {
    pub owner: Address,
    pub entry_point: Address,
    pub chain_id: u64,
    pub addresses: SafeAddresses,
    pub salt_nonce: U256,
}
