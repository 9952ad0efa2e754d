use crate::utils::{parse_address, parse_chain, parse_safe_version, parse_u256};
use alloy_chains::{Chain, NamedChain};
use clap::Parser;
use ethers::types::{Address, U256};
use expanded_pathbuf::ExpandedPathBuf;
use smartacc_accounts::{SafeAccountConfig, SafeAddressOverrides, SafeVersion};
use smartacc_primitives::constants::entry_point;
use std::path::PathBuf;

/// Safe account CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct SafeArgs {
    /// The chain the account lives on (name or id).
    #[clap(long, default_value_t = Chain::from(NamedChain::Sepolia), value_parser = parse_chain)]
    pub chain: Chain,

    /// The entry point the account is bound to.
    #[clap(long, default_value = entry_point::ADDRESS, value_parser = parse_address)]
    pub entry_point: Address,

    /// The Safe contracts version.
    #[clap(long, default_value = "1.4.1", value_parser = parse_safe_version)]
    pub safe_version: SafeVersion,

    /// Salt nonce of the proxy deployment.
    #[clap(long, default_value = "0", value_parser = parse_u256)]
    pub salt_nonce: U256,

    /// Overrides the AddModulesLib address.
    #[clap(long, value_parser = parse_address)]
    pub add_modules_lib: Option<Address>,

    /// Overrides the Safe 4337 module address.
    #[clap(long, value_parser = parse_address)]
    pub safe_4337_module: Option<Address>,

    /// Overrides the Safe proxy factory address.
    #[clap(long, value_parser = parse_address)]
    pub safe_proxy_factory: Option<Address>,

    /// Overrides the Safe singleton address.
    #[clap(long, value_parser = parse_address)]
    pub safe_singleton: Option<Address>,
}

impl SafeArgs {
    /// Account configuration described by the args
    pub fn to_config(&self) -> SafeAccountConfig {
        SafeAccountConfig::new(self.chain)
            .entry_point(self.entry_point)
            .version(self.safe_version)
            .salt_nonce(self.salt_nonce)
            .overrides(SafeAddressOverrides {
                add_modules_lib: self.add_modules_lib,
                safe_4337_module: self.safe_4337_module,
                safe_proxy_factory: self.safe_proxy_factory,
                safe_singleton: self.safe_singleton,
            })
    }
}

/// Execution client CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct EthClientArgs {
    /// Ethereum execution client RPC endpoint.
    #[clap(long, default_value = "http://127.0.0.1:8545")]
    pub eth_client_address: String,
}

/// Owner given by its address
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct OwnerArgs {
    /// The address of the account owner.
    #[clap(long, value_parser = parse_address)]
    pub owner: Address,
}

/// Owner given by its key
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct SignerArgs {
    /// Path to the mnemonic file of the account owner.
    #[clap(long)]
    pub mnemonic_file: PathBuf,
}

/// Create owner CLI args
#[derive(Debug, Clone, Parser)]
pub struct CreateOwnerArgs {
    /// The path where the owner mnemonic will be stored.
    #[clap(long, short)]
    pub output_path: Option<ExpandedPathBuf>,

    /// The chain id.
    #[clap(long, default_value = "1")]
    pub chain_id: u64,
}
