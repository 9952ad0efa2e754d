//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
}

/// Signatures
pub mod signature {
    /// Placeholder signature used while estimating gas (before the real signature exists).
    /// Shaped like a 65-byte ECDSA signature so account validation pays the same gas.
    pub const DUMMY_SIGNATURE: &str = "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
    /// Recovery bytes an ECDSA signer may emit
    pub const ETHEREUM_V_VALUES: [u8; 4] = [0, 1, 27, 28];
    /// Smallest recovery byte the Safe contract accepts for ECDSA signatures
    pub const MIN_VALID_V_VALUE_FOR_SAFE_ECDSA: u8 = 27;
    /// Offset that marks a Safe signature as produced with the EIP-191 prefix (`eth_sign`)
    pub const ETH_SIGN_V_OFFSET: u8 = 4;
}

/// Safe smart account deployments (Safe 1.4.1 with the 4337 module v0.1)
pub mod safe {
    /// AddModulesLib, delegate-called from `setup` to enable the 4337 module
    pub const ADD_MODULES_LIB_ADDRESS: &str = "0x191EFDC03615B575922289DC339F4c70aC5C30Af";
    /// Safe 4337 module (also installed as the fallback handler)
    pub const SAFE_4337_MODULE_ADDRESS: &str = "0x39E54Bb2b3Aa444b4B39DEe15De3b7809c36Fc38";
    /// Safe proxy factory
    pub const SAFE_PROXY_FACTORY_ADDRESS: &str = "0x4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67";
    /// Safe singleton (implementation behind every proxy)
    pub const SAFE_SINGLETON_ADDRESS: &str = "0x41675C099F32341bf84BFc5382aF534df5C7461a";
    /// Threshold of accounts created by this library
    pub const THRESHOLD: u64 = 1;
}

/// Simple account (eth-infinitism sample account)
pub mod simple_account {
    /// Simple account factory for entry point v0.6
    pub const FACTORY_ADDRESS: &str = "0x9406Cc6185a346906296840746125a0E44976454";
}

/// Supported chains
pub mod supported_chains {
    use alloy_chains::NamedChain;

    /// Chains with a built-in Safe deployment entry
    pub const SAFE_CHAINS: [NamedChain; 2] = [NamedChain::Sepolia, NamedChain::Goerli];
}

/// Bundler client
pub mod client {
    /// Default interval between two receipt polls (in milliseconds)
    pub const RECEIPT_POLL_INTERVAL: u64 = 1_000;
    /// Default time to wait for a user operation receipt (in seconds)
    pub const RECEIPT_TIMEOUT: u64 = 60;
    /// Default request timeout of the bundler transport (in seconds)
    pub const REQUEST_TIMEOUT: u64 = 60;
}
