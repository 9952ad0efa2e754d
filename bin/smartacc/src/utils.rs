use alloy_chains::Chain;
use dirs::home_dir;
use ethers::types::{Address, U256};
use expanded_pathbuf::ExpandedPathBuf;
use smartacc_accounts::SafeVersion;
use std::str::FromStr;

/// Unwrap path or returns home directory
pub fn unwrap_path_or_home(path: Option<ExpandedPathBuf>) -> eyre::Result<ExpandedPathBuf> {
    if let Some(path) = path {
        Ok(path)
    } else {
        home_dir()
            .map(|h| h.join(".smartacc"))
            .ok_or_else(|| eyre::eyre!("Get Home directory error"))
            .map(ExpandedPathBuf)
    }
}

/// Parses address from string
pub fn parse_address(s: &str) -> Result<Address, String> {
    Address::from_str(s).map_err(|_| format!("String {s} is not a valid address"))
}

/// Parses U256 from string
pub fn parse_u256(s: &str) -> Result<U256, String> {
    U256::from_str_radix(s, 10).map_err(|_| format!("String {s} is not a valid U256"))
}

/// Parses chain from its name or id
pub fn parse_chain(s: &str) -> Result<Chain, String> {
    Chain::from_str(s).map_err(|_| format!("String {s} is not a valid chain"))
}

/// Parses Safe version from string
pub fn parse_safe_version(s: &str) -> Result<SafeVersion, String> {
    SafeVersion::from_str(s).map_err(|_| format!("String {s} is not a supported Safe version"))
}
