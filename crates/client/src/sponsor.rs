use async_trait::async_trait;
use ethers::types::{Address, Bytes, U256};
use smartacc_primitives::UserOperation;
use std::error::Error as StdError;

/// Paymaster data and gas limits returned by a sponsor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SponsorUserOperationResult {
    pub paymaster_and_data: Bytes,
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
}

/// Hook asked to sponsor a user operation before it is signed.
///
/// When a client has a sponsor, its result replaces bundler gas estimation.
#[async_trait]
pub trait SponsorUserOperation: Send + Sync {
    async fn sponsor_user_operation(
        &self,
        user_operation: &UserOperation,
        entry_point: &Address,
    ) -> Result<SponsorUserOperationResult, Box<dyn StdError + Send + Sync>>;
}
