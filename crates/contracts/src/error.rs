use ethers::{prelude::ContractError, providers::Middleware};
use std::error::Error as StdError;
use thiserror::Error;

/// Entry point errors
#[derive(Debug, Error)]
pub enum EntryPointError {
    /// Contract call failed, the provider or decoding error is kept as the source
    #[error("entry point call {method} failed")]
    Call {
        /// Name of the contract method
        method: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl EntryPointError {
    pub fn from_contract_error<M: Middleware + 'static>(
        method: &'static str,
        err: ContractError<M>,
    ) -> Self {
        Self::Call { method, source: Box::new(err) }
    }
}
