use crate::{account::AccountKind, safe::SafeVersion};
use ethers::types::transaction::eip712::Eip712Error;
use smartacc_contracts::EntryPointError;
use smartacc_primitives::SignatureError;
use std::error::Error as StdError;
use thiserror::Error;

type BoxedError = Box<dyn StdError + Send + Sync>;

/// Smart account errors
#[derive(Debug, Error)]
pub enum AccountError {
    /// The signature produced by the owner has an unusable recovery byte
    #[error(transparent)]
    InvalidSignature(#[from] SignatureError),

    /// The wallet family cannot perform the requested operation
    #[error("{operation} is not supported by {kind} accounts")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: &'static str,
        /// Wallet family of the account
        kind: AccountKind,
    },

    /// No owner address was configured
    #[error("missing owner address")]
    MissingOwner,

    /// No deployment entry and no override for a required contract address
    #[error("no Safe {version} deployment of {contract} known for chain {chain_id}")]
    UnknownNetworkConfiguration {
        /// Safe version that was requested
        version: SafeVersion,
        /// Chain the account lives on
        chain_id: u64,
        /// Contract whose address could not be resolved
        contract: &'static str,
    },

    /// Chain read failed
    #[error(transparent)]
    Provider(BoxedError),

    /// Owner key failed to sign
    #[error(transparent)]
    Signer(BoxedError),

    /// Entry point call failed
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    /// Typed data could not be encoded
    #[error(transparent)]
    Eip712(#[from] Eip712Error),
}

impl AccountError {
    pub fn provider<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Provider(Box::new(err))
    }

    pub fn signer<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Signer(Box::new(err))
    }

    pub fn unsupported(operation: &'static str, kind: AccountKind) -> Self {
        Self::UnsupportedOperation { operation, kind }
    }
}
