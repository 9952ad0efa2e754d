use smartacc_accounts::AccountError;
use smartacc_primitives::{UserOperation, UserOperationHash};
use std::{error::Error as StdError, time::Duration};
use thiserror::Error;

/// Smart account client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The smart account failed (signing, nonce, init code)
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Bundler request failed
    #[error(transparent)]
    Transport(#[from] jsonrpsee::core::ClientError),

    /// Bundler rejected gas estimation; carries the user operation that was estimated
    #[error("failed to estimate gas of user operation {user_operation:#?}")]
    EstimateUserOperationGas {
        user_operation: Box<UserOperation>,
        #[source]
        source: jsonrpsee::core::ClientError,
    },

    /// Sponsorship hook failed
    #[error("failed to sponsor user operation")]
    Sponsor {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// No receipt before the deadline
    #[error("no receipt for user operation {hash} after {timeout:?}")]
    ReceiptTimeout { hash: UserOperationHash, timeout: Duration },

    /// Bundler answered with something that is not understood
    #[error("invalid bundler response: {inner}")]
    InvalidResponse { inner: String },
}
