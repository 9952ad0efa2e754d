//! Account abstraction (ERC-4337) smart account client
//!
//! Binds a [SmartAccount](smartacc_accounts::SmartAccount) to a bundler reachable over
//! JSON-RPC.

mod bundler_api;
mod client;
mod error;
mod sponsor;
mod transport;

pub use bundler_api::BundlerApiClient;
pub use client::{GasFees, SmartAccountClient};
pub use error::ClientError;
pub use sponsor::{SponsorUserOperation, SponsorUserOperationResult};
pub use transport::{build_http_transport, TransportOptions};
