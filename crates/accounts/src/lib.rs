//! Account abstraction (ERC-4337) smart account adapters
//!
//! Every wallet family implements [SmartAccount](account::SmartAccount). Adapters are built once
//! from an owner key and an immutable configuration; they derive the counterfactual address at
//! construction and never cache chain state afterwards.

pub mod account;
mod error;
pub mod safe;
pub mod simple;

pub use account::{AccountKind, Call, SmartAccount};
pub use error::AccountError;
pub use safe::{
    NetworkRegistry, SafeAccountConfig, SafeAccountParams, SafeAddressOverrides, SafeAddresses,
    SafeSmartAccount, SafeVersion,
};
pub use simple::{SimpleAccountConfig, SimpleSmartAccount};
