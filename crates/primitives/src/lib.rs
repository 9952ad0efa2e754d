//! Account abstraction (ERC-4337) smart account primitive types
//!
//! This crate contains the user operation model, signature helpers, the owner credential and
//! constants shared by every smart account implementation.

pub mod constants;
pub mod provider;
pub mod signature;
mod user_operation;
mod utils;
mod wallet;

pub use signature::{normalize_signature, SignatureError, SigningMethod};
pub use user_operation::{
    UserOperation, UserOperationByHash, UserOperationGasEstimation, UserOperationHash,
    UserOperationPartial, UserOperationReceipt,
};
pub use utils::{
    as_checksum_addr, get_address, pack_factory_data, unpack_factory_data, word_from_address,
};
pub use wallet::Wallet;
