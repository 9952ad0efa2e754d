//! Safe smart account (Safe singleton + 4337 module)

mod account;
mod address;
mod config;
mod eip712;
mod initializer;

pub use account::SafeSmartAccount;
pub use address::{compute_safe_address, derive_safe_address};
pub use config::{
    NetworkRegistry, SafeAccountConfig, SafeAccountParams, SafeAddressOverrides, SafeAddresses,
    SafeVersion,
};
pub use eip712::{concat_sorted_signatures, OwnerSignature, SafeMessage, SafeOperation};
pub use initializer::{build_init_code, build_initializer};
