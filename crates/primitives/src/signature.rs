//! Recovery byte (`v`) normalization for smart contract wallet signatures
//!
//! Signers disagree on the `v` convention (`0/1` vs `27/28`). Safe accounts only accept `27/28`
//! for typed-data signatures and `31/32` for signatures over an EIP-191 prefixed hash.

use crate::constants::signature::{
    ETHEREUM_V_VALUES, ETH_SIGN_V_OFFSET, MIN_VALID_V_VALUE_FOR_SAFE_ECDSA,
};
use ethers::types::Bytes;
use std::fmt;
use thiserror::Error;

/// How the signature was produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningMethod {
    /// EIP-191 `personal_sign` over a message (`eth_sign`)
    PlainMessage,
    /// EIP-712 typed data (`eth_signTypedData`)
    TypedData,
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningMethod::PlainMessage => write!(f, "eth_sign"),
            SigningMethod::TypedData => write!(f, "eth_signTypedData"),
        }
    }
}

/// Signature errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The last byte is not a recovery byte an ECDSA signer can produce
    #[error("invalid signature: recovery byte {v} is not one of 0, 1, 27, 28")]
    InvalidRecoveryByte { v: u8 },

    /// Nothing to normalize
    #[error("invalid signature: empty signature")]
    Empty,
}

/// Rewrites the last byte (`v`) of `signature` to the convention the Safe contract expects.
///
/// Everything except the last byte is returned unchanged.
pub fn normalize_signature(
    method: SigningMethod,
    signature: &[u8],
) -> Result<Bytes, SignatureError> {
    let (v, rest) = signature.split_last().ok_or(SignatureError::Empty)?;
    let mut v = *v;

    if !ETHEREUM_V_VALUES.contains(&v) {
        return Err(SignatureError::InvalidRecoveryByte { v });
    }

    if v < MIN_VALID_V_VALUE_FOR_SAFE_ECDSA {
        v += MIN_VALID_V_VALUE_FOR_SAFE_ECDSA;
    }
    if method == SigningMethod::PlainMessage {
        v += ETH_SIGN_V_OFFSET;
    }

    let mut normalized = rest.to_vec();
    normalized.push(v);
    Ok(normalized.into())
}
