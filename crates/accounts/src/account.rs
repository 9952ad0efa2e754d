//! Capability set shared by every smart account family

use crate::error::AccountError;
use async_trait::async_trait;
use ethers::types::{
    transaction::{eip2718::TypedTransaction, eip712::TypedData},
    Address, Bytes, U256,
};
use smartacc_primitives::{constants::signature::DUMMY_SIGNATURE, UserOperation};
use std::str::FromStr;
use strum_macros::{Display, EnumString, EnumVariantNames};

/// Smart account families
#[derive(Clone, Copy, Debug, Display, EnumString, EnumVariantNames, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum AccountKind {
    /// Safe with the 4337 module
    Safe,
    /// eth-infinitism `SimpleAccount`
    Simple,
    /// Alchemy light account
    Light,
    /// ZeroDev kernel
    Kernel,
    /// Biconomy smart account
    Biconomy,
    /// Biconomy nexus
    Nexus,
    /// Thirdweb account
    Thirdweb,
    /// Trust wallet account
    Trust,
}

/// Call executed by the smart account
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Call {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl Call {
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value, data }
    }
}

/// Operations every smart account adapter provides.
///
/// Only `get_init_code`, `get_nonce` and the signing methods suspend: the former two read the
/// chain on every call, the latter hand the payload to the owner key.
#[async_trait]
pub trait SmartAccount: Send + Sync {
    /// Wallet family of the account
    fn kind(&self) -> AccountKind;

    /// Counterfactual address of the account
    fn address(&self) -> Address;

    /// Entry point the account is bound to
    fn entry_point(&self) -> Address;

    /// Chain the account lives on
    fn chain_id(&self) -> u64;

    /// Signs a plain message on behalf of the account
    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, AccountError>;

    /// Signs EIP-712 typed data on behalf of the account
    async fn sign_typed_data(&self, data: &TypedData) -> Result<Bytes, AccountError>;

    /// Smart accounts cannot sign native transactions
    async fn sign_transaction(&self, _tx: &TypedTransaction) -> Result<Bytes, AccountError> {
        Err(AccountError::unsupported("sign_transaction", self.kind()))
    }

    /// Produces the signature field of `uo`
    async fn sign_user_operation(&self, uo: &UserOperation) -> Result<Bytes, AccountError>;

    /// Init code of the account, empty once the account is deployed
    async fn get_init_code(&self) -> Result<Bytes, AccountError>;

    /// Current nonce of the account on its entry point
    async fn get_nonce(&self) -> Result<U256, AccountError>;

    /// Encodes `call` as the call data of a user operation
    fn encode_call_data(&self, call: &Call) -> Result<Bytes, AccountError>;

    /// Encodes the deployment of a contract with creation code `bytecode`
    fn encode_deploy_call_data(&self, _bytecode: &Bytes) -> Result<Bytes, AccountError> {
        Err(AccountError::unsupported("encode_deploy_call_data", self.kind()))
    }

    /// Placeholder signature for gas estimation
    fn dummy_signature(&self) -> Bytes {
        Bytes::from_str(DUMMY_SIGNATURE).unwrap_or_default()
    }
}
