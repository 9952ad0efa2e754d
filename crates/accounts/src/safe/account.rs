use super::{
    address::derive_safe_address,
    config::{NetworkRegistry, SafeAccountConfig, SafeAccountParams},
    eip712::{concat_sorted_signatures, OwnerSignature, SafeMessage, SafeOperation},
    initializer::build_init_code,
};
use crate::{
    account::{AccountKind, Call, SmartAccount},
    error::AccountError,
};
use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    signers::Signer,
    types::{
        transaction::eip712::{Eip712, TypedData},
        Address, Bytes, U256,
    },
    utils::{hash_message, to_checksum},
};
use smartacc_contracts::{EntryPoint, ExecuteUserOpCall};
use smartacc_primitives::{normalize_signature, SigningMethod, UserOperation};
use std::{fmt, sync::Arc};
use tracing::trace;

/// `Call` operation of the Safe module (as opposed to `DelegateCall`)
const CALL_OPERATION: u8 = 0;

/// Safe account driven by a single owner through the 4337 module
#[derive(Clone)]
pub struct SafeSmartAccount<M: Middleware + 'static, S: Signer> {
    eth_client: Arc<M>,
    owner: S,
    params: SafeAccountParams,
    address: Address,
    entry_point: EntryPoint<M>,
}

impl<M: Middleware + 'static, S: Signer> fmt::Debug for SafeSmartAccount<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeSmartAccount")
            .field("address", &self.address)
            .field("params", &self.params)
            .finish()
    }
}

impl<M: Middleware + 'static, S: Signer> SafeSmartAccount<M, S> {
    /// Resolves the configuration and derives the counterfactual address of the account.
    ///
    /// Fails with [AccountError::UnknownNetworkConfiguration] before reading the chain if a
    /// contract address cannot be resolved.
    pub async fn new(
        eth_client: Arc<M>,
        owner: S,
        config: &SafeAccountConfig,
        registry: &NetworkRegistry,
    ) -> Result<Self, AccountError> {
        let params = config.resolve(owner.address(), registry)?;
        let address = derive_safe_address(eth_client.clone(), &params).await?;
        Ok(Self::from_parts(eth_client, owner, params, address))
    }

    /// Account at an already known address
    pub fn from_parts(
        eth_client: Arc<M>,
        owner: S,
        params: SafeAccountParams,
        address: Address,
    ) -> Self {
        let entry_point = EntryPoint::new(eth_client.clone(), params.entry_point);
        Self { eth_client, owner, params, address, entry_point }
    }

    pub fn params(&self) -> &SafeAccountParams {
        &self.params
    }

    pub fn owner(&self) -> Address {
        self.owner.address()
    }

    fn safe_message(&self, message: Vec<u8>) -> SafeMessage {
        SafeMessage::new(self.params.chain_id, self.address, message)
    }
}

#[async_trait]
impl<M: Middleware + 'static, S: Signer + 'static> SmartAccount for SafeSmartAccount<M, S> {
    fn kind(&self) -> AccountKind {
        AccountKind::Safe
    }

    fn address(&self) -> Address {
        self.address
    }

    fn entry_point(&self) -> Address {
        self.params.entry_point
    }

    fn chain_id(&self) -> u64 {
        self.params.chain_id
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, AccountError> {
        let safe_message = self.safe_message(hash_message(message).as_bytes().to_vec());
        let hash = safe_message.encode_eip712()?;

        let signature = self.owner.sign_message(hash).await.map_err(AccountError::signer)?;
        Ok(normalize_signature(SigningMethod::PlainMessage, &signature.to_vec())?)
    }

    async fn sign_typed_data(&self, data: &TypedData) -> Result<Bytes, AccountError> {
        let safe_message = self.safe_message(data.encode_eip712()?.to_vec());

        let signature =
            self.owner.sign_typed_data(&safe_message).await.map_err(AccountError::signer)?;
        Ok(normalize_signature(SigningMethod::TypedData, &signature.to_vec())?)
    }

    async fn sign_user_operation(&self, uo: &UserOperation) -> Result<Bytes, AccountError> {
        let safe_op = SafeOperation {
            safe: self.address,
            ..SafeOperation::new(
                uo,
                self.params.entry_point,
                self.params.chain_id,
                self.params.addresses.safe_4337_module,
            )
        };

        let signature = self.owner.sign_typed_data(&safe_op).await.map_err(AccountError::signer)?;
        let signature = normalize_signature(SigningMethod::TypedData, &signature.to_vec())?;

        Ok(concat_sorted_signatures(vec![OwnerSignature {
            signer: to_checksum(&self.owner.address(), None),
            data: signature,
        }]))
    }

    async fn get_init_code(&self) -> Result<Bytes, AccountError> {
        let code =
            self.eth_client.get_code(self.address, None).await.map_err(AccountError::provider)?;

        if !code.is_empty() {
            trace!("Safe {:?} is deployed, no init code needed", self.address);
            return Ok(Bytes::default());
        }

        trace!("Safe {:?} is not deployed yet", self.address);
        build_init_code(&self.params)
    }

    async fn get_nonce(&self) -> Result<U256, AccountError> {
        Ok(self.entry_point.get_nonce(&self.address, U256::zero()).await?)
    }

    fn encode_call_data(&self, call: &Call) -> Result<Bytes, AccountError> {
        Ok(ExecuteUserOpCall {
            to: call.to,
            value: call.value,
            data: call.data.clone(),
            operation: CALL_OPERATION,
        }
        .encode()
        .into())
    }
}
