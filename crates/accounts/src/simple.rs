//! eth-infinitism `SimpleAccount` deployed by `SimpleAccountFactory`

use crate::{
    account::{AccountKind, Call, SmartAccount},
    error::AccountError,
};
use alloy_chains::Chain;
use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    signers::Signer,
    types::{transaction::eip712::TypedData, Address, Bytes, U256},
};
use smartacc_contracts::{CreateAccountCall, EntryPoint, ExecuteCall, SimpleAccountFactory};
use smartacc_primitives::{
    constants::{entry_point, simple_account},
    pack_factory_data, UserOperation,
};
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, trace};

/// Configuration of a simple account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleAccountConfig {
    pub chain: Chain,
    pub entry_point: Address,
    pub factory: Address,
    /// Salt passed to the factory
    pub index: U256,
}

impl SimpleAccountConfig {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            entry_point: Address::from_str(entry_point::ADDRESS).unwrap_or_default(),
            factory: Address::from_str(simple_account::FACTORY_ADDRESS).unwrap_or_default(),
            index: U256::zero(),
        }
    }

    pub fn entry_point(mut self, entry_point: Address) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn factory(mut self, factory: Address) -> Self {
        self.factory = factory;
        self
    }

    pub fn index(mut self, index: U256) -> Self {
        self.index = index;
        self
    }
}

#[derive(Clone)]
pub struct SimpleSmartAccount<M: Middleware + 'static, S: Signer> {
    eth_client: Arc<M>,
    owner: S,
    config: SimpleAccountConfig,
    address: Address,
    entry_point: EntryPoint<M>,
}

impl<M: Middleware + 'static, S: Signer> fmt::Debug for SimpleSmartAccount<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleSmartAccount")
            .field("address", &self.address)
            .field("config", &self.config)
            .finish()
    }
}

impl<M: Middleware + 'static, S: Signer> SimpleSmartAccount<M, S> {
    /// Asks the factory for the counterfactual address of the account
    pub async fn new(
        eth_client: Arc<M>,
        owner: S,
        config: SimpleAccountConfig,
    ) -> Result<Self, AccountError> {
        if owner.address().is_zero() {
            return Err(AccountError::MissingOwner);
        }

        let factory = SimpleAccountFactory::new(config.factory, eth_client.clone());
        let address = factory
            .get_address(owner.address(), config.index)
            .call()
            .await
            .map_err(AccountError::provider)?;
        debug!("Simple account of owner {:?}: {address:?}", owner.address());

        let entry_point = EntryPoint::new(eth_client.clone(), config.entry_point);
        Ok(Self { eth_client, owner, config, address, entry_point })
    }

    pub fn owner(&self) -> Address {
        self.owner.address()
    }
}

#[async_trait]
impl<M: Middleware + 'static, S: Signer + 'static> SmartAccount for SimpleSmartAccount<M, S> {
    fn kind(&self) -> AccountKind {
        AccountKind::Simple
    }

    fn address(&self) -> Address {
        self.address
    }

    fn entry_point(&self) -> Address {
        self.config.entry_point
    }

    fn chain_id(&self) -> u64 {
        self.config.chain.id()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, AccountError> {
        let signature = self.owner.sign_message(message).await.map_err(AccountError::signer)?;
        Ok(signature.to_vec().into())
    }

    async fn sign_typed_data(&self, data: &TypedData) -> Result<Bytes, AccountError> {
        let signature = self.owner.sign_typed_data(data).await.map_err(AccountError::signer)?;
        Ok(signature.to_vec().into())
    }

    async fn sign_user_operation(&self, uo: &UserOperation) -> Result<Bytes, AccountError> {
        let uo_hash = uo.hash(&self.config.entry_point, self.chain_id());
        let signature =
            self.owner.sign_message(uo_hash.0.as_bytes()).await.map_err(AccountError::signer)?;
        Ok(signature.to_vec().into())
    }

    async fn get_init_code(&self) -> Result<Bytes, AccountError> {
        let code =
            self.eth_client.get_code(self.address, None).await.map_err(AccountError::provider)?;

        if !code.is_empty() {
            trace!("Simple account {:?} is deployed, no init code needed", self.address);
            return Ok(Bytes::default());
        }

        let create_account =
            CreateAccountCall { owner: self.owner.address(), salt: self.config.index }.encode();
        Ok(pack_factory_data(self.config.factory, &create_account.into()))
    }

    async fn get_nonce(&self) -> Result<U256, AccountError> {
        Ok(self.entry_point.get_nonce(&self.address, U256::zero()).await?)
    }

    fn encode_call_data(&self, call: &Call) -> Result<Bytes, AccountError> {
        Ok(ExecuteCall { dest: call.to, value: call.value, func: call.data.clone() }.encode().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_chains::NamedChain;
    use ethers::{
        abi::AbiDecode,
        providers::{MockProvider, Provider},
        signers::LocalWallet,
        types::Signature,
        utils::hash_message,
    };
    use smartacc_primitives::{unpack_factory_data, Wallet};

    const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    async fn simple_account(
    ) -> eyre::Result<(SimpleSmartAccount<Provider<MockProvider>, LocalWallet>, MockProvider)> {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::from(Address::repeat_byte(0x11).encode()))?;

        let owner = Wallet::from_key(OWNER_KEY, 11_155_111)?.signer;
        let account = SimpleSmartAccount::new(
            Arc::new(provider),
            owner,
            SimpleAccountConfig::new(NamedChain::Sepolia.into()),
        )
        .await?;
        Ok((account, mock))
    }

    #[test]
    fn default_config_points_at_deployed_contracts() {
        let config = SimpleAccountConfig::new(NamedChain::Sepolia.into());
        assert!(!config.entry_point.is_zero());
        assert!(!config.factory.is_zero());
        assert_eq!(config.index, U256::zero());
    }

    #[tokio::test]
    async fn address_comes_from_factory() -> eyre::Result<()> {
        let (account, _mock) = simple_account().await?;
        assert_eq!(account.kind(), AccountKind::Simple);
        assert_eq!(account.address(), Address::repeat_byte(0x11));
        Ok(())
    }

    #[tokio::test]
    async fn init_code_creates_account_until_deployed() -> eyre::Result<()> {
        let (account, mock) = simple_account().await?;

        mock.push::<Bytes, _>(Bytes::default())?;
        let init_code = account.get_init_code().await?;
        let (factory, data) = unpack_factory_data(&init_code);
        assert_eq!(factory, SimpleAccountConfig::new(NamedChain::Sepolia.into()).factory);
        let call = CreateAccountCall::decode(&data)?;
        assert_eq!(call.owner, account.owner());
        assert_eq!(call.salt, U256::zero());

        mock.push::<Bytes, _>("0x6080".parse::<Bytes>()?)?;
        assert!(account.get_init_code().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn user_operation_signed_over_hash() -> eyre::Result<()> {
        let (account, _mock) = simple_account().await?;
        let uo = UserOperation::default().sender(account.address()).nonce(U256::one());

        let signature = account.sign_user_operation(&uo).await?;
        let uo_hash = uo.hash(&account.entry_point(), 11_155_111);
        let recovered =
            Signature::try_from(&signature[..])?.recover(hash_message(uo_hash.0))?;
        assert_eq!(recovered, account.owner());
        Ok(())
    }

    #[tokio::test]
    async fn call_data_targets_execute() -> eyre::Result<()> {
        let (account, _mock) = simple_account().await?;
        let data = "0x1234".parse::<Bytes>()?;
        let call = Call::new(Address::repeat_byte(0x22), U256::from(5u64), data);

        let decoded = ExecuteCall::decode(account.encode_call_data(&call)?)?;
        assert_eq!(decoded.dest, call.to);
        assert_eq!(decoded.func, call.data);
        Ok(())
    }

    #[tokio::test]
    async fn deploy_call_data_is_unsupported() -> eyre::Result<()> {
        let (account, _mock) = simple_account().await?;
        assert!(matches!(
            account.encode_deploy_call_data(&"0x60806040".parse::<Bytes>()?),
            Err(AccountError::UnsupportedOperation { kind: AccountKind::Simple, .. })
        ));
        Ok(())
    }
}
