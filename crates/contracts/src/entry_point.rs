pub use super::{error::EntryPointError, gen::EntryPointAPI};
use ethers::{
    providers::Middleware,
    types::{Address, U256},
};
use std::sync::Arc;
use tracing::trace;

#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client);
        Self { address, entry_point_api }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Nonce of `address` in the sequence identified by `key`
    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, EntryPointError> {
        let nonce = self
            .entry_point_api
            .get_nonce(*address, key)
            .call()
            .await
            .map_err(|err| EntryPointError::from_contract_error("getNonce", err))?;

        trace!("Nonce of {address:?} on entry point {:?}: {nonce}", self.address);
        Ok(nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{abi::AbiEncode, providers::Provider, types::Bytes};
    use std::error::Error;

    #[tokio::test]
    async fn get_nonce_decodes_call_result() -> eyre::Result<()> {
        let (provider, mock) = Provider::mocked();
        let entry_point = EntryPoint::new(
            Arc::new(provider),
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse()?,
        );

        mock.push::<Bytes, _>(Bytes::from(U256::from(42u64).encode()))?;
        let sender: Address = "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse()?;
        let nonce = entry_point.get_nonce(&sender, U256::zero()).await?;

        assert_eq!(nonce, U256::from(42u64));
        Ok(())
    }

    #[tokio::test]
    async fn failed_nonce_read_keeps_provider_error_as_source() -> eyre::Result<()> {
        let (provider, _mock) = Provider::mocked();
        let entry_point = EntryPoint::new(
            Arc::new(provider),
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse()?,
        );

        let sender: Address = "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse()?;
        let err = entry_point
            .get_nonce(&sender, U256::zero())
            .await
            .expect_err("empty mock queue must fail the call");

        assert!(matches!(err, EntryPointError::Call { method: "getNonce", .. }));
        assert!(err.source().is_some());
        Ok(())
    }
}
