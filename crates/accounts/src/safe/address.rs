use super::{config::SafeAccountParams, initializer::build_initializer};
use crate::error::AccountError;
use ethers::{
    providers::Middleware,
    types::Address,
    utils::{get_create2_address, keccak256},
};
use smartacc_contracts::SafeProxyFactory;
use smartacc_primitives::word_from_address;
use std::sync::Arc;
use tracing::debug;

/// Address the proxy factory will deploy the account at, given the factory's
/// `proxyCreationCode`.
///
/// `CREATE2(factory, keccak256(keccak256(initializer) ‖ saltNonce), proxyCreationCode ‖ singleton)`
pub fn compute_safe_address(proxy_creation_code: &[u8], params: &SafeAccountParams) -> Address {
    let mut deployment_code = proxy_creation_code.to_vec();
    deployment_code.extend_from_slice(&word_from_address(params.addresses.safe_singleton));

    let initializer = build_initializer(
        params.owner,
        params.addresses.add_modules_lib,
        params.addresses.safe_4337_module,
    );
    let mut salt_nonce = [0u8; 32];
    params.salt_nonce.to_big_endian(&mut salt_nonce);
    let salt = keccak256([keccak256(&initializer), salt_nonce].concat());

    get_create2_address(params.addresses.safe_proxy_factory, salt, deployment_code)
}

/// Reads `proxyCreationCode` from the factory and computes the account address
pub async fn derive_safe_address<M: Middleware + 'static>(
    eth_client: Arc<M>,
    params: &SafeAccountParams,
) -> Result<Address, AccountError> {
    let factory = SafeProxyFactory::new(params.addresses.safe_proxy_factory, eth_client);
    let proxy_creation_code =
        factory.proxy_creation_code().call().await.map_err(AccountError::provider)?;

    let address = compute_safe_address(&proxy_creation_code, params);
    debug!("Safe of owner {:?} (salt nonce {}): {address:?}", params.owner, params.salt_nonce);
    Ok(address)
}
