use super::config::SafeAccountParams;
use crate::error::AccountError;
use ethers::{
    abi::AbiEncode,
    types::{Address, Bytes, U256},
};
use smartacc_contracts::{CreateProxyWithNonceCall, EnableModulesCall, SetupCall};
use smartacc_primitives::{constants::safe::THRESHOLD, pack_factory_data};

/// Encodes the `setup` call that initializes a freshly deployed Safe proxy.
///
/// Single owner, threshold 1. `AddModulesLib` is delegate-called to enable the 4337 module,
/// which is installed as the fallback handler as well. Used both to derive the account address
/// and to deploy it, so the output must only depend on the arguments.
pub fn build_initializer(
    owner: Address,
    add_modules_lib: Address,
    safe_4337_module: Address,
) -> Bytes {
    let enable_modules = EnableModulesCall { modules: vec![safe_4337_module] }.encode();

    SetupCall {
        owners: vec![owner],
        threshold: U256::from(THRESHOLD),
        to: add_modules_lib,
        data: enable_modules.into(),
        fallback_handler: safe_4337_module,
        payment_token: Address::zero(),
        payment: U256::zero(),
        payment_receiver: Address::zero(),
    }
    .encode()
    .into()
}

/// `factory ‖ createProxyWithNonce(singleton, initializer, saltNonce)`
pub fn build_init_code(params: &SafeAccountParams) -> Result<Bytes, AccountError> {
    if params.owner.is_zero() {
        return Err(AccountError::MissingOwner);
    }

    let initializer = build_initializer(
        params.owner,
        params.addresses.add_modules_lib,
        params.addresses.safe_4337_module,
    );
    let create_proxy = CreateProxyWithNonceCall {
        singleton: params.addresses.safe_singleton,
        initializer,
        salt_nonce: params.salt_nonce,
    }
    .encode();

    Ok(pack_factory_data(params.addresses.safe_proxy_factory, &create_proxy.into()))
}
