use async_trait::async_trait;
use ethers::types::{transaction::eip712::TypedData, Address, Bytes, H256, U256, U64};
use jsonrpsee::{
    core::RpcResult,
    proc_macros::rpc,
    server::{Server, ServerHandle},
    types::ErrorObjectOwned,
};
use smartacc_accounts::{AccountError, AccountKind, Call, SmartAccount};
use smartacc_client::{SponsorUserOperation, SponsorUserOperationResult};
use smartacc_primitives::{
    UserOperation, UserOperationByHash, UserOperationGasEstimation, UserOperationHash,
    UserOperationPartial, UserOperationReceipt,
};
use std::{
    error::Error as StdError,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

pub const CHAIN_ID: u64 = 11_155_111;
pub const ENTRY_POINT: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
pub const STUB_SIGNATURE: [u8; 3] = [0xaa, 0xbb, 0xcc];

#[rpc(server, namespace = "eth")]
pub trait MockBundlerApi {
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    #[method(name = "supportedEntryPoints")]
    async fn supported_entry_points(&self) -> RpcResult<Vec<String>>;

    #[method(name = "sendUserOperation")]
    async fn send_user_operation(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash>;

    #[method(name = "estimateUserOperationGas")]
    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationPartial,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation>;

    #[method(name = "getUserOperationReceipt")]
    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: String,
    ) -> RpcResult<Option<UserOperationReceipt>>;

    #[method(name = "getUserOperationByHash")]
    async fn get_user_operation_by_hash(
        &self,
        user_operation_hash: String,
    ) -> RpcResult<Option<UserOperationByHash>>;
}

/// Bundler that accepts everything and remembers what it was sent
#[derive(Clone, Default)]
pub struct MockBundler {
    /// `None` makes gas estimation fail
    pub estimation: Option<UserOperationGasEstimation>,
    pub sent: Arc<Mutex<Vec<UserOperation>>>,
    pub estimate_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl MockBundlerApiServer for MockBundler {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(U64::from(CHAIN_ID))
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<String>> {
        Ok(vec![ENTRY_POINT.to_string()])
    }

    async fn send_user_operation(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash> {
        let hash = user_operation.hash(&entry_point, CHAIN_ID);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(user_operation);
        }
        Ok(hash)
    }

    async fn estimate_user_operation_gas(
        &self,
        _user_operation: UserOperationPartial,
        _entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        self.estimation.clone().ok_or_else(|| {
            ErrorObjectOwned::owned(-32500, "AA23 reverted (or OOG)", None::<()>)
        })
    }

    async fn get_user_operation_receipt(
        &self,
        _user_operation_hash: String,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        Ok(None)
    }

    async fn get_user_operation_by_hash(
        &self,
        _user_operation_hash: String,
    ) -> RpcResult<Option<UserOperationByHash>> {
        Ok(None)
    }
}

/// Starts `bundler` on an ephemeral port and returns its URL
pub async fn start_mock_bundler(bundler: MockBundler) -> eyre::Result<(String, ServerHandle)> {
    let server = Server::builder().build("127.0.0.1:0").await?;
    let addr = server.local_addr()?;
    let handle = server.start(bundler.into_rpc());
    Ok((format!("http://{addr}"), handle))
}

/// Account answering with fixed values, without chain access
#[derive(Debug)]
pub struct StubAccount {
    pub address: Address,
    pub nonce: U256,
}

impl Default for StubAccount {
    fn default() -> Self {
        Self { address: Address::repeat_byte(0x5a), nonce: U256::from(4u64) }
    }
}

#[async_trait]
impl SmartAccount for StubAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Safe
    }

    fn address(&self) -> Address {
        self.address
    }

    fn entry_point(&self) -> Address {
        ENTRY_POINT.parse().unwrap_or_default()
    }

    fn chain_id(&self) -> u64 {
        CHAIN_ID
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<Bytes, AccountError> {
        Ok(Bytes::from(STUB_SIGNATURE.to_vec()))
    }

    async fn sign_typed_data(&self, _data: &TypedData) -> Result<Bytes, AccountError> {
        Ok(Bytes::from(STUB_SIGNATURE.to_vec()))
    }

    async fn sign_user_operation(&self, _uo: &UserOperation) -> Result<Bytes, AccountError> {
        Ok(Bytes::from(STUB_SIGNATURE.to_vec()))
    }

    async fn get_init_code(&self) -> Result<Bytes, AccountError> {
        Ok(Bytes::default())
    }

    async fn get_nonce(&self) -> Result<U256, AccountError> {
        Ok(self.nonce)
    }

    fn encode_call_data(&self, call: &Call) -> Result<Bytes, AccountError> {
        Ok(call.data.clone())
    }
}

/// Sponsor paying for every user operation with a fixed paymaster
pub struct StubSponsor {
    pub result: SponsorUserOperationResult,
}

#[async_trait]
impl SponsorUserOperation for StubSponsor {
    async fn sponsor_user_operation(
        &self,
        _user_operation: &UserOperation,
        _entry_point: &Address,
    ) -> Result<SponsorUserOperationResult, Box<dyn StdError + Send + Sync>> {
        Ok(self.result.clone())
    }
}

pub fn receipt_hash() -> UserOperationHash {
    UserOperationHash(H256::repeat_byte(0x42))
}
