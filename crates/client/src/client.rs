use crate::{
    bundler_api::BundlerApiClient,
    error::ClientError,
    sponsor::SponsorUserOperation,
    transport::{build_http_transport, TransportOptions},
};
use alloy_chains::Chain;
use ethers::types::{transaction::eip712::TypedData, Address, Bytes, U256};
use jsonrpsee::http_client::HttpClient;
use smartacc_accounts::{Call, SmartAccount};
use smartacc_primitives::{
    constants::client::{RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT},
    UserOperation, UserOperationByHash, UserOperationGasEstimation, UserOperationHash,
    UserOperationPartial, UserOperationReceipt,
};
use std::{fmt, str::FromStr, sync::Arc, time::Duration};
use tracing::{debug, trace};

/// Fee caps of a user operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GasFees {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Smart account bound to a bundler on a chain
pub struct SmartAccountClient<A: SmartAccount> {
    bundler: HttpClient,
    transport_options: TransportOptions,
    chain: Chain,
    account: A,
    sponsor: Option<Arc<dyn SponsorUserOperation>>,
    receipt_poll_interval: Duration,
    receipt_timeout: Duration,
}

impl<A: SmartAccount + fmt::Debug> fmt::Debug for SmartAccountClient<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartAccountClient")
            .field("chain", &self.chain)
            .field("account", &self.account)
            .field("sponsored", &self.sponsor.is_some())
            .finish()
    }
}

impl<A: SmartAccount> SmartAccountClient<A> {
    /// Connects `account` to the bundler at `bundler_url`. The transport never retries.
    pub fn new(
        bundler_url: &str,
        chain: Chain,
        account: A,
        options: TransportOptions,
    ) -> Result<Self, ClientError> {
        let (bundler, transport_options) = build_http_transport(bundler_url, options)?;
        debug!("Account {:?} uses bundler {bundler_url} on chain {chain}", account.address());

        Ok(Self {
            bundler,
            transport_options,
            chain,
            account,
            sponsor: None,
            receipt_poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL),
            receipt_timeout: Duration::from_secs(RECEIPT_TIMEOUT),
        })
    }

    /// Sponsors every prepared user operation with `sponsor` instead of estimating its gas
    pub fn with_sponsor(mut self, sponsor: Arc<dyn SponsorUserOperation>) -> Self {
        self.sponsor = Some(sponsor);
        self
    }

    pub fn receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    pub fn receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }

    pub fn account(&self) -> &A {
        &self.account
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Transport options in effect
    pub fn transport_options(&self) -> TransportOptions {
        self.transport_options
    }

    pub async fn chain_id(&self) -> Result<u64, ClientError> {
        let chain_id = BundlerApiClient::chain_id(&self.bundler).await?;
        trace!("Bundler chain id: {chain_id}");
        Ok(chain_id.as_u64())
    }

    pub async fn supported_entry_points(&self) -> Result<Vec<Address>, ClientError> {
        let entry_points = BundlerApiClient::supported_entry_points(&self.bundler).await?;
        trace!("Bundler entry points: {entry_points:?}");

        entry_points
            .iter()
            .map(|ep| {
                Address::from_str(ep).map_err(|err| ClientError::InvalidResponse {
                    inner: format!("entry point {ep}: {err}"),
                })
            })
            .collect()
    }

    /// Gas limits the bundler estimates for `uo`. On failure the error carries `uo`.
    pub async fn estimate_user_operation_gas(
        &self,
        uo: &UserOperation,
    ) -> Result<UserOperationGasEstimation, ClientError> {
        let estimation = BundlerApiClient::estimate_user_operation_gas(
            &self.bundler,
            UserOperationPartial::from(uo.clone()),
            self.account.entry_point(),
        )
        .await
        .map_err(|source| ClientError::EstimateUserOperationGas {
            user_operation: Box::new(uo.clone()),
            source,
        })?;

        trace!("Gas estimation of user operation from {:?}: {estimation:?}", uo.sender);
        Ok(estimation)
    }

    /// Signs `uo` with the account and submits it
    pub async fn send_user_operation(
        &self,
        uo: UserOperation,
    ) -> Result<UserOperationHash, ClientError> {
        let signature = self.account.sign_user_operation(&uo).await?;
        let uo = uo.signature(signature);

        let hash = BundlerApiClient::send_user_operation(
            &self.bundler,
            uo,
            self.account.entry_point(),
        )
        .await?;
        debug!("Sent user operation {hash}");
        Ok(hash)
    }

    pub async fn get_user_operation_by_hash(
        &self,
        hash: &UserOperationHash,
    ) -> Result<Option<UserOperationByHash>, ClientError> {
        Ok(BundlerApiClient::get_user_operation_by_hash(&self.bundler, hash.to_string()).await?)
    }

    pub async fn get_user_operation_receipt(
        &self,
        hash: &UserOperationHash,
    ) -> Result<Option<UserOperationReceipt>, ClientError> {
        Ok(BundlerApiClient::get_user_operation_receipt(&self.bundler, hash.to_string()).await?)
    }

    /// Polls the bundler until the receipt of `hash` is available
    pub async fn wait_for_user_operation_receipt(
        &self,
        hash: &UserOperationHash,
    ) -> Result<UserOperationReceipt, ClientError> {
        let poll = async {
            loop {
                if let Some(receipt) = self.get_user_operation_receipt(hash).await? {
                    return Ok::<_, ClientError>(receipt);
                }
                trace!("User operation {hash} is still pending");
                tokio::time::sleep(self.receipt_poll_interval).await;
            }
        };

        match tokio::time::timeout(self.receipt_timeout, poll).await {
            Ok(res) => res,
            Err(_) => {
                Err(ClientError::ReceiptTimeout { hash: *hash, timeout: self.receipt_timeout })
            }
        }
    }

    /// Builds an unsigned user operation executing `call`.
    ///
    /// Sender, nonce, init code and call data come from the account. Gas limits come from the
    /// sponsor if there is one, from the bundler otherwise. The signature is the account's dummy
    /// signature.
    pub async fn prepare_user_operation(
        &self,
        call: &Call,
        fees: GasFees,
    ) -> Result<UserOperation, ClientError> {
        let uo = UserOperation::default()
            .sender(self.account.address())
            .nonce(self.account.get_nonce().await?)
            .init_code(self.account.get_init_code().await?)
            .call_data(self.account.encode_call_data(call)?)
            .max_fee_per_gas(fees.max_fee_per_gas)
            .max_priority_fee_per_gas(fees.max_priority_fee_per_gas)
            .signature(self.account.dummy_signature());

        match &self.sponsor {
            Some(sponsor) => {
                let sponsored = sponsor
                    .sponsor_user_operation(&uo, &self.account.entry_point())
                    .await
                    .map_err(|source| ClientError::Sponsor { source })?;
                debug!("User operation sponsored with {}", sponsored.paymaster_and_data);

                Ok(uo
                    .paymaster_and_data(sponsored.paymaster_and_data)
                    .pre_verification_gas(sponsored.pre_verification_gas)
                    .verification_gas_limit(sponsored.verification_gas_limit)
                    .call_gas_limit(sponsored.call_gas_limit))
            }
            None => {
                let estimation = self.estimate_user_operation_gas(&uo).await?;
                debug!("User operation gas estimated by bundler: {estimation:?}");

                Ok(uo
                    .pre_verification_gas(estimation.pre_verification_gas)
                    .verification_gas_limit(estimation.verification_gas_limit)
                    .call_gas_limit(estimation.call_gas_limit))
            }
        }
    }

    /// Prepares, signs and submits a user operation executing `call`
    pub async fn send_transaction(
        &self,
        call: &Call,
        fees: GasFees,
    ) -> Result<UserOperationHash, ClientError> {
        let uo = self.prepare_user_operation(call, fees).await?;
        self.send_user_operation(uo).await
    }

    pub async fn sign_message(&self, message: &[u8]) -> Result<Bytes, ClientError> {
        Ok(self.account.sign_message(message).await?)
    }

    pub async fn sign_typed_data(&self, data: &TypedData) -> Result<Bytes, ClientError> {
        Ok(self.account.sign_typed_data(data).await?)
    }
}
