mod common;

use common::{
    receipt_hash, start_mock_bundler, MockBundler, StubAccount, StubSponsor, CHAIN_ID,
    ENTRY_POINT, STUB_SIGNATURE,
};
use ethers::types::{Address, Bytes, U256};
use smartacc_accounts::{Call, SmartAccount};
use smartacc_client::{
    ClientError, GasFees, SmartAccountClient, SponsorUserOperationResult, TransportOptions,
};
use smartacc_primitives::{constants::signature::DUMMY_SIGNATURE, UserOperationGasEstimation};
use std::{
    error::Error as StdError,
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

fn estimation() -> UserOperationGasEstimation {
    UserOperationGasEstimation {
        pre_verification_gas: U256::from(45_000u64),
        verification_gas_limit: U256::from(150_000u64),
        call_gas_limit: U256::from(35_000u64),
    }
}

fn fees() -> GasFees {
    GasFees {
        max_fee_per_gas: U256::from(2_000_000_000u64),
        max_priority_fee_per_gas: U256::from(1_000_000_000u64),
    }
}

fn transfer() -> Call {
    Call::new(Address::repeat_byte(0x01), U256::from(1_000u64), Bytes::from(vec![0x12, 0x34]))
}

fn client(url: &str) -> eyre::Result<SmartAccountClient<StubAccount>> {
    Ok(SmartAccountClient::new(
        url,
        CHAIN_ID.into(),
        StubAccount::default(),
        TransportOptions::default(),
    )?)
}

#[tokio::test]
async fn bundler_chain_and_entry_points() -> eyre::Result<()> {
    let (url, _handle) = start_mock_bundler(MockBundler::default()).await?;
    let client = client(&url)?;

    assert_eq!(client.chain_id().await?, CHAIN_ID);
    assert_eq!(client.supported_entry_points().await?, vec![ENTRY_POINT.parse::<Address>()?]);
    Ok(())
}

#[tokio::test]
async fn transport_never_retries() -> eyre::Result<()> {
    let (url, _handle) = start_mock_bundler(MockBundler::default()).await?;
    let client = SmartAccountClient::new(
        &url,
        CHAIN_ID.into(),
        StubAccount::default(),
        TransportOptions { request_timeout: Duration::from_secs(10), retry_count: 5 },
    )?;

    assert_eq!(client.transport_options().retry_count, 0);
    assert_eq!(client.transport_options().request_timeout, Duration::from_secs(10));
    Ok(())
}

#[tokio::test]
async fn send_transaction_estimates_gas_and_signs() -> eyre::Result<()> {
    let bundler = MockBundler { estimation: Some(estimation()), ..Default::default() };
    let (url, _handle) = start_mock_bundler(bundler.clone()).await?;
    let client = client(&url)?;

    let prepared = client.prepare_user_operation(&transfer(), fees()).await?;
    assert_eq!(prepared.sender, client.account().address());
    assert_eq!(prepared.nonce, U256::from(4u64));
    assert_eq!(prepared.signature, DUMMY_SIGNATURE.parse::<Bytes>()?);
    assert_eq!(prepared.call_gas_limit, estimation().call_gas_limit);

    let hash = client.send_transaction(&transfer(), fees()).await?;

    let sent = bundler.sent.lock().map_err(|_| eyre::eyre!("poisoned"))?.clone();
    assert_eq!(sent.len(), 1);
    let uo = &sent[0];
    assert_eq!(uo.signature, Bytes::from(STUB_SIGNATURE.to_vec()));
    assert_eq!(uo.verification_gas_limit, estimation().verification_gas_limit);
    assert_eq!(uo.pre_verification_gas, estimation().pre_verification_gas);
    assert_eq!(uo.max_fee_per_gas, fees().max_fee_per_gas);
    assert_eq!(uo.call_data, transfer().data);
    assert_eq!(hash, uo.hash(&ENTRY_POINT.parse()?, CHAIN_ID));
    assert_eq!(bundler.estimate_calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn sponsor_replaces_gas_estimation() -> eyre::Result<()> {
    let bundler = MockBundler::default();
    let (url, _handle) = start_mock_bundler(bundler.clone()).await?;
    let sponsored = SponsorUserOperationResult {
        paymaster_and_data: Bytes::from(vec![0x99; 20]),
        pre_verification_gas: U256::from(1u64),
        verification_gas_limit: U256::from(2u64),
        call_gas_limit: U256::from(3u64),
    };
    let client =
        client(&url)?.with_sponsor(Arc::new(StubSponsor { result: sponsored.clone() }));

    client.send_transaction(&transfer(), fees()).await?;

    let sent = bundler.sent.lock().map_err(|_| eyre::eyre!("poisoned"))?.clone();
    assert_eq!(sent[0].paymaster_and_data, sponsored.paymaster_and_data);
    assert_eq!(sent[0].call_gas_limit, sponsored.call_gas_limit);
    assert_eq!(bundler.estimate_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn estimation_error_carries_user_operation() -> eyre::Result<()> {
    let (url, _handle) = start_mock_bundler(MockBundler::default()).await?;
    let client = client(&url)?;

    let err = match client.prepare_user_operation(&transfer(), fees()).await {
        Err(err) => err,
        Ok(uo) => eyre::bail!("estimation should fail, got {uo:?}"),
    };

    assert!(err.source().is_some());
    match err {
        ClientError::EstimateUserOperationGas { user_operation, .. } => {
            assert_eq!(user_operation.sender, client.account().address());
            assert_eq!(user_operation.call_data, transfer().data);
        }
        other => eyre::bail!("unexpected error {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn receipt_wait_times_out() -> eyre::Result<()> {
    let (url, _handle) = start_mock_bundler(MockBundler::default()).await?;
    let client = client(&url)?
        .receipt_poll_interval(Duration::from_millis(20))
        .receipt_timeout(Duration::from_millis(150));

    assert!(client.get_user_operation_receipt(&receipt_hash()).await?.is_none());
    assert!(client.get_user_operation_by_hash(&receipt_hash()).await?.is_none());
    assert!(matches!(
        client.wait_for_user_operation_receipt(&receipt_hash()).await,
        Err(ClientError::ReceiptTimeout { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn signing_is_delegated_to_account() -> eyre::Result<()> {
    let (url, _handle) = start_mock_bundler(MockBundler::default()).await?;
    let client = client(&url)?;

    assert_eq!(client.sign_message(b"hello").await?, Bytes::from(STUB_SIGNATURE.to_vec()));
    Ok(())
}
