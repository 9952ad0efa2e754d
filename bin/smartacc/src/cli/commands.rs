use super::args::{CreateOwnerArgs, EthClientArgs, OwnerArgs, SafeArgs, SignerArgs};
use crate::utils::unwrap_path_or_home;
use clap::Parser;
use ethers::{providers::Middleware, types::Bytes};
use expanded_pathbuf::ExpandedPathBuf;
use smartacc_accounts::{
    safe::{build_init_code, derive_safe_address},
    NetworkRegistry, SafeSmartAccount, SmartAccount,
};
use smartacc_primitives::{
    provider::{create_http_provider, create_ws_provider},
    Wallet,
};
use std::sync::Arc;
use tracing::info;

/// Derive the counterfactual address of a Safe account
#[derive(Debug, Parser)]
pub struct AddressCommand {
    #[clap(flatten)]
    owner: OwnerArgs,

    #[clap(flatten)]
    safe: SafeArgs,

    #[clap(flatten)]
    eth_client: EthClientArgs,
}

impl AddressCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        if self.eth_client.eth_client_address.starts_with("http") {
            let eth_client = create_http_provider(&self.eth_client.eth_client_address).await?;
            self.derive(Arc::new(eth_client)).await
        } else {
            let eth_client = create_ws_provider(&self.eth_client.eth_client_address).await?;
            self.derive(Arc::new(eth_client)).await
        }
    }

    async fn derive<M: Middleware + 'static>(self, eth_client: Arc<M>) -> eyre::Result<()> {
        let params = self.safe.to_config().resolve(self.owner.owner, &NetworkRegistry::default())?;

        let address = derive_safe_address(eth_client, &params).await?;
        info!("Safe account of owner {:?} on {}: {address:?}", params.owner, self.safe.chain);
        println!("{address:?}");

        Ok(())
    }
}

/// Build the init code deploying a Safe account (no chain access)
#[derive(Debug, Parser)]
pub struct InitCodeCommand {
    #[clap(flatten)]
    owner: OwnerArgs,

    #[clap(flatten)]
    safe: SafeArgs,
}

impl InitCodeCommand {
    /// Execute the command
    pub fn execute(self) -> eyre::Result<()> {
        let params = self.safe.to_config().resolve(self.owner.owner, &NetworkRegistry::default())?;
        let init_code = build_init_code(&params)?;
        println!("{init_code}");
        Ok(())
    }
}

/// Sign a message with a Safe account
#[derive(Debug, Parser)]
pub struct SignMessageCommand {
    /// The message to sign, as UTF-8 text or `0x` prefixed hex. Must not be empty.
    #[clap(long)]
    message: String,

    #[clap(flatten)]
    signer: SignerArgs,

    #[clap(flatten)]
    safe: SafeArgs,

    #[clap(flatten)]
    eth_client: EthClientArgs,
}

impl SignMessageCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        if self.eth_client.eth_client_address.starts_with("http") {
            let eth_client = create_http_provider(&self.eth_client.eth_client_address).await?;
            self.sign(Arc::new(eth_client)).await
        } else {
            let eth_client = create_ws_provider(&self.eth_client.eth_client_address).await?;
            self.sign(Arc::new(eth_client)).await
        }
    }

    async fn sign<M: Middleware + 'static>(self, eth_client: Arc<M>) -> eyre::Result<()> {
        let message = message_bytes(&self.message)?;
        let wallet =
            Wallet::from_file(ExpandedPathBuf(self.signer.mnemonic_file), self.safe.chain.id())?;

        let account = SafeSmartAccount::new(
            eth_client,
            wallet.signer,
            &self.safe.to_config(),
            &NetworkRegistry::default(),
        )
        .await?;
        info!("Signing with Safe account {:?}", account.address());

        let signature = account.sign_message(&message).await?;
        println!("{signature}");
        Ok(())
    }
}

/// Create a new owner key
#[derive(Debug, Parser)]
pub struct CreateOwnerCommand {
    #[clap(flatten)]
    create_owner: CreateOwnerArgs,
}

impl CreateOwnerCommand {
    /// Execute the command
    pub fn execute(self) -> eyre::Result<()> {
        info!("Creating owner key... Storing to: {:?}", self.create_owner.output_path);

        let path = unwrap_path_or_home(self.create_owner.output_path)?;
        let wallet = Wallet::build_random(path, self.create_owner.chain_id)?;
        info!("Owner {:?}", wallet.address());
        println!("{:?}", wallet.address());

        Ok(())
    }
}

/// Hex input is decoded, anything else is signed as its UTF-8 bytes
fn message_bytes(message: &str) -> eyre::Result<Vec<u8>> {
    let bytes = match message.parse::<Bytes>() {
        Ok(bytes) if message.starts_with("0x") => bytes.to_vec(),
        _ => message.as_bytes().to_vec(),
    };
    if bytes.is_empty() {
        eyre::bail!("refusing to sign an empty message");
    }
    Ok(bytes)
}
