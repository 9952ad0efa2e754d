//! A `Wallet` is the owner credential of a smart account: an ethers local signer derived from a
//! mnemonic or a raw private key
use ethers::{
    prelude::{k256::ecdsa::SigningKey, rand},
    signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer},
    types::Address,
};
use expanded_pathbuf::ExpandedPathBuf;
use std::{fs, str::FromStr};

/// Derivation path of the owner key
const DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the owner
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Builds a `Wallet` from a randomly generated mnemonic and writes the mnemonic into `path`
    ///
    /// # Arguments
    /// * `path` - The directory where the mnemonic phrase will be written
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance
    pub fn build_random(path: ExpandedPathBuf, chain_id: u64) -> eyre::Result<Self> {
        let mut rng = rand::thread_rng();

        fs::create_dir_all(&path)?;

        let wallet = MnemonicBuilder::<English>::default()
            .write_to(path.to_path_buf())
            .derivation_path(DERIVATION_PATH)?
            .build_random(&mut rng)?;

        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Create a new wallet from the given file containing the mnemonic phrase
    ///
    /// # Arguments
    /// * `path` - The path to the file where the mnemonic phrase is stored
    /// * `chain_id` - The chain id of the blockchain network to be used
    pub fn from_file(path: ExpandedPathBuf, chain_id: u64) -> eyre::Result<Self> {
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(path.to_path_buf())
            .derivation_path(DERIVATION_PATH)?
            .build()?;

        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Create a new wallet from the given mnemonic phrase
    ///
    /// # Arguments
    /// * `phrase` - The mnemonic phrase
    /// * `chain_id` - The chain id of the blockchain network to be used
    pub fn from_phrase(phrase: &str, chain_id: u64) -> eyre::Result<Self> {
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .derivation_path(DERIVATION_PATH)?
            .build()?;

        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Create a new wallet from a hex encoded private key (with or without `0x`)
    pub fn from_key(key: &str, chain_id: u64) -> eyre::Result<Self> {
        let wallet = LocalWallet::from_str(key.trim_start_matches("0x"))?;
        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Address of the owner
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn from_phrase_uses_first_account() -> eyre::Result<()> {
        let wallet = Wallet::from_phrase(KEY_PHRASE, 1)?;
        assert_eq!(wallet.address(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse()?);
        assert_eq!(wallet.signer.chain_id(), 1);
        Ok(())
    }

    #[test]
    fn from_key_matches_phrase() -> eyre::Result<()> {
        let wallet = Wallet::from_key(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            11_155_111,
        )?;
        assert_eq!(wallet.address(), Wallet::from_phrase(KEY_PHRASE, 1)?.address());
        assert_eq!(wallet.signer.chain_id(), 11_155_111);
        Ok(())
    }

    #[test]
    fn random_wallet_can_be_reloaded() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let wallet = Wallet::build_random(ExpandedPathBuf(dir.path().to_path_buf()), 5)?;

        let entry = fs::read_dir(dir.path())?.next().ok_or_else(|| eyre::eyre!("no file"))??;
        let reloaded = Wallet::from_file(ExpandedPathBuf(entry.path()), 5)?;
        assert_eq!(wallet.address(), reloaded.address());
        Ok(())
    }
}
