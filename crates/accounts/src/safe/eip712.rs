//! EIP-712 payloads verified by the Safe contracts

use ethers::{
    abi::{encode, Token},
    types::{
        transaction::eip712::{EIP712Domain, Eip712, Eip712Error},
        Address, Bytes, U256,
    },
    utils::keccak256,
};
use smartacc_primitives::UserOperation;

const SAFE_MESSAGE_TYPE: &str = "SafeMessage(bytes message)";

const SAFE_OP_TYPE: &str = "SafeOp(address safe,bytes callData,uint256 nonce,uint256 preVerificationGas,uint256 verificationGasLimit,uint256 callGasLimit,uint256 maxFeePerGas,uint256 maxPriorityFeePerGas,address entryPoint)";

fn domain(chain_id: u64, verifying_contract: Address) -> EIP712Domain {
    EIP712Domain {
        chain_id: Some(U256::from(chain_id)),
        verifying_contract: Some(verifying_contract),
        ..Default::default()
    }
}

/// Message signed by the owners of a Safe, verified by the Safe itself
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeMessage {
    pub chain_id: u64,
    pub safe: Address,
    pub message: Bytes,
}

impl SafeMessage {
    pub fn new(chain_id: u64, safe: Address, message: impl Into<Bytes>) -> Self {
        Self { chain_id, safe, message: message.into() }
    }
}

impl Eip712 for SafeMessage {
    type Error = Eip712Error;

    fn domain(&self) -> Result<EIP712Domain, Self::Error> {
        Ok(domain(self.chain_id, self.safe))
    }

    fn type_hash() -> Result<[u8; 32], Self::Error> {
        Ok(keccak256(SAFE_MESSAGE_TYPE))
    }

    fn struct_hash(&self) -> Result<[u8; 32], Self::Error> {
        Ok(keccak256(encode(&[
            Token::FixedBytes(Self::type_hash()?.to_vec()),
            Token::FixedBytes(keccak256(&self.message).to_vec()),
        ])))
    }
}

/// User operation as signed for the Safe 4337 module (the module is the verifying contract)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeOperation {
    pub chain_id: u64,
    pub module: Address,
    pub safe: Address,
    pub call_data: Bytes,
    pub nonce: U256,
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub entry_point: Address,
}

impl SafeOperation {
    pub fn new(uo: &UserOperation, entry_point: Address, chain_id: u64, module: Address) -> Self {
        Self {
            chain_id,
            module,
            safe: uo.sender,
            call_data: uo.call_data.clone(),
            nonce: uo.nonce,
            pre_verification_gas: uo.pre_verification_gas,
            verification_gas_limit: uo.verification_gas_limit,
            call_gas_limit: uo.call_gas_limit,
            max_fee_per_gas: uo.max_fee_per_gas,
            max_priority_fee_per_gas: uo.max_priority_fee_per_gas,
            entry_point,
        }
    }
}

impl Eip712 for SafeOperation {
    type Error = Eip712Error;

    fn domain(&self) -> Result<EIP712Domain, Self::Error> {
        Ok(domain(self.chain_id, self.module))
    }

    fn type_hash() -> Result<[u8; 32], Self::Error> {
        Ok(keccak256(SAFE_OP_TYPE))
    }

    fn struct_hash(&self) -> Result<[u8; 32], Self::Error> {
        Ok(keccak256(encode(&[
            Token::FixedBytes(Self::type_hash()?.to_vec()),
            Token::Address(self.safe),
            Token::FixedBytes(keccak256(&self.call_data).to_vec()),
            Token::Uint(self.nonce),
            Token::Uint(self.pre_verification_gas),
            Token::Uint(self.verification_gas_limit),
            Token::Uint(self.call_gas_limit),
            Token::Uint(self.max_fee_per_gas),
            Token::Uint(self.max_priority_fee_per_gas),
            Token::Address(self.entry_point),
        ])))
    }
}

/// Signature of one Safe owner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerSignature {
    /// Hex address of the signer, in any letter case
    pub signer: String,
    pub data: Bytes,
}

/// Concatenates owner signatures ordered by signer address, as the Safe splits them.
///
/// Addresses are compared lowercased; signers that compare equal keep their input order.
pub fn concat_sorted_signatures(mut signatures: Vec<OwnerSignature>) -> Bytes {
    signatures.sort_by_cached_key(|sig| sig.signer.to_lowercase());
    signatures.into_iter().flat_map(|sig| sig.data.to_vec()).collect::<Vec<u8>>().into()
}
