//! Misc utils

use ethers::{
    types::{Address, Bytes},
    utils::to_checksum,
};

/// Converts address to checksum address
pub fn as_checksum_addr<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&to_checksum(val, None))
}

/// Converts Option address to checksum
pub fn as_checksum_addr_opt<S>(val: &Option<Address>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if let Some(addr) = val {
        s.serialize_str(&to_checksum(addr, None))
    } else {
        s.serialize_none()
    }
}

/// If possible, parses address from the first 20 bytes
pub fn get_address(buf: &[u8]) -> Option<Address> {
    if buf.len() >= 20 {
        Some(Address::from_slice(&buf[0..20]))
    } else {
        None
    }
}

/// Address left-padded to a 32-byte word (`uint256(uint160(addr))`)
pub fn word_from_address(addr: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(addr.as_bytes());
    word
}

/// Concatenates factory address and factory call data into init code
pub fn pack_factory_data(factory: Address, factory_data: &Bytes) -> Bytes {
    if factory.is_zero() {
        Bytes::default()
    } else {
        [factory.0.to_vec(), factory_data.to_vec()].concat().into()
    }
}

/// Splits init code into factory address and factory call data
pub fn unpack_factory_data(init_code: &[u8]) -> (Address, Bytes) {
    if init_code.len() > 20 {
        (Address::from_slice(&init_code[0..20]), Bytes::from(init_code[20..].to_vec()))
    } else {
        (Address::default(), Bytes::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{abi::AbiEncode, types::U256};

    #[test]
    fn pack_factory_data_unpack() {
        let addr: Address = "0x95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5".parse().unwrap();
        let data: Bytes = "0x12345678".parse().unwrap();
        let packed = pack_factory_data(addr, &data);
        assert_eq!(get_address(&packed), Some(addr));
        let (new_addr, new_data) = unpack_factory_data(&packed);
        assert_eq!(addr, new_addr, "addr work");
        assert_eq!(data, new_data, "data work");
    }

    #[test]
    fn zero_factory_packs_to_empty_init_code() {
        let data: Bytes = "0x12345678".parse().unwrap();
        assert!(pack_factory_data(Address::zero(), &data).is_empty());
    }

    #[test]
    fn address_word_matches_abi_encoding() {
        let addr: Address = "0x41675C099F32341bf84BFc5382aF534df5C7461a".parse().unwrap();
        assert_eq!(word_from_address(addr).to_vec(), addr.encode());
        assert_eq!(
            U256::from_big_endian(&word_from_address(addr)),
            U256::from_big_endian(addr.as_bytes())
        );
    }
}
