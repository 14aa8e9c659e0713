// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Address`] types.

use crypto::hashes::{blake2b::Blake2b256, Digest};
use serde::{Deserialize, Serialize};

use super::{
    output::{AliasId, NftId},
    util::bytify,
};

/// An Ed25519 address, the BLAKE2b-256 digest of the signer's public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ed25519Address(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl Ed25519Address {
    /// The number of bytes of an [`Ed25519Address`].
    pub const LENGTH: usize = 32;

    /// Derives the address from an Ed25519 public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        Self(Blake2b256::digest(public_key).into())
    }

    /// Converts the address to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_slice())
    }
}

/// The different address variants. Alias and NFT addresses are chain addresses:
/// they are controlled by whoever controls the corresponding chain output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Address {
    /// An Ed25519 address.
    Ed25519(Ed25519Address),
    /// An alias address.
    Alias(AliasId),
    /// An NFT address.
    Nft(NftId),
}

impl Address {
    /// Whether this address can be unlocked directly by a signature, as opposed
    /// to a chain address which is unlocked through its chain output.
    pub fn is_direct_unlockable(&self) -> bool {
        matches!(self, Self::Ed25519(_))
    }

    /// The chain id backing this address, if it is a chain address.
    pub fn chain_id(&self) -> Option<super::output::ChainId> {
        match self {
            Self::Ed25519(_) => None,
            Self::Alias(alias_id) => Some(super::output::ChainId::Alias(*alias_id)),
            Self::Nft(nft_id) => Some(super::output::ChainId::Nft(*nft_id)),
        }
    }
}

impl From<Ed25519Address> for Address {
    fn from(value: Ed25519Address) -> Self {
        Self::Ed25519(value)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ed25519(a) => write!(f, "{}", a.to_hex()),
            Self::Alias(a) => write!(f, "{}", a.to_hex()),
            Self::Nft(a) => write!(f, "{}", a.to_hex()),
        }
    }
}

impl From<&[u8; 32]> for Ed25519Address {
    fn from(value: &[u8; 32]) -> Self {
        Self(*value)
    }
}

impl TryFrom<&[u8]> for Ed25519Address {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_address_json() {
        let address = Address::Ed25519(Ed25519Address::from_public_key(&[0x42; 32]));
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["kind"], "ed25519");
        assert_eq!(address, serde_json::from_value::<Address>(json).unwrap());
    }

    #[test]
    fn test_chain_address() {
        let address = Address::Alias(AliasId([1; 32]));
        assert!(!address.is_direct_unlockable());
        assert_eq!(
            address.chain_id(),
            Some(crate::model::ChainId::Alias(AliasId([1; 32])))
        );
    }
}
