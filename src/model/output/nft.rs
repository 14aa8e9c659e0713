// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`NftOutput`].

use serde::{Deserialize, Serialize};

use super::{
    feature::Feature,
    native_token::NativeToken,
    unlock_condition::{
        AddressUnlockCondition, ExpirationUnlockCondition, StorageDepositReturnUnlockCondition,
        TimelockUnlockCondition,
    },
    TokenAmount,
};
use crate::model::util::bytify;

/// The id of an NFT chain. All zero until the NFT is minted, after which it is
/// the BLAKE2b-256 digest of the creating output reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NftId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl NftId {
    /// The number of bytes of an [`NftId`].
    pub const LENGTH: usize = 32;

    /// The all-zero "not yet minted" sentinel.
    pub fn null() -> Self {
        Self([0; Self::LENGTH])
    }

    /// Converts the [`NftId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_slice())
    }
}

impl TryFrom<&[u8]> for NftId {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

/// An output that persists a non-fungible token with immutable metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftOutput {
    /// The output amount.
    pub amount: TokenAmount,
    /// The native tokens held by the output.
    pub native_tokens: Box<[NativeToken]>,
    /// The id of the NFT chain.
    pub nft_id: NftId,
    /// The address unlock condition.
    pub address_unlock_condition: AddressUnlockCondition,
    /// The storage deposit return unlock condition, if any.
    pub storage_deposit_return_unlock_condition: Option<StorageDepositReturnUnlockCondition>,
    /// The timelock unlock condition, if any.
    pub timelock_unlock_condition: Option<TimelockUnlockCondition>,
    /// The expiration unlock condition, if any.
    pub expiration_unlock_condition: Option<ExpirationUnlockCondition>,
    /// The features of the output.
    pub features: Box<[Feature]>,
    /// The immutable features of the output, set at genesis and never changed.
    pub immutable_features: Box<[Feature]>,
}

impl NftOutput {
    /// A `&str` representation of the type.
    pub const KIND: &'static str = "nft";
}
