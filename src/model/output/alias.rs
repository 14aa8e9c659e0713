// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`AliasOutput`].

use serde::{Deserialize, Serialize};

use super::{
    feature::Feature,
    native_token::NativeToken,
    unlock_condition::{GovernorAddressUnlockCondition, StateControllerAddressUnlockCondition},
    TokenAmount,
};
use crate::model::{address::Address, util::bytify};

/// The id of an alias chain. All zero until the alias is created, after which
/// it is the BLAKE2b-256 digest of the creating output reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl AliasId {
    /// The number of bytes of an [`AliasId`].
    pub const LENGTH: usize = 32;

    /// The all-zero "not yet created" sentinel.
    pub fn null() -> Self {
        Self([0; Self::LENGTH])
    }

    /// Converts the [`AliasId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_slice())
    }
}

impl TryFrom<&[u8]> for AliasId {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

/// An output that persists an alias chain: an identity whose state is advanced
/// by its state controller and whose controllers are replaced by its governor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasOutput {
    /// The output amount.
    pub amount: TokenAmount,
    /// The native tokens held by the output.
    pub native_tokens: Box<[NativeToken]>,
    /// The id of the alias chain.
    pub alias_id: AliasId,
    /// The state index, incremented by exactly one on every state transition.
    pub state_index: u32,
    /// Arbitrary state metadata, mutable only through a state transition.
    #[serde(with = "serde_bytes")]
    pub state_metadata: Box<[u8]>,
    /// A counter of the foundries created by this alias, never decreasing.
    pub foundry_counter: u32,
    /// The state controller address unlock condition.
    pub state_controller_address_unlock_condition: StateControllerAddressUnlockCondition,
    /// The governor address unlock condition.
    pub governor_address_unlock_condition: GovernorAddressUnlockCondition,
    /// The features of the output.
    pub features: Box<[Feature]>,
    /// The immutable features of the output, set at genesis and never changed.
    pub immutable_features: Box<[Feature]>,
}

impl AliasOutput {
    /// A `&str` representation of the type.
    pub const KIND: &'static str = "alias";

    /// The state controller address.
    pub fn state_controller(&self) -> &Address {
        &self.state_controller_address_unlock_condition.address
    }

    /// The governor address.
    pub fn governor(&self) -> &Address {
        &self.governor_address_unlock_condition.address
    }
}
