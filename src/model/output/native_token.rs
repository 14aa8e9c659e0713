// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`NativeToken`] types.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::foundry::FoundryId;
use crate::model::util::bytify;

/// The id of a native token. It is byte-identical to the [`FoundryId`] of the
/// foundry that governs the token's supply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl TokenId {
    /// The number of bytes of a [`TokenId`].
    pub const LENGTH: usize = FoundryId::LENGTH;

    /// Converts the [`TokenId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_slice())
    }

    /// The id of the foundry governing this token's supply.
    pub fn foundry_id(&self) -> FoundryId {
        FoundryId(self.0)
    }
}

impl From<FoundryId> for TokenId {
    fn from(value: FoundryId) -> Self {
        Self(value.0)
    }
}

impl TryFrom<&[u8]> for TokenId {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// An amount of native tokens. Outputs hold at most one entry per token id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeToken {
    /// The corresponding token id.
    pub token_id: TokenId,
    /// The amount of native tokens.
    pub amount: U256,
}

/// The scheme governing a foundry's token supply. The engine delegates the
/// mint/melt arithmetic of a foundry transition to the scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TokenScheme {
    /// A scheme with plain minted/melted/maximum supply counters.
    Simple {
        /// The amount of tokens minted so far.
        minted: U256,
        /// The amount of tokens melted so far.
        melted: U256,
        /// The maximum supply of tokens controlled by the foundry.
        maximum_supply: U256,
    },
}

impl TokenScheme {
    /// The wire kind of the scheme, part of the [`FoundryId`].
    pub fn kind(&self) -> u8 {
        match self {
            Self::Simple { .. } => 0,
        }
    }
}
