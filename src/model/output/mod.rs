// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Output`] types.

pub mod alias;
pub mod basic;
pub mod feature;
pub mod foundry;
pub mod native_token;
pub mod nft;
pub mod unlock_condition;

use crypto::hashes::{blake2b::Blake2b256, Digest};
use serde::{Deserialize, Serialize};

pub use self::{
    alias::{AliasId, AliasOutput},
    basic::BasicOutput,
    feature::{Feature, FeatureSet},
    foundry::{FoundryId, FoundryOutput},
    native_token::{NativeToken, TokenId, TokenScheme},
    nft::{NftId, NftOutput},
};
use super::{transaction::TransactionId, util::stringify};

/// The amount of base tokens associated with an output.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct TokenAmount(#[serde(with = "stringify")] pub u64);

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The index of an output within a transaction.
pub type OutputIndex = u16;

/// An id which uniquely identifies an output. It is computed from the corresponding [`TransactionId`], as well as the
/// [`OutputIndex`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputId {
    /// The transaction id part of the [`OutputId`].
    pub transaction_id: TransactionId,
    /// The output index part of the [`OutputId`].
    pub index: OutputIndex,
}

impl OutputId {
    /// Converts the [`OutputId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.as_bytes())
    }

    /// Hash the [`OutputId`] with BLAKE2b-256. Chain ids of newly created alias
    /// and NFT outputs are derived from this digest.
    #[inline(always)]
    pub fn hash(&self) -> [u8; 32] {
        Blake2b256::digest(self.as_bytes()).into()
    }

    fn as_bytes(&self) -> Vec<u8> {
        [self.transaction_id.0.as_ref(), &self.index.to_le_bytes()].concat()
    }
}

impl From<(TransactionId, OutputIndex)> for OutputId {
    fn from((transaction_id, index): (TransactionId, OutputIndex)) -> Self {
        Self { transaction_id, index }
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// The id of a chain-constrained output, persisting the chain's identity across
/// transactions. An all-zero alias or NFT id marks a chain that is created by
/// the very transaction consuming the output reference it is derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ChainId {
    /// An alias chain.
    Alias(AliasId),
    /// An NFT chain.
    Nft(NftId),
    /// A foundry chain.
    Foundry(FoundryId),
}

impl ChainId {
    /// Whether the id is the all-zero "not yet created" sentinel. Foundry ids
    /// are computed from their owning alias and are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Alias(alias_id) => alias_id.0 == [0; AliasId::LENGTH],
            Self::Nft(nft_id) => nft_id.0 == [0; NftId::LENGTH],
            Self::Foundry(_) => false,
        }
    }

    /// Replaces an empty id with the one derived from the given [`OutputId`].
    pub fn or_derived_from(self, output_id: &OutputId) -> Self {
        if !self.is_empty() {
            return self;
        }
        match self {
            Self::Alias(_) => Self::Alias(AliasId(output_id.hash())),
            Self::Nft(_) => Self::Nft(NftId(output_id.hash())),
            Self::Foundry(_) => self,
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alias(id) => write!(f, "{}", id.to_hex()),
            Self::Nft(id) => write!(f, "{}", id.to_hex()),
            Self::Foundry(id) => write!(f, "{}", id.to_hex()),
        }
    }
}

/// Represents the different output types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Output {
    /// The [`BasicOutput`] variant.
    Basic(BasicOutput),
    /// The [`AliasOutput`] variant.
    Alias(AliasOutput),
    /// The [`FoundryOutput`] variant.
    Foundry(FoundryOutput),
    /// The [`NftOutput`] variant.
    Nft(NftOutput),
}

impl Output {
    /// Returns the amount associated with the output.
    pub fn amount(&self) -> TokenAmount {
        match self {
            Self::Basic(BasicOutput { amount, .. }) => *amount,
            Self::Alias(AliasOutput { amount, .. }) => *amount,
            Self::Foundry(FoundryOutput { amount, .. }) => *amount,
            Self::Nft(NftOutput { amount, .. }) => *amount,
        }
    }

    /// Returns the native tokens held by the output.
    pub fn native_tokens(&self) -> &[NativeToken] {
        match self {
            Self::Basic(BasicOutput { native_tokens, .. }) => native_tokens,
            Self::Alias(AliasOutput { native_tokens, .. }) => native_tokens,
            Self::Foundry(FoundryOutput { native_tokens, .. }) => native_tokens,
            Self::Nft(NftOutput { native_tokens, .. }) => native_tokens,
        }
    }

    /// Returns the chain id of the output, possibly the empty sentinel. `None`
    /// for outputs that are not chain-constrained.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Basic(_) => None,
            Self::Alias(o) => Some(ChainId::Alias(o.alias_id)),
            Self::Foundry(o) => Some(ChainId::Foundry(o.foundry_id())),
            Self::Nft(o) => Some(ChainId::Nft(o.nft_id)),
        }
    }

    /// Returns the mutable features of the output.
    pub fn features(&self) -> &[Feature] {
        match self {
            Self::Basic(BasicOutput { features, .. }) => features,
            Self::Alias(AliasOutput { features, .. }) => features,
            Self::Foundry(FoundryOutput { features, .. }) => features,
            Self::Nft(NftOutput { features, .. }) => features,
        }
    }

    /// Returns the immutable features of the output. Basic outputs have none.
    pub fn immutable_features(&self) -> &[Feature] {
        match self {
            Self::Basic(_) => &[],
            Self::Alias(AliasOutput { immutable_features, .. }) => immutable_features,
            Self::Foundry(FoundryOutput { immutable_features, .. }) => immutable_features,
            Self::Nft(NftOutput { immutable_features, .. }) => immutable_features,
        }
    }

    /// Returns the timelock unlock condition, if any.
    pub fn timelock(&self) -> Option<&unlock_condition::TimelockUnlockCondition> {
        match self {
            Self::Basic(o) => o.timelock_unlock_condition.as_ref(),
            Self::Nft(o) => o.timelock_unlock_condition.as_ref(),
            Self::Alias(_) | Self::Foundry(_) => None,
        }
    }

    /// Returns the expiration unlock condition, if any.
    pub fn expiration(&self) -> Option<&unlock_condition::ExpirationUnlockCondition> {
        match self {
            Self::Basic(o) => o.expiration_unlock_condition.as_ref(),
            Self::Nft(o) => o.expiration_unlock_condition.as_ref(),
            Self::Alias(_) | Self::Foundry(_) => None,
        }
    }

    /// Returns the storage deposit return unlock condition, if any.
    pub fn storage_deposit_return(&self) -> Option<&unlock_condition::StorageDepositReturnUnlockCondition> {
        match self {
            Self::Basic(o) => o.storage_deposit_return_unlock_condition.as_ref(),
            Self::Nft(o) => o.storage_deposit_return_unlock_condition.as_ref(),
            Self::Alias(_) | Self::Foundry(_) => None,
        }
    }

    /// Get the output kind as a string.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic(_) => BasicOutput::KIND,
            Self::Alias(_) => AliasOutput::KIND,
            Self::Foundry(_) => FoundryOutput::KIND,
            Self::Nft(_) => NftOutput::KIND,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_output_id_hex() {
        let output_id = OutputId::from((TransactionId([0xab; 32]), 2));
        let hex = output_id.to_hex();
        assert!(hex.starts_with("0xabab"));
        // index is appended in little endian
        assert!(hex.ends_with("0200"));
    }

    #[test]
    fn test_empty_chain_id_derivation() {
        let output_id = OutputId::from((TransactionId([1; 32]), 0));
        let chain_id = ChainId::Alias(AliasId([0; 32]));
        assert!(chain_id.is_empty());
        let derived = chain_id.or_derived_from(&output_id);
        assert!(!derived.is_empty());
        assert_eq!(derived, ChainId::Alias(AliasId(output_id.hash())));
        // a non-empty id is never replaced
        assert_eq!(derived.or_derived_from(&OutputId::from((TransactionId([2; 32]), 1))), derived);
    }
}
