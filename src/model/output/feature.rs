// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Feature`] types.

use serde::{Deserialize, Serialize};

use crate::model::{address::Address, output::TokenAmount, slot::SlotIndex, util::bytify};

/// A key authorized to issue blocks on behalf of an account.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockIssuerKey(#[serde(with = "bytify")] pub [u8; 32]);

impl TryFrom<&[u8]> for BlockIssuerKey {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

/// The block issuer feature of an alias output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIssuerFeature {
    /// The slot index at which the feature expires.
    pub expiry_slot: SlotIndex,
    /// The keys authorized to issue blocks.
    pub block_issuer_keys: Box<[BlockIssuerKey]>,
}

/// The staking feature of an alias output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingFeature {
    /// The amount of base tokens locked for staking.
    pub staked_amount: TokenAmount,
    /// The fixed cost charged per epoch.
    pub fixed_cost: u64,
    /// The first epoch the stake is active in.
    pub start_epoch: u32,
    /// The last epoch the stake is active in.
    pub end_epoch: u32,
}

/// The different [`Feature`] variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Feature {
    /// The sender feature.
    Sender {
        /// The address associated with the feature.
        address: Address,
    },
    /// The issuer feature. Only valid as an immutable feature.
    Issuer {
        /// The address associated with the feature.
        address: Address,
    },
    /// The metadata feature.
    Metadata {
        /// The data of the feature.
        #[serde(with = "serde_bytes")]
        data: Box<[u8]>,
    },
    /// The tag feature.
    Tag {
        /// The data of the feature.
        #[serde(with = "serde_bytes")]
        data: Box<[u8]>,
    },
    /// The staking feature.
    Staking(StakingFeature),
    /// The block issuer feature.
    BlockIssuer(BlockIssuerFeature),
}

/// Lookup helpers over a set of features.
pub trait FeatureSet {
    /// Returns the sender feature's address, if present.
    fn sender(&self) -> Option<&Address>;
    /// Returns the issuer feature's address, if present.
    fn issuer(&self) -> Option<&Address>;
    /// Returns the metadata feature's data, if present.
    fn metadata(&self) -> Option<&[u8]>;
    /// Returns the staking feature, if present.
    fn staking(&self) -> Option<&StakingFeature>;
    /// Returns the block issuer feature, if present.
    fn block_issuer(&self) -> Option<&BlockIssuerFeature>;
}

impl FeatureSet for [Feature] {
    fn sender(&self) -> Option<&Address> {
        self.iter().find_map(|f| match f {
            Feature::Sender { address } => Some(address),
            _ => None,
        })
    }

    fn issuer(&self) -> Option<&Address> {
        self.iter().find_map(|f| match f {
            Feature::Issuer { address } => Some(address),
            _ => None,
        })
    }

    fn metadata(&self) -> Option<&[u8]> {
        self.iter().find_map(|f| match f {
            Feature::Metadata { data } => Some(data.as_ref()),
            _ => None,
        })
    }

    fn staking(&self) -> Option<&StakingFeature> {
        self.iter().find_map(|f| match f {
            Feature::Staking(staking) => Some(staking),
            _ => None,
        })
    }

    fn block_issuer(&self) -> Option<&BlockIssuerFeature> {
        self.iter().find_map(|f| match f {
            Feature::BlockIssuer(block_issuer) => Some(block_issuer),
            _ => None,
        })
    }
}
