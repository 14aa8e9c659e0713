// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`BasicOutput`].

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

/// The most basic output variant: an amount of base tokens (and possibly native
/// tokens) owned by an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicOutput {
    /// The output amount.
    pub amount: TokenAmount,
    /// The native tokens held by the output.
    pub native_tokens: Box<[NativeToken]>,
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
}

impl BasicOutput {
    /// A `&str` representation of the type.
    pub const KIND: &'static str = "basic";

    /// Whether the output is a plain transfer: owned by its address alone, with
    /// no additional unlock conditions, no features and no native tokens.
    /// Storage deposit returns must be fulfilled by outputs of this shape.
    pub fn is_simple_transfer(&self) -> bool {
        self.storage_deposit_return_unlock_condition.is_none()
            && self.timelock_unlock_condition.is_none()
            && self.expiration_unlock_condition.is_none()
            && self.features.is_empty()
            && self.native_tokens.is_empty()
    }
}
