// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the unlock condition types.
//!
//! Which conditions an output may carry is fixed per output variant, so the
//! conditions are modeled as explicit (optional) fields on the output structs;
//! ordering and de-duplication of the wire format is a codec concern.

use serde::{Deserialize, Serialize};

use super::{alias::AliasId, TokenAmount};
use crate::model::{address::Address, slot::SlotIndex};

/// Defines the address that owns an output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUnlockCondition {
    /// The address that is allowed to unlock the output.
    pub address: Address,
}

/// Defines the amount of base tokens that have to be returned to a designated
/// address when the output is consumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDepositReturnUnlockCondition {
    /// The address the amount has to be returned to.
    pub return_address: Address,
    /// The amount that has to be returned, unencumbered.
    pub amount: TokenAmount,
}

/// Defines a slot index until which the output cannot be unlocked by anyone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelockUnlockCondition {
    /// The slot index at which the timelock opens.
    pub slot: SlotIndex,
}

impl TimelockUnlockCondition {
    /// Whether the timelock is open at the given confirmation slot.
    pub fn is_expired(&self, confirmation_slot: SlotIndex) -> bool {
        confirmation_slot >= self.slot
    }
}

/// Defines a slot index from which on only the return address can unlock the
/// output. Exactly at the boundary the return address prevails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationUnlockCondition {
    /// The address that can unlock the output once it expired.
    pub return_address: Address,
    /// The slot index at which the output expires.
    pub slot: SlotIndex,
}

impl ExpirationUnlockCondition {
    /// Returns the return address if the output is expired at the given
    /// confirmation slot, in which case it replaces the owner as the identity
    /// to unlock.
    pub fn return_address_expired(&self, confirmation_slot: SlotIndex) -> Option<&Address> {
        (confirmation_slot >= self.slot).then_some(&self.return_address)
    }
}

/// Defines the address that controls an alias chain's state transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateControllerAddressUnlockCondition {
    /// The state controller address.
    pub address: Address,
}

/// Defines the address that controls an alias chain's governance transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorAddressUnlockCondition {
    /// The governor address.
    pub address: Address,
}

/// Defines the alias that owns a foundry. Immutable for the foundry's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableAliasAddressUnlockCondition {
    /// The id of the owning alias.
    pub alias_id: AliasId,
}
