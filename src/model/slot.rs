// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the slot index type.

use serde::{Deserialize, Serialize};

/// The index of a slot, the ledger's discrete time axis. Timelock and expiration
/// conditions as well as block issuer expiries are expressed in slot indices.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Add,
    derive_more::AddAssign,
)]
#[serde(transparent)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    /// Adds the given number of slots, or `None` past the end of the time axis.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
