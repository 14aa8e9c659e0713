// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Unlock`] types.

use serde::{Deserialize, Serialize};

use crate::model::signature::Ed25519Signature;

/// The different types of [`Unlock`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Unlock {
    /// A signature unlock, establishing the signer's address as unlocked.
    Signature {
        /// The [`Ed25519Signature`] of the unlock.
        signature: Ed25519Signature,
    },
    /// A reference unlock, reusing the direct address unlocked at an earlier
    /// input position.
    Reference {
        /// The index of the unlock.
        index: u16,
    },
    /// An alias unlock, referencing the input position at which the owning
    /// alias chain was unlocked.
    Alias {
        /// The index of the unlock.
        index: u16,
    },
    /// An NFT unlock, referencing the input position at which the owning NFT
    /// chain was unlocked.
    Nft {
        /// The index of the unlock.
        index: u16,
    },
}
