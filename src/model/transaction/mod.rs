// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Transaction`] types.

pub mod unlock;

use serde::{Deserialize, Serialize};

use super::{
    output::{alias::AliasId, Output, OutputId},
    slot::SlotIndex,
    util::bytify,
};
pub use self::unlock::Unlock;

/// The id of a transaction: the BLAKE2b-256 digest of the transaction essence,
/// computed by the codec during decoding. Signature unlocks sign this digest,
/// and output ids as well as genesis chain ids are derived from it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl TransactionId {
    /// The number of bytes of a [`TransactionId`].
    pub const LENGTH: usize = 32;

    /// Converts the [`TransactionId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_slice())
    }
}

impl TryFrom<&[u8]> for TransactionId {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A context input: data from outside the UTXO set that the transaction's
/// validation depends on. The referenced values are resolved by the embedding
/// host and supplied alongside the input snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ContextInput {
    /// References a slot commitment.
    Commitment {
        /// The committed slot.
        slot: SlotIndex,
    },
    /// References the block issuance credit balance of an account.
    BlockIssuanceCredit {
        /// The alias chain whose credit balance is referenced.
        alias_id: AliasId,
    },
}

/// An allotment of mana-like credit to an account, carried by the transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allotment {
    /// The alias chain the value is allotted to.
    pub alias_id: AliasId,
    /// The allotted value.
    pub value: u64,
}

/// An optional data payload embedded in a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDataPayload {
    /// The tag of the data.
    #[serde(with = "serde_bytes")]
    pub tag: Box<[u8]>,
    /// The data itself.
    #[serde(with = "serde_bytes")]
    pub data: Box<[u8]>,
}

/// A decoded transaction: the essence fields plus the unlocks that authorize
/// consuming the referenced inputs. The unlock at position `i` unlocks the
/// input at position `i`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The transaction id, computed by the codec.
    pub transaction_id: TransactionId,
    /// The slot the transaction was created in.
    pub creation_slot: SlotIndex,
    /// The references to the consumed outputs.
    pub inputs: Box<[OutputId]>,
    /// The context inputs, if any.
    pub context_inputs: Box<[ContextInput]>,
    /// The outputs created by the transaction.
    pub outputs: Box<[Output]>,
    /// The allotments carried by the transaction.
    pub allotments: Box<[Allotment]>,
    /// An optional embedded payload.
    pub payload: Option<TaggedDataPayload>,
    /// The unlocks, positionally aligned with `inputs`.
    pub unlocks: Box<[Unlock]>,
}

impl Transaction {
    /// The message that signature unlocks must have signed.
    pub fn signing_message(&self) -> &[u8] {
        &self.transaction_id.0
    }
}
