// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the decoded ledger model.

pub mod address;
pub mod output;
pub mod protocol;
pub mod signature;
pub mod slot;
pub mod transaction;
pub mod util;

pub use self::{
    address::Address,
    output::{
        AliasId, AliasOutput, BasicOutput, ChainId, FoundryId, FoundryOutput, NativeToken, NftId, NftOutput, Output,
        OutputId, TokenAmount, TokenId, TokenScheme,
    },
    protocol::ProtocolParameters,
    signature::Ed25519Signature,
    slot::SlotIndex,
    transaction::{Transaction, TransactionId, Unlock},
};
