// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the protocol parameters consumed by the engine.

use serde::{Deserialize, Serialize};

use super::slot::SlotIndex;

/// The protocol constants under which a transaction is validated. Every node
/// must validate with the identical parameter set to reach the same verdict.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParameters {
    /// The maximum number of distinct native tokens across the inputs and
    /// outputs of a single transaction.
    pub max_native_token_count: u16,
    /// The maximum age of a commitable slot. Block issuer expiries must be set
    /// at least this far past the confirmation slot.
    pub max_commitable_age: SlotIndex,
    /// The maximum number of inputs of a transaction.
    pub max_inputs: u16,
    /// The maximum number of outputs of a transaction.
    pub max_outputs: u16,
}

impl Default for ProtocolParameters {
    fn default() -> Self {
        Self {
            max_native_token_count: 64,
            max_commitable_age: SlotIndex(10),
            max_inputs: 128,
            max_outputs: 128,
        }
    }
}
