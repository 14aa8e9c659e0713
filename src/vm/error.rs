// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the engine's failure taxonomy.

use thiserror::Error;

use crate::model::{
    address::Address,
    output::{ChainId, OutputId, TokenAmount, TokenId},
    slot::SlotIndex,
};

/// The reason a transaction was rejected. Exactly one failure is reported per
/// rejected transaction: the pipeline aborts on the first failing pass.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionFailure {
    // Structural failures.
    #[error("utxo for input {input_index} ({output_id}) not supplied")]
    MissingUtxo { input_index: u16, output_id: OutputId },
    #[error("input {input_index} consumes {output_id}, which an earlier input already consumes")]
    DuplicateInput { input_index: u16, output_id: OutputId },
    #[error("transaction has {inputs} inputs but {unlocks} unlocks")]
    UnlockCountMismatch { inputs: usize, unlocks: usize },
    #[error("input count {count} exceeds max of {max}")]
    InputCountExceeded { count: usize, max: u16 },
    #[error("output count {count} exceeds max of {max}")]
    OutputCountExceeded { count: usize, max: u16 },
    #[error("freshly derived chain id {chain_id} collides with an existing chain")]
    ChainIdCollision { chain_id: ChainId },
    #[error("chain {chain_id} transitions to an output of a different type")]
    ChainOutputTypeMismatch { chain_id: ChainId },

    // Authorization failures.
    #[error("input {input_index} is not unlocked by its signature")]
    SignatureInvalid { input_index: u16 },
    #[error("input {input_index} carries an unlock of the wrong type for its owner")]
    InvalidUnlock { input_index: u16 },
    #[error("input {input_index} is not unlocked through input {referenced_index}'s unlock")]
    UnlockReferenceInvalid { input_index: u16, referenced_index: u16 },
    #[error("input {input_index}'s address is already unlocked through input {unlocked_at} but uses a non-referential unlock")]
    IdentityAlreadyUnlocked { input_index: u16, unlocked_at: u16 },
    #[error("sender feature of output {output_index} is not unlocked")]
    SenderFeatureNotUnlocked { output_index: u16 },
    #[error("issuer feature of output {output_index} is not unlocked")]
    IssuerFeatureNotUnlocked { output_index: u16 },

    // Temporal failures.
    #[error("timelock of input {input_index} is not expired until slot {slot}")]
    TimelockNotExpired { input_index: u16, slot: SlotIndex },

    // Balance failures.
    #[error("input amount {input_sum} does not equal output amount {output_sum}")]
    InputOutputSumMismatch {
        input_sum: TokenAmount,
        output_sum: TokenAmount,
    },
    #[error("native token {token_id} is unbalanced and its foundry is not transitioning")]
    NativeTokenSumUnbalanced { token_id: TokenId },
    #[error("native token sums overflow")]
    NativeTokenSumOverflow,
    #[error("distinct native token count {count} exceeds max of {max}")]
    NativeTokenCountExceeded { count: usize, max: u16 },
    #[error("storage deposit return of {amount} to {return_address} is not fulfilled")]
    StorageDepositReturnUnfulfilled {
        return_address: Address,
        amount: TokenAmount,
    },

    // Chain transition failures, wrapped with the offending chain's context.
    #[error("chain transition failed for {output_kind} chain {chain_id}: {source}")]
    ChainTransition {
        chain_id: ChainId,
        output_kind: &'static str,
        source: Box<TransactionFailure>,
    },
    #[error("invalid genesis transition: {0}")]
    InvalidGenesisTransition(String),
    #[error("invalid governance transition: {0}")]
    InvalidGovernanceTransition(String),
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),
    #[error("invalid foundry transition: {0}")]
    InvalidFoundryTransition(String),
    #[error("invalid block issuer transition: {0}")]
    InvalidBlockIssuerTransition(&'static str),
    #[error("invalid staking transition: {0}")]
    InvalidStakingTransition(&'static str),
}

impl TransactionFailure {
    /// Wraps a failure with the chain it occurred on.
    pub(crate) fn for_chain(self, chain_id: ChainId, output_kind: &'static str) -> Self {
        Self::ChainTransition {
            chain_id,
            output_kind,
            source: Box::new(self),
        }
    }
}
