// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the transaction validity engine.

pub mod error;
pub mod passes;
pub mod stvf;
pub mod unlock;
pub mod working_set;

use tracing::{debug, instrument, trace};

pub use self::{
    error::TransactionFailure,
    working_set::{ResolvedInputs, WorkingSet, WorkingSetBuilder},
};
use crate::model::{protocol::ProtocolParameters, slot::SlotIndex, transaction::Transaction};

/// The external context a transaction is validated under: the slot it would be
/// confirmed in and the protocol constants. The verdict is a pure function of
/// the transaction, the resolved inputs and these parameters.
#[derive(Copy, Clone, Debug)]
pub struct ExternalUnlockParameters {
    /// The slot the transaction is confirmed in. All temporal conditions are
    /// evaluated against this slot.
    pub confirmation_slot: SlotIndex,
    /// The protocol constants.
    pub protocol: ProtocolParameters,
}

/// A single validation pass over the working set. Passes run in pipeline order
/// and the first failure aborts the run.
pub type ExecPass = fn(&mut WorkingSet<'_>, &ExternalUnlockParameters) -> Result<(), TransactionFailure>;

/// The virtual machine validating transactions against a resolved input
/// snapshot. The default pipeline runs the temporal checks first, then unlock
/// resolution, then the feature, balance and chain transition checks.
#[derive(Clone, Debug)]
pub struct VirtualMachine {
    passes: Vec<ExecPass>,
}

impl Default for VirtualMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualMachine {
    /// Creates a virtual machine with the default validation pipeline.
    pub fn new() -> Self {
        Self {
            passes: vec![
                passes::timelocks,
                unlock::unlock_inputs,
                passes::sender_features,
                passes::issuer_features,
                passes::balanced_base_tokens,
                passes::balanced_native_tokens,
                stvf::chain_transitions,
            ],
        }
    }

    /// Validates the transaction against the resolved inputs. Returns the
    /// first failure encountered, or nothing if the transaction is valid. The
    /// verdict is deterministic: repeated runs over the same arguments yield
    /// the same result.
    #[instrument(skip_all, fields(transaction_id = %transaction.transaction_id))]
    pub fn execute(
        &self,
        transaction: &Transaction,
        resolved: &ResolvedInputs,
        params: &ExternalUnlockParameters,
    ) -> Result<(), TransactionFailure> {
        Self::run(transaction, resolved, params, &self.passes).map_err(|e| {
            debug!(error = %e, "transaction rejected");
            e
        })
    }

    /// Validates the transaction with a caller-supplied ordered subset of
    /// passes. Most passes assume unlock resolution ran before them.
    pub fn execute_with_passes(
        transaction: &Transaction,
        resolved: &ResolvedInputs,
        params: &ExternalUnlockParameters,
        passes: &[ExecPass],
    ) -> Result<(), TransactionFailure> {
        Self::run(transaction, resolved, params, passes)
    }

    fn run(
        transaction: &Transaction,
        resolved: &ResolvedInputs,
        params: &ExternalUnlockParameters,
        passes: &[ExecPass],
    ) -> Result<(), TransactionFailure> {
        if transaction.inputs.len() > params.protocol.max_inputs as usize {
            return Err(TransactionFailure::InputCountExceeded {
                count: transaction.inputs.len(),
                max: params.protocol.max_inputs,
            });
        }
        if transaction.outputs.len() > params.protocol.max_outputs as usize {
            return Err(TransactionFailure::OutputCountExceeded {
                count: transaction.outputs.len(),
                max: params.protocol.max_outputs,
            });
        }
        let mut working_set = WorkingSetBuilder::new(transaction, resolved).build()?;
        for (index, pass) in passes.iter().enumerate() {
            pass(&mut working_set, params)?;
            trace!(pass = index, "pass complete");
        }
        Ok(())
    }
}
