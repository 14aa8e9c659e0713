// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the state transition validation of chain-constrained
//! outputs. Every chain touched by the transaction undergoes exactly one of
//! three transitions: genesis, state change or destruction.

pub mod alias;
pub mod foundry;
pub mod nft;

use super::{
    error::TransactionFailure,
    working_set::{ChainInput, ChainOutput, WorkingSet},
    ExternalUnlockParameters,
};
use crate::model::output::{AliasOutput, ChainId, FoundryOutput, NftOutput, Output};

/// The kind of transition a chain undergoes within a transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainTransitionType {
    /// The chain is created; its id is derived from the creating output.
    Genesis,
    /// The chain exists on both sides and advances its state.
    StateChange,
    /// The chain is consumed without a successor.
    Destroy,
}

/// The transition the given chain undergoes in the transaction, if it is
/// touched at all.
pub fn transition_type(ws: &WorkingSet<'_>, chain_id: &ChainId) -> Option<ChainTransitionType> {
    match (ws.in_chains.contains_key(chain_id), ws.out_chains.contains_key(chain_id)) {
        (false, false) => None,
        (false, true) => Some(ChainTransitionType::Genesis),
        (true, true) => Some(ChainTransitionType::StateChange),
        (true, false) => Some(ChainTransitionType::Destroy),
    }
}

/// Validates the state transition of every chain touched by the transaction.
/// Failures are wrapped with the offending chain's id and output kind.
pub fn chain_transitions(
    working_set: &mut WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    let ws: &WorkingSet<'_> = working_set;
    for (&chain_id, next) in &ws.out_chains {
        match ws.in_chains.get(&chain_id) {
            None => genesis(chain_id, next, ws, params)?,
            Some(current) => state_change(chain_id, current, next, ws, params)?,
        }
    }
    for (&chain_id, current) in &ws.in_chains {
        if !ws.out_chains.contains_key(&chain_id) {
            destroy(chain_id, current, ws, params)?;
        }
    }
    Ok(())
}

fn genesis(
    chain_id: ChainId,
    next: &ChainOutput<'_>,
    ws: &WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    match next.output {
        Output::Alias(next) => {
            alias::genesis(next, params).map_err(|e| e.for_chain(chain_id, AliasOutput::KIND))
        }
        Output::Foundry(next_foundry) => foundry::genesis(next_foundry, next.output_index, ws)
            .map_err(|e| e.for_chain(chain_id, FoundryOutput::KIND)),
        Output::Nft(next) => nft::genesis(next).map_err(|e| e.for_chain(chain_id, NftOutput::KIND)),
        // basic outputs are never chain-keyed
        Output::Basic(_) => Ok(()),
    }
}

fn state_change(
    chain_id: ChainId,
    current: &ChainInput<'_>,
    next: &ChainOutput<'_>,
    ws: &WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    match (current.output, next.output) {
        (Output::Alias(current), Output::Alias(next)) => {
            alias::state_change(chain_id, current, next, ws, params)
                .map_err(|e| e.for_chain(chain_id, AliasOutput::KIND))
        }
        (Output::Foundry(current), Output::Foundry(next)) => foundry::state_change(current, next, ws)
            .map_err(|e| e.for_chain(chain_id, FoundryOutput::KIND)),
        (Output::Nft(current), Output::Nft(next)) => {
            nft::state_change(current, next).map_err(|e| e.for_chain(chain_id, NftOutput::KIND))
        }
        _ => Err(TransactionFailure::ChainOutputTypeMismatch { chain_id }),
    }
}

fn destroy(
    chain_id: ChainId,
    current: &ChainInput<'_>,
    ws: &WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    match current.output {
        Output::Alias(current) => alias::destroy(chain_id, current, ws, params)
            .map_err(|e| e.for_chain(chain_id, AliasOutput::KIND)),
        Output::Foundry(current) => {
            foundry::destroy(current, ws).map_err(|e| e.for_chain(chain_id, FoundryOutput::KIND))
        }
        // an NFT can always be destroyed by its owner
        Output::Nft(_) | Output::Basic(_) => Ok(()),
    }
}
