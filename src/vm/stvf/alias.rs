// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! State transition validation of alias outputs. The state index decides which
//! transition is claimed: an unchanged index is a governance transition, an
//! index advanced by one is a state transition.

use super::super::{error::TransactionFailure, working_set::WorkingSet, ExternalUnlockParameters};
use crate::model::output::{
    feature::BlockIssuerFeature, AliasId, AliasOutput, ChainId, FeatureSet, Output,
};

pub(super) fn genesis(
    next: &AliasOutput,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    if next.alias_id != AliasId::null() {
        return Err(TransactionFailure::InvalidGenesisTransition(
            "alias id must be zeroed".into(),
        ));
    }
    if next.state_index != 0 {
        return Err(TransactionFailure::InvalidGenesisTransition(format!(
            "state index must be zero, got {}",
            next.state_index
        )));
    }
    if next.foundry_counter != 0 {
        return Err(TransactionFailure::InvalidGenesisTransition(format!(
            "foundry counter must be zero, got {}",
            next.foundry_counter
        )));
    }
    if let Some(block_issuer) = next.features.block_issuer() {
        check_block_issuer_expiry(block_issuer, params)?;
    }
    if let Some(staking) = next.features.staking() {
        if next.features.block_issuer().is_none() {
            return Err(TransactionFailure::InvalidStakingTransition(
                "staking requires a block issuer feature",
            ));
        }
        if staking.staked_amount > next.amount {
            return Err(TransactionFailure::InvalidStakingTransition(
                "staked amount exceeds the output amount",
            ));
        }
    }
    Ok(())
}

pub(super) fn state_change(
    chain_id: ChainId,
    current: &AliasOutput,
    next: &AliasOutput,
    ws: &WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    if current.immutable_features != next.immutable_features {
        return Err(TransactionFailure::InvalidStateTransition(
            "immutable features must not change".into(),
        ));
    }
    if next.state_index == current.state_index {
        governance(current, next)?;
    } else if Some(next.state_index) == current.state_index.checked_add(1) {
        state(chain_id, current, next, ws)?;
    } else {
        return Err(TransactionFailure::InvalidStateTransition(format!(
            "state index must stay or advance by one, got {} to {}",
            current.state_index, next.state_index
        )));
    }
    block_issuer_transition(chain_id, current, next, ws, params)
}

/// A governance transition replaces the controllers and nothing else: the
/// funds, tokens and state data all belong to the state controller.
fn governance(current: &AliasOutput, next: &AliasOutput) -> Result<(), TransactionFailure> {
    if current.amount != next.amount {
        return Err(TransactionFailure::InvalidGovernanceTransition(format!(
            "amount must not change, got {} to {}",
            current.amount, next.amount
        )));
    }
    if current.native_tokens != next.native_tokens {
        return Err(TransactionFailure::InvalidGovernanceTransition(
            "native tokens must not change".into(),
        ));
    }
    if current.state_metadata != next.state_metadata {
        return Err(TransactionFailure::InvalidGovernanceTransition(
            "state metadata must not change".into(),
        ));
    }
    if current.foundry_counter != next.foundry_counter {
        return Err(TransactionFailure::InvalidGovernanceTransition(
            "foundry counter must not change".into(),
        ));
    }
    if current.features.staking() != next.features.staking() {
        return Err(TransactionFailure::InvalidStakingTransition(
            "staking can only change in a state transition",
        ));
    }
    Ok(())
}

/// A state transition may move funds and data but must leave the controllers
/// alone, and has to account for every foundry it creates.
fn state(
    chain_id: ChainId,
    current: &AliasOutput,
    next: &AliasOutput,
    ws: &WorkingSet<'_>,
) -> Result<(), TransactionFailure> {
    if current.state_controller() != next.state_controller() || current.governor() != next.governor() {
        return Err(TransactionFailure::InvalidStateTransition(
            "controllers can only change in a governance transition".into(),
        ));
    }
    if current.features.metadata() != next.features.metadata() {
        return Err(TransactionFailure::InvalidStateTransition(
            "the metadata feature can only change in a governance transition".into(),
        ));
    }
    if next.foundry_counter < current.foundry_counter {
        return Err(TransactionFailure::InvalidStateTransition(format!(
            "foundry counter must not decrease, got {} to {}",
            current.foundry_counter, next.foundry_counter
        )));
    }
    let ChainId::Alias(alias_id) = chain_id else {
        return Err(TransactionFailure::ChainOutputTypeMismatch { chain_id });
    };
    let created_foundries = ws
        .out_chains
        .iter()
        .filter(|&(foundry_chain_id, out)| {
            !ws.in_chains.contains_key(foundry_chain_id)
                && matches!(out.output, Output::Foundry(foundry) if foundry.alias_id() == &alias_id)
        })
        .count();
    if (next.foundry_counter - current.foundry_counter) as usize != created_foundries {
        return Err(TransactionFailure::InvalidStateTransition(format!(
            "foundry counter increased by {} but {} foundries were created",
            next.foundry_counter - current.foundry_counter,
            created_foundries
        )));
    }
    Ok(())
}

pub(super) fn destroy(
    chain_id: ChainId,
    current: &AliasOutput,
    ws: &WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    if let Some(block_issuer) = current.features.block_issuer() {
        if block_issuer.expiry_slot > params.confirmation_slot {
            return Err(TransactionFailure::InvalidBlockIssuerTransition(
                "cannot destroy an account with an unexpired block issuer feature",
            ));
        }
        check_block_issuance_credit(chain_id, ws)?;
    }
    Ok(())
}

/// Checks the rules around adding, changing or removing the block issuer
/// feature. Any transition of an account carrying the feature needs its block
/// issuance credit resolved and non-negative.
fn block_issuer_transition(
    chain_id: ChainId,
    current: &AliasOutput,
    next: &AliasOutput,
    ws: &WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    let (current_feature, next_feature) = (current.features.block_issuer(), next.features.block_issuer());
    match (current_feature, next_feature) {
        (None, None) => return Ok(()),
        (None, Some(added)) => check_block_issuer_expiry(added, params)?,
        (Some(removed), None) => {
            if removed.expiry_slot > params.confirmation_slot {
                return Err(TransactionFailure::InvalidBlockIssuerTransition(
                    "cannot remove an unexpired block issuer feature",
                ));
            }
        }
        (Some(current_feature), Some(next_feature)) => {
            if current_feature.expiry_slot != next_feature.expiry_slot {
                check_block_issuer_expiry(next_feature, params)?;
            }
            if next_feature.block_issuer_keys.is_empty() {
                return Err(TransactionFailure::InvalidBlockIssuerTransition(
                    "block issuer feature carries no keys",
                ));
            }
        }
    }
    check_block_issuance_credit(chain_id, ws)
}

fn check_block_issuer_expiry(
    feature: &BlockIssuerFeature,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    if feature.block_issuer_keys.is_empty() {
        return Err(TransactionFailure::InvalidBlockIssuerTransition(
            "block issuer feature carries no keys",
        ));
    }
    // An overflowing horizon lies past the end of the time axis and can never
    // be met.
    let horizon = params.confirmation_slot.checked_add(params.protocol.max_commitable_age);
    if horizon.map_or(true, |horizon| feature.expiry_slot < horizon) {
        return Err(TransactionFailure::InvalidBlockIssuerTransition(
            "block issuer expiry slot is below the committable horizon",
        ));
    }
    Ok(())
}

fn check_block_issuance_credit(chain_id: ChainId, ws: &WorkingSet<'_>) -> Result<(), TransactionFailure> {
    let ChainId::Alias(alias_id) = chain_id else {
        return Err(TransactionFailure::ChainOutputTypeMismatch { chain_id });
    };
    match ws.block_issuance_credits.get(&alias_id) {
        None => Err(TransactionFailure::InvalidBlockIssuerTransition(
            "missing block issuance credit context input",
        )),
        Some(credit) if *credit < 0 => Err(TransactionFailure::InvalidBlockIssuerTransition(
            "negative block issuance credit",
        )),
        Some(_) => Ok(()),
    }
}
