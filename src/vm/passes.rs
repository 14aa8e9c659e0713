// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the generic validation passes: temporal checks, feature
//! authorization and the base token and native token balance checks.

use std::collections::{BTreeMap, BTreeSet};

use super::{error::TransactionFailure, working_set::WorkingSet, ExternalUnlockParameters};
use crate::model::{
    address::Address,
    output::{ChainId, FeatureSet, Output, TokenAmount},
};

/// Rejects the transaction if any consumed output is still timelocked at the
/// confirmation slot. Runs before unlock resolution so that a timelocked input
/// fails with a temporal error rather than an authorization one.
pub fn timelocks(
    working_set: &mut WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    for (input_index, input) in working_set.inputs.iter().enumerate() {
        if let Some(timelock) = input.output.timelock() {
            if !timelock.is_expired(params.confirmation_slot) {
                return Err(TransactionFailure::TimelockNotExpired {
                    input_index: input_index as u16,
                    slot: timelock.slot,
                });
            }
        }
    }
    Ok(())
}

/// Checks that every sender feature on the output side names an identity that
/// was unlocked on the input side.
pub fn sender_features(
    working_set: &mut WorkingSet<'_>,
    _params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    for (output_index, output) in working_set.transaction.outputs.iter().enumerate() {
        if let Some(sender) = output.features().sender() {
            if !working_set.unlocked_identities.is_unlocked(sender) {
                return Err(TransactionFailure::SenderFeatureNotUnlocked {
                    output_index: output_index as u16,
                });
            }
        }
    }
    Ok(())
}

/// Checks that the issuer of every newly created chain was unlocked. Issuer
/// features are immutable, so only genesis transitions are inspected here.
pub fn issuer_features(
    working_set: &mut WorkingSet<'_>,
    _params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    for (chain_id, next) in &working_set.out_chains {
        if working_set.in_chains.contains_key(chain_id) {
            continue;
        }
        if let Some(issuer) = next.output.immutable_features().issuer() {
            if !working_set.unlocked_identities.is_unlocked(issuer) {
                return Err(TransactionFailure::IssuerFeatureNotUnlocked {
                    output_index: next.output_index,
                });
            }
        }
    }
    Ok(())
}

/// Checks that the base token amounts balance exactly and that all storage
/// deposit return obligations are fulfilled.
pub fn balanced_base_tokens(
    working_set: &mut WorkingSet<'_>,
    _params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    let input_sum: TokenAmount = working_set.inputs.iter().map(|input| input.output.amount()).sum();
    let output_sum: TokenAmount = working_set.transaction.outputs.iter().map(Output::amount).sum();
    if input_sum != output_sum {
        return Err(TransactionFailure::InputOutputSumMismatch { input_sum, output_sum });
    }

    // Return obligations are aggregated per return address. An obligation is
    // waived when the return identity itself authorized the input, be it as
    // the owner or because the expiration handed the output over to it.
    let mut required: BTreeMap<Address, TokenAmount> = BTreeMap::new();
    for (input_index, input) in working_set.inputs.iter().enumerate() {
        let Some(return_condition) = input.output.storage_deposit_return() else {
            continue;
        };
        if working_set
            .unlocked_identities
            .authorized_by(input_index as u16, &return_condition.return_address)
        {
            continue;
        }
        *required.entry(return_condition.return_address).or_default() += return_condition.amount;
    }
    if required.is_empty() {
        return Ok(());
    }

    let mut returned: BTreeMap<Address, TokenAmount> = BTreeMap::new();
    for output in working_set.transaction.outputs.iter() {
        if let Output::Basic(basic) = output {
            // Only an unencumbered simple transfer counts as a return.
            if basic.is_simple_transfer() && required.contains_key(&basic.address_unlock_condition.address) {
                *returned.entry(basic.address_unlock_condition.address).or_default() += basic.amount;
            }
        }
    }
    for (return_address, amount) in required {
        if returned.get(&return_address).copied().unwrap_or_default() < amount {
            return Err(TransactionFailure::StorageDepositReturnUnfulfilled { return_address, amount });
        }
    }
    Ok(())
}

/// Checks the native token sums. Tokens whose foundry takes part in the
/// transaction are exempt here; their deltas are validated by the foundry's
/// transition. For all other tokens the output side must not exceed the input
/// side, which permits burning but never minting.
pub fn balanced_native_tokens(
    working_set: &mut WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    let token_ids: BTreeSet<_> = working_set
        .in_native_tokens
        .keys()
        .chain(working_set.out_native_tokens.keys())
        .copied()
        .collect();
    if token_ids.len() > params.protocol.max_native_token_count as usize {
        return Err(TransactionFailure::NativeTokenCountExceeded {
            count: token_ids.len(),
            max: params.protocol.max_native_token_count,
        });
    }
    for token_id in token_ids {
        let foundry_chain = ChainId::Foundry(token_id.foundry_id());
        if working_set.in_chains.contains_key(&foundry_chain)
            || working_set.out_chains.contains_key(&foundry_chain)
        {
            continue;
        }
        let in_sum = working_set.in_native_tokens.get(&token_id).copied().unwrap_or_default();
        let out_sum = working_set.out_native_tokens.get(&token_id).copied().unwrap_or_default();
        if out_sum > in_sum {
            return Err(TransactionFailure::NativeTokenSumUnbalanced { token_id });
        }
    }
    Ok(())
}
