// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! State transition validation of foundry outputs, including the mint/melt
//! arithmetic of the simple token scheme.

use std::cmp::Ordering;

use primitive_types::U256;

use super::super::{error::TransactionFailure, working_set::WorkingSet};
use crate::model::output::{ChainId, FoundryOutput, Output, TokenId, TokenScheme};

pub(super) fn genesis(
    next: &FoundryOutput,
    output_index: u16,
    ws: &WorkingSet<'_>,
) -> Result<(), TransactionFailure> {
    // A foundry comes to life through a state transition of its owning alias,
    // which must therefore appear on both sides of the transaction.
    let alias_chain_id = ChainId::Alias(*next.alias_id());
    let missing_alias = |side: &str| {
        TransactionFailure::InvalidFoundryTransition(format!(
            "owning alias {} missing on the {side} side",
            next.alias_id().to_hex()
        ))
    };
    let current_alias = ws.in_chains.get(&alias_chain_id).ok_or_else(|| missing_alias("input"))?;
    let next_alias = ws.out_chains.get(&alias_chain_id).ok_or_else(|| missing_alias("output"))?;
    let (Output::Alias(current_alias), Output::Alias(next_alias)) = (current_alias.output, next_alias.output)
    else {
        return Err(missing_alias("input"));
    };

    // The serial number is allotted from the interval opened by the alias'
    // foundry counter transition.
    if next.serial_number <= current_alias.foundry_counter || next.serial_number > next_alias.foundry_counter
    {
        return Err(TransactionFailure::InvalidFoundryTransition(format!(
            "serial number {} outside the interval ({}, {}]",
            next.serial_number, current_alias.foundry_counter, next_alias.foundry_counter
        )));
    }

    // Foundries created for the same alias must be laid out in ascending
    // serial order.
    for (index, output) in ws.transaction.outputs.iter().enumerate() {
        if let Output::Foundry(other) = output {
            if (index as u16) < output_index
                && other.alias_id() == next.alias_id()
                && !ws.in_chains.contains_key(&ChainId::Foundry(other.foundry_id()))
                && other.serial_number >= next.serial_number
            {
                return Err(TransactionFailure::InvalidFoundryTransition(
                    "serial numbers of created foundries must increase with their output index".into(),
                ));
            }
        }
    }

    let TokenScheme::Simple {
        minted,
        melted,
        maximum_supply,
    } = next.token_scheme;
    if maximum_supply.is_zero() {
        return Err(TransactionFailure::InvalidFoundryTransition(
            "maximum supply must be positive".into(),
        ));
    }
    if !melted.is_zero() {
        return Err(TransactionFailure::InvalidFoundryTransition(format!(
            "melted supply must be zero at genesis, got {melted}"
        )));
    }
    if minted > maximum_supply {
        return Err(TransactionFailure::InvalidFoundryTransition(format!(
            "minted supply {minted} exceeds the maximum supply {maximum_supply}"
        )));
    }
    let out_sum = token_sum(&ws.out_native_tokens, &next.token_id());
    if minted != out_sum {
        return Err(TransactionFailure::InvalidFoundryTransition(format!(
            "minted supply {minted} does not match the created token sum {out_sum}"
        )));
    }
    Ok(())
}

pub(super) fn state_change(
    current: &FoundryOutput,
    next: &FoundryOutput,
    ws: &WorkingSet<'_>,
) -> Result<(), TransactionFailure> {
    if current.immutable_features != next.immutable_features {
        return Err(TransactionFailure::InvalidFoundryTransition(
            "immutable features must not change".into(),
        ));
    }
    let TokenScheme::Simple {
        minted: in_minted,
        melted: in_melted,
        maximum_supply: in_maximum,
    } = current.token_scheme;
    let TokenScheme::Simple {
        minted: out_minted,
        melted: out_melted,
        maximum_supply: out_maximum,
    } = next.token_scheme;
    if in_maximum != out_maximum {
        return Err(TransactionFailure::InvalidFoundryTransition(
            "maximum supply is immutable".into(),
        ));
    }
    if out_minted < in_minted || out_melted < in_melted {
        return Err(TransactionFailure::InvalidFoundryTransition(
            "minted and melted supplies must not decrease".into(),
        ));
    }
    if out_minted > out_maximum {
        return Err(TransactionFailure::InvalidFoundryTransition(format!(
            "minted supply {out_minted} exceeds the maximum supply {out_maximum}"
        )));
    }

    let token_id = current.token_id();
    let in_sum = token_sum(&ws.in_native_tokens, &token_id);
    let out_sum = token_sum(&ws.out_native_tokens, &token_id);
    match out_sum.cmp(&in_sum) {
        Ordering::Greater => {
            // Minting: the supply delta must match the created tokens exactly.
            let diff = out_sum - in_sum;
            if out_minted - in_minted != diff {
                return Err(TransactionFailure::InvalidFoundryTransition(format!(
                    "minted supply delta {} does not match the created token sum {diff}",
                    out_minted - in_minted
                )));
            }
            if out_melted != in_melted {
                return Err(TransactionFailure::InvalidFoundryTransition(
                    "cannot melt while minting".into(),
                ));
            }
        }
        Ordering::Less => {
            // Melting, possibly combined with burning: the melted delta must
            // not exceed the destroyed tokens.
            let diff = in_sum - out_sum;
            if out_melted - in_melted > diff {
                return Err(TransactionFailure::InvalidFoundryTransition(format!(
                    "melted supply delta {} exceeds the destroyed token sum {diff}",
                    out_melted - in_melted
                )));
            }
            if out_minted != in_minted {
                return Err(TransactionFailure::InvalidFoundryTransition(
                    "cannot mint while melting".into(),
                ));
            }
        }
        Ordering::Equal => {
            if out_minted != in_minted || out_melted != in_melted {
                return Err(TransactionFailure::InvalidFoundryTransition(
                    "supplies changed without a token sum change".into(),
                ));
            }
        }
    }
    Ok(())
}

pub(super) fn destroy(current: &FoundryOutput, ws: &WorkingSet<'_>) -> Result<(), TransactionFailure> {
    let TokenScheme::Simple { minted, melted, .. } = current.token_scheme;
    let token_id = current.token_id();
    let in_sum = token_sum(&ws.in_native_tokens, &token_id);
    let out_sum = token_sum(&ws.out_native_tokens, &token_id);
    if out_sum > in_sum {
        return Err(TransactionFailure::InvalidFoundryTransition(
            "cannot mint while destroying the foundry".into(),
        ));
    }
    let circulating = minted
        .checked_sub(melted)
        .ok_or_else(|| TransactionFailure::InvalidFoundryTransition("melted supply exceeds minted supply".into()))?;
    // The entire circulating supply must be burned along with the foundry.
    if in_sum - out_sum != circulating {
        return Err(TransactionFailure::InvalidFoundryTransition(format!(
            "circulating supply {circulating} must be burned, got {}",
            in_sum - out_sum
        )));
    }
    Ok(())
}

fn token_sum(sums: &std::collections::BTreeMap<TokenId, U256>, token_id: &TokenId) -> U256 {
    sums.get(token_id).copied().unwrap_or_default()
}
