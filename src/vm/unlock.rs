// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing unlock resolution: deciding, per input, which identity
//! must authorize its consumption and checking the supplied unlock against it.

use std::collections::BTreeMap;

use super::{
    error::TransactionFailure,
    working_set::{ResolvedInput, WorkingSet},
    ExternalUnlockParameters,
};
use crate::model::{
    address::Address,
    output::{ChainId, Output},
    transaction::Unlock,
};

/// The set of identities proven on the input side, each recorded with the
/// input position at which it was first unlocked, plus the identity that
/// authorized each input.
#[derive(Clone, Debug, Default)]
pub struct UnlockedIdentities {
    first_unlocked: BTreeMap<Address, u16>,
    authorized: BTreeMap<u16, Address>,
}

impl UnlockedIdentities {
    /// Records an identity as unlocked at the given input position. The first
    /// position wins; later unlocks of the same identity must reference it.
    pub fn unlock(&mut self, address: Address, input_index: u16) {
        self.first_unlocked.entry(address).or_insert(input_index);
    }

    /// Records the identity that authorized consuming the given input.
    pub fn authorize(&mut self, input_index: u16, address: Address) {
        self.authorized.insert(input_index, address);
    }

    /// Whether the identity has been unlocked.
    pub fn is_unlocked(&self, address: &Address) -> bool {
        self.first_unlocked.contains_key(address)
    }

    /// The input position at which the identity was unlocked, if it was.
    pub fn unlocked_at(&self, address: &Address) -> Option<u16> {
        self.first_unlocked.get(address).copied()
    }

    /// Whether the given input was authorized by the given identity.
    pub fn authorized_by(&self, input_index: u16, address: &Address) -> bool {
        self.authorized.get(&input_index) == Some(address)
    }
}

/// Resolves all unlocks of the transaction, populating the working set's
/// unlocked identities. Inputs are processed in transaction order so that
/// referential unlocks can only point backwards.
pub fn unlock_inputs(
    working_set: &mut WorkingSet<'_>,
    params: &ExternalUnlockParameters,
) -> Result<(), TransactionFailure> {
    for input_index in 0..working_set.inputs.len() {
        let input = working_set.inputs[input_index];
        let unlock = working_set.transaction.unlocks[input_index];
        let identity = identity_to_unlock(working_set, &input, params);
        unlock_identity(working_set, &identity, unlock, input_index as u16)?;
        working_set.unlocked_identities.authorize(input_index as u16, identity);
        register_chain_address(working_set, &input, input_index as u16);
    }
    Ok(())
}

/// Determines the identity that must authorize consuming the given input.
fn identity_to_unlock(
    working_set: &WorkingSet<'_>,
    input: &ResolvedInput<'_>,
    params: &ExternalUnlockParameters,
) -> Address {
    // Once expired, the return identity replaces the owner.
    let owner_or_return = |owner: &Address| {
        input
            .output
            .expiration()
            .and_then(|expiration| expiration.return_address_expired(params.confirmation_slot))
            .copied()
            .unwrap_or(*owner)
    };
    match input.output {
        Output::Basic(o) => owner_or_return(&o.address_unlock_condition.address),
        Output::Nft(o) => owner_or_return(&o.address_unlock_condition.address),
        Output::Alias(current) => {
            // Which controller signs depends on the kind of transition: an
            // unchanged state index marks a governance transition or a
            // destruction, both authorized by the governor.
            let chain_id = ChainId::Alias(current.alias_id).or_derived_from(&input.output_id);
            match working_set.out_chains.get(&chain_id).map(|next| next.output) {
                Some(Output::Alias(next)) if next.state_index != current.state_index => {
                    *current.state_controller()
                }
                _ => *current.governor(),
            }
        }
        Output::Foundry(foundry) => Address::Alias(*foundry.alias_id()),
    }
}

/// Checks the unlock at `input_index` against the identity it must prove.
fn unlock_identity(
    working_set: &mut WorkingSet<'_>,
    identity: &Address,
    unlock: Unlock,
    input_index: u16,
) -> Result<(), TransactionFailure> {
    if identity.is_direct_unlockable() {
        match unlock {
            Unlock::Signature { signature } => {
                if let Some(unlocked_at) = working_set.unlocked_identities.unlocked_at(identity) {
                    return Err(TransactionFailure::IdentityAlreadyUnlocked {
                        input_index,
                        unlocked_at,
                    });
                }
                if Address::from(signature.address()) != *identity
                    || !signature.is_valid(working_set.transaction.signing_message())
                {
                    return Err(TransactionFailure::SignatureInvalid { input_index });
                }
                working_set.unlocked_identities.unlock(*identity, input_index);
                Ok(())
            }
            Unlock::Reference { index } => {
                check_reference(working_set, identity, input_index, index)
            }
            Unlock::Alias { .. } | Unlock::Nft { .. } => {
                Err(TransactionFailure::InvalidUnlock { input_index })
            }
        }
    } else {
        // Chain addresses are never unlocked by a signature of their own; the
        // unlock must reference the input at which the backing chain was
        // unlocked, and its variant must match the chain's type.
        match (identity, unlock) {
            (Address::Alias(_), Unlock::Alias { index }) | (Address::Nft(_), Unlock::Nft { index }) => {
                check_reference(working_set, identity, input_index, index)
            }
            _ => Err(TransactionFailure::InvalidUnlock { input_index }),
        }
    }
}

fn check_reference(
    working_set: &WorkingSet<'_>,
    identity: &Address,
    input_index: u16,
    referenced_index: u16,
) -> Result<(), TransactionFailure> {
    if referenced_index < input_index
        && working_set.unlocked_identities.unlocked_at(identity) == Some(referenced_index)
    {
        Ok(())
    } else {
        Err(TransactionFailure::UnlockReferenceInvalid {
            input_index,
            referenced_index,
        })
    }
}

/// After an input is unlocked, the chain address it backs becomes available to
/// later inputs. Alias addresses are only granted through a state transition;
/// the governor alone cannot act on the chain's behalf.
fn register_chain_address(working_set: &mut WorkingSet<'_>, input: &ResolvedInput<'_>, input_index: u16) {
    match input.output {
        Output::Alias(current) => {
            let chain_id = ChainId::Alias(current.alias_id).or_derived_from(&input.output_id);
            let state_transitioned = matches!(
                working_set.out_chains.get(&chain_id).map(|next| next.output),
                Some(Output::Alias(next)) if Some(next.state_index) == current.state_index.checked_add(1)
            );
            if let (true, ChainId::Alias(alias_id)) = (state_transitioned, chain_id) {
                working_set
                    .unlocked_identities
                    .unlock(Address::Alias(alias_id), input_index);
            }
        }
        Output::Nft(nft) => {
            if let ChainId::Nft(nft_id) = ChainId::Nft(nft.nft_id).or_derived_from(&input.output_id) {
                working_set
                    .unlocked_identities
                    .unlock(Address::Nft(nft_id), input_index);
            }
        }
        Output::Basic(_) | Output::Foundry(_) => {}
    }
}
