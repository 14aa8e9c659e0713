// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Integration tests of the generic validation passes: unlocks, balances and
//! temporal conditions.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use primitive_types::U256;
use stardust_vm::{
    model::{
        output::{
            unlock_condition::{
                ExpirationUnlockCondition, StorageDepositReturnUnlockCondition, TimelockUnlockCondition,
            },
            AliasId, NativeToken, Output, TokenAmount, TokenId,
        },
        transaction::Unlock,
        SlotIndex,
    },
    vm::{ResolvedInputs, TransactionFailure, VirtualMachine},
};

#[test]
fn simple_transfer_is_accepted() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(100, address(1)));
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(2))],
        vec![signature_unlock(1)],
    );
    validate_at(&tx, &resolved, 0).unwrap();
}

#[test]
fn verdict_is_idempotent() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(100, address(1)));
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(150, address(2))],
        vec![signature_unlock(1)],
    );
    let first = validate_at(&tx, &resolved, 0);
    for _ in 0..3 {
        assert_eq!(validate_at(&tx, &resolved, 0), first);
    }
    // a fresh machine reaches the same verdict
    assert_eq!(
        VirtualMachine::new().execute(&tx, &resolved, &params_at(0)),
        first
    );
}

#[test]
fn base_token_sum_must_balance() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(100, address(1)));
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(150, address(2))],
        vec![signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::InputOutputSumMismatch {
            input_sum: TokenAmount(100),
            output_sum: TokenAmount(150)
        }
    );
}

#[test]
fn missing_utxo_is_reported() {
    let tx = transaction(
        vec![consumed_id(7)],
        vec![basic(100, address(2))],
        vec![signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &ResolvedInputs::default(), 0).unwrap_err(),
        TransactionFailure::MissingUtxo {
            input_index: 0,
            output_id: consumed_id(7)
        }
    );
}

#[test]
fn duplicated_input_cannot_inflate_the_supply() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(100, address(1)));
    // listing the same 100-token output twice to pay out 200 tokens
    let tx = transaction(
        vec![consumed_id(0), consumed_id(0)],
        vec![basic(200, address(2))],
        vec![signature_unlock(1), Unlock::Reference { index: 0 }],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::DuplicateInput {
            input_index: 1,
            output_id: consumed_id(0)
        }
    );
}

#[test]
fn wrong_signer_is_rejected() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(100, address(1)));
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(2))],
        vec![signature_unlock(3)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::SignatureInvalid { input_index: 0 }
    );
}

#[test]
fn repeated_owner_must_use_reference_unlock() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(40, address(1)));
    resolved.outputs.insert(consumed_id(1), basic(60, address(1)));
    // referencing the earlier unlock is the only accepted form
    let tx = transaction(
        vec![consumed_id(0), consumed_id(1)],
        vec![basic(100, address(2))],
        vec![signature_unlock(1), Unlock::Reference { index: 0 }],
    );
    validate_at(&tx, &resolved, 0).unwrap();

    let tx = transaction(
        vec![consumed_id(0), consumed_id(1)],
        vec![basic(100, address(2))],
        vec![signature_unlock(1), signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::IdentityAlreadyUnlocked {
            input_index: 1,
            unlocked_at: 0
        }
    );
}

#[test]
fn timelocked_input_cannot_be_spent_early() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(
        consumed_id(0),
        basic_with(100, address(1), |o| {
            o.timelock_unlock_condition = Some(TimelockUnlockCondition { slot: SlotIndex(15) });
        }),
    );
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(2))],
        vec![signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 10).unwrap_err(),
        TransactionFailure::TimelockNotExpired {
            input_index: 0,
            slot: SlotIndex(15)
        }
    );
    validate_at(&tx, &resolved, 15).unwrap();
}

#[test]
fn expiration_flips_the_required_identity() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(
        consumed_id(0),
        basic_with(100, address(1), |o| {
            o.expiration_unlock_condition = Some(ExpirationUnlockCondition {
                return_address: address(2),
                slot: SlotIndex(20),
            });
        }),
    );
    let owner_tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(3))],
        vec![signature_unlock(1)],
    );
    let returner_tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(3))],
        vec![signature_unlock(2)],
    );

    // before the boundary only the owner can spend
    validate_at(&owner_tx, &resolved, 19).unwrap();
    assert_eq!(
        validate_at(&returner_tx, &resolved, 19).unwrap_err(),
        TransactionFailure::SignatureInvalid { input_index: 0 }
    );
    // at the boundary only the return identity can
    validate_at(&returner_tx, &resolved, 20).unwrap();
    assert_eq!(
        validate_at(&owner_tx, &resolved, 20).unwrap_err(),
        TransactionFailure::SignatureInvalid { input_index: 0 }
    );
}

#[test]
fn storage_deposit_must_be_returned() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(
        consumed_id(0),
        basic_with(100, address(1), |o| {
            o.storage_deposit_return_unlock_condition = Some(StorageDepositReturnUnlockCondition {
                return_address: address(2),
                amount: TokenAmount(40),
            });
        }),
    );
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(1))],
        vec![signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::StorageDepositReturnUnfulfilled {
            return_address: address(2),
            amount: TokenAmount(40)
        }
    );
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(60, address(1)), basic(40, address(2))],
        vec![signature_unlock(1)],
    );
    validate_at(&tx, &resolved, 0).unwrap();
}

#[test]
fn storage_deposit_return_is_waived_for_the_depositor() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(
        consumed_id(0),
        basic_with(100, address(2), |o| {
            o.storage_deposit_return_unlock_condition = Some(StorageDepositReturnUnlockCondition {
                return_address: address(2),
                amount: TokenAmount(40),
            });
        }),
    );
    // the depositor spends its own deposit, so nothing is owed back
    let tx = transaction(
        vec![consumed_id(0)],
        vec![basic(100, address(3))],
        vec![signature_unlock(2)],
    );
    validate_at(&tx, &resolved, 0).unwrap();

    // the same holds once an expiration hands the output to the depositor
    resolved.outputs.insert(
        consumed_id(1),
        basic_with(100, address(1), |o| {
            o.storage_deposit_return_unlock_condition = Some(StorageDepositReturnUnlockCondition {
                return_address: address(2),
                amount: TokenAmount(40),
            });
            o.expiration_unlock_condition = Some(ExpirationUnlockCondition {
                return_address: address(2),
                slot: SlotIndex(20),
            });
        }),
    );
    let tx = transaction(
        vec![consumed_id(1)],
        vec![basic(100, address(3))],
        vec![signature_unlock(2)],
    );
    validate_at(&tx, &resolved, 20).unwrap();
}

#[test]
fn native_tokens_can_be_burned_but_not_minted() {
    let token_id = TokenId([0x77; TokenId::LENGTH]);
    let with_tokens = |amount: u64, tokens: u64| {
        basic_with(amount, address(1), |o| {
            o.native_tokens = Box::new([NativeToken {
                token_id,
                amount: U256::from(tokens),
            }]);
        })
    };
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), with_tokens(100, 50));

    // burning half of the tokens without a foundry is fine
    let tx = transaction(
        vec![consumed_id(0)],
        vec![with_tokens(100, 25)],
        vec![signature_unlock(1)],
    );
    validate_at(&tx, &resolved, 0).unwrap();

    // creating tokens out of thin air is not
    let tx = transaction(
        vec![consumed_id(0)],
        vec![with_tokens(100, 100)],
        vec![signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::NativeTokenSumUnbalanced { token_id }
    );
}

#[test]
fn sender_feature_requires_its_identity() {
    let mut resolved = ResolvedInputs::default();
    resolved.outputs.insert(consumed_id(0), basic(100, address(1)));
    let sender_output = |sender| {
        basic_with(100, address(2), |o| {
            o.features = Box::new([stardust_vm::model::output::Feature::Sender { address: sender }]);
        })
    };

    let tx = transaction(
        vec![consumed_id(0)],
        vec![sender_output(address(1))],
        vec![signature_unlock(1)],
    );
    validate_at(&tx, &resolved, 0).unwrap();

    let tx = transaction(
        vec![consumed_id(0)],
        vec![sender_output(address(3))],
        vec![signature_unlock(1)],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::SenderFeatureNotUnlocked { output_index: 0 }
    );
}

#[test]
fn alias_address_is_unlocked_by_state_transition_only() {
    let alias_id = AliasId([0x05; 32]);
    let mut resolved = ResolvedInputs::default();
    resolved
        .outputs
        .insert(consumed_id(0), Output::Alias(alias_raw(100, alias_id, 3, address(1))));
    resolved
        .outputs
        .insert(consumed_id(1), basic(50, stardust_vm::model::Address::Alias(alias_id)));

    // a state transition grants the alias address to later inputs
    let tx = transaction(
        vec![consumed_id(0), consumed_id(1)],
        vec![
            Output::Alias(alias_raw(100, alias_id, 4, address(1))),
            basic(50, address(2)),
        ],
        vec![signature_unlock(1), Unlock::Alias { index: 0 }],
    );
    validate_at(&tx, &resolved, 0).unwrap();

    // a governance transition does not
    let tx = transaction(
        vec![consumed_id(0), consumed_id(1)],
        vec![
            Output::Alias(alias_raw(100, alias_id, 3, address(1))),
            basic(50, address(2)),
        ],
        vec![signature_unlock(1), Unlock::Alias { index: 0 }],
    );
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::UnlockReferenceInvalid {
            input_index: 1,
            referenced_index: 0
        }
    );
}

#[test]
fn input_count_ceiling_is_enforced() {
    let max = params_at(0).protocol.max_inputs as usize;
    let inputs: Vec<_> = (0..=max as u16).map(consumed_id).collect();
    let unlocks = vec![signature_unlock(1); inputs.len()];
    let mut resolved = ResolvedInputs::default();
    for id in &inputs {
        resolved.outputs.insert(*id, basic(1, address(1)));
    }
    let tx = transaction(inputs, vec![basic((max + 1) as u64, address(2))], unlocks);
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::InputCountExceeded {
            count: max + 1,
            max: max as u16
        }
    );
}

#[test]
fn output_count_ceiling_is_enforced() {
    let max = params_at(0).protocol.max_outputs as usize;
    let outputs: Vec<_> = (0..=max).map(|_| basic(1, address(2))).collect();
    let mut resolved = ResolvedInputs::default();
    resolved
        .outputs
        .insert(consumed_id(0), basic((max + 1) as u64, address(1)));
    let tx = transaction(vec![consumed_id(0)], outputs, vec![signature_unlock(1)]);
    assert_eq!(
        validate_at(&tx, &resolved, 0).unwrap_err(),
        TransactionFailure::OutputCountExceeded {
            count: max + 1,
            max: max as u16
        }
    );
}
