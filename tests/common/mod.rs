// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

//! Shared fixtures for the engine's integration tests.

use ed25519_dalek::{ExpandedSecretKey, PublicKey, SecretKey};
use stardust_vm::{
    model::{
        address::{Address, Ed25519Address},
        output::{
            unlock_condition::{
                AddressUnlockCondition, GovernorAddressUnlockCondition, ImmutableAliasAddressUnlockCondition,
                StateControllerAddressUnlockCondition,
            },
            AliasId, AliasOutput, BasicOutput, FoundryOutput, NftId, NftOutput, Output, OutputId, TokenAmount,
            TokenScheme,
        },
        transaction::{Transaction, TransactionId, Unlock},
        Ed25519Signature, ProtocolParameters, SlotIndex,
    },
    vm::{ExternalUnlockParameters, ResolvedInputs, TransactionFailure, VirtualMachine},
};

/// The fixed transaction id of the transaction under test. Signature unlocks
/// sign these bytes.
pub const TX_ID: TransactionId = TransactionId([0x42; 32]);

pub fn keypair(seed: u8) -> (SecretKey, PublicKey) {
    let secret = SecretKey::from_bytes(&[seed; 32]).unwrap();
    let public = PublicKey::from(&secret);
    (secret, public)
}

/// The Ed25519 address of the deterministic key derived from `seed`.
pub fn address(seed: u8) -> Address {
    let (_, public) = keypair(seed);
    Address::Ed25519(Ed25519Address::from_public_key(&public.to_bytes()))
}

/// A signature unlock of [`TX_ID`] by the key derived from `seed`.
pub fn signature_unlock(seed: u8) -> Unlock {
    let (secret, public) = keypair(seed);
    let signature = ExpandedSecretKey::from(&secret).sign(&TX_ID.0, &public);
    Unlock::Signature {
        signature: Ed25519Signature {
            public_key: public.to_bytes(),
            signature: signature.to_bytes(),
        },
    }
}

/// An output id of a transaction other than the one under test.
pub fn consumed_id(index: u16) -> OutputId {
    OutputId::from((TransactionId([0x11; 32]), index))
}

pub fn basic(amount: u64, owner: Address) -> Output {
    Output::Basic(basic_raw(amount, owner))
}

pub fn basic_raw(amount: u64, owner: Address) -> BasicOutput {
    BasicOutput {
        amount: TokenAmount(amount),
        native_tokens: Box::new([]),
        address_unlock_condition: AddressUnlockCondition { address: owner },
        storage_deposit_return_unlock_condition: None,
        timelock_unlock_condition: None,
        expiration_unlock_condition: None,
        features: Box::new([]),
    }
}

/// A basic output with the given amount and owner, tweaked by the closure.
pub fn basic_with(amount: u64, owner: Address, f: impl FnOnce(&mut BasicOutput)) -> Output {
    let mut output = basic_raw(amount, owner);
    f(&mut output);
    Output::Basic(output)
}

pub fn alias_raw(amount: u64, alias_id: AliasId, state_index: u32, controller: Address) -> AliasOutput {
    AliasOutput {
        amount: TokenAmount(amount),
        native_tokens: Box::new([]),
        alias_id,
        state_index,
        state_metadata: Box::new([]),
        foundry_counter: 0,
        state_controller_address_unlock_condition: StateControllerAddressUnlockCondition {
            address: controller,
        },
        governor_address_unlock_condition: GovernorAddressUnlockCondition { address: controller },
        features: Box::new([]),
        immutable_features: Box::new([]),
    }
}

pub fn alias_with(
    amount: u64,
    alias_id: AliasId,
    state_index: u32,
    controller: Address,
    f: impl FnOnce(&mut AliasOutput),
) -> Output {
    let mut output = alias_raw(amount, alias_id, state_index, controller);
    f(&mut output);
    Output::Alias(output)
}

pub fn foundry_raw(amount: u64, alias_id: AliasId, serial_number: u32, scheme: TokenScheme) -> FoundryOutput {
    FoundryOutput {
        amount: TokenAmount(amount),
        native_tokens: Box::new([]),
        serial_number,
        token_scheme: scheme,
        immutable_alias_address_unlock_condition: ImmutableAliasAddressUnlockCondition { alias_id },
        features: Box::new([]),
        immutable_features: Box::new([]),
    }
}

pub fn nft_raw(amount: u64, nft_id: NftId, owner: Address) -> NftOutput {
    NftOutput {
        amount: TokenAmount(amount),
        native_tokens: Box::new([]),
        nft_id,
        address_unlock_condition: AddressUnlockCondition { address: owner },
        storage_deposit_return_unlock_condition: None,
        timelock_unlock_condition: None,
        expiration_unlock_condition: None,
        features: Box::new([]),
        immutable_features: Box::new([]),
    }
}

/// The transaction under test, with [`TX_ID`] as its id.
pub fn transaction(inputs: Vec<OutputId>, outputs: Vec<Output>, unlocks: Vec<Unlock>) -> Transaction {
    Transaction {
        transaction_id: TX_ID,
        creation_slot: SlotIndex(0),
        inputs: inputs.into_boxed_slice(),
        context_inputs: Box::new([]),
        outputs: outputs.into_boxed_slice(),
        allotments: Box::new([]),
        payload: None,
        unlocks: unlocks.into_boxed_slice(),
    }
}

pub fn params_at(confirmation_slot: u32) -> ExternalUnlockParameters {
    ExternalUnlockParameters {
        confirmation_slot: SlotIndex(confirmation_slot),
        protocol: ProtocolParameters::default(),
    }
}

/// Runs the default pipeline at the given confirmation slot.
pub fn validate_at(
    transaction: &Transaction,
    resolved: &ResolvedInputs,
    confirmation_slot: u32,
) -> Result<(), TransactionFailure> {
    VirtualMachine::new().execute(transaction, resolved, &params_at(confirmation_slot))
}

/// Unwraps a chain transition failure into its inner cause.
pub fn chain_transition_source(failure: TransactionFailure) -> TransactionFailure {
    match failure {
        TransactionFailure::ChainTransition { source, .. } => *source,
        other => panic!("expected a chain transition failure, got {other:?}"),
    }
}
