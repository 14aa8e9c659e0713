// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`WorkingSet`] and its builder.

use std::collections::BTreeMap;

use primitive_types::U256;

use super::{error::TransactionFailure, unlock::UnlockedIdentities};
use crate::model::{
    output::{AliasId, ChainId, NativeToken, Output, OutputId, TokenId},
    transaction::Transaction,
};

/// The resolved block issuance credit balances, keyed by alias chain.
pub type BlockIssuanceCredits = BTreeMap<AliasId, i64>;

/// The caller-supplied snapshot the transaction is validated against: the
/// consumed outputs plus resolved context input values. Lookup and decoding are
/// external collaborators; the engine never performs I/O.
#[derive(Clone, Debug, Default)]
pub struct ResolvedInputs {
    /// The consumed outputs, keyed by their id.
    pub outputs: BTreeMap<OutputId, Output>,
    /// The block issuance credit balances referenced by context inputs.
    pub block_issuance_credits: BlockIssuanceCredits,
}

/// An input together with the output it consumes.
#[derive(Copy, Clone, Debug)]
pub struct ResolvedInput<'a> {
    /// The consumed output's id.
    pub output_id: OutputId,
    /// The consumed output.
    pub output: &'a Output,
}

/// A chain-constrained output on the input side of the transaction.
#[derive(Copy, Clone, Debug)]
pub struct ChainInput<'a> {
    /// The consumed output's id.
    pub output_id: OutputId,
    /// The current state of the chain.
    pub output: &'a Output,
}

/// A chain-constrained output on the output side of the transaction.
#[derive(Copy, Clone, Debug)]
pub struct ChainOutput<'a> {
    /// The index of the output within the transaction.
    pub output_index: u16,
    /// The next state of the chain.
    pub output: &'a Output,
}

/// The aggregated, read-only view shared by all validation passes, derived once
/// per validation run. Only the unlocked identities are populated later, by the
/// unlock resolution pass.
#[derive(Debug)]
pub struct WorkingSet<'a> {
    /// The transaction being validated.
    pub transaction: &'a Transaction,
    /// The resolved inputs, in transaction order.
    pub inputs: Vec<ResolvedInput<'a>>,
    /// The position of each input id within the transaction.
    pub input_index_by_id: BTreeMap<OutputId, u16>,
    /// The identities unlocked on the input side, filled by unlock resolution.
    pub unlocked_identities: UnlockedIdentities,
    /// The native token sums of the input side.
    pub in_native_tokens: BTreeMap<TokenId, U256>,
    /// The native token sums of the output side.
    pub out_native_tokens: BTreeMap<TokenId, U256>,
    /// The chain outputs consumed by the transaction, keyed by chain id.
    pub in_chains: BTreeMap<ChainId, ChainInput<'a>>,
    /// The chain outputs created by the transaction, keyed by chain id.
    pub out_chains: BTreeMap<ChainId, ChainOutput<'a>>,
    /// The resolved block issuance credit balances.
    pub block_issuance_credits: &'a BlockIssuanceCredits,
}

/// Derives a [`WorkingSet`] from a transaction and the outputs it consumes.
/// Performs no authorization checks.
pub struct WorkingSetBuilder<'a> {
    transaction: &'a Transaction,
    resolved: &'a ResolvedInputs,
}

impl<'a> WorkingSetBuilder<'a> {
    /// Creates a builder for the given transaction and input snapshot.
    pub fn new(transaction: &'a Transaction, resolved: &'a ResolvedInputs) -> Self {
        Self { transaction, resolved }
    }

    /// Builds the working set, or fails structurally if an input reference
    /// cannot be resolved or a freshly derived chain id collides.
    pub fn build(self) -> Result<WorkingSet<'a>, TransactionFailure> {
        let transaction = self.transaction;

        if transaction.unlocks.len() != transaction.inputs.len() {
            return Err(TransactionFailure::UnlockCountMismatch {
                inputs: transaction.inputs.len(),
                unlocks: transaction.unlocks.len(),
            });
        }

        let mut inputs = Vec::with_capacity(transaction.inputs.len());
        let mut input_index_by_id = BTreeMap::new();
        for (input_index, output_id) in transaction.inputs.iter().enumerate() {
            let output = self.resolved.outputs.get(output_id).ok_or(TransactionFailure::MissingUtxo {
                input_index: input_index as u16,
                output_id: *output_id,
            })?;
            // Every output may be consumed at most once; a repeated reference
            // would double-count its amount and tokens in the sums below.
            if input_index_by_id.insert(*output_id, input_index as u16).is_some() {
                return Err(TransactionFailure::DuplicateInput {
                    input_index: input_index as u16,
                    output_id: *output_id,
                });
            }
            inputs.push(ResolvedInput {
                output_id: *output_id,
                output,
            });
        }

        let mut in_native_tokens = BTreeMap::new();
        for input in &inputs {
            sum_native_tokens(&mut in_native_tokens, input.output.native_tokens())?;
        }
        let mut out_native_tokens = BTreeMap::new();
        for output in transaction.outputs.iter() {
            sum_native_tokens(&mut out_native_tokens, output.native_tokens())?;
        }

        let mut in_chains = BTreeMap::new();
        for input in &inputs {
            if let Some(chain_id) = input.output.chain_id() {
                in_chains.insert(
                    chain_id.or_derived_from(&input.output_id),
                    ChainInput {
                        output_id: input.output_id,
                        output: input.output,
                    },
                );
            }
        }

        let mut out_chains: BTreeMap<ChainId, ChainOutput<'a>> = BTreeMap::new();
        for (output_index, output) in transaction.outputs.iter().enumerate() {
            if let Some(chain_id) = output.chain_id() {
                let output_id = OutputId::from((transaction.transaction_id, output_index as u16));
                let derived = chain_id.is_empty();
                let chain_id = chain_id.or_derived_from(&output_id);
                // Ids are derived from unique output references and cannot
                // collide with live chains, but a consensus-critical validator
                // re-checks rather than assumes.
                if derived && (in_chains.contains_key(&chain_id) || out_chains.contains_key(&chain_id)) {
                    return Err(TransactionFailure::ChainIdCollision { chain_id });
                }
                out_chains.insert(
                    chain_id,
                    ChainOutput {
                        output_index: output_index as u16,
                        output,
                    },
                );
            }
        }

        Ok(WorkingSet {
            transaction,
            inputs,
            input_index_by_id,
            unlocked_identities: UnlockedIdentities::default(),
            in_native_tokens,
            out_native_tokens,
            in_chains,
            out_chains,
            block_issuance_credits: &self.resolved.block_issuance_credits,
        })
    }
}

fn sum_native_tokens(
    sums: &mut BTreeMap<TokenId, U256>,
    tokens: &[NativeToken],
) -> Result<(), TransactionFailure> {
    for token in tokens {
        let sum = sums.entry(token.token_id).or_insert_with(U256::zero);
        *sum = sum
            .checked_add(token.amount)
            .ok_or(TransactionFailure::NativeTokenSumOverflow)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        address::{Address, Ed25519Address},
        output::{
            unlock_condition::AddressUnlockCondition, AliasId, BasicOutput, NativeToken, TokenAmount,
        },
        transaction::{Transaction, TransactionId, Unlock},
        Ed25519Signature,
    };

    fn basic_output(amount: u64, tokens: Vec<NativeToken>) -> Output {
        Output::Basic(BasicOutput {
            amount: TokenAmount(amount),
            native_tokens: tokens.into_boxed_slice(),
            address_unlock_condition: AddressUnlockCondition {
                address: Address::Ed25519(Ed25519Address([0; 32])),
            },
            storage_deposit_return_unlock_condition: None,
            timelock_unlock_condition: None,
            expiration_unlock_condition: None,
            features: Box::new([]),
        })
    }

    fn dummy_unlock() -> Unlock {
        Unlock::Signature {
            signature: Ed25519Signature {
                public_key: [0; 32],
                signature: [0; 64],
            },
        }
    }

    fn transaction(inputs: Vec<OutputId>, outputs: Vec<Output>) -> Transaction {
        let unlocks = vec![dummy_unlock(); inputs.len()].into_boxed_slice();
        Transaction {
            transaction_id: TransactionId([0xaa; 32]),
            creation_slot: 0.into(),
            inputs: inputs.into_boxed_slice(),
            context_inputs: Box::new([]),
            outputs: outputs.into_boxed_slice(),
            allotments: Box::new([]),
            payload: None,
            unlocks,
        }
    }

    #[test]
    fn test_missing_utxo() {
        let output_id = OutputId::from((TransactionId([1; 32]), 0));
        let tx = transaction(vec![output_id], vec![]);
        let resolved = ResolvedInputs::default();
        let err = WorkingSetBuilder::new(&tx, &resolved).build().unwrap_err();
        assert_eq!(
            err,
            TransactionFailure::MissingUtxo {
                input_index: 0,
                output_id
            }
        );
    }

    #[test]
    fn test_duplicate_input_reference_rejected() {
        let output_id = OutputId::from((TransactionId([1; 32]), 0));
        let mut resolved = ResolvedInputs::default();
        resolved.outputs.insert(output_id, basic_output(100, vec![]));
        let tx = transaction(vec![output_id, output_id], vec![]);
        let err = WorkingSetBuilder::new(&tx, &resolved).build().unwrap_err();
        assert_eq!(
            err,
            TransactionFailure::DuplicateInput {
                input_index: 1,
                output_id
            }
        );
    }

    #[test]
    fn test_native_token_sums() {
        let token_id = TokenId([7; TokenId::LENGTH]);
        let output_id = OutputId::from((TransactionId([1; 32]), 0));
        let mut resolved = ResolvedInputs::default();
        resolved.outputs.insert(
            output_id,
            basic_output(
                100,
                vec![NativeToken {
                    token_id,
                    amount: U256::from(30u64),
                }],
            ),
        );
        let tx = transaction(
            vec![output_id],
            vec![
                basic_output(
                    50,
                    vec![NativeToken {
                        token_id,
                        amount: U256::from(10u64),
                    }],
                ),
                basic_output(
                    50,
                    vec![NativeToken {
                        token_id,
                        amount: U256::from(20u64),
                    }],
                ),
            ],
        );
        let working_set = WorkingSetBuilder::new(&tx, &resolved).build().unwrap();
        assert_eq!(working_set.in_native_tokens[&token_id], U256::from(30u64));
        assert_eq!(working_set.out_native_tokens[&token_id], U256::from(30u64));
        assert!(working_set.in_chains.is_empty());
        assert!(working_set.out_chains.is_empty());
    }

    #[test]
    fn test_unlock_count_mismatch() {
        let output_id = OutputId::from((TransactionId([1; 32]), 0));
        let mut tx = transaction(vec![output_id], vec![]);
        tx.unlocks = Box::new([]);
        let mut resolved = ResolvedInputs::default();
        resolved.outputs.insert(output_id, basic_output(1, vec![]));
        let err = WorkingSetBuilder::new(&tx, &resolved).build().unwrap_err();
        assert_eq!(
            err,
            TransactionFailure::UnlockCountMismatch { inputs: 1, unlocks: 0 }
        );
    }

    #[test]
    fn test_alias_genesis_is_keyed_by_derived_id() {
        let consumed_id = OutputId::from((TransactionId([2; 32]), 0));
        let mut resolved = ResolvedInputs::default();
        resolved.outputs.insert(consumed_id, basic_output(100, vec![]));
        let alias = crate::model::output::AliasOutput {
            amount: TokenAmount(100),
            native_tokens: Box::new([]),
            alias_id: AliasId::null(),
            state_index: 0,
            state_metadata: Box::new([]),
            foundry_counter: 0,
            state_controller_address_unlock_condition:
                crate::model::output::unlock_condition::StateControllerAddressUnlockCondition {
                    address: Address::Ed25519(Ed25519Address([1; 32])),
                },
            governor_address_unlock_condition:
                crate::model::output::unlock_condition::GovernorAddressUnlockCondition {
                    address: Address::Ed25519(Ed25519Address([1; 32])),
                },
            features: Box::new([]),
            immutable_features: Box::new([]),
        };
        let tx = transaction(vec![consumed_id], vec![Output::Alias(alias)]);
        let working_set = WorkingSetBuilder::new(&tx, &resolved).build().unwrap();
        let genesis_id = OutputId::from((tx.transaction_id, 0)).hash();
        assert_eq!(
            working_set.out_chains.keys().copied().collect::<Vec<_>>(),
            vec![ChainId::Alias(AliasId(genesis_id))]
        );
    }
}
