// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! State transition validation of NFT outputs.

use super::super::error::TransactionFailure;
use crate::model::output::{NftId, NftOutput};

pub(super) fn genesis(next: &NftOutput) -> Result<(), TransactionFailure> {
    if next.nft_id != NftId::null() {
        return Err(TransactionFailure::InvalidGenesisTransition(
            "nft id must be zeroed".into(),
        ));
    }
    Ok(())
}

pub(super) fn state_change(current: &NftOutput, next: &NftOutput) -> Result<(), TransactionFailure> {
    if current.immutable_features != next.immutable_features {
        return Err(TransactionFailure::InvalidStateTransition(
            "immutable features must not change".into(),
        ));
    }
    Ok(())
}
