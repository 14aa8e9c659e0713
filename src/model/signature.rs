// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Ed25519Signature`] type.

use serde::{Deserialize, Serialize};

use super::{address::Ed25519Address, util::bytify};

/// An Ed25519 signature together with the public key it was produced with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519Signature {
    /// The public key of the signer.
    #[serde(with = "bytify")]
    pub public_key: [u8; 32],
    /// The signature over the transaction's signing message.
    #[serde(with = "bytify")]
    pub signature: [u8; 64],
}

impl Ed25519Signature {
    /// The address backed by the signature's public key.
    pub fn address(&self) -> Ed25519Address {
        Ed25519Address::from_public_key(&self.public_key)
    }

    /// Verifies the signature over the given message. Returns `false` for a
    /// malformed public key or a signature that does not verify.
    pub fn is_valid(&self, message: &[u8]) -> bool {
        let Ok(public_key) = ed25519_dalek::PublicKey::from_bytes(&self.public_key) else {
            return false;
        };
        let Ok(signature) = ed25519_dalek::Signature::from_bytes(&self.signature) else {
            return false;
        };
        public_key.verify_strict(message, &signature).is_ok()
    }
}
