// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`FoundryOutput`].

use serde::{Deserialize, Serialize};

use super::{
    alias::AliasId,
    feature::Feature,
    native_token::{NativeToken, TokenId, TokenScheme},
    unlock_condition::ImmutableAliasAddressUnlockCondition,
    TokenAmount,
};
use crate::model::util::bytify;

/// The id of a foundry: the owning alias address, the serial number and the
/// token scheme kind. Unlike alias and NFT ids it is never zero; it is fully
/// determined by the foundry's immutable fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoundryId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl FoundryId {
    /// The number of bytes of a [`FoundryId`]: an address (1 kind byte + 32
    /// bytes), a `u32` serial number and a token scheme kind byte.
    pub const LENGTH: usize = 38;

    /// The wire kind byte of an alias address.
    const ALIAS_ADDRESS_KIND: u8 = 8;

    /// Builds the id from the foundry's immutable fields.
    pub fn build(alias_id: &AliasId, serial_number: u32, token_scheme_kind: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[0] = Self::ALIAS_ADDRESS_KIND;
        bytes[1..33].copy_from_slice(&alias_id.0);
        bytes[33..37].copy_from_slice(&serial_number.to_le_bytes());
        bytes[37] = token_scheme_kind;
        Self(bytes)
    }

    /// Converts the [`FoundryId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_slice())
    }
}

impl TryFrom<&[u8]> for FoundryId {
    type Error = std::array::TryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(value.try_into()?))
    }
}

/// An output that controls the supply of a single native token. A foundry is
/// owned by an alias and can only be created or transitioned while that alias
/// state-transitions in the same transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundryOutput {
    /// The output amount.
    pub amount: TokenAmount,
    /// The native tokens held by the output.
    pub native_tokens: Box<[NativeToken]>,
    /// The serial number of the foundry within its owning alias.
    pub serial_number: u32,
    /// The token scheme governing the controlled supply.
    pub token_scheme: TokenScheme,
    /// The immutable alias address unlock condition.
    pub immutable_alias_address_unlock_condition: ImmutableAliasAddressUnlockCondition,
    /// The features of the output.
    pub features: Box<[Feature]>,
    /// The immutable features of the output, set at genesis and never changed.
    pub immutable_features: Box<[Feature]>,
}

impl FoundryOutput {
    /// A `&str` representation of the type.
    pub const KIND: &'static str = "foundry";

    /// The id of the owning alias.
    pub fn alias_id(&self) -> &AliasId {
        &self.immutable_alias_address_unlock_condition.alias_id
    }

    /// The id of this foundry, computed from its immutable fields.
    pub fn foundry_id(&self) -> FoundryId {
        FoundryId::build(self.alias_id(), self.serial_number, self.token_scheme.kind())
    }

    /// The id of the native token whose supply this foundry controls.
    pub fn token_id(&self) -> TokenId {
        self.foundry_id().into()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_foundry_id_layout() {
        let alias_id = AliasId([0xaa; 32]);
        let id = FoundryId::build(&alias_id, 0x01020304, 0);
        assert_eq!(id.0[0], 8);
        assert_eq!(&id.0[1..33], &[0xaa; 32]);
        assert_eq!(&id.0[33..37], &0x01020304u32.to_le_bytes());
        assert_eq!(id.0[37], 0);
    }

    #[test]
    fn test_serial_number_changes_id() {
        let alias_id = AliasId([1; 32]);
        assert_ne!(
            FoundryId::build(&alias_id, 1, 0),
            FoundryId::build(&alias_id, 2, 0)
        );
    }
}
