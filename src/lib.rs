// Copyright 2023 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Transaction validity engine for a Stardust-style UTXO ledger.
//!
//! The crate consists of two layers:
//!
//! - [`model`]: the decoded in-memory representation of outputs, unlock
//!   conditions, features and transactions. Wire-level (de)serialization is
//!   an external concern; the engine only ever sees decoded objects.
//! - [`vm`]: the virtual machine that decides whether a transaction is a
//!   legal state transition of the unspent-output set. It is a pure function
//!   over the transaction, the resolved input snapshot and the external
//!   parameters, and either accepts or reports exactly which rule failed.

pub mod model;
pub mod vm;
