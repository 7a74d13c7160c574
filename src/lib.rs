//! # sui-ptb: programmable transactions for Sui
//!
//! Canonical binary encoding of Sui programmable transactions, a builder
//! that assembles them, and a verifier that checks them against protocol
//! constraints before submission.
//!
//! ## Quick Start
//!
//! ```rust
//! use sui_ptb::prelude::*;
//!
//! let config = BuilderConfig::default();
//! let provider = StaticProtocolConfig::from_config(&config);
//! let sender = Address::parse("0xa11ce").unwrap();
//! let mut session = TransactionSession::new(&provider, sender, &config).unwrap();
//!
//! let amount = session.builder_mut().pure(&1_000u64).unwrap();
//! let gas = session.gas();
//! let coin = session.builder_mut().split_coin(gas, vec![amount]).unwrap();
//! let recipient = session.builder_mut().pure(&Address::parse("0xb0b").unwrap()).unwrap();
//! session.builder_mut().transfer_objects(vec![coin], recipient).unwrap();
//!
//! let (_limits, violations) = session.verify_transaction(None).unwrap();
//! // The default constraints are all zero, so the size limit is exceeded.
//! assert!(violations.is_some());
//!
//! let data = session.into_transaction_data(vec![], TransactionExpiration::None);
//! assert!(!data.to_bytes().unwrap().is_empty());
//! ```
//!
//! ## Architecture
//!
//! - [`io`] - canonical (BCS) reader, writer and serialization traits
//! - [`types`] - transaction schema types
//! - [`config`] - builder settings and protocol constraints
//! - [`builder`] - assembly, verification and transaction sessions

#![warn(rustdoc::missing_crate_level_docs)]

pub mod logging;

pub use ptb_builder as builder;
pub use ptb_config as config;
pub use ptb_io as io;
pub use ptb_types as types;

/// Common imports for building transactions
pub mod prelude {
    pub use crate::builder::{
        BuilderError, ConstraintViolations, MoveCompiler, ProgrammableTransactionBuilder,
        ProtocolConfigProvider, StaticProtocolConfig, SuiCliCompiler, TransactionSession,
        TransactionVerifier,
    };
    pub use crate::config::{BuilderConfig, ConstraintLimit, TransactionConstraints};
    pub use crate::io::{EnumSchema, Serializable, SerializableExt, U256};
    pub use crate::types::{
        Address, Argument, CallArg, Command, Digest, ObjectArg, ObjectId, ObjectRead,
        ObjectReference, SharedObjectReference, StructTag, TransactionData,
        TransactionExpiration, TransactionKind, TypeTag,
    };
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
