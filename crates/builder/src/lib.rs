//! # PTB Builder
//!
//! Assembly of programmable transactions and verification against protocol
//! constraints.
//!
//! - [`ProgrammableTransactionBuilder`]: ordered input table with optional
//!   deduplication of pure values, ordered command list.
//! - [`TransactionVerifier`]: measures a transaction against
//!   [`ptb_config::TransactionConstraints`] and reports every exceeded limit.
//! - [`TransactionSession`]: a builder bound to a sender, gas price and
//!   protocol limits, with Move package publish and upgrade support.

pub mod builder;
pub mod compiler;
pub mod error;
pub mod protocol;
pub mod transaction;
pub mod verifier;

pub use builder::{BuilderArg, InputValue, ProgrammableTransactionBuilder, MAX_ADDRESSABLE};
pub use compiler::{expand_home, CompiledPackage, MoveCompiler, SuiCliCompiler};
pub use error::{BuilderError, BuilderResult};
pub use protocol::{ProtocolConfigProvider, StaticProtocolConfig, DEFAULT_REFERENCE_GAS_PRICE};
pub use transaction::TransactionSession;
pub use verifier::{ConstraintViolations, TransactionVerifier, PAY_GAS, PLACEHOLDER_GAS_DIGEST};
