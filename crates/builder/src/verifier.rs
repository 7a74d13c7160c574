//! Verification of an assembled transaction against protocol constraints.

use crate::builder::ProgrammableTransactionBuilder;
use crate::error::BuilderResult;
use ptb_config::{ConstraintLimit, TransactionConstraints};
use ptb_io::SerializableExt;
use ptb_types::{
    Address, CommandKind, Digest, GasData, ObjectReference, TransactionData,
    TransactionExpiration,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Digest of the stand-in gas coin used when measuring transaction size.
pub const PLACEHOLDER_GAS_DIGEST: &str = "ByumsdYUAQWJfwYgowsme7hm5vE8d2mXik3rGaNC9R4W";

/// Gas budget written into the size-measurement envelope.
pub const PAY_GAS: u64 = 4_000_000;

/// Observed values for every limit a transaction exceeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConstraintViolations(BTreeMap<ConstraintLimit, u64>);

impl ConstraintViolations {
    pub fn get(&self, limit: ConstraintLimit) -> Option<u64> {
        self.0.get(&limit).copied()
    }

    pub fn contains(&self, limit: ConstraintLimit) -> bool {
        self.0.contains_key(&limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintLimit, u64)> + '_ {
        self.0.iter().map(|(limit, value)| (*limit, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The violations as a constraints record with only violated fields set.
    pub fn to_constraints(&self) -> TransactionConstraints {
        let mut constraints = TransactionConstraints::default();
        for (limit, value) in self.iter() {
            constraints.set(limit, value);
        }
        constraints
    }

    fn record(&mut self, limit: ConstraintLimit, observed: u64, maximum: u64) {
        warn!(limit = %limit, observed, maximum, "transaction exceeds protocol limit");
        self.0.insert(limit, observed);
    }

    /// Drops zero observations; they never signal a problem.
    fn into_option(mut self) -> Option<Self> {
        self.0.retain(|_, value| *value != 0);
        (!self.0.is_empty()).then_some(self)
    }
}

/// Checks a builder's contents against a set of [`TransactionConstraints`].
#[derive(Debug, Clone, Copy)]
pub struct TransactionVerifier {
    constraints: TransactionConstraints,
}

impl TransactionVerifier {
    pub fn new(constraints: &TransactionConstraints) -> Self {
        Self {
            constraints: *constraints,
        }
    }

    pub fn constraints(&self) -> &TransactionConstraints {
        &self.constraints
    }

    /// Measures the builder's transaction and reports every exceeded limit.
    ///
    /// Size is measured on `tx_bytes` when given, which must decode as
    /// `TransactionData`; otherwise on an envelope around the builder's
    /// current contents with a placeholder gas coin and `gas_price`.
    ///
    /// Returns `Ok(None)` when every limit is respected.
    pub fn verify(
        &self,
        builder: &ProgrammableTransactionBuilder,
        gas_price: u64,
        tx_bytes: Option<&[u8]>,
    ) -> BuilderResult<Option<ConstraintViolations>> {
        let limits = &self.constraints;
        let mut violations = ConstraintViolations::default();

        let mut max_pure = 0usize;
        let mut object_inputs = 0usize;
        for (_, call_arg) in builder.inputs() {
            match call_arg.pure_len() {
                Some(len) => max_pure = max_pure.max(len),
                None => object_inputs += 1,
            }
        }
        let max_pure = max_pure as u64;
        debug!(max_pure, object_inputs, "partitioned inputs");
        if max_pure >= limits.max_pure_argument_size {
            violations.record(
                ConstraintLimit::MaxPureArgumentSize,
                max_pure,
                limits.max_pure_argument_size,
            );
        }

        let object_count = (object_inputs + builder.command_frequency(CommandKind::MoveCall)) as u64;
        debug!(object_count, "input objects including move calls");
        if object_count > limits.max_input_objects {
            violations.record(
                ConstraintLimit::MaxInputObjects,
                object_count,
                limits.max_input_objects,
            );
        }

        let mut total_args = 0u64;
        for command in builder.commands() {
            let args = command.argument_count() as u64;
            let type_args = command.type_argument_count() as u64;
            debug!(kind = %command.kind(), args, type_args, "command arguments");
            if args > limits.max_arguments {
                violations.record(ConstraintLimit::MaxArguments, args, limits.max_arguments);
            }
            if type_args > limits.max_type_arguments {
                violations.record(
                    ConstraintLimit::MaxTypeArguments,
                    type_args,
                    limits.max_type_arguments,
                );
            }
            total_args += args;
        }
        if total_args > limits.max_num_transferred_move_object_ids {
            violations.record(
                ConstraintLimit::MaxNumTransferredMoveObjectIds,
                total_args,
                limits.max_num_transferred_move_object_ids,
            );
        }

        let command_count = builder.commands().len() as u64;
        if command_count > limits.max_programmable_tx_commands {
            violations.record(
                ConstraintLimit::MaxProgrammableTxCommands,
                command_count,
                limits.max_programmable_tx_commands,
            );
        }

        let tx_size = match tx_bytes {
            Some(bytes) => {
                TransactionData::from_bytes(bytes)?;
                bytes.len()
            }
            None => Self::measurement_envelope(builder, gas_price)?.serialized_size()?,
        } as u64;
        debug!(tx_size, "transaction size");
        if tx_size > limits.max_tx_size_bytes {
            violations.record(ConstraintLimit::MaxTxSizeBytes, tx_size, limits.max_tx_size_bytes);
        }

        Ok(violations.into_option())
    }

    /// Wraps the builder's contents in `TransactionData` with the zero
    /// address as sender and gas owner and one placeholder gas coin.
    pub fn measurement_envelope(
        builder: &ProgrammableTransactionBuilder,
        gas_price: u64,
    ) -> BuilderResult<TransactionData> {
        let gas_coin = ObjectReference::new(
            Address::ZERO,
            0,
            Digest::from_base58(PLACEHOLDER_GAS_DIGEST)?,
        );
        Ok(TransactionData::new_v1(
            builder.snapshot_kind(),
            Address::ZERO,
            GasData {
                payment: vec![gas_coin],
                owner: Address::ZERO,
                price: gas_price,
                budget: PAY_GAS,
            },
            TransactionExpiration::None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptb_types::{Argument, ObjectArg, SharedObjectReference, TypeTag};

    fn generous() -> TransactionConstraints {
        TransactionConstraints {
            max_pure_argument_size: 16_384,
            max_input_objects: 2_048,
            max_arguments: 512,
            max_type_arguments: 16,
            max_num_transferred_move_object_ids: 2_048,
            max_programmable_tx_commands: 1_024,
            max_tx_size_bytes: 131_072,
        }
    }

    #[test]
    fn test_within_limits() {
        let mut builder = ProgrammableTransactionBuilder::default();
        let amount = builder.pure(&1_000u64).unwrap();
        builder.split_coin(Argument::GasCoin, vec![amount]).unwrap();
        let verifier = TransactionVerifier::new(&generous());
        assert_eq!(verifier.verify(&builder, 1_000, None).unwrap(), None);
    }

    #[test]
    fn test_empty_builder_against_zero_limits_reports_size_only() {
        let builder = ProgrammableTransactionBuilder::default();
        let verifier = TransactionVerifier::new(&TransactionConstraints::default());
        let violations = verifier.verify(&builder, 1_000, None).unwrap().unwrap();
        assert_eq!(violations.len(), 1);
        let expected = TransactionVerifier::measurement_envelope(&builder, 1_000)
            .unwrap()
            .serialized_size()
            .unwrap() as u64;
        assert_eq!(violations.get(ConstraintLimit::MaxTxSizeBytes), Some(expected));
    }

    #[test]
    fn test_pure_size_uses_largest_single_input() {
        let mut builder = ProgrammableTransactionBuilder::default();
        builder.pure_bytes(vec![0; 10]).unwrap();
        builder.pure_bytes(vec![1; 10]).unwrap();
        let limits = TransactionConstraints {
            max_pure_argument_size: 10,
            ..generous()
        };
        let violations = TransactionVerifier::new(&limits)
            .verify(&builder, 1_000, None)
            .unwrap()
            .unwrap();
        assert_eq!(violations.get(ConstraintLimit::MaxPureArgumentSize), Some(10));

        let limits = TransactionConstraints {
            max_pure_argument_size: 11,
            ..generous()
        };
        assert_eq!(
            TransactionVerifier::new(&limits).verify(&builder, 1_000, None).unwrap(),
            None
        );
    }

    #[test]
    fn test_move_calls_count_as_input_objects() {
        let mut builder = ProgrammableTransactionBuilder::default();
        builder
            .obj(ObjectArg::SharedObject(SharedObjectReference::new(Address::ZERO, 1, true)))
            .unwrap();
        builder.move_call_target("0x2::clock::tick", vec![], vec![]).unwrap();
        builder.move_call_target("0x2::clock::tock", vec![], vec![]).unwrap();
        let limits = TransactionConstraints {
            max_input_objects: 2,
            ..generous()
        };
        let violations = TransactionVerifier::new(&limits)
            .verify(&builder, 1_000, None)
            .unwrap()
            .unwrap();
        assert_eq!(violations.get(ConstraintLimit::MaxInputObjects), Some(3));
    }

    #[test]
    fn test_type_arguments_flagged_per_command() {
        let mut builder = ProgrammableTransactionBuilder::default();
        builder
            .move_call_target("0x2::bag::new", vec![TypeTag::U8; 3], vec![])
            .unwrap();
        let limits = TransactionConstraints {
            max_type_arguments: 2,
            ..generous()
        };
        let violations = TransactionVerifier::new(&limits)
            .verify(&builder, 1_000, None)
            .unwrap()
            .unwrap();
        assert_eq!(violations.get(ConstraintLimit::MaxTypeArguments), Some(3));
        assert!(!violations.contains(ConstraintLimit::MaxArguments));
    }

    #[test]
    fn test_supplied_bytes_must_decode() {
        let builder = ProgrammableTransactionBuilder::default();
        let verifier = TransactionVerifier::new(&generous());
        let err = verifier.verify(&builder, 1_000, Some(&[9, 9, 9])).unwrap_err();
        assert_eq!(err.code(), "IO_INVALID_VARIANT");
    }

    #[test]
    fn test_violations_to_constraints_and_json() {
        let mut violations = ConstraintViolations::default();
        violations.record(ConstraintLimit::MaxArguments, 600, 512);
        violations.record(ConstraintLimit::MaxTxSizeBytes, 0, 0);
        let violations = violations.into_option().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.to_constraints().max_arguments, 600);
        assert_eq!(
            serde_json::to_string(&violations).unwrap(),
            r#"{"max_arguments":600}"#
        );
    }
}
