//! Input table behaviour of the transaction builder.

use proptest::prelude::*;
use ptb_builder::{BuilderArg, InputValue, ProgrammableTransactionBuilder};
use ptb_types::{Argument, CallArg};
use std::collections::HashSet;

#[test]
fn test_identical_pure_values_share_an_index() {
    let mut builder = ProgrammableTransactionBuilder::new(true);
    let first = builder.pure(&String::from("memo")).unwrap();
    let second = builder.pure(&String::from("memo")).unwrap();
    assert_eq!(first, second);
    assert_eq!(builder.input_count(), 1);
    let (key, arg) = builder.inputs().next().unwrap();
    assert_eq!(key, &BuilderArg::Pure(vec![4, b'm', b'e', b'm', b'o']));
    assert_eq!(arg, &CallArg::Pure(vec![4, b'm', b'e', b'm', b'o']));
}

#[test]
fn test_forced_values_occupy_distinct_indices() {
    let mut builder = ProgrammableTransactionBuilder::new(true);
    let first = builder
        .add_input(InputValue::ForcedNonUniquePure(vec![1]))
        .unwrap();
    let second = builder
        .add_input(InputValue::ForcedNonUniquePure(vec![1]))
        .unwrap();
    assert_eq!(first, Argument::Input(0));
    assert_eq!(second, Argument::Input(1));
    assert_eq!(builder.finish().inputs, vec![CallArg::Pure(vec![1]); 2]);
}

proptest! {
    /// With compression on, the input table holds each distinct value once
    /// and every returned index resolves to the value that was added.
    #[test]
    fn test_compression_keeps_distinct_values(values in prop::collection::vec(0u8..8, 0..40)) {
        let mut builder = ProgrammableTransactionBuilder::new(true);
        let mut handles = Vec::new();
        for value in &values {
            handles.push(builder.pure(value).unwrap());
        }

        let distinct: HashSet<_> = values.iter().collect();
        prop_assert_eq!(builder.input_count(), distinct.len());

        let pt = builder.finish();
        for (value, handle) in values.iter().zip(handles) {
            match handle {
                Argument::Input(index) => {
                    prop_assert_eq!(&pt.inputs[index as usize], &CallArg::Pure(vec![*value]));
                }
                other => prop_assert!(false, "unexpected handle {}", other),
            }
        }
    }

    /// Without compression every addition gets the next index.
    #[test]
    fn test_no_compression_is_positional(values in prop::collection::vec(any::<u64>(), 0..20)) {
        let mut builder = ProgrammableTransactionBuilder::new(false);
        for (i, value) in values.iter().enumerate() {
            prop_assert_eq!(builder.pure(value).unwrap(), Argument::Input(i as u16));
        }
    }
}
