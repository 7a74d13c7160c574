//! End-to-end verification of assembled transactions.

use ptb_builder::{
    ProgrammableTransactionBuilder, StaticProtocolConfig, TransactionSession, TransactionVerifier,
};
use ptb_config::{BuilderConfig, ConstraintLimit, TransactionConstraints};
use ptb_io::SerializableExt;
use ptb_types::{
    Address, Argument, Digest, ObjectArg, ObjectReference, TransactionData, TransactionExpiration,
};

fn mainnet_like() -> TransactionConstraints {
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

fn owned(last: u8) -> ObjectArg {
    let mut id = [0u8; 32];
    id[31] = last;
    ObjectArg::ImmOrOwnedObject(ObjectReference::new(Address::new(id), 5, Digest::new([last; 32])))
}

#[test]
fn test_single_oversized_pure_input() {
    let mut builder = ProgrammableTransactionBuilder::default();
    builder.pure_bytes(vec![0u8; 11]).unwrap();

    let limits = TransactionConstraints {
        max_pure_argument_size: 10,
        ..mainnet_like()
    };
    let violations = TransactionVerifier::new(&limits)
        .verify(&builder, 1_000, None)
        .unwrap()
        .unwrap();
    assert_eq!(
        violations.iter().collect::<Vec<_>>(),
        vec![(ConstraintLimit::MaxPureArgumentSize, 11)]
    );
    assert_eq!(
        serde_json::to_value(&violations).unwrap(),
        serde_json::json!({ "max_pure_argument_size": 11 })
    );
}

#[test]
fn test_forced_pure_input_counts_as_pure() {
    let mut builder = ProgrammableTransactionBuilder::default();
    builder.force_separate_pure(vec![3u8; 11]).unwrap();

    let limits = TransactionConstraints {
        max_pure_argument_size: 10,
        max_input_objects: 0,
        ..mainnet_like()
    };
    let violations = TransactionVerifier::new(&limits)
        .verify(&builder, 1_000, None)
        .unwrap()
        .unwrap();
    assert_eq!(violations.get(ConstraintLimit::MaxPureArgumentSize), Some(11));
    assert!(!violations.contains(ConstraintLimit::MaxInputObjects));
    assert_eq!(violations.len(), 1);
}

#[test]
fn test_all_metrics_under_limits() {
    let mut builder = ProgrammableTransactionBuilder::default();
    let coin = builder.obj(owned(1)).unwrap();
    let other = builder.obj(owned(2)).unwrap();
    builder.merge_coins(coin, vec![other]).unwrap();
    let amount = builder.pure(&250u64).unwrap();
    let split = builder.split_coin(coin, vec![amount, amount]).unwrap();
    let recipient = builder.pure(&Address::parse("0xb0b").unwrap()).unwrap();
    builder.transfer_objects(builder.nested_results(split, 2), recipient).unwrap();

    let verifier = TransactionVerifier::new(&mainnet_like());
    assert_eq!(verifier.verify(&builder, 1_000, None).unwrap(), None);
}

#[test]
fn test_every_limit_exceeded() {
    let mut builder = ProgrammableTransactionBuilder::default();
    let coin = builder.obj(owned(1)).unwrap();
    let big = builder.pure_bytes(vec![7u8; 64]).unwrap();
    builder
        .move_call_target(
            "0x2::pay::split_vec",
            vec!["0x2::sui::SUI".parse().unwrap(), "u64".parse().unwrap()],
            vec![coin, big, big],
        )
        .unwrap();
    builder.transfer_objects(vec![coin], big).unwrap();

    let limits = TransactionConstraints {
        max_pure_argument_size: 64,
        max_input_objects: 1,
        max_arguments: 2,
        max_type_arguments: 1,
        max_num_transferred_move_object_ids: 3,
        max_programmable_tx_commands: 1,
        max_tx_size_bytes: 100,
    };
    let violations = TransactionVerifier::new(&limits)
        .verify(&builder, 1_000, None)
        .unwrap()
        .unwrap();

    assert_eq!(violations.get(ConstraintLimit::MaxPureArgumentSize), Some(64));
    assert_eq!(violations.get(ConstraintLimit::MaxInputObjects), Some(2));
    assert_eq!(violations.get(ConstraintLimit::MaxArguments), Some(3));
    assert_eq!(violations.get(ConstraintLimit::MaxTypeArguments), Some(2));
    assert_eq!(violations.get(ConstraintLimit::MaxNumTransferredMoveObjectIds), Some(4));
    assert_eq!(violations.get(ConstraintLimit::MaxProgrammableTxCommands), Some(2));
    assert!(violations.get(ConstraintLimit::MaxTxSizeBytes).unwrap() > 100);
    assert_eq!(violations.len(), ConstraintLimit::ALL.len());

    let accumulated = violations.to_constraints();
    assert_eq!(accumulated.max_programmable_tx_commands, 2);
}

#[test]
fn test_supplied_bytes_are_measured() {
    let config = BuilderConfig {
        constraints: TransactionConstraints {
            max_tx_size_bytes: 150,
            ..mainnet_like()
        },
        ..BuilderConfig::default()
    };
    let provider = StaticProtocolConfig::from_config(&config);
    let mut session =
        TransactionSession::new(&provider, Address::parse("0x5e4d").unwrap(), &config).unwrap();
    let amount = session.builder_mut().pure(&1u64).unwrap();
    let gas = session.gas();
    session.builder_mut().split_coin(gas, vec![amount]).unwrap();

    let unpaid = session
        .clone()
        .into_transaction_data(vec![], TransactionExpiration::None)
        .to_bytes()
        .unwrap();
    assert!(unpaid.len() <= 150);
    let (_, violations) = session.verify_transaction(Some(&unpaid)).unwrap();
    assert_eq!(violations, None);

    // The measurement envelope adds one 73-byte gas coin reference.
    let (_, violations) = session.verify_transaction(None).unwrap();
    assert_eq!(
        violations.unwrap().get(ConstraintLimit::MaxTxSizeBytes),
        Some(unpaid.len() as u64 + 73)
    );

    let payment: Vec<ObjectReference> = (1..=3u8)
        .map(|i| {
            let id = Address::parse(&format!("0x{i}")).unwrap();
            ObjectReference::new(id, 1, Digest::new([i; 32]))
        })
        .collect();
    let paid = session
        .clone()
        .into_transaction_data(payment, TransactionExpiration::None)
        .to_bytes()
        .unwrap();
    let (_, violations) = session.verify_transaction(Some(&paid)).unwrap();
    assert_eq!(
        violations.unwrap().get(ConstraintLimit::MaxTxSizeBytes),
        Some(paid.len() as u64)
    );
    assert!(TransactionData::from_bytes(&paid).is_ok());
}

#[test]
fn test_session_round_trip_through_bytes() {
    let config = BuilderConfig::default();
    let provider = StaticProtocolConfig::new(mainnet_like(), 1_000);
    let mut session =
        TransactionSession::new(&provider, Address::parse("0x1234").unwrap(), &config).unwrap();
    let recipient = session.builder_mut().pure(&Address::parse("0x99").unwrap()).unwrap();
    session
        .builder_mut()
        .transfer_objects(vec![Argument::GasCoin], recipient)
        .unwrap();

    let data = session.into_transaction_data(vec![], TransactionExpiration::Epoch(12));
    let bytes = data.to_bytes().unwrap();
    assert_eq!(TransactionData::from_bytes(&bytes).unwrap(), data);
}
