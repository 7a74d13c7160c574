//! End-to-end flows through the public facade.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sui_ptb::prelude::*;
use sui_ptb::types::ObjectOwner;

fn session_with(constraints: TransactionConstraints) -> TransactionSession {
    let config = BuilderConfig {
        constraints,
        gas_price: Some(1_000),
        ..BuilderConfig::default()
    };
    let provider = StaticProtocolConfig::from_config(&config);
    TransactionSession::new(&provider, Address::parse("0xa11ce").unwrap(), &config).unwrap()
}

#[test]
fn test_object_reads_feed_the_builder() {
    let reads: Vec<ObjectRead> = serde_json::from_str(
        r#"[
            {
                "objectId": "0x51",
                "version": "8",
                "digest": "ByumsdYUAQWJfwYgowsme7hm5vE8d2mXik3rGaNC9R4W",
                "owner": { "AddressOwner": "0xa11ce" }
            },
            {
                "objectId": "0x6",
                "version": 1,
                "digest": "ByumsdYUAQWJfwYgowsme7hm5vE8d2mXik3rGaNC9R4W",
                "owner": { "Shared": { "initial_shared_version": 1 } }
            }
        ]"#,
    )
    .unwrap();
    assert!(matches!(reads[1].owner, ObjectOwner::Shared { .. }));

    let mut session = session_with(TransactionConstraints::default());
    let coin = session
        .builder_mut()
        .obj(ObjectArg::from_object_read(&reads[0], true).unwrap())
        .unwrap();
    let clock = session
        .builder_mut()
        .obj(ObjectArg::from_object_read(&reads[1], false).unwrap())
        .unwrap();
    session
        .builder_mut()
        .move_call_target(
            "0x2::coin::burn_at",
            vec![TypeTag::from_text("0x2::sui::SUI").unwrap()],
            vec![coin, clock],
        )
        .unwrap();

    let kind = session.raw_kind();
    let pt = kind.as_programmable().unwrap();
    assert!(matches!(
        pt.inputs[1],
        CallArg::Object(ObjectArg::SharedObject(SharedObjectReference {
            initial_shared_version: 1,
            mutable: false,
            ..
        }))
    ));
    assert_eq!(TransactionKind::from_bytes(&kind.to_bytes().unwrap()).unwrap(), kind);
}

#[test]
fn test_constraints_from_protocol_json_gate_the_transaction() {
    let constraints = TransactionConstraints::from_json_str(
        r#"{
            "maxPureArgumentSize": "16384",
            "maxInputObjects": "2048",
            "maxArguments": "512",
            "maxTypeArguments": "16",
            "maxNumTransferredMoveObjectIds": "2048",
            "maxProgrammableTxCommands": "2",
            "maxTxSizeBytes": "131072"
        }"#,
    )
    .unwrap();
    let mut session = session_with(constraints);
    let gas = session.gas();
    for amount in [1u64, 2, 3] {
        let amount = session.builder_mut().pure(&amount).unwrap();
        session.builder_mut().split_coin(gas, vec![amount]).unwrap();
    }

    let (limits, violations) = session.verify_transaction(None).unwrap();
    assert_eq!(limits.max_programmable_tx_commands, 2);
    let violations = violations.unwrap();
    assert_eq!(
        violations.iter().collect::<Vec<_>>(),
        vec![(ConstraintLimit::MaxProgrammableTxCommands, 3)]
    );
}

#[test]
fn test_dryrun_payload_decodes_to_raw_kind() {
    let mut session = session_with(TransactionConstraints::default());
    let recipient = session.builder_mut().pure(&Address::parse("0xb0b").unwrap()).unwrap();
    let gas = session.gas();
    session.builder_mut().transfer_objects(vec![gas], recipient).unwrap();

    let encoded = session.build_for_dryrun().unwrap();
    let decoded = STANDARD.decode(encoded).unwrap();
    assert_eq!(TransactionKind::from_bytes(&decoded).unwrap(), session.raw_kind());
}
