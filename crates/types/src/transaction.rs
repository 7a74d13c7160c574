//! Transaction kinds and the signed-data envelope.

use crate::address::Address;
use crate::call_arg::CallArg;
use crate::command::Command;
use crate::object::ObjectReference;
use ptb_io::{
    impl_serializable_struct, BinaryWriter, EnumSchema, IoError, IoResult, MemoryReader,
    Serializable,
};

/// Ordered inputs and the commands that consume them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl_serializable_struct!(ProgrammableTransaction { inputs, commands });

/// What a transaction does.
///
/// System kinds are only recognised by tag; their payloads are not modelled.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
    ChangeEpoch,
    Genesis,
    ConsensusCommitPrologue,
}

impl TransactionKind {
    pub fn as_programmable(&self) -> Option<&ProgrammableTransaction> {
        match self {
            Self::ProgrammableTransaction(pt) => Some(pt),
            _ => None,
        }
    }
}

impl From<ProgrammableTransaction> for TransactionKind {
    fn from(pt: ProgrammableTransaction) -> Self {
        Self::ProgrammableTransaction(pt)
    }
}

impl EnumSchema for TransactionKind {
    const TYPE_NAME: &'static str = "TransactionKind";
    const VARIANTS: &'static [&'static str] = &[
        "ProgrammableTransaction",
        "ChangeEpoch",
        "Genesis",
        "ConsensusCommitPrologue",
    ];

    fn variant_index(&self) -> u32 {
        match self {
            Self::ProgrammableTransaction(_) => 0,
            Self::ChangeEpoch => 1,
            Self::Genesis => 2,
            Self::ConsensusCommitPrologue => 3,
        }
    }
}

impl Serializable for TransactionKind {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::ProgrammableTransaction(pt) => pt.serialize(writer),
            _ => Ok(()),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::ProgrammableTransaction(
                ProgrammableTransaction::deserialize(reader)?,
            )),
            1 => Ok(Self::ChangeEpoch),
            2 => Ok(Self::Genesis),
            3 => Ok(Self::ConsensusCommitPrologue),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}

/// Gas coins, payer and pricing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GasData {
    pub payment: Vec<ObjectReference>,
    pub owner: Address,
    pub price: u64,
    pub budget: u64,
}

impl_serializable_struct!(GasData {
    payment,
    owner,
    price,
    budget
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransactionExpiration {
    #[default]
    None,
    /// Invalid once the given epoch has passed.
    Epoch(u64),
}

impl EnumSchema for TransactionExpiration {
    const TYPE_NAME: &'static str = "TransactionExpiration";
    const VARIANTS: &'static [&'static str] = &["None", "Epoch"];

    fn variant_index(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Epoch(_) => 1,
        }
    }
}

impl Serializable for TransactionExpiration {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        if let Self::Epoch(epoch) = self {
            writer.write_u64(*epoch);
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::None),
            1 => Ok(Self::Epoch(reader.read_u64()?)),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: Address,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

impl_serializable_struct!(TransactionDataV1 {
    kind,
    sender,
    gas_data,
    expiration
});

/// The data a sender signs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

impl TransactionData {
    pub fn new_v1(
        kind: TransactionKind,
        sender: Address,
        gas_data: GasData,
        expiration: TransactionExpiration,
    ) -> Self {
        Self::V1(TransactionDataV1 {
            kind,
            sender,
            gas_data,
            expiration,
        })
    }

    pub fn kind(&self) -> &TransactionKind {
        match self {
            Self::V1(data) => &data.kind,
        }
    }

    pub fn sender(&self) -> Address {
        match self {
            Self::V1(data) => data.sender,
        }
    }

    pub fn gas_data(&self) -> &GasData {
        match self {
            Self::V1(data) => &data.gas_data,
        }
    }
}

impl EnumSchema for TransactionData {
    const TYPE_NAME: &'static str = "TransactionData";
    const VARIANTS: &'static [&'static str] = &["V1"];

    fn variant_index(&self) -> u32 {
        0
    }
}

impl Serializable for TransactionData {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::V1(data) => data.serialize(writer),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::V1(TransactionDataV1::deserialize(reader)?)),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}
