//! Programmable transaction commands.

use crate::address::{Address, ObjectId};
use crate::argument::Argument;
use crate::error::{SchemaError, SchemaResult};
use crate::type_tag::TypeTag;
use ptb_io::{
    impl_serializable_struct, BinaryWriter, EnumSchema, IoError, IoResult, MemoryReader,
    Serializable,
};
use std::fmt;
use std::str::FromStr;

/// A call to a Move entry or public function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

impl_serializable_struct!(ProgrammableMoveCall {
    package,
    module,
    function,
    type_arguments,
    arguments
});

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransferObjects {
    pub objects: Vec<Argument>,
    pub address: Argument,
}

impl_serializable_struct!(TransferObjects { objects, address });

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SplitCoin {
    pub from_coin: Argument,
    pub amounts: Vec<Argument>,
}

impl_serializable_struct!(SplitCoin { from_coin, amounts });

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MergeCoins {
    pub to_coin: Argument,
    pub from_coins: Vec<Argument>,
}

impl_serializable_struct!(MergeCoins {
    to_coin,
    from_coins
});

/// Publishes compiled modules.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Publish {
    pub modules: Vec<Vec<u8>>,
    pub dependencies: Vec<ObjectId>,
}

impl_serializable_struct!(Publish {
    modules,
    dependencies
});

/// Builds a vector from its elements. `type_tag` is required only when the
/// element type cannot be inferred, such as an empty vector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MakeMoveVec {
    pub type_tag: Option<TypeTag>,
    pub elements: Vec<Argument>,
}

impl_serializable_struct!(MakeMoveVec { type_tag, elements });

/// Upgrades an existing package under an upgrade ticket.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Upgrade {
    pub modules: Vec<Vec<u8>>,
    pub dependencies: Vec<ObjectId>,
    pub package: ObjectId,
    pub upgrade_ticket: Argument,
}

impl_serializable_struct!(Upgrade {
    modules,
    dependencies,
    package,
    upgrade_ticket
});

/// One step of a programmable transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(TransferObjects),
    SplitCoin(SplitCoin),
    MergeCoins(MergeCoins),
    Publish(Publish),
    MakeMoveVec(MakeMoveVec),
    Upgrade(Upgrade),
}

/// Payload-free discriminant of [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    MoveCall,
    TransferObjects,
    SplitCoin,
    MergeCoins,
    Publish,
    MakeMoveVec,
    Upgrade,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        Self::MoveCall,
        Self::TransferObjects,
        Self::SplitCoin,
        Self::MergeCoins,
        Self::Publish,
        Self::MakeMoveVec,
        Self::Upgrade,
    ];

    pub fn as_str(&self) -> &'static str {
        Command::VARIANTS[*self as usize]
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::MoveCall(_) => CommandKind::MoveCall,
            Self::TransferObjects(_) => CommandKind::TransferObjects,
            Self::SplitCoin(_) => CommandKind::SplitCoin,
            Self::MergeCoins(_) => CommandKind::MergeCoins,
            Self::Publish(_) => CommandKind::Publish,
            Self::MakeMoveVec(_) => CommandKind::MakeMoveVec,
            Self::Upgrade(_) => CommandKind::Upgrade,
        }
    }

    /// Number of arguments the command carries, as counted against protocol
    /// limits. Module bytecode counts for `Publish` and `Upgrade`.
    pub fn argument_count(&self) -> usize {
        match self {
            Self::MoveCall(call) => call.arguments.len(),
            Self::TransferObjects(transfer) => transfer.objects.len(),
            Self::MergeCoins(merge) => merge.from_coins.len(),
            Self::SplitCoin(split) => split.amounts.len(),
            Self::MakeMoveVec(make) => make.elements.len(),
            Self::Publish(publish) => publish.modules.len(),
            Self::Upgrade(upgrade) => upgrade.modules.len(),
        }
    }

    /// Number of type arguments. Only `MoveCall` carries any.
    pub fn type_argument_count(&self) -> usize {
        match self {
            Self::MoveCall(call) => call.type_arguments.len(),
            _ => 0,
        }
    }
}

impl From<ProgrammableMoveCall> for Command {
    fn from(call: ProgrammableMoveCall) -> Self {
        Self::MoveCall(Box::new(call))
    }
}

impl EnumSchema for Command {
    const TYPE_NAME: &'static str = "Command";
    const VARIANTS: &'static [&'static str] = &[
        "MoveCall",
        "TransferObjects",
        "SplitCoin",
        "MergeCoins",
        "Publish",
        "MakeMoveVec",
        "Upgrade",
    ];

    fn variant_index(&self) -> u32 {
        self.kind() as u32
    }
}

impl Serializable for Command {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_variant_index(self.variant_index());
        match self {
            Self::MoveCall(call) => call.serialize(writer),
            Self::TransferObjects(transfer) => transfer.serialize(writer),
            Self::SplitCoin(split) => split.serialize(writer),
            Self::MergeCoins(merge) => merge.serialize(writer),
            Self::Publish(publish) => publish.serialize(writer),
            Self::MakeMoveVec(make) => make.serialize(writer),
            Self::Upgrade(upgrade) => upgrade.serialize(writer),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_variant_index()? {
            0 => Ok(Self::MoveCall(Box::new(ProgrammableMoveCall::deserialize(reader)?))),
            1 => Ok(Self::TransferObjects(TransferObjects::deserialize(reader)?)),
            2 => Ok(Self::SplitCoin(SplitCoin::deserialize(reader)?)),
            3 => Ok(Self::MergeCoins(MergeCoins::deserialize(reader)?)),
            4 => Ok(Self::Publish(Publish::deserialize(reader)?)),
            5 => Ok(Self::MakeMoveVec(MakeMoveVec::deserialize(reader)?)),
            6 => Ok(Self::Upgrade(Upgrade::deserialize(reader)?)),
            index => Err(IoError::invalid_variant(Self::TYPE_NAME, index)),
        }
    }
}

/// A `package::module::function` triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveCallTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl MoveCallTarget {
    /// Parses `0x2::coin::split`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidMoveTarget` unless there are exactly three
    /// non-empty parts, and propagates package address errors.
    pub fn parse(s: &str) -> SchemaResult<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        match parts.as_slice() {
            [package, module, function]
                if !package.is_empty() && !module.is_empty() && !function.is_empty() =>
            {
                Ok(Self {
                    package: Address::parse(package)?,
                    module: (*module).to_string(),
                    function: (*function).to_string(),
                })
            }
            _ => Err(SchemaError::InvalidMoveTarget(s.to_string())),
        }
    }
}

impl FromStr for MoveCallTarget {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MoveCallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}
