//! Programmable transaction assembly.
//!
//! The builder keeps an ordered input table keyed by [`BuilderArg`] and an
//! ordered command list. Inputs and commands are referenced by position, so
//! both tables are append-only.

use crate::error::{BuilderError, BuilderResult};
use indexmap::IndexMap;
use ptb_config::BuilderConfig;
use ptb_io::{Serializable, SerializableExt};
use ptb_types::{
    Argument, CallArg, Command, CommandKind, MakeMoveVec, MergeCoins, MoveCallTarget, ObjectArg,
    ObjectId, ProgrammableMoveCall, ProgrammableTransaction, Publish, SplitCoin,
    TransactionKind, TransferObjects, TypeTag, Upgrade,
};
use std::collections::HashMap;
use tracing::debug;

/// Largest number of inputs or commands a transaction can address.
pub const MAX_ADDRESSABLE: usize = u16::MAX as usize + 1;

/// Key of an entry in the input table.
///
/// Only `Pure` keys are content addressed, so two pure inputs with equal
/// bytes share one slot when compression is on. Every other key carries the
/// slot it was created at and never collides.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuilderArg {
    Object { id: ObjectId, slot: u16 },
    Pure(Vec<u8>),
    ForcedNonUniquePure { slot: u16 },
}

impl BuilderArg {
    pub fn is_pure(&self) -> bool {
        !matches!(self, Self::Object { .. })
    }
}

/// A value to add to the input table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputValue {
    /// Encoded pure value, deduplicated when compression is on.
    Pure(Vec<u8>),
    /// Encoded pure value that always gets its own slot.
    ForcedNonUniquePure(Vec<u8>),
    Object(ObjectArg),
}

impl From<ObjectArg> for InputValue {
    fn from(arg: ObjectArg) -> Self {
        Self::Object(arg)
    }
}

impl From<Vec<u8>> for InputValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Pure(bytes)
    }
}

/// Assembles a [`ProgrammableTransaction`].
#[derive(Debug, Clone)]
pub struct ProgrammableTransactionBuilder {
    compress_inputs: bool,
    inputs: IndexMap<BuilderArg, CallArg>,
    commands: Vec<Command>,
    command_frequency: HashMap<CommandKind, usize>,
}

impl Default for ProgrammableTransactionBuilder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ProgrammableTransactionBuilder {
    pub fn new(compress_inputs: bool) -> Self {
        Self {
            compress_inputs,
            inputs: IndexMap::new(),
            commands: Vec::new(),
            command_frequency: HashMap::new(),
        }
    }

    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::new(config.compress_inputs)
    }

    #[inline]
    pub fn compress_inputs(&self) -> bool {
        self.compress_inputs
    }

    /// Adds an input and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::TooManyInputs` once every slot is taken.
    pub fn add_input(&mut self, value: impl Into<InputValue>) -> BuilderResult<Argument> {
        let (key, call_arg) = match value.into() {
            InputValue::Pure(bytes) if self.compress_inputs => {
                let call_arg = CallArg::Pure(bytes.clone());
                let key = BuilderArg::Pure(bytes);
                if let Some(index) = self.inputs.get_index_of(&key) {
                    debug!(index, "reusing identical pure input");
                    return Ok(Argument::Input(index as u16));
                }
                (key, call_arg)
            }
            InputValue::Pure(bytes) | InputValue::ForcedNonUniquePure(bytes) => (
                BuilderArg::ForcedNonUniquePure {
                    slot: self.next_input_slot()?,
                },
                CallArg::Pure(bytes),
            ),
            InputValue::Object(arg) => (
                BuilderArg::Object {
                    id: arg.object_id(),
                    slot: self.next_input_slot()?,
                },
                CallArg::Object(arg),
            ),
        };

        let slot = self.next_input_slot()?;
        debug!(slot, key = ?key, "added input");
        self.inputs.insert(key, call_arg);
        Ok(Argument::Input(slot))
    }

    /// Encodes `value` and adds it as a pure input.
    pub fn pure<T: Serializable>(&mut self, value: &T) -> BuilderResult<Argument> {
        self.add_input(InputValue::Pure(value.to_bytes()?))
    }

    /// Adds already-encoded pure bytes.
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> BuilderResult<Argument> {
        self.add_input(InputValue::Pure(bytes))
    }

    /// Adds a pure input that is never merged with an equal one.
    pub fn force_separate_pure(&mut self, bytes: Vec<u8>) -> BuilderResult<Argument> {
        self.add_input(InputValue::ForcedNonUniquePure(bytes))
    }

    pub fn obj(&mut self, arg: ObjectArg) -> BuilderResult<Argument> {
        self.add_input(InputValue::Object(arg))
    }

    /// Appends a command and returns the reference to its result.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::TooManyCommands` once every slot is taken.
    pub fn add_command(&mut self, command: impl Into<Command>) -> BuilderResult<Argument> {
        let index = u16::try_from(self.commands.len()).map_err(|_| {
            BuilderError::TooManyCommands {
                limit: MAX_ADDRESSABLE,
            }
        })?;
        let command = command.into();
        let kind = command.kind();
        *self.command_frequency.entry(kind).or_default() += 1;
        self.commands.push(command);
        debug!(index, %kind, "added command");
        Ok(Argument::Result(index))
    }

    /// Reference to element `element` of a command's result.
    ///
    /// Returns `None` unless `result` is a `Result` reference.
    pub fn nested_result(&self, result: Argument, element: u16) -> Option<Argument> {
        result.nested(element)
    }

    /// References to the first `count` elements of a command's result.
    pub fn nested_results(&self, result: Argument, count: u16) -> Vec<Argument> {
        (0..count)
            .filter_map(|element| result.nested(element))
            .collect()
    }

    pub fn move_call(
        &mut self,
        package: ObjectId,
        module: impl Into<String>,
        function: impl Into<String>,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> BuilderResult<Argument> {
        self.add_command(ProgrammableMoveCall {
            package,
            module: module.into(),
            function: function.into(),
            type_arguments,
            arguments,
        })
    }

    /// Calls a function named as `package::module::function`.
    pub fn move_call_target(
        &mut self,
        target: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> BuilderResult<Argument> {
        let target = MoveCallTarget::parse(target)?;
        self.move_call(
            target.package,
            target.module,
            target.function,
            type_arguments,
            arguments,
        )
    }

    pub fn transfer_objects(
        &mut self,
        objects: Vec<Argument>,
        recipient: Argument,
    ) -> BuilderResult<Argument> {
        self.add_command(Command::TransferObjects(TransferObjects {
            objects,
            address: recipient,
        }))
    }

    pub fn split_coin(&mut self, coin: Argument, amounts: Vec<Argument>) -> BuilderResult<Argument> {
        self.add_command(Command::SplitCoin(SplitCoin {
            from_coin: coin,
            amounts,
        }))
    }

    pub fn merge_coins(
        &mut self,
        to_coin: Argument,
        from_coins: Vec<Argument>,
    ) -> BuilderResult<Argument> {
        self.add_command(Command::MergeCoins(MergeCoins {
            to_coin,
            from_coins,
        }))
    }

    pub fn publish(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
    ) -> BuilderResult<Argument> {
        self.add_command(Command::Publish(Publish {
            modules,
            dependencies,
        }))
    }

    pub fn make_move_vec(
        &mut self,
        type_tag: Option<TypeTag>,
        elements: Vec<Argument>,
    ) -> BuilderResult<Argument> {
        self.add_command(Command::MakeMoveVec(MakeMoveVec { type_tag, elements }))
    }

    pub fn upgrade(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
        package: ObjectId,
        upgrade_ticket: Argument,
    ) -> BuilderResult<Argument> {
        self.add_command(Command::Upgrade(Upgrade {
            modules,
            dependencies,
            package,
            upgrade_ticket,
        }))
    }

    /// Input table in insertion order.
    pub fn inputs(&self) -> impl Iterator<Item = (&BuilderArg, &CallArg)> {
        self.inputs.iter()
    }

    #[inline]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    #[inline]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// How many commands of `kind` have been added.
    pub fn command_frequency(&self, kind: CommandKind) -> usize {
        self.command_frequency.get(&kind).copied().unwrap_or(0)
    }

    /// Copy of the transaction assembled so far.
    pub fn snapshot(&self) -> ProgrammableTransaction {
        ProgrammableTransaction {
            inputs: self.inputs.values().cloned().collect(),
            commands: self.commands.clone(),
        }
    }

    pub fn snapshot_kind(&self) -> TransactionKind {
        TransactionKind::ProgrammableTransaction(self.snapshot())
    }

    /// Consumes the builder and returns the assembled transaction.
    pub fn finish(self) -> ProgrammableTransaction {
        ProgrammableTransaction {
            inputs: self.inputs.into_values().collect(),
            commands: self.commands,
        }
    }

    fn next_input_slot(&self) -> BuilderResult<u16> {
        u16::try_from(self.inputs.len()).map_err(|_| BuilderError::TooManyInputs {
            limit: MAX_ADDRESSABLE,
        })
    }
}
