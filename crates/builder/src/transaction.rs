//! A transaction under construction for one sender.

use crate::builder::ProgrammableTransactionBuilder;
use crate::compiler::{expand_home, MoveCompiler};
use crate::error::BuilderResult;
use crate::protocol::ProtocolConfigProvider;
use crate::verifier::{ConstraintViolations, TransactionVerifier};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ptb_config::{BuilderConfig, TransactionConstraints};
use ptb_io::SerializableExt;
use ptb_types::{
    Address, Argument, Digest, GasData, ObjectId, ObjectReference, TransactionData,
    TransactionExpiration, TransactionKind,
};
use tracing::{debug, info};

/// Ties a builder to a sender, the protocol limits and the gas price in
/// effect when the session started.
#[derive(Debug, Clone)]
pub struct TransactionSession {
    builder: ProgrammableTransactionBuilder,
    sender: Address,
    constraints: TransactionConstraints,
    gas_price: u64,
    gas_budget: u64,
    merge_gas_budget: bool,
}

impl TransactionSession {
    /// Starts a session. Constraints and gas price are read once; a gas
    /// price in `config` overrides the provider's.
    pub fn new<P: ProtocolConfigProvider>(
        provider: &P,
        sender: Address,
        config: &BuilderConfig,
    ) -> BuilderResult<Self> {
        let constraints = provider.transaction_constraints()?;
        let gas_price = match config.gas_price {
            Some(price) => price,
            None => provider.reference_gas_price()?,
        };
        debug!(%sender, gas_price, "started transaction session");
        Ok(Self {
            builder: ProgrammableTransactionBuilder::from_config(config),
            sender,
            constraints,
            gas_price,
            gas_budget: config.gas_budget,
            merge_gas_budget: config.merge_gas_budget,
        })
    }

    /// Reference to the gas coin for use as a command argument.
    #[inline]
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn set_gas_price(&mut self, price: u64) {
        self.gas_price = price;
    }

    pub fn gas_budget(&self) -> u64 {
        self.gas_budget
    }

    /// Passthrough of `BuilderConfig::merge_gas_budget` for the signing layer.
    pub fn merge_gas_budget(&self) -> bool {
        self.merge_gas_budget
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn constraints(&self) -> &TransactionConstraints {
        &self.constraints
    }

    pub fn builder(&self) -> &ProgrammableTransactionBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut ProgrammableTransactionBuilder {
        &mut self.builder
    }

    /// The transaction kind assembled so far.
    pub fn raw_kind(&self) -> TransactionKind {
        self.builder.snapshot_kind()
    }

    /// Base64 of the encoded transaction kind, as accepted for dry runs.
    pub fn build_for_dryrun(&self) -> BuilderResult<String> {
        Ok(STANDARD.encode(self.raw_kind().to_bytes()?))
    }

    /// Checks the transaction against the session's constraints.
    pub fn verify_transaction(
        &self,
        tx_bytes: Option<&[u8]>,
    ) -> BuilderResult<(TransactionConstraints, Option<ConstraintViolations>)> {
        let violations =
            TransactionVerifier::new(&self.constraints).verify(&self.builder, self.gas_price, tx_bytes)?;
        Ok((self.constraints, violations))
    }

    /// Compiles a Move project, expanding a leading `~` in its path.
    pub fn compile_source<C: MoveCompiler>(
        &self,
        compiler: &C,
        project_path: &str,
        build_args: &[String],
    ) -> BuilderResult<(Vec<Vec<u8>>, Vec<ObjectId>, Digest)> {
        let path = expand_home(project_path);
        compiler.build(&path, build_args)?.decode()
    }

    /// Compiles and appends a `Publish` command. Returns the upgrade capability.
    pub fn publish<C: MoveCompiler>(
        &mut self,
        compiler: &C,
        project_path: &str,
        build_args: &[String],
    ) -> BuilderResult<Argument> {
        let (modules, dependencies, digest) =
            self.compile_source(compiler, project_path, build_args)?;
        info!(modules = modules.len(), %digest, "publishing package");
        self.builder.publish(modules, dependencies)
    }

    /// Compiles and appends an `Upgrade` command for `package`.
    pub fn upgrade<C: MoveCompiler>(
        &mut self,
        compiler: &C,
        project_path: &str,
        build_args: &[String],
        package: ObjectId,
        upgrade_ticket: Argument,
    ) -> BuilderResult<Argument> {
        let (modules, dependencies, digest) =
            self.compile_source(compiler, project_path, build_args)?;
        info!(%package, modules = modules.len(), %digest, "upgrading package");
        self.builder
            .upgrade(modules, dependencies, package, upgrade_ticket)
    }

    /// Finishes the builder into the data the sender signs. The sender pays
    /// gas at the session price within the configured budget.
    pub fn into_transaction_data(
        self,
        gas_payment: Vec<ObjectReference>,
        expiration: TransactionExpiration,
    ) -> TransactionData {
        TransactionData::new_v1(
            TransactionKind::ProgrammableTransaction(self.builder.finish()),
            self.sender,
            GasData {
                payment: gas_payment,
                owner: self.sender,
                price: self.gas_price,
                budget: self.gas_budget,
            },
            expiration,
        )
    }
}
