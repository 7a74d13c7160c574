//! Move package compilation.

use crate::error::{BuilderError, BuilderResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ptb_types::{Address, Digest, ObjectId};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Output of a Move package build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompiledPackage {
    /// Base64 module bytecode.
    #[serde(alias = "compiled_modules", alias = "compiledModules")]
    pub modules: Vec<String>,
    /// Hex addresses of the packages depended upon.
    pub dependencies: Vec<String>,
    #[serde(alias = "package_digest", alias = "packageDigest")]
    pub digest: Vec<u8>,
}

impl CompiledPackage {
    /// Decodes modules, dependency ids and the package digest.
    pub fn decode(&self) -> BuilderResult<(Vec<Vec<u8>>, Vec<ObjectId>, Digest)> {
        let modules = self
            .modules
            .iter()
            .map(|module| STANDARD.decode(module))
            .collect::<Result<Vec<_>, _>>()?;
        let dependencies = self
            .dependencies
            .iter()
            .map(|dependency| Address::parse(dependency))
            .collect::<Result<Vec<_>, _>>()?;
        let digest = Digest::from_bytes(&self.digest)?;
        Ok((modules, dependencies, digest))
    }
}

/// Builds a Move project into publishable bytecode.
pub trait MoveCompiler {
    fn build(&self, project_path: &Path, build_args: &[String]) -> BuilderResult<CompiledPackage>;
}

/// Runs `sui move build --dump-bytecode-as-base64`.
#[derive(Debug, Clone)]
pub struct SuiCliCompiler {
    binary: PathBuf,
}

impl SuiCliCompiler {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for SuiCliCompiler {
    fn default() -> Self {
        Self::new("sui")
    }
}

impl MoveCompiler for SuiCliCompiler {
    fn build(&self, project_path: &Path, build_args: &[String]) -> BuilderResult<CompiledPackage> {
        info!(project = %project_path.display(), "building move package");
        let output = Command::new(&self.binary)
            .arg("move")
            .arg("build")
            .arg("-p")
            .arg(project_path)
            .arg("--dump-bytecode-as-base64")
            .args(build_args)
            .output()
            .map_err(|e| {
                BuilderError::compiler(format!("failed to run {}: {e}", self.binary.display()))
            })?;

        if !output.status.success() {
            return Err(BuilderError::compiler(
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_build_output(&stdout)
    }
}

/// The build prints progress lines before the JSON package description.
fn parse_build_output(stdout: &str) -> BuilderResult<CompiledPackage> {
    let json = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{'))
        .ok_or_else(|| BuilderError::compiler("build output contained no package description"))?;
    let package: CompiledPackage = serde_json::from_str(json).map_err(BuilderError::compiler)?;
    debug!(
        modules = package.modules.len(),
        dependencies = package.dependencies.len(),
        "parsed compiled package"
    );
    Ok(package)
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
