//! External toolchain manager
//!
//! The manager is an opaque collaborator with three operations: install a
//! toolchain, run its `swift --version`, and uninstall it.

use std::process::{Command, Output, Stdio};

use tracing::{debug, error, warn};

use crate::fingerprint::error::ToolchainError;

/// Trait for installing toolchains and querying their version banner
#[cfg_attr(test, mockall::automock)]
pub trait ToolchainManager {
    /// Installs the toolchain selected by `version`
    fn install(&self, version: &str) -> Result<(), ToolchainError>;

    /// Returns the full output of `swift --version` for an installed toolchain
    fn version_banner(&self, version: &str) -> Result<String, ToolchainError>;

    /// Removes the toolchain selected by `version`
    fn uninstall(&self, version: &str) -> Result<(), ToolchainError>;
}

/// ToolchainManager backed by the `swiftly` command
pub struct Swiftly {
    program: String,
}

impl Swiftly {
    /// Creates a manager that invokes `program`
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn command(&self, args: &[&str]) -> (Command, String) {
        let mut command = Command::new(&self.program);
        command.args(args);
        let command_line = std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        (command, command_line)
    }

    /// Runs a command with inherited stdio so the manager's progress stays visible
    fn run_inherited(&self, args: &[&str]) -> Result<(), ToolchainError> {
        let (mut command, command_line) = self.command(args);
        debug!("Running {}", command_line);

        let status = command.status().map_err(|e| ToolchainError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        if !status.success() {
            return Err(ToolchainError::Failed {
                command: command_line,
                status,
            });
        }
        Ok(())
    }

    fn run_captured(&self, args: &[&str]) -> Result<Output, ToolchainError> {
        let (mut command, command_line) = self.command(args);
        debug!("Running {}", command_line);

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ToolchainError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            warn!(
                "{} failed: {}",
                command_line,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(ToolchainError::Failed {
                command: command_line,
                status: output.status,
            });
        }
        Ok(output)
    }
}

impl ToolchainManager for Swiftly {
    fn install(&self, version: &str) -> Result<(), ToolchainError> {
        self.run_inherited(&["install", version])
    }

    fn version_banner(&self, version: &str) -> Result<String, ToolchainError> {
        let selector = format!("+{}", version);
        let output = self.run_captured(&["run", "swift", "--version", &selector])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn uninstall(&self, version: &str) -> Result<(), ToolchainError> {
        self.run_inherited(&["uninstall", "-y", version])
    }
}

/// An installed toolchain that is uninstalled when the guard goes away.
///
/// Call [`InstalledToolchain::uninstall`] to observe the uninstall result;
/// otherwise dropping the guard uninstalls and only logs a failure.
pub struct InstalledToolchain<'a, M: ToolchainManager + ?Sized> {
    manager: &'a M,
    version: String,
    released: bool,
}

impl<'a, M: ToolchainManager + ?Sized> InstalledToolchain<'a, M> {
    /// Installs `version` and returns a guard owning the installation
    pub fn acquire(manager: &'a M, version: &str) -> Result<Self, ToolchainError> {
        manager.install(version)?;
        Ok(Self {
            manager,
            version: version.to_string(),
            released: false,
        })
    }

    /// Returns the first line of the toolchain's version banner
    pub fn banner(&self) -> Result<String, ToolchainError> {
        let output = self.manager.version_banner(&self.version)?;
        output
            .trim()
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .ok_or_else(|| ToolchainError::EmptyBanner(self.version.clone()))
    }

    /// Uninstalls the toolchain, reporting failure to the caller
    pub fn uninstall(mut self) -> Result<(), ToolchainError> {
        self.released = true;
        self.manager.uninstall(&self.version)
    }
}

impl<M: ToolchainManager + ?Sized> Drop for InstalledToolchain<'_, M> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.manager.uninstall(&self.version) {
            error!("Failed to uninstall toolchain {}: {}", self.version, e);
        }
    }
}
