use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::error::ControlError;
use crate::types::{Envelope, LaunchInvocation, REQUIRED_KEYS, StartConfig};
use crate::validator::{ACCEPTED, validate};

#[derive(Debug, thiserror::Error)]
#[error("failed to start writer {}: {source}", .program.display())]
pub struct SpawnError {
    program: PathBuf,
    #[source]
    source: std::io::Error,
}

impl SpawnError {
    #[must_use]
    pub fn new(program: &Path, source: std::io::Error) -> Self {
        Self {
            program: program.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Starts a writer process for an invocation.
///
/// Implementations must return as soon as the process exists, without
/// waiting for it to become ready or to exit.
pub trait Launcher: Send + Sync {
    /// Returns the pid of the new process when the platform reports one.
    ///
    /// # Errors
    /// Returns `SpawnError` if the operating system refuses to create the process
    fn launch(&self, invocation: &LaunchInvocation) -> Result<Option<u32>, SpawnError>;
}

/// Launcher that starts the writer as a detached child process.
///
/// The child gets null stdio and its own process group. It is awaited on a
/// background task so it never lingers as a zombie, which requires a tokio
/// runtime: without one nothing is spawned and a `SpawnError` is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, invocation: &LaunchInvocation) -> Result<Option<u32>, SpawnError> {
        let runtime = Handle::try_current().map_err(|err| {
            SpawnError::new(&invocation.program, std::io::Error::other(err))
        })?;

        let mut command = std::process::Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = Command::from(command)
            .spawn()
            .map_err(|source| SpawnError::new(&invocation.program, source))?;
        let pid = child.id();

        runtime.spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    debug!(target: "writer_control::dispatcher", ?pid, %status, "Writer exited");
                }
                Err(err) => {
                    warn!(target: "writer_control::dispatcher", ?pid, %err, "Failed to reap writer");
                }
            }
        });

        Ok(pid)
    }
}

/// Turns accepted start requests into writer processes.
#[derive(Clone)]
pub struct Dispatcher {
    writer_binary: PathBuf,
    launcher: Arc<dyn Launcher>,
}

impl Dispatcher {
    pub fn new(writer_binary: impl Into<PathBuf>, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            writer_binary: writer_binary.into(),
            launcher,
        }
    }

    pub fn writer_binary(&self) -> &Path {
        &self.writer_binary
    }

    /// `Dispatch` Function
    ///
    /// Validate `config` and, if it is complete, start one writer process.
    /// Every successful call starts a new process; nothing checks for a
    /// writer that is already running.
    ///
    /// # Arguments
    /// * `config` - The start configuration posted by the caller
    ///
    /// # Returns
    /// * `Result<Envelope, ControlError>` - The "OK" envelope once the process exists
    ///
    /// # Errors
    /// * `ControlError::Validation` if a required key is missing or unusable,
    ///   in which case nothing is launched
    /// * `ControlError::Spawn` if the writer process could not be created
    pub fn dispatch(&self, config: &StartConfig) -> Result<Envelope, ControlError> {
        let invocation =
            build_invocation(&self.writer_binary, config).map_err(ControlError::Validation)?;

        info!(target: "writer_control::dispatcher", %invocation, "Starting writer");
        match self.launcher.launch(&invocation) {
            Ok(pid) => {
                info!(target: "writer_control::dispatcher", ?pid, "Writer process created");
                Ok(Envelope::success(ACCEPTED))
            }
            Err(err) => {
                error!(target: "writer_control::dispatcher", %err, "Writer process not created");
                Err(err.into())
            }
        }
    }
}

/// Order the values of `config` into the writer's positional arguments.
///
/// # Errors
/// Returns the validation failure envelope if `config` is incomplete
pub fn build_invocation(
    program: &Path,
    config: &StartConfig,
) -> Result<LaunchInvocation, Envelope> {
    let verdict = validate(config);
    if !verdict.success {
        return Err(verdict);
    }

    let args = REQUIRED_KEYS
        .iter()
        .filter_map(|key| config.argument(key))
        .collect();
    Ok(LaunchInvocation {
        program: program.to_path_buf(),
        args,
    })
}
