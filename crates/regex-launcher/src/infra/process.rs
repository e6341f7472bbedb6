//! Detached process spawning.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::domain::errors::LaunchError;

/// Starts an external program without keeping a handle to it.
pub trait ProcessLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError>;
}

/// Spawns the program with null stdio in its own process group and forgets it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;

impl ProcessLauncher for DetachedSpawner {
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(DETACHED_PROCESS);
        }

        debug!(program = %program.display(), ?args, "spawning detached process");
        let child = command.spawn().map_err(|source| LaunchError::Spawn {
            program: program.display().to_string(),
            source,
        })?;
        info!(pid = child.id(), program = %program.display(), "process launched");
        Ok(())
    }
}

/// One recorded launch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Launcher that records requests instead of spawning.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launches: RefCell<Vec<LaunchRecord>>,
    fail_with: Option<String>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every launch fails with an OS error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            launches: RefCell::default(),
            fail_with: Some(message.into()),
        }
    }

    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.launches.borrow().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError> {
        self.launches.borrow_mut().push(LaunchRecord {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });
        match &self.fail_with {
            Some(message) => Err(LaunchError::Spawn {
                program: program.display().to_string(),
                source: std::io::Error::other(message.clone()),
            }),
            None => Ok(()),
        }
    }
}
