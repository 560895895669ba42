//! # Git Invocation
//!
//! This module builds the exact `git` command lines used by an overlay run and
//! hands them to a [`CommandRunner`]. It uses the system `git` binary, so SSH
//! keys, credential helpers and everything configured in `~/.gitconfig` apply
//! unchanged.
//!
//! ## Key Components
//!
//! - **`CommandRunner`**: The "run an external command" capability. The
//!   production implementation is `SystemCommandRunner`; tests inject a
//!   recording fake.
//! - **`Git`**: Wraps a runner and knows the three invocation shapes:
//!   - `git clone <remote> <cloneDir>`
//!   - `git -C <cloneDir> reset --hard <revision>`
//!   - `git -C <cloneDir> checkout-index --force --all --prefix <dest><sep>`

use std::ffi::{OsStr, OsString};
use std::path::{Path, MAIN_SEPARATOR};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Runs an external program to completion.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, failing with `Error::Command` (holding the
    /// program's stderr) on a non-zero exit or if it cannot be started.
    fn run(&self, program: &str, args: &[OsString]) -> Result<()>;
}

/// Runs commands as child processes of the current process.
///
/// Every command line is logged at debug level. In debug mode the child also
/// inherits stdout and stderr. Otherwise stdout is discarded and stderr is
/// captured so it can be reported in the error.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    debug: bool,
}

impl SystemCommandRunner {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<()> {
        let command_line = render_command(program, args);
        log::debug!("COMMAND: {}", command_line);

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());

        if self.debug {
            let status = command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| Error::Command {
                    command: command_line.clone(),
                    stderr: e.to_string(),
                })?;
            if !status.success() {
                return Err(Error::Command {
                    command: command_line,
                    stderr: format!("exited with {}", status),
                });
            }
            return Ok(());
        }

        let output = command
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::Command {
                command: command_line.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Command {
                command: command_line,
                stderr: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(())
    }
}

/// Render a command line for logs and error messages.
pub fn render_command(program: &str, args: &[OsString]) -> String {
    std::iter::once(OsStr::new(program))
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `git` operations an overlay run needs.
pub struct Git {
    runner: Box<dyn CommandRunner>,
}

impl Git {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// `git clone <remote> <clone_dir>`
    pub fn clone(&self, remote: &str, clone_dir: &Path) -> Result<()> {
        self.runner
            .run("git", &[OsString::from("clone"), OsString::from(remote), clone_dir.into()])
    }

    /// `git -C <clone_dir> reset --hard <revision>`
    pub fn reset_hard(&self, clone_dir: &Path, revision: &str) -> Result<()> {
        self.runner.run(
            "git",
            &[
                OsString::from("-C"),
                clone_dir.into(),
                OsString::from("reset"),
                OsString::from("--hard"),
                OsString::from(revision),
            ],
        )
    }

    /// `git -C <clone_dir> checkout-index --force --all --prefix <dest><sep>`
    ///
    /// `destination` should be absolute; the trailing separator makes git treat
    /// the prefix as a directory.
    pub fn checkout_index(&self, clone_dir: &Path, destination: &Path) -> Result<()> {
        let mut prefix = destination.as_os_str().to_os_string();
        prefix.push(MAIN_SEPARATOR.to_string());

        self.runner.run(
            "git",
            &[
                OsString::from("-C"),
                clone_dir.into(),
                OsString::from("checkout-index"),
                OsString::from("--force"),
                OsString::from("--all"),
                OsString::from("--prefix"),
                prefix,
            ],
        )
    }
}
