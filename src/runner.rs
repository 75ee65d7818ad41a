//! # Build Execution Driver
//!
//! This module turns a frozen [`ExecutionPlan`](crate::plan::ExecutionPlan)
//! into the two external invocations: the generate step (`cmake`) followed by
//! the build step (`make` or equivalent). The build step is never attempted
//! when the generate step fails.
//!
//! The process-wide working directory is shared mutable state, so it is only
//! touched through an explicit [`DirStack`] with paired push/pop operations:
//! the driver pushes into the build directory, runs both steps, and pops back
//! to the prior directory even when a step fails.
//!
//! The environment passes through to the children unchanged, except that a
//! `MAKEFLAGS=-jN` parallelism hint is injected for the build step when the
//! caller has not already set one. Option flag ordering follows the plan's
//! options map; callers must not depend on a particular flag order, only on
//! the final merged value per key.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

use crate::error::{Error, Phase, Result};
use crate::plan::ExecutionPlan;

/// Environment variable carrying the parallelism hint for the build tool.
pub const PARALLELISM_ENV: &str = "MAKEFLAGS";

/// An explicit push/pop stack over the process working directory.
///
/// `pushd` records the current directory and changes into the target;
/// `popd` restores the most recently recorded directory. Paths are
/// canonicalized on entry, mirroring shell `pushd` behavior.
#[derive(Debug, Default)]
pub struct DirStack {
    stack: Vec<PathBuf>,
}

impl DirStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Change into `dir`, remembering the current directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the current directory cannot be determined or
    /// `dir` cannot be entered.
    pub fn pushd(&mut self, dir: &Path) -> Result<()> {
        let previous = env::current_dir()?;
        let target = fs::canonicalize(dir)?;
        env::set_current_dir(&target)?;
        self.stack.push(previous);
        Ok(())
    }

    /// Return to the directory recorded by the matching `pushd`.
    ///
    /// Popping an empty stack is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the prior directory cannot be re-entered.
    pub fn popd(&mut self) -> Result<()> {
        if let Some(previous) = self.stack.pop() {
            env::set_current_dir(previous)?;
        }
        Ok(())
    }

    /// Number of directories currently pushed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Run the generate and build steps for the given plan.
///
/// Creates the build directory if needed (idempotent), enters it for the
/// duration of both invocations, and restores the prior working directory
/// afterwards even on failure.
///
/// # Errors
///
/// Returns `Error::BuildTool` with the failing phase and exit status when
/// either invocation exits non-zero, and `Error::Io` for directory or spawn
/// failures.
pub fn execute(plan: &ExecutionPlan) -> Result<()> {
    fs::create_dir_all(&plan.build_directory)?;

    let mut dirs = DirStack::new();
    dirs.pushd(Path::new(&plan.build_directory))?;
    let outcome = run_steps(plan);
    dirs.popd()?;
    outcome
}

fn run_steps(plan: &ExecutionPlan) -> Result<()> {
    generate(plan)?;
    build(plan)
}

/// The generator invocation:
/// `<cmake-exe> [-G <generator>] -D<KEY>=<VALUE>... <source-directory>`.
fn generate(plan: &ExecutionPlan) -> Result<()> {
    let mut command = Command::new(&plan.cmake_exe);
    if let Some(generator) = &plan.generator {
        command.arg("-G").arg(generator);
    }
    for (key, value) in &plan.options {
        command.arg(format!("-D{}={}", key, value));
    }
    command.arg(&plan.source_directory);
    run(command, Phase::Generate)
}

/// The build invocation: `<build-command> <target>...`, with a parallelism
/// hint injected unless the caller already set one.
fn build(plan: &ExecutionPlan) -> Result<()> {
    let mut command = Command::new(&plan.build_command);
    command.args(&plan.cmake_target);
    if env::var_os(PARALLELISM_ENV).is_none() {
        command.env(PARALLELISM_ENV, format!("-j{}", parallelism()));
    }
    run(command, Phase::Build)
}

fn parallelism() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Echo the command line, spawn it with inherited stdio, and wait for it.
fn run(mut command: Command, phase: Phase) -> Result<()> {
    println!("{}", render(&command));
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::BuildTool {
            phase,
            status: status.code().unwrap_or(-1),
        })
    }
}

fn render(command: &Command) -> String {
    let mut line = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args().map(OsStr::to_string_lossy) {
        line.push(' ');
        line.push_str(&arg);
    }
    line
}
