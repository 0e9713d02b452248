use crate::error::{InventoryError, Result};
use log::{debug, trace};
use std::process::{Command, Output};

/// Runs external tools and hands back their captured stdout.
///
/// Collectors only ever talk to this trait, so tests can swap in canned output.
pub trait CommandRunner {
    /// Run `program` with `args`, no shell involved.
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>>;

    /// Run a pipeline through `bash -c`.
    fn run_shell(&self, pipeline: &str) -> Result<Vec<u8>>;

    /// Split a command line on whitespace and run it.
    fn run_line(&self, command_line: &str) -> Result<Vec<u8>> {
        let mut words = command_line.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| InventoryError::InvalidInvocation(command_line.to_string()))?;
        let args: Vec<&str> = words.collect();
        self.run(program, &args)
    }
}

/// Spawns real processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        if program.trim().is_empty() {
            return Err(InventoryError::InvalidInvocation(program.to_string()));
        }
        let command = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
        debug!("running {}", command);

        let out = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| InventoryError::Spawn { command: command.clone(), source })?;
        checked(command, out)
    }

    fn run_shell(&self, pipeline: &str) -> Result<Vec<u8>> {
        if pipeline.trim().is_empty() {
            return Err(InventoryError::InvalidInvocation(pipeline.to_string()));
        }
        debug!("running bash -c {:?}", pipeline);

        let out = Command::new("bash")
            .args(["-c", pipeline])
            .output()
            .map_err(|source| InventoryError::Spawn { command: pipeline.to_string(), source })?;
        checked(pipeline.to_string(), out)
    }
}

fn checked(command: String, out: Output) -> Result<Vec<u8>> {
    if !out.status.success() {
        return Err(InventoryError::ExternalToolFailure {
            command,
            status: out.status.to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }
    trace!("{} produced {} bytes", command, out.stdout.len());
    Ok(out.stdout)
}

#[cfg(test)]
pub(crate) mod fake {
    use super::CommandRunner;
    use crate::error::{InventoryError, Result};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Canned responses keyed by the full command text.
    #[derive(Default)]
    pub struct FakeRunner {
        responses: HashMap<String, Vec<u8>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, command: &str, stdout: &str) -> Self {
            self.responses.insert(command.to_string(), stdout.as_bytes().to_vec());
            self
        }

        fn lookup(&self, command: String) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(command.clone());
            self.responses.get(&command).cloned().ok_or(InventoryError::ExternalToolFailure {
                command,
                status: "exit status: 1".into(),
                stderr: String::new(),
            })
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
            let mut command = program.to_string();
            for a in args {
                command.push(' ');
                command.push_str(a);
            }
            self.lookup(command)
        }

        fn run_shell(&self, pipeline: &str) -> Result<Vec<u8>> {
            self.lookup(pipeline.to_string())
        }
    }
}
