use crate::error::{Error, Result};

use log::debug;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Placeholder replaced with the output path in formatter arguments.
pub const FILE_PLACEHOLDER: &str = "{file}";

pub trait Formatter {
    fn format(&self, source: String, path: &Path) -> Result<String>;
}

/// Leaves the rendered source untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unformatted;

impl Formatter for Unformatted {
    fn format(&self, source: String, _path: &Path) -> Result<String> {
        Ok(source)
    }
}

/// Pipes the source through an external command, e.g. `prettier --stdin-filepath {file}`.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Format {
            command: self.command_line(),
            message: message.into(),
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: String, path: &Path) -> Result<String> {
        let file = path.to_string_lossy();
        let args: Vec<_> = self
            .args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
            .collect();
        debug!("formatting with `{} {}`", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.error(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.error("stdin unavailable"))?;
        // fed from another thread so a full stdout pipe cannot block the write
        let feeder = std::thread::spawn(move || stdin.write_all(source.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| self.error(e.to_string()))?;
        let fed = feeder
            .join()
            .map_err(|_| self.error("stdin writer panicked"))?;

        if !output.status.success() {
            return Err(self.error(format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        fed.map_err(|e| self.error(e.to_string()))?;
        String::from_utf8(output.stdout).map_err(|e| self.error(e.to_string()))
    }
}
