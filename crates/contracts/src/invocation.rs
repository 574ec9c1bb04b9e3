//! External tool invocation descriptor.
//!
//! The orchestrator's whole protocol with a tool: a resolved program path and
//! a fixed argument vector. Stdout/stderr are inherited, never parsed.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::{Stage, Toolset};

/// One blocking external-process launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Stage this invocation implements
    pub stage: Stage,
    /// Toolset the executable belongs to
    pub toolset: Toolset,
    /// Program path resolved against the toolset's binary root
    pub program: PathBuf,
    /// Fixed argument vector
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    /// Create an invocation with an empty argument vector
    pub fn new(stage: Stage, program: PathBuf) -> Self {
        Self {
            stage,
            toolset: stage.toolset(),
            program,
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Lossy single-line rendering for logs and reports
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Whether any argument equals `needle` (exact match)
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }

    /// Value following the first occurrence of `flag`, if any
    pub fn arg_after(&self, flag: &str) -> Option<&OsString> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
    }
}
