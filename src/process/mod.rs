//! External tool invocation.
//!
//! Every substantive computation is delegated to external command-line tools
//! (PMD CPD, radon, git). Invocations are synchronous and sequential with no
//! timeout and no retry; failure is detected only by exit code against a
//! per-tool allow-list, logged, and the captured output is still handed to
//! the caller.

use std::process::Command;

use crate::core::{Error, Result};

/// A single external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    program: String,
    args: Vec<String>,
    /// Exit codes treated as success. CPD exits 4 when duplicates are found.
    expected_codes: Vec<i32>,
}

/// Captured result of a tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Whether the exit code was on the allow-list.
    pub expected: bool,
}

impl ToolInvocation {
    /// Create an invocation expecting exit code 0.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            expected_codes: vec![0],
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the set of exit codes treated as success.
    pub fn expect_codes(mut self, codes: &[i32]) -> Self {
        self.expected_codes = codes.to_vec();
        self
    }

    /// Run the tool, capturing stdout.
    ///
    /// A spawn failure (binary missing, permissions) is an error. A run that
    /// exits off the allow-list is logged at warn level and returned anyway;
    /// downstream steps run against whatever output was produced.
    pub fn run(&self) -> Result<ToolOutput> {
        tracing::debug!("running {} {}", self.program, self.args.join(" "));

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| Error::tool(&self.program, format!("failed to launch: {e}")))?;

        let code = output.status.code();
        let expected = code.is_some_and(|c| self.expected_codes.contains(&c));

        if !expected {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                "{} exited with {:?} (expected one of {:?}): {}",
                self.program,
                code,
                self.expected_codes,
                stderr.trim()
            );
        }

        Ok(ToolOutput {
            code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let out = ToolInvocation::new("echo").arg("hello").run().unwrap();
        assert_eq!(out.code, Some(0));
        assert!(out.expected);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_missing_binary_is_error() {
        let result = ToolInvocation::new("vitals-no-such-binary-xyz").run();
        assert!(matches!(result, Err(Error::Tool { .. })));
    }

    #[test]
    fn test_unexpected_exit_code_is_not_fatal() {
        let out = ToolInvocation::new("sh")
            .args(["-c", "echo partial; exit 3"])
            .run()
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert!(!out.expected);
        // Output is still available to downstream steps.
        assert_eq!(out.stdout.trim(), "partial");
    }

    #[test]
    fn test_expect_codes_allow_list() {
        let out = ToolInvocation::new("sh")
            .args(["-c", "exit 4"])
            .expect_codes(&[0, 4])
            .run()
            .unwrap();
        assert!(out.expected);
    }
}
