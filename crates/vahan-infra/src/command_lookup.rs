//! Registry lookup through an external command.
//!
//! The command receives the registration candidate as its last argument and
//! reports the status on stdout, either as a bare token
//! (`AVAILABLE`, `NOT_AVAILABLE`, `UNKNOWN`) on its last non-empty line or as
//! a JSON object such as `{"status": "NOT_AVAILABLE"}`, either on a line of
//! its own or as the whole output. How the command talks
//! to the registry (browser automation or otherwise) is its own business.

use std::process::Command;

use serde::Deserialize;
use tracing::{debug, trace};
use vahan_domain::repository::RegistryLookup;
use vahan_types::{LookupError, RegistrationStatus};

#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
}

#[derive(Debug, Clone)]
pub struct CommandLookup {
    program: String,
    args: Vec<String>,
}

impl CommandLookup {
    /// Split a shell-style command line into program and arguments
    pub fn from_command_line(command_line: &str) -> Result<Self, LookupError> {
        if command_line.trim().is_empty() {
            return Err(LookupError::NotConfigured);
        }

        let mut parts = shell_words::split(command_line)
            .map_err(|e| LookupError::InvalidCommand(format!("{}: {}", command_line, e)))?;
        if parts.is_empty() {
            return Err(LookupError::NotConfigured);
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl RegistryLookup for CommandLookup {
    fn lookup(&self, candidate: &str) -> Result<RegistrationStatus, LookupError> {
        debug!(program = %self.program, args = ?self.args, candidate, "running lookup command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(candidate)
            .output()?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| format!("status {}", c))
                .unwrap_or_else(|| "a signal".to_string());
            return Err(LookupError::CommandFailed {
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(candidate, stdout = %stdout.trim(), "lookup command output");
        parse_lookup_output(&stdout)
    }
}

/// Find the status reply in command output.
///
/// A reply spanning the whole output (pretty-printed) wins; otherwise lines are
/// scanned from the last one back and the first object with a `status` field
/// is taken, so log lines or progress events printed earlier are skipped.
fn find_response(stdout: &str) -> Option<LookupResponse> {
    if let Ok(response) = serde_json::from_str::<LookupResponse>(stdout.trim()) {
        return Some(response);
    }
    stdout
        .lines()
        .rev()
        .filter_map(braced)
        .find_map(|json| serde_json::from_str::<LookupResponse>(json).ok())
}

/// Outermost `{...}` span of a single line
fn braced(line: &str) -> Option<&str> {
    let start = line.find('{')?;
    let end = line.rfind('}')?;
    (end > start).then(|| &line[start..=end])
}

/// Interpret lookup command stdout
pub fn parse_lookup_output(stdout: &str) -> Result<RegistrationStatus, LookupError> {
    if let Some(response) = find_response(stdout) {
        return response
            .status
            .parse()
            .map_err(|_| LookupError::UnrecognizedOutput(response.status.clone()));
    }

    let last_line = stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .ok_or_else(|| LookupError::UnrecognizedOutput("(empty output)".to_string()))?;

    last_line
        .parse()
        .map_err(|_| LookupError::UnrecognizedOutput(last_line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_token() {
        assert_eq!(
            parse_lookup_output("AVAILABLE\n").unwrap(),
            RegistrationStatus::Available
        );
        assert_eq!(
            parse_lookup_output("opening page...\nsubmitting\nNOT_AVAILABLE\n\n").unwrap(),
            RegistrationStatus::NotAvailable
        );
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(
            parse_lookup_output("log line\n{\"status\": \"UNKNOWN\", \"elapsed_ms\": 812}\n").unwrap(),
            RegistrationStatus::Unknown
        );
    }

    #[test]
    fn test_parse_json_after_braced_log_line() {
        assert_eq!(
            parse_lookup_output("loading {homepanel}\n{\"status\": \"AVAILABLE\"}\n").unwrap(),
            RegistrationStatus::Available
        );
    }

    #[test]
    fn test_parse_json_after_progress_event() {
        assert_eq!(
            parse_lookup_output("{\"event\": \"start\"}\n{\"status\": \"NOT_AVAILABLE\"}\n")
                .unwrap(),
            RegistrationStatus::NotAvailable
        );
    }

    #[test]
    fn test_parse_pretty_printed_json() {
        assert_eq!(
            parse_lookup_output("{\n  \"status\": \"UNKNOWN\"\n}\n").unwrap(),
            RegistrationStatus::Unknown
        );
    }

    #[test]
    fn test_parse_json_with_bad_status() {
        let err = parse_lookup_output("{\"status\": \"MAYBE\"}").unwrap_err();
        assert!(matches!(err, LookupError::UnrecognizedOutput(s) if s == "MAYBE"));
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(matches!(
            parse_lookup_output("  \n\n"),
            Err(LookupError::UnrecognizedOutput(_))
        ));
    }

    #[test]
    fn test_parse_unrecognized_token() {
        assert!(matches!(
            parse_lookup_output("Could not be found"),
            Err(LookupError::UnrecognizedOutput(_))
        ));
    }

    #[test]
    fn test_command_line_split() {
        let lookup =
            CommandLookup::from_command_line("node scripts/check.js --headless 'new'").unwrap();
        assert_eq!(lookup.program(), "node");
        assert_eq!(lookup.args(), &["scripts/check.js", "--headless", "new"]);
    }

    #[test]
    fn test_command_line_empty() {
        assert!(matches!(
            CommandLookup::from_command_line("   "),
            Err(LookupError::NotConfigured)
        ));
    }

    #[test]
    fn test_command_line_unbalanced_quote() {
        assert!(matches!(
            CommandLookup::from_command_line("node 'check.js"),
            Err(LookupError::InvalidCommand(_))
        ));
    }
}
