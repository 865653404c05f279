//! Post-processing of combined output
//!
//! Minification is left to external programs. A `Transform` receives the
//! fully stitched buffer of one seed and returns what gets written.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use crate::config::MinifierConfig;
use crate::error::{Error, Result};
use crate::seed::SeedType;

/// Turns stitched content into final output
pub trait Transform {
    fn transform(&self, content: Vec<u8>, kind: SeedType) -> Result<Vec<u8>>;
}

/// Writes content unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Transform for Passthrough {
    fn transform(&self, content: Vec<u8>, _kind: SeedType) -> Result<Vec<u8>> {
        Ok(content)
    }
}

/// Pipes content through an external program's stdin and keeps its stdout.
///
/// Seed types without a configured command pass through unchanged.
#[derive(Debug, Clone, Default)]
pub struct ExternalCommand {
    commands: MinifierConfig,
}

impl ExternalCommand {
    pub fn new(commands: MinifierConfig) -> Self {
        Self { commands }
    }
}

impl Transform for ExternalCommand {
    fn transform(&self, content: Vec<u8>, kind: SeedType) -> Result<Vec<u8>> {
        match self.commands.command_for(kind) {
            Some(argv) => run(argv, content),
            None => Ok(content),
        }
    }
}

fn run(argv: &[String], content: Vec<u8>) -> Result<Vec<u8>> {
    let command = argv.join(" ");
    let failed = |message: String| Error::Transform {
        command: command.clone(),
        message,
    };

    let (program, args) = argv
        .split_first()
        .ok_or_else(|| failed("empty command".to_string()))?;
    debug!("Running {}", command);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| failed(e.to_string()))?;

    // Feed stdin from another thread so a full stdout pipe cannot deadlock us
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| failed("stdin unavailable".to_string()))?;
    let writer = thread::spawn(move || stdin.write_all(&content));

    let output = child.wait_with_output().map_err(|e| failed(e.to_string()))?;
    let written = writer
        .join()
        .map_err(|_| failed("stdin writer panicked".to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(failed(format!("{}: {}", output.status, stderr.trim())));
    }
    written.map_err(|e| failed(e.to_string()))?;

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Option<Vec<String>> {
        Some(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_passthrough() {
        let out = Passthrough
            .transform(b"var a;".to_vec(), SeedType::Script)
            .unwrap();
        assert_eq!(out, b"var a;");
    }

    #[test]
    fn test_unconfigured_type_passes_through() {
        let transform = ExternalCommand::new(MinifierConfig {
            script: argv(&["false"]),
            stylesheet: None,
        });
        let out = transform
            .transform(b".a{}".to_vec(), SeedType::Stylesheet)
            .unwrap();
        assert_eq!(out, b".a{}");
    }

    #[cfg(unix)]
    #[test]
    fn test_pipes_through_command() {
        let transform = ExternalCommand::new(MinifierConfig {
            script: argv(&["tr", "a-z", "A-Z"]),
            stylesheet: None,
        });
        let out = transform
            .transform(b"var a;\n".to_vec(), SeedType::Script)
            .unwrap();
        assert_eq!(out, b"VAR A;\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_large_input_does_not_deadlock() {
        let transform = ExternalCommand::new(MinifierConfig {
            script: None,
            stylesheet: argv(&["cat"]),
        });
        let content = vec![b'x'; 4 * 1024 * 1024];
        let out = transform
            .transform(content.clone(), SeedType::Stylesheet)
            .unwrap();
        assert_eq!(out, content);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command() {
        let transform = ExternalCommand::new(MinifierConfig {
            script: argv(&["sh", "-c", "cat >/dev/null; echo broken >&2; exit 3"]),
            stylesheet: None,
        });
        let err = transform
            .transform(b"x".to_vec(), SeedType::Script)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Transform command"));
        assert!(message.contains("broken"));
    }

    #[test]
    fn test_missing_program() {
        let transform = ExternalCommand::new(MinifierConfig {
            script: argv(&["ycombo-no-such-minifier"]),
            stylesheet: None,
        });
        let err = transform
            .transform(b"x".to_vec(), SeedType::Script)
            .unwrap_err();
        assert!(matches!(err, Error::Transform { .. }));
    }
}
