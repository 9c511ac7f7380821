use crate::{Error, Result};
use std::io::{self, ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

pub const DEFAULT_PROGRAM: &str = "languagetool";

/// Captured result of one engine invocation.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// The external checking engine, seen only through its text-in/JSON-out
/// contract.
pub trait Engine {
    /// Check `text` in `language`, requesting JSON output.
    fn check(&self, text: &str, language: &str) -> Result<EngineOutput>;

    /// Ask the engine for the languages it supports.
    fn list_languages(&self) -> Result<EngineOutput>;
}

/// Runs the LanguageTool command line as a child process.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: String,
}

impl ProcessEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str], input: Option<&str>) -> Result<EngineOutput> {
        debug!(program = %self.program, ?args, "spawning engine");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Feed stdin from its own thread so an engine that writes a lot
        // before it finishes reading cannot block on a full pipe.
        let writer = match (input, child.stdin.take()) {
            (Some(text), Some(mut stdin)) => {
                let text = text.to_owned();
                Some(thread::spawn(move || match stdin.write_all(text.as_bytes()) {
                    // An engine that exits without reading its input is
                    // reported through its exit status instead.
                    Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
                    _ => Ok(()),
                }))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::new(ErrorKind::Other, "stdin writer panicked"))??;
        }
        debug!(status = %output.status, stdout_bytes = output.stdout.len(), "engine finished");

        Ok(EngineOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_error(&self, err: io::Error) -> Error {
        match err.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::CheckerUnavailable {
                program: self.program.clone(),
            },
            _ => Error::Io(err),
        }
    }
}

impl Default for ProcessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Engine for ProcessEngine {
    fn check(&self, text: &str, language: &str) -> Result<EngineOutput> {
        self.run(&["-l", language, "--json"], Some(text))
    }

    fn list_languages(&self) -> Result<EngineOutput> {
        self.run(&["--list"], None)
    }
}
