pub mod engine;
pub mod offsets;

use crate::{Error, Finding, Report, Result};
use engine::{Engine, EngineOutput, ProcessEngine};
use offsets::build_offset_map;
use serde::Deserialize;
use tracing::{debug, warn};

/// The part of LanguageTool's JSON answer we rely on.
#[derive(Debug, Deserialize)]
struct EngineResponse {
    #[serde(default)]
    language: Option<EngineLanguage>,
    matches: Vec<Finding>,
}

#[derive(Debug, Deserialize)]
struct EngineLanguage {
    #[serde(default)]
    name: Option<String>,
}

pub struct LanguageChecker<E = ProcessEngine> {
    engine: E,
}

impl LanguageChecker<ProcessEngine> {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_engine(ProcessEngine::new(program))
    }
}

impl<E: Engine> LanguageChecker<E> {
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Run the engine over `text` and return its findings, each resolved to
    /// a line and column of `text` when its offset falls inside it.
    pub fn check(&self, text: &str, language: &str) -> Result<Report> {
        let offset_map = build_offset_map(text);
        debug!(offsets = offset_map.mapped_offsets(), "built offset map");

        let output = successful(self.engine.check(text, language)?)?;
        let response = parse_response(&output.stdout)?;
        debug!(matches = response.matches.len(), "parsed engine response");

        let mut findings = response.matches;
        for finding in &mut findings {
            match offset_map.get(finding.offset) {
                Some(pos) => {
                    finding.line = Some(pos.line);
                    finding.column = Some(pos.column);
                }
                None => warn!(offset = finding.offset, "finding offset outside the checked text"),
            }
        }

        Ok(Report {
            language: response.language.and_then(|l| l.name),
            findings,
        })
    }

    /// The engine's own language listing, unmodified.
    pub fn list_languages(&self) -> Result<String> {
        let output = successful(self.engine.list_languages()?)?;
        Ok(output.stdout)
    }
}

fn successful(output: EngineOutput) -> Result<EngineOutput> {
    if output.success {
        Ok(output)
    } else {
        Err(Error::CheckerExecution {
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        })
    }
}

fn parse_response(stdout: &str) -> Result<EngineResponse> {
    // LanguageTool may print status lines ahead of the JSON object
    let json = match stdout.find('{') {
        Some(start) => &stdout[start..],
        None => stdout,
    };
    Ok(serde_json::from_str(json)?)
}
