pub mod docx;

use crate::{Error, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Docx,
    PlainText,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "docx" => FileType::Docx,
            _ => FileType::PlainText,
        }
    }
}

/// Where the text to check comes from, in priority order.
#[derive(Debug, Clone)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => InputSource::Text(text),
            (None, Some(path)) => InputSource::File(path),
            (None, None) => InputSource::Stdin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub text: String,
    /// Human-readable name of the source, for status messages.
    pub name: String,
}

pub fn resolve(source: InputSource) -> Result<ResolvedInput> {
    resolve_with_stdin(source, std::io::stdin().lock())
}

pub fn resolve_with_stdin(source: InputSource, mut stdin: impl Read) -> Result<ResolvedInput> {
    let resolved = match source {
        InputSource::Text(text) => ResolvedInput {
            text,
            name: "the text".to_string(),
        },
        InputSource::File(path) => ResolvedInput {
            text: read_file(&path)?,
            name: path.display().to_string(),
        },
        InputSource::Stdin => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            ResolvedInput {
                text,
                name: "stdin text".to_string(),
            }
        }
    };

    if resolved.text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    debug!(source = %resolved.name, chars = resolved.text.chars().count(), "resolved input");
    Ok(resolved)
}

/// Read a file as text, extracting paragraphs from docx documents.
pub fn read_file(path: &Path) -> Result<String> {
    match FileType::from_path(path) {
        FileType::Docx => docx::extract_text(path),
        FileType::PlainText => Ok(fs::read_to_string(path)?),
    }
}
