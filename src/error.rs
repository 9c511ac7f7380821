use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No text provided")]
    EmptyInput,

    #[error("{program} command not found. Please install LanguageTool first.")]
    CheckerUnavailable { program: String },

    #[error("Error running LanguageTool ({}): {stderr}", describe_exit(.code))]
    CheckerExecution { code: Option<i32>, stderr: String },

    #[error("Failed to parse LanguageTool output: {0}")]
    CheckerProtocol(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read docx document: {0}")]
    Docx(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Docx(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Docx(err.to_string())
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
