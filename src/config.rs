use crate::checker::engine::DEFAULT_PROGRAM;
use crate::cli::output::OutputFormat;

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Run settings. There is no configuration file: values come from the
/// defaults, then the environment, then command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub language: String,
    pub engine: String,
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            engine: DEFAULT_PROGRAM.to_string(),
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Config {
    /// Apply overrides on top of the defaults. `None` keeps the default.
    pub fn load(
        language: Option<String>,
        engine: Option<String>,
        format: Option<OutputFormat>,
        no_color: bool,
    ) -> Self {
        let mut config = Self::default();

        if let Some(language) = language.filter(|l| !l.trim().is_empty()) {
            config.language = language;
        }
        if let Some(engine) = engine.filter(|e| !e.trim().is_empty()) {
            config.engine = engine;
        }
        if let Some(format) = format {
            config.format = format;
        }
        // https://no-color.org
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        config.color = !(no_color || no_color_env);

        config
    }
}
