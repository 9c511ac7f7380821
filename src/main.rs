use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ltpretty::cli::output::{self, OutputFormat};
use ltpretty::config::DEFAULT_LANGUAGE;
use ltpretty::input::{self, InputSource};
use ltpretty::{Config, Error, LanguageChecker};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ltpretty")]
#[command(version, about = "Pretty, colorized LanguageTool reports", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check text with LanguageTool and display the results
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Language code (e.g., en-US, de-DE, fr). Use a regional variant like
    /// en-GB to enable spell checking
    #[arg(short, long, env = "LTPRETTY_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Text to check
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// File to check: plain text, or a .docx document
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// List the languages LanguageTool supports and exit
    #[arg(long)]
    list: bool,

    /// LanguageTool executable
    #[arg(long, env = "LTPRETTY_ENGINE", value_name = "PROGRAM")]
    engine: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "ltpretty", &mut io::stdout());
        return;
    }

    let Some(Commands::Check(args)) = cli.command else {
        return;
    };

    let config = Config::load(
        Some(args.language.clone()),
        args.engine.clone(),
        Some(args.format),
        args.no_color,
    );
    if !config.color {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(err) = run_check(args, &config) {
        output::print_error(&format!("{:#}", err), config.color);
        process::exit(1);
    }
}

fn run_check(args: CheckArgs, config: &Config) -> Result<()> {
    let checker = LanguageChecker::new(config.engine.clone());

    if args.list {
        let languages = checker.list_languages()?;
        let mut stdout = io::stdout().lock();
        output::ignore_broken_pipe(
            stdout
                .write_all(languages.as_bytes())
                .and_then(|_| stdout.flush()),
        )?;
        return Ok(());
    }

    let file_name = args.file.as_ref().map(|p| p.display().to_string());
    let source = InputSource::from_args(args.text, args.file);
    if matches!(source, InputSource::Stdin) {
        eprintln!("{}", output::stdin_prompt());
    }
    let input = input::resolve(source).map_err(|err| {
        let unreadable = matches!(err, Error::Io(_) | Error::Docx(_));
        match file_name {
            Some(name) if unreadable => {
                anyhow::Error::new(err).context(format!("Failed to read file: {}", name))
            }
            _ => anyhow::Error::new(err),
        }
    })?;

    let spinner = output::working_spinner(&input.name, &config.language);
    let result = checker.check(&input.text, &config.language);
    spinner.finish_and_clear();

    let report = result?;
    output::ignore_broken_pipe(output::print_report(&report, &config.format, config.color))?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ltpretty=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
