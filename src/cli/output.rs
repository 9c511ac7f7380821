use crate::cli::table::{self, Column, Table};
use crate::{Finding, Report};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

pub const TITLE: &str = "LanguageTool Report";
pub const NO_SUGGESTIONS: &str = "No suggestions";
/// Issue type LanguageTool uses for whitespace-only problems.
pub const WHITESPACE_ISSUE: &str = "whitespace";
/// At most this many replacements are listed per finding.
pub const MAX_CORRECTIONS: usize = 3;
const MESSAGE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    matches: &'a [Finding],
}

pub fn print_report(report: &Report, format: &OutputFormat, colored_output: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format, colored_output)?;
    out.flush()
}

/// A reader that went away (`ltpretty check ... | head`) is not a failure.
pub fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn write_report(
    out: &mut impl Write,
    report: &Report,
    format: &OutputFormat,
    colored_output: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render(out, report, colored_output),
        OutputFormat::Json => render_json(out, report),
    }
}

/// Banner, issue count and one table row per finding, in report order.
pub fn render(out: &mut impl Write, report: &Report, colored: bool) -> io::Result<()> {
    let title = paint(TITLE, colored, |s| s.cyan().bold());
    table::write_panel(out, &title, |s| paint(s, colored, |s| s.cyan()))?;

    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        paint("Total issues found:", colored, |s| s.bold()),
        report.total()
    )?;
    if let Some(language) = &report.language {
        writeln!(out, "{} {}", paint("Language:", colored, |s| s.bold()), language)?;
    }
    writeln!(out)?;

    if report.findings.is_empty() {
        return writeln!(out, "{}", paint("✓ No issues found!", colored, |s| s.green().bold()));
    }

    let mut issues = issues_table(colored);
    for finding in &report.findings {
        issues.add_row(vec![
            position_label(finding),
            finding.rule.issue_type.clone(),
            table::wrap(&finding.message, MESSAGE_WIDTH),
            format_context(finding, colored),
            format_correction(finding, colored),
        ]);
    }
    issues.write_to(out)
}

fn issues_table(colored: bool) -> Table {
    let styled = |header: &str, style: fn(&str) -> ColoredString| {
        let column = Column::new(header);
        if colored {
            column.style(move |s| style(s).to_string())
        } else {
            column
        }
    };

    let table = Table::new(vec![
        styled("Line:Col", |s| s.dimmed()),
        styled("Type", |s| s.cyan()),
        styled("Message", |s| s.yellow()),
        Column::new("Context"),
        Column::new("Correction"),
    ]);

    if colored {
        table.header_style(|s| s.magenta().bold().to_string())
    } else {
        table
    }
}

pub fn render_json(out: &mut impl Write, report: &Report) -> io::Result<()> {
    let output = JsonOutput {
        total: report.total(),
        language: report.language.as_deref(),
        matches: &report.findings,
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)
}

/// `line:column`, with `?` for whichever part is unknown.
pub fn position_label(finding: &Finding) -> String {
    let part = |value: Option<usize>| value.map_or_else(|| "?".to_string(), |v| v.to_string());
    format!("{}:{}", part(finding.line), part(finding.column))
}

/// Context window with the offending span highlighted.
pub fn format_context(finding: &Finding, colored: bool) -> String {
    let (before, bad, after) = finding.context.split();
    if colored {
        format!("{}{}{}", before, bad.red().underline(), after)
    } else {
        format!("{}[{}]{}", before, bad, after)
    }
}

/// Suggested fixes as `bad → correction`, one per line with the arrows
/// aligned. Whitespace issues get a fixed instruction instead.
pub fn format_correction(finding: &Finding, colored: bool) -> String {
    if finding.rule.issue_type == WHITESPACE_ISSUE {
        return format!("remove {} whitespaces", finding.context.length);
    }

    let mut corrections = finding
        .replacements
        .iter()
        .take(MAX_CORRECTIONS)
        .map(|r| paint(&r.value, colored, |s| s.green()));

    let first = match corrections.next() {
        Some(first) => first,
        None => return paint(NO_SUGGESTIONS, colored, |s| s.dimmed()),
    };

    let bad = finding.bad_text();
    let padding = " ".repeat(console::measure_text_width(&bad) + 1);
    let mut text = format!("{} → {}", paint(&bad, colored, |s| s.red()), first);
    for correction in corrections {
        text.push_str(&format!("\n{}→ {}", padding, correction));
    }
    text
}

pub fn stdin_prompt() -> String {
    "Reading from stdin (Ctrl+D to finish)...".yellow().to_string()
}

/// Spinner shown on stderr while the engine runs. Hidden when stderr is not a
/// terminal.
pub fn working_spinner(input_name: &str, language: &str) -> ProgressBar {
    let pb = if console::Term::stderr().is_term() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!(
        "{} {} ({})...",
        "LanguageTool is working on".green().bold(),
        input_name.green().bold().underline(),
        language
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_error(message: &dyn fmt::Display, colored: bool) {
    eprintln!("{} {}", paint("Error:", colored, |s| s.red().bold()), message);
}

fn paint(text: &str, colored: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if colored {
        style(text).to_string()
    } else {
        text.to_string()
    }
}
