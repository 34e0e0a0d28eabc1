#![deny(clippy::expect_used)]
//! logfix command-line interface
//!
//! Usage:
//!   logfix fix Program.cs --at 12:36:CA2254 --at 20:9:CA2253
//!   logfix fix Program.cs --diagnostics analyzer.json --in-place
//!   logfix actions Program.cs --at 12:36:CA2254
//!   logfix normalize "ex?.GetType()" _logger

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use logfix::logging::{init_logging, LogFormat, LogLevel, LogSettings};
use logfix::{
    normalize, CodeAction, Diagnostic, DiagnosticSpec, Document, FixError, FixOptions, FixResult,
    LoggingFixProvider, Patch,
};

#[derive(Parser)]
#[command(
    name = "logfix",
    about = "Rewrite logging calls into structured message templates",
    version
)]
struct Cli {
    /// Log level: error, warn, info, debug or trace
    #[arg(long = "log-level", global = true)]
    log_level: Option<LogLevel>,
    /// Log format: auto, text or json
    #[arg(long = "log-format", global = true)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fix the diagnosed call sites in a file
    Fix {
        file: PathBuf,
        /// Diagnostic location as LINE:COL:RULE
        #[arg(long = "at")]
        at: Vec<String>,
        /// JSON list of diagnostics
        #[arg(long)]
        diagnostics: Option<PathBuf>,
        /// Options file (defaults to logfix.toml beside FILE)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the result back to FILE
        #[arg(long = "in-place")]
        in_place: bool,
        /// Print a JSON report instead of the document
        #[arg(long)]
        json: bool,
    },
    /// List the code actions available at each location
    Actions {
        file: PathBuf,
        #[arg(long = "at", required = true)]
        at: Vec<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the placeholder name derived from each input
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = LogSettings {
        format: cli.log_format,
        level: cli.log_level,
    };
    init_logging(settings.merged_with_env());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> FixResult<()> {
    match command {
        Command::Fix {
            file,
            at,
            diagnostics,
            config,
            in_place,
            json,
        } => {
            let provider = LoggingFixProvider::new(load_options(&file, config.as_deref())?);
            let document = read_document(&file)?;
            let specs = collect_specs(&at, diagnostics.as_deref())?;
            let resolved = resolve_all(&document, &specs)?;
            let outcome = provider.fix_all(&document, &resolved);

            if json {
                print_json(&outcome)?;
            } else if !in_place {
                print!("{}", outcome.text);
            }
            if in_place && outcome.changed() {
                fs::write(&file, &outcome.text).map_err(|e| FixError::io(&file, e))?;
            }
            Ok(())
        }
        Command::Actions { file, at, config } => {
            let provider = LoggingFixProvider::new(load_options(&file, config.as_deref())?);
            let document = read_document(&file)?;
            let specs = collect_specs(&at, None)?;
            let oracle = provider.oracle_for(&document);

            let mut listed = Vec::new();
            for diagnostic in resolve_all(&document, &specs)? {
                let (line, column) = document.line_col(diagnostic.offset);
                let fix = provider.register_fixes_with(&document, &diagnostic, &oracle);
                listed.push(ActionListing {
                    line,
                    column,
                    rule: diagnostic.rule.code(),
                    action: fix.as_ref().map(|f| f.action),
                    patch: fix.map(|f| f.patch),
                });
            }
            print_json(&listed)
        }
        Command::Normalize { names } => {
            for name in names {
                println!("{}", normalize(&name)?);
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ActionListing {
    line: usize,
    column: usize,
    rule: &'static str,
    action: Option<CodeAction>,
    patch: Option<Patch>,
}

fn load_options(file: &Path, config: Option<&Path>) -> FixResult<FixOptions> {
    let options = match config {
        Some(path) => FixOptions::load(path)?,
        None => {
            let dir = file.parent().unwrap_or_else(|| Path::new("."));
            FixOptions::discover(dir)?
        }
    };
    Ok(options)
}

fn read_document(file: &Path) -> FixResult<Document> {
    let source = fs::read_to_string(file).map_err(|e| FixError::io(file, e))?;
    let document = Document::parse(source);
    for error in document.parse_errors() {
        debug!(file = %file.display(), "recovered from parse error\n{}", error.render(document.source()));
    }
    Ok(document)
}

fn collect_specs(at: &[String], diagnostics: Option<&Path>) -> FixResult<Vec<DiagnosticSpec>> {
    let mut specs = at
        .iter()
        .map(|location| DiagnosticSpec::parse_location(location))
        .collect::<FixResult<Vec<_>>>()?;
    if let Some(path) = diagnostics {
        let text = fs::read_to_string(path).map_err(|e| FixError::io(path, e))?;
        specs.extend(DiagnosticSpec::parse_json_list(&text)?);
    }
    Ok(specs)
}

fn resolve_all(document: &Document, specs: &[DiagnosticSpec]) -> FixResult<Vec<Diagnostic>> {
    specs.iter().map(|spec| spec.resolve(document)).collect()
}

fn print_json<T: Serialize>(value: &T) -> FixResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
