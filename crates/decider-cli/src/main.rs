//! `decider` CLI — convert between JSON and TOON, and test paths against
//! scope globs.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to indented TOON (stdin → stdout)
//! echo '{"id":"ADR-0001","tags":["db","api"]}' | decider encode
//!
//! # Compact TOON from file to file
//! decider encode --compact -i adr.json -o adr.toon
//!
//! # Decode TOON back to pretty-printed JSON
//! decider decode -i adr.toon
//!
//! # Print the changed paths covered by an ADR's scope
//! git diff --name-only | decider match -p 'src/**/*.go' -p '*.md'
//!
//! # Show which patterns matched each path
//! decider explain -p 'src/**' -p '**/*.go' src/main.go docs/guide.md
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use decider_glob::GlobPattern;
use decider_toon::{Indent, Value};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process;

#[derive(Parser)]
#[command(
    name = "decider",
    version,
    about = "TOON encoding and scope glob matching for ADR tooling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to TOON format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit single-line TOON instead of the indented layout
        #[arg(long)]
        compact: bool,
    },
    /// Decode TOON back to JSON format
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit single-line JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the paths matched by any pattern; exits 1 if none matched
    Match {
        /// Glob pattern (repeatable)
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,
        /// Paths to test (reads one per line from stdin if omitted)
        paths: Vec<String>,
    },
    /// Map each matched path to the patterns that matched it
    Explain {
        /// Glob pattern (repeatable)
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,
        /// Paths to test (reads one per line from stdin if omitted)
        paths: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Toon)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toon,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            compact,
        } => {
            let json = read_input(input.as_deref())?;
            let parsed: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse JSON input")?;
            let indent = (!compact).then(Indent::default);
            let writer = open_output(output.as_deref())?;
            decider_toon::to_writer(writer, &Value::from(parsed), indent.as_ref())
                .context("Failed to encode JSON to TOON")?;
        }
        Commands::Decode {
            input,
            output,
            compact,
        } => {
            let toon = read_input(input.as_deref())?;
            let value = decider_toon::decode(&toon).context("Failed to decode TOON")?;
            let json = serde_json::Value::try_from(value)
                .context("Failed to convert TOON to JSON")?;
            let text = if compact {
                serde_json::to_string(&json)?
            } else {
                serde_json::to_string_pretty(&json)?
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Match { patterns, paths } => {
            warn_invalid(&patterns);
            let paths = paths_or_stdin(paths)?;
            let matched = decider_glob::filter(&patterns, &paths);
            if matched.is_empty() {
                process::exit(1);
            }
            let mut out = io::stdout().lock();
            for path in &matched {
                writeln!(out, "{path}").context("Failed to write to stdout")?;
            }
        }
        Commands::Explain {
            patterns,
            paths,
            format,
        } => {
            warn_invalid(&patterns);
            let paths = paths_or_stdin(paths)?;
            let report = explain(&patterns, &paths);
            let text = match format {
                Format::Toon => decider_toon::encode(&report, Some(&Indent::default()))
                    .context("Failed to encode report")?,
                Format::Json => serde_json::to_string_pretty(&report)?,
            };
            write_output(None, &text)?;
        }
    }

    Ok(())
}

/// Build `{path: [pattern, ...]}` for every path at least one pattern matched.
fn explain(patterns: &[String], paths: &[String]) -> Value {
    paths
        .iter()
        .filter_map(|path| {
            let hits = decider_glob::matching_patterns(patterns, path);
            (!hits.is_empty()).then(|| {
                let hits: Vec<Value> = hits.into_iter().map(Value::from).collect();
                (path.as_str(), hits)
            })
        })
        .collect()
}

/// Malformed patterns match nothing; say so instead of failing silently.
fn warn_invalid(patterns: &[String]) {
    for pattern in patterns {
        if let Err(e) = GlobPattern::new(pattern) {
            eprintln!("warning: pattern '{pattern}' matches nothing: {e}");
        }
    }
}

fn paths_or_stdin(paths: Vec<String>) -> Result<Vec<String>> {
    if !paths.is_empty() {
        return Ok(paths);
    }
    let input = read_input(None)?;
    Ok(input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create file: {}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    let mut writer = open_output(path)?;
    writeln!(writer, "{}", content).context("Failed to write output")?;
    writer.flush().context("Failed to write output")?;
    Ok(())
}
