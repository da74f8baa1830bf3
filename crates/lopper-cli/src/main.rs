// SPDX-License-Identifier: MIT OR Apache-2.0
//! lopper CLI binary - keep, remove, replace and merge JSON by path

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use lopper_core::{Breadcrumb, Document};
use lopper_ops::{
    PathOptions, PropertyOptions, collect, get_value, keep, merge_into, merge_many, remove,
    replace, try_add_property,
};
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lopper")]
#[command(version, about, long_about = None)]
struct Args {
    /// Match path and property names case-sensitively
    #[arg(long, global = true)]
    case_sensitive: bool,

    /// Compact output instead of pretty-printed
    #[arg(short, long, global = true)]
    compact: bool,

    /// Indentation width for pretty output
    #[arg(long, global = true, default_value = "2")]
    indent: usize,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for lopper CLI
#[derive(Subcommand)]
enum Commands {
    /// Keep only the nodes addressed by a path
    Keep {
        /// Dotted path, e.g. `users.[].name` or `items.*.id`
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Drop the nodes addressed by a path
    Remove {
        /// Dotted path
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Substitute the nodes addressed by a path, or delete them
    Replace {
        /// Dotted path
        path: String,
        /// JSON literal written in place of every match (matches are deleted if omitted)
        #[arg(long = "with", value_name = "JSON")]
        with: Option<String>,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Deep merge JSON files, left to right
    Merge {
        /// JSON files to merge
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Deep merge a JSON file into every node addressed by a path
    MergeInto {
        /// Dotted path (empty merges at the root)
        path: String,
        /// JSON file to merge in
        joined: PathBuf,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Add a property to the addressed objects unless it already holds a value
    AddProperty {
        /// Path of the target objects (default: the root)
        #[arg(long, default_value = "")]
        at: String,
        /// Property name
        name: String,
        /// Property value as a JSON literal
        value: String,
        /// Leave existing null properties untouched
        #[arg(long)]
        keep_null: bool,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Print every match of a path, one compact value per line
    Query {
        /// Dotted path
        path: String,
        /// Prefix every match with its location
        #[arg(long)]
        paths: bool,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Print the first match of a path
    Get {
        /// Dotted path
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Format JSON (pretty-print or compact)
    Format {
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

impl Args {
    const fn path_options(&self) -> PathOptions {
        PathOptions::new().with_case_sensitive(self.case_sensitive)
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Keep { .. } => handle_keep(&args),
        Commands::Remove { .. } => handle_remove(&args),
        Commands::Replace { .. } => handle_replace(&args),
        Commands::Merge { .. } => handle_merge(&args),
        Commands::MergeInto { .. } => handle_merge_into(&args),
        Commands::AddProperty { .. } => handle_add_property(&args),
        Commands::Query { .. } => handle_query(&args),
        Commands::Get { .. } => handle_get(&args),
        Commands::Format { .. } => handle_format(&args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(error: &anyhow::Error) -> ! {
    eprintln!("Error: {error:#}");
    std::process::exit(1);
}

fn handle_keep(args: &Args) {
    if let Commands::Keep { path, input } = &args.command
        && let Err(e) = run_keep(args, path, input.as_deref())
    {
        fail(&e);
    }
}

fn handle_remove(args: &Args) {
    if let Commands::Remove { path, input } = &args.command
        && let Err(e) = run_remove(args, path, input.as_deref())
    {
        fail(&e);
    }
}

fn handle_replace(args: &Args) {
    if let Commands::Replace { path, with, input } = &args.command
        && let Err(e) = run_replace(args, path, with.as_deref(), input.as_deref())
    {
        fail(&e);
    }
}

fn handle_merge(args: &Args) {
    if let Commands::Merge { files } = &args.command
        && let Err(e) = run_merge(args, files)
    {
        fail(&e);
    }
}

fn handle_merge_into(args: &Args) {
    if let Commands::MergeInto {
        path,
        joined,
        input,
    } = &args.command
        && let Err(e) = run_merge_into(args, path, joined, input.as_deref())
    {
        fail(&e);
    }
}

fn handle_add_property(args: &Args) {
    if let Commands::AddProperty {
        at,
        name,
        value,
        keep_null,
        input,
    } = &args.command
        && let Err(e) = run_add_property(args, at, name, value, *keep_null, input.as_deref())
    {
        fail(&e);
    }
}

fn handle_query(args: &Args) {
    if let Commands::Query { path, paths, input } = &args.command
        && let Err(e) = run_query(args, path, *paths, input.as_deref())
    {
        fail(&e);
    }
}

fn handle_get(args: &Args) {
    if let Commands::Get { path, input } = &args.command
        && let Err(e) = run_get(args, path, input.as_deref())
    {
        fail(&e);
    }
}

fn handle_format(args: &Args) {
    if let Commands::Format { input } = &args.command
        && let Err(e) = run_format(args, input.as_deref())
    {
        fail(&e);
    }
}

fn run_keep(args: &Args, path: &str, input: Option<&Path>) -> Result<()> {
    let source = load(input)?;
    let out = keep(source.root(), path, args.path_options())?;
    emit(args, &out)
}

fn run_remove(args: &Args, path: &str, input: Option<&Path>) -> Result<()> {
    let source = load(input)?;
    let out = remove(source.root(), path, args.path_options())?;
    emit(args, &out)
}

fn run_replace(args: &Args, path: &str, with: Option<&str>, input: Option<&Path>) -> Result<()> {
    let replacement = with.map(parse_literal).transpose()?;
    debug!(path, delete = replacement.is_none(), "replace from cli");
    let source = load(input)?;
    let out = replace(
        source.root(),
        path,
        move |_: &Value, _: &Breadcrumb<'_>| replacement.clone(),
        args.path_options(),
    )?;
    emit(args, &out)
}

fn run_merge(args: &Args, files: &[PathBuf]) -> Result<()> {
    let Some((first, rest)) = files.split_first() else {
        bail!("merge needs at least one file");
    };
    let base = load(Some(first.as_path()))?;
    let overlays = rest
        .iter()
        .map(|file| load(Some(file.as_path())))
        .collect::<Result<Vec<_>>>()?;
    let merged = merge_many(base.root(), overlays.iter().map(Document::root));
    emit(args, &Document::from_value(merged))
}

fn run_merge_into(args: &Args, path: &str, joined: &Path, input: Option<&Path>) -> Result<()> {
    let joined = load(Some(joined))?;
    let source = load(input)?;
    let out = merge_into(source.root(), path, joined.root(), args.path_options())?;
    emit(args, &out)
}

fn run_add_property(
    args: &Args,
    at: &str,
    name: &str,
    value: &str,
    keep_null: bool,
    input: Option<&Path>,
) -> Result<()> {
    let value = parse_literal(value)?;
    let options = PropertyOptions::new()
        .with_case_sensitive(args.case_sensitive)
        .with_ignore_null_existing(!keep_null);
    let source = load(input)?;
    let out = try_add_property(source.root(), at, name, &value, options)?;
    emit(args, &out)
}

fn run_query(args: &Args, path: &str, paths: bool, input: Option<&Path>) -> Result<()> {
    let source = load(input)?;
    let mut lines = String::new();
    let mut count = 0_usize;
    for (node, breadcrumb) in collect(source.root(), path, args.path_options()).located() {
        if paths {
            writeln!(lines, "{breadcrumb}\t{node}")?;
        } else {
            writeln!(lines, "{node}")?;
        }
        count += 1;
    }
    debug!(path, count, "query");
    write_output(args, &lines)
}

fn run_get(args: &Args, path: &str, input: Option<&Path>) -> Result<()> {
    let source = load(input)?;
    let Some(found) = get_value(source.root(), path, args.path_options()) else {
        bail!("no match for path '{path}'");
    };
    emit(args, &Document::from_value(found.clone()))
}

fn run_format(args: &Args, input: Option<&Path>) -> Result<()> {
    let source = load(input)?;
    emit(args, &source)
}

fn parse_literal(text: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("invalid JSON literal '{text}'"))
}

fn load(path: Option<&Path>) -> Result<Document> {
    let text = read_input(path)?;
    let origin = path.map_or_else(|| "stdin".to_owned(), |p| p.display().to_string());
    Document::parse(&text).with_context(|| format!("invalid JSON in {origin}"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(p) = path {
        fs::read_to_string(p).with_context(|| format!("cannot read {}", p.display()))
    } else {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }
}

fn render(document: &Document, compact: bool, indent: usize) -> Result<String> {
    let mut text = if compact {
        document.to_string()
    } else {
        document.to_pretty_string(indent)?
    };
    text.push('\n');
    Ok(text)
}

fn emit(args: &Args, document: &Document) -> Result<()> {
    let text = render(document, args.compact, args.indent)?;
    write_output(args, &text)
}

fn write_output(args: &Args, output: &str) -> Result<()> {
    if let Some(path) = &args.output {
        fs::write(path, output).with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(output.as_bytes())?;
    }
    Ok(())
}
