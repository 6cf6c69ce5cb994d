//! srcweave: Command-line front end of the analysis engine.
//!
//! Usage:
//!   srcweave [--config FILE] [-v] args <TEXT>
//!   srcweave imports <FILE>...
//!   srcweave calls <FILE>... [--callee NAME]...
//!   srcweave resolve <SPECIFIER>... [--from DIR]
//!   srcweave consolidate <FILE>...

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use srcweave_args::{parse_arguments, serialize, CallSiteCollector};
use srcweave_core::LineIndex;
use srcweave_engine::Project;
use srcweave_imports::{parse_imports, ImportRecord};
use srcweave_options::{find_options, load_options, EngineOptions};
use srcweave_path::{combine_paths, normalize_path, normalize_slashes};
use srcweave_resolver::{FsDirectoryLister, ModuleResolver};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "srcweave", version, about = "srcweave - argument, import and module analysis for script sources")]
struct Cli {
    /// Path to srcweave.json. Defaults to the nearest one above the
    /// current directory.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an argument list and print it re-serialized.
    Args {
        text: String,
        /// Print the parsed elements instead.
        #[arg(long)]
        tree: bool,
    },
    /// List the import declarations of files.
    Imports {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// List calls to the configured callees.
    Calls {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Additional callee name.
        #[arg(long = "callee")]
        callees: Vec<String>,
    },
    /// Resolve module specifiers to files.
    Resolve {
        #[arg(value_name = "SPECIFIER", required = true)]
        specifiers: Vec<String>,
        /// Directory relative specifiers start from.
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Consolidate the imports of files and print the provider text.
    Consolidate {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().into_diagnostic()?;
    let options = load_engine_options(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Command::Args { text, tree } => run_args(&text, tree),
        Command::Imports { files } => run_imports(&files, &options, &cwd)?,
        Command::Calls { files, callees } => run_calls(&files, &callees, &options)?,
        Command::Resolve { specifiers, from } => {
            let base = from.map(|dir| cwd.join(dir)).unwrap_or_else(|| cwd.clone());
            let unresolved = run_resolve(&specifiers, &base, &options);
            if unresolved > 0 {
                process::exit(1);
            }
        }
        Command::Consolidate { files } => run_consolidate(&files, options, &cwd)?,
    }
    Ok(())
}

fn load_engine_options(config: Option<&Path>, cwd: &Path) -> Result<EngineOptions> {
    match config {
        Some(path) => load_options(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot load {}", path.display())),
        None => find_options(cwd).into_diagnostic(),
    }
}

fn run_args(text: &str, tree: bool) {
    let elements = parse_arguments(text);
    if tree {
        println!("{:#?}", elements);
    } else {
        println!("{}", serialize(&elements));
    }
}

fn run_imports(files: &[PathBuf], options: &EngineOptions, cwd: &Path) -> Result<()> {
    for file in files {
        let text = read_source(file)?;
        let locator = locator(cwd, file);
        let imports = parse_imports(&text, &locator, &options.style_extensions);
        let index = LineIndex::new(&text);
        println!("{}", locator);
        for record in imports.records() {
            let at = record
                .source_positions
                .first()
                .map(|range| index.locate(range.pos).to_string())
                .unwrap_or_default();
            println!("  {} {}", at, describe(record));
        }
    }
    Ok(())
}

fn describe(record: &ImportRecord) -> String {
    let mut line = format!(
        "'{}' {}",
        record.module_path,
        if record.is_external { "external" } else { "relative" }
    );
    let bindings: Vec<String> = record
        .bindings
        .iter()
        .map(|b| {
            let mut text = format!("{} {}", b.kind, b.original_name);
            if let Some(alias) = &b.alias {
                text.push_str(&format!(" as {}", alias));
            }
            if b.is_type_only {
                text.push_str(" (type)");
            }
            text
        })
        .collect();
    if !bindings.is_empty() {
        line.push_str(&format!(" [{}]", bindings.join(", ")));
    }
    if record.side_effect {
        line.push_str(" side-effect");
    }
    if let Some(specifier) = &record.absolute_specifier {
        line.push_str(&format!(" -> {}", specifier));
    }
    line
}

fn run_calls(files: &[PathBuf], extra: &[String], options: &EngineOptions) -> Result<()> {
    let collector = options
        .callees
        .iter()
        .chain(extra)
        .fold(CallSiteCollector::new(), |collector, callee| collector.with_callee(callee.as_str()));
    if collector.is_empty() {
        warn!("no callees configured; pass --callee or set \"callees\" in srcweave.json");
    }
    for file in files {
        let text = read_source(file)?;
        let index = LineIndex::new(&text);
        for site in collector.collect(&text) {
            println!(
                "{}:{}: {}({})",
                file.display(),
                index.locate(site.range.pos),
                site.callee,
                serialize(&site.arguments)
            );
        }
    }
    Ok(())
}

fn run_resolve(specifiers: &[String], base: &Path, options: &EngineOptions) -> usize {
    let base = normalize_slashes(&base.to_string_lossy());
    let resolver = ModuleResolver::new(FsDirectoryLister)
        .with_extensions(options.extensions.iter().cloned())
        .with_index_file(options.index_file.as_str());
    let located: Vec<String> = specifiers
        .iter()
        .map(|s| normalize_path(&combine_paths(&base, s)))
        .collect();

    let map = resolver.resolve_many(&located);
    for (specifier, locator) in specifiers.iter().zip(&located) {
        match map.get(locator) {
            Some(path) => println!("{} -> {}", specifier, path),
            None => println!("{} -> (not found)", specifier),
        }
    }
    for err in &map.unresolved {
        debug!("{}", err);
    }
    map.unresolved.len()
}

fn run_consolidate(files: &[PathBuf], options: EngineOptions, cwd: &Path) -> Result<()> {
    let roots: Vec<String> = files.iter().map(|f| locator(cwd, f)).collect();
    let mut project = Project::new(roots, options);
    project.load_root_files().into_diagnostic()?;

    let output = project.run(FsDirectoryLister);
    for err in output.unresolved() {
        eprintln!("warning: {}", err);
    }
    print!("{}", output.provider);
    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", file.display()))
}

/// Absolute `/`-separated locator of `file`.
fn locator(cwd: &Path, file: &Path) -> String {
    normalize_path(&normalize_slashes(&cwd.join(file).to_string_lossy()))
}
