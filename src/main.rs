//! envision_asm - EnVision to plate-reader ASM converter
//!
//! Usage:
//!   envision_asm convert run.json            Write the document to stdout
//!   envision_asm convert run.json -o out.json
//!   envision_asm config                      Print the effective configuration

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use envision_asm::config::Settings;
use envision_asm::EnvisionConverter;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "envision_asm", version, about)]
struct Cli {
    /// Configuration file (defaults to config/envision_asm.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one exported run into a plate-reader document
    Convert {
        /// Run data exported as JSON
        input: PathBuf,
        /// Output file; defaults to the configured output directory, then stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration
    Config,
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Settings::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => Settings::load().context("Failed to load configuration"),
    }
}

fn init_tracing(settings: &Settings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.application.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn output_path(input: &Path, output: Option<PathBuf>, settings: &Settings) -> Option<PathBuf> {
    output.or_else(|| {
        let dir = settings.output.output_dir.as_ref()?;
        let stem = input.file_stem()?;
        Some(dir.join(format!("{}.json", stem.to_string_lossy())))
    })
}

fn convert(input: &Path, output: Option<PathBuf>, pretty: bool, settings: &Settings) -> Result<()> {
    let converter = EnvisionConverter::from_settings(settings)?;
    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let model = converter
        .parse(BufReader::new(file), &filename)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    let json = model.to_json(pretty || settings.output.pretty)?;

    match output_path(input, output, settings) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(&path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            tracing::info!(output = %path.display(), "Wrote plate-reader document");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    init_tracing(&settings);

    match cli.command {
        Command::Convert {
            input,
            output,
            pretty,
        } => convert(&input, output, pretty, &settings),
        Command::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
