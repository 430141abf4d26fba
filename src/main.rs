//! PyArt CLI
//!
//! Usage:
//!   pyart [OPTIONS] [NAME]
//!
//! Options:
//!   -c, --config <FILE>   Shape ranges for random art (TOML format)
//!   -n, --count <N>       Draw N random shapes instead of the demo pattern
//!   -s, --seed <SEED>     Seed for reproducible random art
//!   -r, --report <FILE>   Write a table of the random shapes
//!   -h, --help            Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pyart::markup::document::DEFAULT_NAME;
use pyart::{ConfigError, Document, Error, RandomShape, ShapeConfig};

#[derive(Parser)]
#[command(name = "pyart")]
#[command(about = "Generate an HTML page with SVG art")]
struct Cli {
    /// Output file base name (".html" is appended if missing)
    #[arg(default_value = DEFAULT_NAME)]
    name: String,

    /// Shape ranges for random art (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw this many random shapes instead of the demo pattern
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible random art
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write a plain-text table of the random shapes to this file
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path),
        None => ShapeConfig::default(),
    };

    let mut doc = match Document::create(&cli.name) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.count {
        Some(count) => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let shapes = match doc.gen_random_art(&config, count, &mut rng) {
                Ok(shapes) => shapes,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            if let Some(path) = &cli.report {
                write_report(path, &shapes);
            }
        }
        None => doc.gen_art(),
    }

    if let Err(e) = doc.output() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!("Wrote {}", doc.file_name());
}

fn load_config(path: &Path) -> ShapeConfig {
    match pyart::load_config(path) {
        Ok(config) => config,
        Err(Error::Config(e @ ConfigError::Parse(_))) => {
            // re-read only to point the report at the offending span
            let source = fs::read_to_string(path).unwrap_or_default();
            eprintln!("{}", e.format(&source, &path.display().to_string()));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading config '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn write_report(path: &Path, shapes: &[RandomShape]) {
    let mut table = String::new();
    if let Some(first) = shapes.first() {
        table.push_str(&first.report_header());
        table.push('\n');
    }
    for shape in shapes {
        table.push_str(&shape.to_row());
        table.push('\n');
    }
    if let Err(e) = fs::write(path, table) {
        eprintln!("Error writing report '{}': {}", path.display(), e);
        std::process::exit(1);
    }
}
