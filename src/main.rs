//! Command-line interface for fake-data-builder
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate 1000 users as JSON Lines into a file
//! fake-data-builder generate \
//!   --template users.yaml \
//!   --count 1000 \
//!   --output users.jsonl
//!
//! # Reproducible admins, pretty-printed to stdout
//! fake-data-builder generate \
//!   --template users.yaml \
//!   --override admin \
//!   --seed 42 --pretty
//!
//! # Check a template file and every named override
//! fake-data-builder check --template users.yaml
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fake_data_builder::{CheckArgs, GenerateArgs, InstanceEmitter, OutputFormat};
use fixture_generator::TemplateFile;
use std::fs::File;
use std::path::Path;

#[derive(Parser)]
#[command(name = "fake-data-builder")]
#[command(about = "Generate fake data from declarative YAML templates")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce instances from a template file
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Compile a template file and test-produce every override
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for generated data
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => run_generate(args),
        Commands::Check { args } => run_check(args),
    }
}

fn load_template_file(path: &Path) -> anyhow::Result<TemplateFile> {
    TemplateFile::from_file(path)
        .with_context(|| format!("Failed to load template file from {path:?}"))
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let file = load_template_file(&args.template)?;
    let source = file.random_source(args.seed);

    tracing::info!(
        "Generating {} instances from {:?} (seeded={})",
        args.count,
        args.template,
        source.is_seeded()
    );

    let builder = file
        .builder(&source)
        .context("Failed to compile template")?;

    let mut emitter = InstanceEmitter::new(builder);
    if let Some(name) = &args.override_name {
        let template = file
            .compile_override(name, &source)
            .with_context(|| format!("Failed to compile override '{name}'"))?;
        emitter = emitter.with_override(template);
    }
    if args.pretty {
        emitter = emitter.with_format(OutputFormat::Pretty);
    }

    let metrics = match &args.output {
        Some(path) => {
            let output = File::create(path)
                .with_context(|| format!("Failed to create output file {path:?}"))?;
            emitter.emit(output, args.count)
        }
        None => emitter.emit(std::io::stdout().lock(), args.count),
    }
    .context("Failed to generate instances")?;

    tracing::info!(
        "Wrote {} instances ({} bytes) in {:?}",
        metrics.instances_written,
        metrics.bytes_written,
        metrics.total_duration
    );

    Ok(())
}

fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let file = load_template_file(&args.template)?;
    let source = file.random_source(args.seed);

    let builder = file
        .builder(&source)
        .context("Failed to compile template")?;
    let instance = builder
        .produce()
        .context("Failed to produce an instance from the template")?;

    println!(
        "template: ok ({} fields, {} produced)",
        builder.template().len(),
        instance.len()
    );

    for name in file.override_names() {
        let template = file
            .compile_override(name, &source)
            .with_context(|| format!("Failed to compile override '{name}'"))?;
        let instance = builder
            .produce_with(template)
            .with_context(|| format!("Failed to produce with override '{name}'"))?;

        println!("override {name}: ok ({} fields produced)", instance.len());
    }

    Ok(())
}
