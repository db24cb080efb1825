// Tue Jan 13 2026 - Alex

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sdk_layout_generator::{
    config::Config,
    generator::{GenerationContext, GenerationResult, Generator, ResolutionState},
    memory::{Address, ModuleImage},
    naming::NameValidator,
    output::{SdkWriter, WriteSummary},
    policy::TargetPolicy,
    reflection::Snapshot,
    utils::LoggingUtils,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "C++ SDK generator for reflected object runtimes", long_about = None)]
struct Args {
    /// Reflection snapshot (JSON)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Target policy (JSON)
    #[arg(short, long)]
    policy: Option<PathBuf>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Module image mapped over the snapshot memory
    #[arg(long)]
    image: Option<PathBuf>,

    /// Load address of the module image, hex
    #[arg(long, value_parser = parse_hex, requires = "image")]
    image_base: Option<u64>,

    #[arg(short = 'j', long)]
    threads: Option<usize>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    no_manifest: bool,

    #[arg(short, long)]
    quiet: bool,

    /// Run configuration (JSON); command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_hex(s: &str) -> Result<u64, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address '{}': {}", s, e))
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| anyhow!(e))?,
        None => Config::default(),
    };

    if let Some(snapshot) = &args.snapshot {
        config = config.with_snapshot(snapshot.clone());
    }
    if let Some(policy) = &args.policy {
        config = config.with_policy(policy.clone());
    }
    if let Some(output) = &args.output {
        config = config.with_output_dir(output.clone());
    }
    if let Some(image) = &args.image {
        config = config.with_image(image.clone(), args.image_base);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if args.no_progress || args.quiet {
        config = config.with_progress_bars(false);
    }
    if args.verbose {
        config = config.with_verbose(true);
    }
    if args.no_manifest {
        config = config.with_manifest(false);
    }

    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let level = if args.quiet {
        log::LevelFilter::Warn
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        LoggingUtils::level_from_str(&args.log_level)
    };
    LoggingUtils::init(level, !args.quiet);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let start_time = Instant::now();

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_threads)
        .build_global()
        .context("Failed to build render thread pool")?;

    if !args.quiet {
        println!("{}", "SDK Layout Generator".cyan().bold());
        println!("{}", "=".repeat(50).cyan());
        println!("{} Loading snapshot: {}", "[*]".blue(), config.snapshot.display());
    }

    let snapshot = Snapshot::load(&config.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", config.snapshot.display()))?;
    let (graph, mut memory) = snapshot.into_parts().context("Snapshot is inconsistent")?;
    log::info!("Loaded {} reflected objects", graph.len());

    let policy = match &config.policy {
        Some(path) => TargetPolicy::load(path).with_context(|| format!("Failed to load policy {}", path.display()))?,
        None => TargetPolicy::default(),
    };

    if let Some(image_path) = &config.image {
        let image = ModuleImage::load(image_path)
            .with_context(|| format!("Failed to load module image {}", image_path.display()))?;
        let mapped = image
            .map_into(&mut memory, config.image_base.map(Address::new))
            .context("Failed to map module image")?;
        log::info!("Mapped {} segments of {}", mapped, image_path.display());
    }

    let names = NameValidator::new(&graph);
    let ctx = GenerationContext::new(&graph, &names, &policy).with_memory(&memory);
    let generator = Generator::new(ctx);

    let progress = if config.enable_progress_bars {
        let pb = ProgressBar::new(generator.packages().len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut state = ResolutionState::new();
    let result = generator.run_with_progress(&mut state, |package, _saved| {
        if let Some(pb) = &progress {
            pb.set_message(package.name.clone());
            pb.inc(1);
        }
    });
    if let Some(pb) = &progress {
        pb.finish_with_message("resolved");
    }

    let writer = SdkWriter::new(&config.output_dir, &policy).with_manifest(config.write_manifest);
    let summary = writer
        .write(&result, &graph)
        .with_context(|| format!("Failed to write SDK to {}", config.output_dir.display()))?;

    if !args.quiet {
        print_summary(&result, &summary, &config, start_time.elapsed().as_secs_f64());
    }
    Ok(())
}

fn print_summary(result: &GenerationResult, summary: &WriteSummary, config: &Config, seconds: f64) {
    println!();
    println!("{}", "Results Summary".cyan().bold());
    println!("{}", "-".repeat(40).cyan());
    println!("  Packages saved: {}", result.packages.len().to_string().green());
    println!("  Packages skipped: {}", result.skipped.len().to_string().yellow());
    println!("  Script structs: {}", result.struct_count().to_string().green());
    println!("  Classes: {}", result.class_count().to_string().green());
    println!("  Files written: {}", summary.files_written.to_string().green());

    if !result.cycles.is_empty() {
        println!(
            "  {} {} package cycle(s), order is best effort",
            "[!]".yellow(),
            result.cycles.len()
        );
    }

    println!();
    println!("{}", "=".repeat(50).cyan());
    println!(
        "{} SDK written to {} in {:.2}s",
        "[+]".green(),
        config.output_dir.display(),
        seconds
    );
}
