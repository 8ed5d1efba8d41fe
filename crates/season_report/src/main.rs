//! Season Report CLI
//!
//! Game log CSV → per-28 lines, roster splits, all-star model, points histograms

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use hoops_core::{AnalysisConfig, FeatureWindow};
#[cfg(feature = "cli")]
use season_report::{run_pipeline, PipelineOptions, RunManifest};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "season_report")]
#[command(about = "Build the season report tables and plots from player game logs", long_about = None)]
struct Cli {
    /// Input CSV file path (one row per player per game)
    #[arg(long, default_value = "nba_player_game_logs.csv")]
    input: PathBuf,

    /// Directory the report files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// YAML file overriding cutoffs and thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the pre-fit row shuffle (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Games the all-star feature means cover: all-games, before-break, after-break
    #[arg(long, value_parser = parse_feature_window)]
    feature_window: Option<FeatureWindow>,

    /// Write a JSON manifest with per-file checksums
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Re-read the saved manifest and re-hash every output against it
    #[arg(long, default_value = "false")]
    verify: bool,

    /// Skip the PNG (the bin-count table is still written)
    #[arg(long, default_value = "false")]
    skip_plot: bool,
}

#[cfg(feature = "cli")]
fn parse_feature_window(value: &str) -> std::result::Result<FeatureWindow, String> {
    FeatureWindow::parse(value)
        .ok_or_else(|| format!("unknown feature window '{}' (all-games, before-break, after-break)", value))
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.significance.seed = seed;
    }
    if let Some(window) = cli.feature_window {
        config.all_star.feature_window = window;
    }

    let options = PipelineOptions {
        input: cli.input,
        out_dir: cli.out_dir,
        config,
        render_plot: !cli.skip_plot,
    };

    println!("🏀 Building season report...");
    println!("   Input:  {}", options.input.display());
    println!("   Output: {}", options.out_dir.display());
    println!("   Seed:   {}", options.config.significance.seed);

    let outcome = run_pipeline(&options)?;

    println!("\n✅ Report built from {} game rows", outcome.games);
    for artifact in &outcome.artifacts {
        match artifact.rows {
            Some(rows) => println!("   {:<28} {:>6} rows", artifact.path.display(), rows),
            None => println!("   {}", artifact.path.display()),
        }
    }
    if outcome.significant.is_empty() {
        println!("   No predictor significant at p < {}", options.config.significance.alpha);
    } else {
        for p in &outcome.significant {
            println!("   {:<8} p = {:.4}", p.predictor, p.p_value);
        }
    }

    if let Some(manifest_path) = &cli.manifest {
        let manifest = RunManifest::build(&options, &outcome)?;
        manifest.save(manifest_path)?;
        println!("\n📄 Manifest saved to: {}", manifest_path.display());

        if cli.verify {
            println!("\n🔍 Verifying outputs...");
            let manifest = RunManifest::load(manifest_path)?;
            let mismatched = manifest.verify(&options.out_dir)?;
            if !mismatched.is_empty() {
                anyhow::bail!("❌ Output verification failed: {}", mismatched.join(", "));
            }
            println!("✅ All {} outputs match their checksums", manifest.artifacts.len());
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("season_report CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
