//! The report pipeline: load → classify → per28 → roster → all-star
//! dataset → significance → distribution.
//!
//! Stages run strictly in order and each writes its artifacts as soon as
//! it finishes, so a late failure leaves the earlier tables on disk. Any
//! failure aborts the run with the stage name in the error chain.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hoops_core::{
    build_all_star_dataset, build_points_distribution, classify, partition_rosters, per28_last_games,
    render_points_distribution, report_significant_predictors, AnalysisConfig, SignificantPredictor, Stage,
};

use crate::io::{load_game_logs, write_table};
use crate::tables::{
    AllStarDatasetRow, CoefficientRow, DistributionRow, Per28Row, PredictorRow, RosterRow, TableRow,
};

pub const PER28_FILE: &str = "players_per_28.csv";
pub const REGULAR_ONLY_FILE: &str = "regular_season_only.csv";
pub const PLAYOFFS_ONLY_FILE: &str = "playoffs_only.csv";
pub const ALL_STAR_DATASET_FILE: &str = "all_star_dataset.csv";
pub const COEFFICIENTS_FILE: &str = "logistic_coefficients.csv";
pub const SIGNIFICANT_FILE: &str = "logistic_results.csv";
pub const DISTRIBUTION_TABLE_FILE: &str = "team_points_dist.csv";
pub const DISTRIBUTION_PLOT_FILE: &str = "team_points_dist.png";

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub config: AnalysisConfig,
    /// Write the PNG in addition to the bin-count table
    pub render_plot: bool,
}

impl PipelineOptions {
    pub fn new(input: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_dir: out_dir.into(),
            config: AnalysisConfig::default(),
            render_plot: true,
        }
    }
}

/// One file written by a stage
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub stage: Stage,
    pub path: PathBuf,
    /// Data rows for tables, `None` for the image
    pub rows: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub games: usize,
    pub artifacts: Vec<Artifact>,
    pub significant: Vec<SignificantPredictor>,
}

impl PipelineOutcome {
    pub fn artifact(&self, file_name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path.file_name().is_some_and(|f| f == file_name))
    }
}

fn stage_failed(stage: Stage) -> String {
    format!("Stage `{}` failed", stage)
}

struct ArtifactWriter<'a> {
    out_dir: &'a Path,
    written: Vec<Artifact>,
}

impl ArtifactWriter<'_> {
    fn table<T: TableRow>(&mut self, stage: Stage, file_name: &str, rows: &[T]) -> Result<()> {
        let path = self.out_dir.join(file_name);
        let count = write_table(&path, rows).with_context(|| stage_failed(stage))?;
        self.written.push(Artifact { stage, path, rows: Some(count) });
        Ok(())
    }
}

pub fn run_pipeline(options: &PipelineOptions) -> Result<PipelineOutcome> {
    let config = &options.config;
    config.validate().context("Invalid analysis configuration")?;

    let mut out = ArtifactWriter { out_dir: &options.out_dir, written: Vec::new() };

    log::info!("[{}] reading {}", Stage::Load, options.input.display());
    let records = load_game_logs(&options.input).with_context(|| stage_failed(Stage::Load))?;

    log::info!("[{}] tagging season phases", Stage::Classify);
    let games = classify(records, &config.calendar);

    log::info!("[{}] last {} regular-season games per player", Stage::Per28, config.per28.window);
    let per28 = per28_last_games(&games, &config.per28).with_context(|| stage_failed(Stage::Per28))?;
    let rows: Vec<Per28Row> = per28.iter().map(Per28Row::from).collect();
    out.table(Stage::Per28, PER28_FILE, &rows)?;

    log::info!("[{}] splitting rosters by phase", Stage::Roster);
    let rosters = partition_rosters(&games);
    let regular: Vec<RosterRow> = rosters.regular_only.iter().map(RosterRow::from).collect();
    out.table(Stage::Roster, REGULAR_ONLY_FILE, &regular)?;
    let playoffs: Vec<RosterRow> = rosters.playoffs_only.iter().map(RosterRow::from).collect();
    out.table(Stage::Roster, PLAYOFFS_ONLY_FILE, &playoffs)?;

    log::info!("[{}] selecting players around the all-star break", Stage::AllStarDataset);
    let dataset =
        build_all_star_dataset(&games, &config.all_star).with_context(|| stage_failed(Stage::AllStarDataset))?;
    let rows: Vec<AllStarDatasetRow> = dataset.rows.iter().map(AllStarDatasetRow::from).collect();
    out.table(Stage::AllStarDataset, ALL_STAR_DATASET_FILE, &rows)?;

    log::info!("[{}] fitting logistic model (seed {})", Stage::Significance, config.significance.seed);
    let report = report_significant_predictors(&dataset, &config.significance)
        .with_context(|| stage_failed(Stage::Significance))?;
    let rows: Vec<CoefficientRow> = report.fit.coefficients.iter().map(CoefficientRow::from).collect();
    out.table(Stage::Significance, COEFFICIENTS_FILE, &rows)?;
    let rows: Vec<PredictorRow> = report.significant.iter().map(PredictorRow::from).collect();
    out.table(Stage::Significance, SIGNIFICANT_FILE, &rows)?;

    log::info!("[{}] binning team points", Stage::Distribution);
    let dist = build_points_distribution(&games, &config.plot).with_context(|| stage_failed(Stage::Distribution))?;
    let rows: Vec<DistributionRow> =
        dist.panels.iter().flat_map(|p| DistributionRow::from_panel(p, &dist.edges)).collect();
    out.table(Stage::Distribution, DISTRIBUTION_TABLE_FILE, &rows)?;
    if options.render_plot {
        let path = options.out_dir.join(DISTRIBUTION_PLOT_FILE);
        render_points_distribution(&dist, &config.plot, &path).with_context(|| stage_failed(Stage::Distribution))?;
        out.written.push(Artifact { stage: Stage::Distribution, path, rows: None });
    }

    Ok(PipelineOutcome { games: games.len(), artifacts: out.written, significant: report.significant })
}
