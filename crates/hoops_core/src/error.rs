use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage, used to say where a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Classify,
    Per28,
    Roster,
    AllStarDataset,
    Significance,
    Distribution,
}

impl Stage {
    /// Stages in execution order
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Load,
            Stage::Classify,
            Stage::Per28,
            Stage::Roster,
            Stage::AllStarDataset,
            Stage::Significance,
            Stage::Distribution,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Classify => "classify",
            Stage::Per28 => "per28",
            Stage::Roster => "roster",
            Stage::AllStarDataset => "all_star_dataset",
            Stage::Significance => "significance",
            Stage::Distribution => "distribution",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid game date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Empty selection in stage {stage}: {what}")]
    EmptySelection { stage: Stage, what: String },

    #[error("Model fit failed: {0}")]
    ModelFit(#[from] FitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl AnalysisError {
    pub fn empty(stage: Stage, what: impl Into<String>) -> Self {
        AnalysisError::EmptySelection { stage, what: what.into() }
    }

    /// Stage the error belongs to, when the error itself knows it
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AnalysisError::InvalidDate { .. } => Some(Stage::Load),
            AnalysisError::EmptySelection { stage, .. } => Some(*stage),
            AnalysisError::ModelFit(_) => Some(Stage::Significance),
            AnalysisError::Image(_) => Some(Stage::Distribution),
            AnalysisError::Config(_) => None,
        }
    }
}

/// Logistic regression failures. None of these is "no significant predictors".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Design has {x_rows} rows but the label vector has {y_rows}")]
    DimensionMismatch { x_rows: usize, y_rows: usize },

    #[error("Got {terms} term names for {columns} feature columns")]
    TermCountMismatch { terms: usize, columns: usize },

    #[error("Need at least {required} rows to fit {required} parameters, got {rows}")]
    TooFewRows { rows: usize, required: usize },

    #[error("Label has no variance (every row is {value})")]
    ConstantLabel { value: u8 },

    #[error("Non-finite value in column '{column}'")]
    NonFinite { column: String },

    #[error("Perfect separation detected after {iterations} iterations")]
    PerfectSeparation { iterations: usize },

    #[error("Information matrix is singular at iteration {iteration}")]
    SingularInformation { iteration: usize },

    #[error("Did not converge after {iterations} iterations (last step {last_step:e})")]
    NotConverged { iterations: usize, last_step: f64 },

    #[error("Reference distribution unavailable: {0}")]
    Distribution(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid season calendar: {0}")]
    InvalidCalendar(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
