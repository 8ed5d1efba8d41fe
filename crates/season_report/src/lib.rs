//! Season Report Library
//!
//! CSV game logs → tagged games → report tables + histogram PNG
//! Optional run manifest with SHA256 checksums per artifact

pub mod io;
pub mod manifest;
pub mod pipeline;
pub mod tables;

pub use io::{load_game_logs, write_table, REQUIRED_COLUMNS};
pub use manifest::{sha256_file, verify_artifact, ArtifactRecord, RunManifest};
pub use pipeline::{run_pipeline, Artifact, PipelineOptions, PipelineOutcome};
pub use tables::TableRow;
