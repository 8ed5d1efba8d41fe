//! Run manifest: what a run read and wrote, with SHA256 checksums so two
//! runs can be compared byte for byte.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::pipeline::{PipelineOptions, PipelineOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// File name inside the output directory
    pub file: String,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rows: Option<usize>,
    pub bytes: u64,
    /// SHA256 (hex)
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub input: String,
    pub input_sha256: String,
    pub games: usize,
    pub seed: u64,
    pub feature_window: String,
    /// RFC3339
    pub generated_at: String,
    pub artifacts: Vec<ArtifactRecord>,
}

/// SHA256 of a file's bytes, lower-case hex
pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Does the file still hash to `expected_checksum`?
pub fn verify_artifact(path: &Path, expected_checksum: &str) -> Result<bool> {
    Ok(sha256_file(path)? == expected_checksum)
}

impl RunManifest {
    pub fn build(options: &PipelineOptions, outcome: &PipelineOutcome) -> Result<Self> {
        let artifacts = outcome
            .artifacts
            .iter()
            .map(|artifact| {
                let bytes = fs::metadata(&artifact.path)
                    .with_context(|| format!("Failed to stat {}", artifact.path.display()))?
                    .len();
                Ok(ArtifactRecord {
                    file: artifact
                        .path
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    stage: artifact.stage.to_string(),
                    rows: artifact.rows,
                    bytes,
                    sha256: sha256_file(&artifact.path)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            input: options.input.display().to_string(),
            input_sha256: sha256_file(&options.input)?,
            games: outcome.games,
            seed: options.config.significance.seed,
            feature_window: options.config.all_star.feature_window.name().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            artifacts,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&json).context("Failed to parse manifest JSON")
    }

    /// Re-hash every artifact under `out_dir`; returns the files that no
    /// longer match.
    pub fn verify(&self, out_dir: &Path) -> Result<Vec<String>> {
        let mut mismatched = Vec::new();
        for artifact in &self.artifacts {
            if !verify_artifact(&out_dir.join(&artifact.file), &artifact.sha256)? {
                mismatched.push(artifact.file.clone());
            }
        }
        Ok(mismatched)
    }
}
