//! Which features move the after-break scoring label.
//!
//! Rows are shuffled with an explicit seed before fitting so that a rerun
//! with the same seed sees the same row order.

use nalgebra::{DMatrix, DVector};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::all_star::{AllStarDataset, AllStarRow, FEATURE_NAMES};
use super::logistic::{LogisticFit, LogisticRegression};
use crate::config::SignificanceConfig;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantPredictor {
    pub predictor: String,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceReport {
    pub fit: LogisticFit,
    /// Predictors with p < alpha, intercept excluded, feature order
    pub significant: Vec<SignificantPredictor>,
    pub alpha: f64,
    pub seed: u64,
}

/// Shuffle, fit `label ~ FG_PCT + FG3A + FTA + AST + TOV + OREB`, and keep
/// the predictors below `alpha`.
///
/// A failed fit is an error, never an empty `significant` list.
pub fn report_significant_predictors(
    dataset: &AllStarDataset,
    config: &SignificanceConfig,
) -> Result<SignificanceReport> {
    let mut rows: Vec<&AllStarRow> = dataset.rows.iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    rows.shuffle(&mut rng);

    let x = DMatrix::from_fn(rows.len(), FEATURE_NAMES.len(), |i, j| rows[i].features[j]);
    let y = DVector::from_iterator(rows.len(), rows.iter().map(|r| f64::from(r.label)));

    let fit = LogisticRegression::from(config).fit(&FEATURE_NAMES, &x, &y)?;

    for c in &fit.coefficients {
        log::info!(
            "  {:<9} coef {:>10.4}  se {:>9.4}  z {:>7.3}  p {:.4}",
            c.term,
            c.estimate,
            c.std_error,
            c.z,
            c.p_value
        );
    }

    let significant: Vec<SignificantPredictor> = fit
        .predictors()
        .filter(|c| c.p_value < config.alpha)
        .map(|c| SignificantPredictor { predictor: c.term.clone(), p_value: c.p_value })
        .collect();

    log::info!(
        "{} of {} predictors significant at p < {} (n = {}, seed {})",
        significant.len(),
        FEATURE_NAMES.len(),
        config.alpha,
        fit.observations,
        config.seed
    );

    Ok(SignificanceReport { fit, significant, alpha: config.alpha, seed: config.seed })
}
