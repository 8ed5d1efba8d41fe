//! Binary logistic regression by Newton-Raphson (IRLS).
//!
//! Standard errors come from the inverse observed information `(XᵀWX)⁻¹`
//! at the optimum; p-values are two-sided Wald tests against the standard
//! normal.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::SignificanceConfig;
use crate::error::FitError;

/// Name of the constant term in coefficient tables
pub const INTERCEPT: &str = "Intercept";

/// Fitted probabilities this close to every label mean the classes are separable
const SEPARATION_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub z: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticFit {
    /// Intercept first, then one per feature column
    pub coefficients: Vec<Coefficient>,
    pub iterations: usize,
    pub log_likelihood: f64,
    pub observations: usize,
}

impl LogisticFit {
    pub fn coefficient(&self, term: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.term == term)
    }

    /// Feature coefficients only
    pub fn predictors(&self) -> impl Iterator<Item = &Coefficient> {
        self.coefficients.iter().filter(|c| c.term != INTERCEPT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegression {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self { max_iterations: 35, tolerance: 1e-8 }
    }
}

impl From<&SignificanceConfig> for LogisticRegression {
    fn from(config: &SignificanceConfig) -> Self {
        Self { max_iterations: config.max_iterations, tolerance: config.tolerance }
    }
}

impl LogisticRegression {
    /// Fit `y ~ 1 + x`. `x` holds feature columns only; `terms` names them.
    pub fn fit(&self, terms: &[&str], x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LogisticFit, FitError> {
        let n = x.nrows();
        let p = x.ncols() + 1;

        if y.len() != n {
            return Err(FitError::DimensionMismatch { x_rows: n, y_rows: y.len() });
        }
        if terms.len() != x.ncols() {
            return Err(FitError::TermCountMismatch { terms: terms.len(), columns: x.ncols() });
        }
        if n < p {
            return Err(FitError::TooFewRows { rows: n, required: p });
        }
        for (j, column) in x.column_iter().enumerate() {
            if column.iter().any(|v| !v.is_finite()) {
                return Err(FitError::NonFinite { column: terms[j].to_string() });
            }
        }
        if y.iter().any(|v| *v != 0.0 && *v != 1.0) {
            return Err(FitError::NonFinite { column: "label".to_string() });
        }
        let positives = y.iter().filter(|v| **v == 1.0).count();
        if positives == 0 || positives == n {
            return Err(FitError::ConstantLabel { value: u8::from(positives == n) });
        }

        let design = DMatrix::from_fn(n, p, |i, j| if j == 0 { 1.0 } else { x[(i, j - 1)] });
        if !has_full_column_rank(&design) {
            return Err(FitError::SingularInformation { iteration: 0 });
        }
        let mut beta = DVector::<f64>::zeros(p);
        let mut last_step = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let mu = (&design * &beta).map(sigmoid);
            if is_separated(&mu, y) {
                return Err(FitError::PerfectSeparation { iterations: iteration - 1 });
            }

            let gradient = design.transpose() * (y - &mu);
            let information = weighted_gram(&design, &mu);
            let cholesky = information
                .cholesky()
                .ok_or(FitError::SingularInformation { iteration })?;
            let step = cholesky.solve(&gradient);
            beta += &step;

            last_step = step.amax();
            if !last_step.is_finite() {
                return Err(FitError::NotConverged { iterations: iteration, last_step });
            }
            log::trace!("logit iteration {}: max step {:e}", iteration, last_step);

            if last_step < self.tolerance {
                return self.summarize(terms, &design, y, &beta, iteration);
            }
        }

        Err(FitError::NotConverged { iterations: self.max_iterations, last_step })
    }

    fn summarize(
        &self,
        terms: &[&str],
        design: &DMatrix<f64>,
        y: &DVector<f64>,
        beta: &DVector<f64>,
        iterations: usize,
    ) -> Result<LogisticFit, FitError> {
        let eta = design * beta;
        let mu = eta.map(sigmoid);
        if is_separated(&mu, y) {
            return Err(FitError::PerfectSeparation { iterations });
        }

        let covariance = weighted_gram(design, &mu)
            .cholesky()
            .ok_or(FitError::SingularInformation { iteration: iterations })?
            .inverse();
        let normal = Normal::new(0.0, 1.0).map_err(|e| FitError::Distribution(e.to_string()))?;

        let coefficients = (0..beta.len())
            .map(|j| {
                let estimate = beta[j];
                let std_error = covariance[(j, j)].sqrt();
                let z = estimate / std_error;
                Coefficient {
                    term: if j == 0 { INTERCEPT.to_string() } else { terms[j - 1].to_string() },
                    estimate,
                    std_error,
                    z,
                    p_value: 2.0 * normal.sf(z.abs()),
                }
            })
            .collect();

        let log_likelihood: f64 = eta
            .iter()
            .zip(y.iter())
            .map(|(e, yi)| yi * e - softplus(*e))
            .sum();

        log::debug!("Logit converged in {} iterations, log-likelihood {:.6}", iterations, log_likelihood);

        Ok(LogisticFit { coefficients, iterations, log_likelihood, observations: y.len() })
    }
}

/// XᵀWX with W = diag(mu (1 - mu))
fn weighted_gram(design: &DMatrix<f64>, mu: &DVector<f64>) -> DMatrix<f64> {
    let weighted = DMatrix::from_fn(design.nrows(), design.ncols(), |i, j| {
        design[(i, j)] * mu[i] * (1.0 - mu[i])
    });
    design.transpose() * weighted
}

/// Singular values below 1e-10 of the largest count as zero
fn has_full_column_rank(design: &DMatrix<f64>) -> bool {
    let singular_values = design.singular_values();
    let largest = singular_values.max();
    largest > 0.0 && singular_values.iter().all(|s| *s > largest * 1e-10)
}

fn is_separated(mu: &DVector<f64>, y: &DVector<f64>) -> bool {
    mu.iter().zip(y.iter()).all(|(m, yi)| (m - yi).abs() < SEPARATION_TOLERANCE)
}

pub(crate) fn sigmoid(eta: f64) -> f64 {
    if eta >= 0.0 {
        1.0 / (1.0 + (-eta).exp())
    } else {
        let e = eta.exp();
        e / (1.0 + e)
    }
}

/// ln(1 + e^x) without overflow
fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}
