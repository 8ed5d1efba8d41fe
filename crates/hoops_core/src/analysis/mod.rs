//! After-break scoring model: dataset builder, logistic fit, significance.

pub mod all_star;
pub mod logistic;
pub mod significance;

pub use all_star::{build_all_star_dataset, AllStarDataset, AllStarRow, SideSummary, FEATURE_NAMES};
pub use logistic::{Coefficient, LogisticFit, LogisticRegression, INTERCEPT};
pub use significance::{report_significant_predictors, SignificanceReport, SignificantPredictor};
