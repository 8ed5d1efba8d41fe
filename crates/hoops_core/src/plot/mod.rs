pub mod histogram;
pub mod render;

pub use histogram::{build_points_distribution, PointsDistribution, TeamHistogram};
pub use render::{render_points_distribution, rasterize};
