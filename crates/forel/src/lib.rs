#[cfg(feature = "_debug")]
pub mod adaptive;
#[cfg(not(feature = "_debug"))]
mod adaptive;
pub mod config;
#[cfg(feature = "_debug")]
pub mod extraction;
#[cfg(not(feature = "_debug"))]
mod extraction;
pub mod geometry;
pub mod io;
#[cfg(feature = "_debug")]
pub mod mean_shift;
#[cfg(not(feature = "_debug"))]
mod mean_shift;
#[cfg(feature = "_debug")]
pub mod neighborhood;
#[cfg(not(feature = "_debug"))]
mod neighborhood;
#[cfg(test)]
mod rng;
pub mod seed;
pub mod types;

pub use adaptive::PassSummary;
pub use config::{Config, DegenerateDimensions};
pub use geometry::BoundingBox;
pub use seed::{FirstRemaining, SeedPolicy};
pub use types::{Cluster, Clusters, Point};

use geometry::Normalization;
use snafu::prelude::*;
use tracing::debug;

/// The point set or the configuration can't be clustered.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InputError {
    #[snafu(display("point set is empty"))]
    EmptyInput,

    #[snafu(display("points must have at least one dimension"))]
    ZeroDimensions,

    #[snafu(display("point {index} has {found} dimensions, expected {expected}"))]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[snafu(display("point {index} has a non-finite coordinate in dimension {dimension}"))]
    NonFiniteCoordinate { index: usize, dimension: usize },

    #[snafu(display(
        "every point has coordinate {value} in dimension {dimension}, \
        the dimension can't be normalized"
    ))]
    DegenerateDimension { dimension: usize, value: f64 },

    #[snafu(display("invalid configuration: {reason}"))]
    InvalidConfig { reason: &'static str },
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ClusterError {
    #[snafu(context(false), display("{source}"))]
    Input { source: InputError },

    #[snafu(display("can't form {min_clusters} clusters out of {points} points"))]
    UnreachableMinClusters { min_clusters: i64, points: usize },

    #[snafu(display(
        "radius shrank to zero after {passes} passes without reaching {min_clusters} clusters"
    ))]
    RadiusExhausted { passes: usize, min_clusters: i64 },

    #[snafu(display("none of {max_passes} passes reached {min_clusters} clusters"))]
    TooManyPasses { max_passes: usize, min_clusters: i64 },

    #[snafu(display("a neighborhood of radius {radius} came out empty"))]
    EmptyNeighborhood { radius: f64 },

    #[snafu(display("mean shift still moves by {movement} after {iterations} iterations"))]
    MeanShiftStalled { iterations: usize, movement: f64 },

    #[snafu(display("seed policy picked point {index}, which is already clustered"))]
    SeedNotRemaining { index: usize },
}

#[derive(Debug)]
pub struct DebugInfo {
    pub bounds: BoundingBox,
    /// Radius of the accepted pass, in normalized coordinates.
    pub radius: f64,
    pub passes: Vec<PassSummary>,
    /// Mean-shift iterations per cluster of the accepted pass.
    pub shift_iterations: Vec<usize>,
}

fn validate_points(points: &[Point]) -> Result<(), InputError> {
    let first = points.first().context(EmptyInputSnafu)?;
    let dimensions = first.dimensions();
    ensure!(dimensions > 0, ZeroDimensionsSnafu);

    for (index, point) in points.iter().enumerate() {
        ensure!(
            point.dimensions() == dimensions,
            DimensionMismatchSnafu {
                index,
                expected: dimensions,
                found: point.dimensions(),
            }
        );
        if let Some(dimension) = point.coords().iter().position(|x| !x.is_finite()) {
            return NonFiniteCoordinateSnafu { index, dimension }.fail();
        }
    }

    Ok(())
}

fn normalize_points(
    points: &[Point],
    config: &Config,
) -> Result<(Normalization, Vec<Point>), InputError> {
    config.validate()?;
    validate_points(points)?;

    let bounds = BoundingBox::from_points(points).context(EmptyInputSnafu)?;
    let normalization = Normalization::new(bounds, config.degenerate_dimensions)?;
    let normalized = points.iter().map(|p| normalization.normalize(p)).collect();
    Ok((normalization, normalized))
}

/// Groups points into clusters, shrinking the search radius until there are at
/// least `min_clusters` of them. A `min_clusters` of 0 or less accepts the
/// first pass.
///
/// ```
/// use forel::Point;
///
/// let points = vec![
///     Point::from([0.0, 0.0]),
///     Point::from([0.0, 0.01]),
///     Point::from([0.01, 0.0]),
///     Point::from([10.0, 10.0]),
///     Point::from([10.0, 10.01]),
/// ];
///
/// let clusters = forel::cluster(&points, 2).unwrap();
///
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[&0].indices, vec![0, 1, 2]);
/// assert_eq!(clusters[&1].points, points[3..]);
/// ```
///
/// Cluster ids follow extraction order, and every input point ends up in
/// exactly one cluster. Fails with [`ClusterError::Input`] if the points are
/// empty, zero-dimensional, of mixed dimensions, or constant along some
/// dimension.
///
/// See also [`cluster_extra`] for the same function with tuning parameters.
pub fn cluster(points: &[Point], min_clusters: i64) -> Result<Clusters, ClusterError> {
    cluster_extra(points, min_clusters, &Config::default(), &FirstRemaining)
}

pub fn cluster_extra(
    points: &[Point],
    min_clusters: i64,
    config: &Config,
    seed_policy: &impl SeedPolicy,
) -> Result<Clusters, ClusterError> {
    cluster_extra_debug(points, min_clusters, config, seed_policy).map(|(clusters, _)| clusters)
}

pub fn cluster_extra_debug(
    points: &[Point],
    min_clusters: i64,
    config: &Config,
    seed_policy: &impl SeedPolicy,
) -> Result<(Clusters, DebugInfo), ClusterError> {
    let (normalization, normalized) = normalize_points(points, config)?;
    debug!(
        points = points.len(),
        dimensions = normalization.bounds().dimensions(),
        min_clusters,
        "clustering"
    );

    let result = adaptive::find_clusters(&normalized, min_clusters, config, seed_policy)?;

    let shift_iterations = result.clusters.iter().map(|c| c.iterations).collect();

    // Members are indices, so the caller's points are returned untouched
    let clusters = result
        .clusters
        .into_iter()
        .enumerate()
        .map(|(id, extracted)| {
            let cluster = Cluster {
                id,
                points: extracted.members.iter().map(|&i| points[i].clone()).collect(),
                indices: extracted.members,
                center: normalization.denormalize(&extracted.center),
            };
            (id, cluster)
        })
        .collect();

    Ok((
        clusters,
        DebugInfo {
            bounds: normalization.bounds().clone(),
            radius: result.radius,
            passes: result.passes,
            shift_iterations,
        },
    ))
}
