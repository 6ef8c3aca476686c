use geo::algorithm::euclidean_distance::EuclideanDistance;
use geo::{Coordinate, Point};

use crate::network::PipeSegment;

/// Invert elevation of `segment` at `point`, extrapolated along the
/// pipe's slope from its upstream end.
///
/// Returns `None` when either invert is missing; absence of data is
/// never a failure here.
///
/// The distance along the pipe is taken as the straight-line distance
/// from the upstream endpoint to `point`, not arc length along the
/// polyline. For a bent pipe this understates the true run and shifts
/// the interpolated elevation toward the upstream invert. This matches
/// the behavior of the survey tooling this crate replaces; correcting it
/// would silently change computed separations.
pub fn invert_at(segment: &PipeSegment, point: Coordinate<f64>) -> Option<f64> {
    let upstream_invert = segment.upstream_invert?;
    let slope = segment.slope()?;
    let upstream = segment.upstream()?;
    let run = Point::from(upstream).euclidean_distance(&Point::from(point));
    Some(upstream_invert - slope * run)
}
