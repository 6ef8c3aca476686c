use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coordinate, Line};
use log::{debug, trace};
use rstar::{RTree, RTreeObject, AABB};
use smallvec::SmallVec;

use crate::network::{LineNetwork, PipeSegment};

/// A plan-view point where a segment of one network crosses a segment of
/// the other.
///
/// Carries references, not copies; `first`/`second` record which network
/// played which role in the pair.
#[derive(Debug, Clone, Copy)]
pub struct SegmentIntersection<'a> {
    pub point: Coordinate<f64>,
    pub first: &'a PipeSegment,
    pub second: &'a PipeSegment,
}

/// One straight span of a segment's polyline, indexed by its extent.
struct Span<'a> {
    line: Line<f64>,
    segment: &'a PipeSegment,
}

impl RTreeObject for Span<'_> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (s, e) = (self.line.start, self.line.end);
        AABB::from_corners(
            [s.x.min(e.x), s.y.min(e.y)],
            [s.x.max(e.x), s.y.max(e.y)],
        )
    }
}

/// All points where a segment of `first` crosses a segment of `second`.
///
/// Every span pair whose extents overlap is tested with parametric line
/// intersection. True crossings and endpoint touches both count;
/// collinear overlaps contribute no points. Duplicate or
/// self-intersecting geometry is not deduplicated: each geometric pair
/// contributes independently, once per point of intersection. A crossing
/// that falls exactly on an interior vertex of a polyline is witnessed
/// by both adjacent spans and so is reported once per span.
///
/// Segments with unusable geometry are skipped; use
/// [`assemble`](crate::assemble) to also collect diagnostics for them.
///
/// Output follows `first`'s segment order, then span order along each
/// polyline; deterministic for a fixed pair of inputs.
pub fn intersections<'a>(
    first: &'a LineNetwork,
    second: &'a LineNetwork,
) -> Vec<SegmentIntersection<'a>> {
    let (first, _) = first.screen();
    let (second, _) = second.screen();
    intersections_of(&first, &second)
}

pub(crate) fn intersections_of<'a>(
    first: &[&'a PipeSegment],
    second: &[&'a PipeSegment],
) -> Vec<SegmentIntersection<'a>> {
    let spans: Vec<Span<'a>> = second
        .iter()
        .copied()
        .flat_map(|seg| {
            seg.geometry
                .lines()
                .map(move |line| Span { line, segment: seg })
        })
        .collect();
    debug!(
        "indexing {} spans of {} segments",
        spans.len(),
        second.len()
    );
    let tree = RTree::bulk_load(spans);

    let mut out = Vec::new();
    // Most segments cross at most a couple of others.
    let mut hits: SmallVec<[SegmentIntersection<'a>; 2]> = SmallVec::new();
    for &seg in first {
        hits.clear();
        for line in seg.geometry.lines() {
            let query = Span { line, segment: seg };
            for span in tree.locate_in_envelope_intersecting(&query.envelope()) {
                if let Some(LineIntersection::SinglePoint { intersection, .. }) =
                    line_intersection(line, span.line)
                {
                    hits.push(SegmentIntersection {
                        point: intersection,
                        first: seg,
                        second: span.segment,
                    });
                }
            }
        }
        if !hits.is_empty() {
            trace!("{}: {} crossings", seg.id, hits.len());
        }
        out.extend(hits.drain(..));
    }
    out
}
