use geo::{Coordinate, LineString};
use thiserror::Error;

/// Sentinel used by the source attribute scheme for "no data".
const SENTINEL: f64 = -9999.;

/// The utility system a pipe belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtilityKind {
    Storm,
    SanitarySewer,
    Water,
}

impl UtilityKind {
    /// Short display name, as used in crossing labels.
    pub fn name(&self) -> &'static str {
        match self {
            UtilityKind::Storm => "Storm",
            UtilityKind::SanitarySewer => "Sewer",
            UtilityKind::Water => "Water",
        }
    }
}

/// Normalize a raw invert elevation from the source attribute scheme.
///
/// Both `0` and `-9999` mean "missing" upstream; non-finite values are
/// also treated as missing so sentinel magic never reaches arithmetic.
pub fn normalize_invert(raw: f64) -> Option<f64> {
    if raw == 0. || raw == SENTINEL || !raw.is_finite() {
        None
    } else {
        Some(raw)
    }
}

/// Normalize a raw nominal diameter (inches). `0`, `-9999` and anything
/// non-positive mean "unknown".
pub fn normalize_diameter(raw: f64) -> Option<f64> {
    if raw <= 0. || !raw.is_finite() {
        None
    } else {
        Some(raw)
    }
}

/// A single pipe run between two structures.
///
/// Coordinates are planar projected units (feet); inverts are elevations
/// in the same vertical unit; diameters are nominal inches. The first
/// vertex of `geometry` is the upstream end, the last the downstream end.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSegment {
    /// Stable facility identifier.
    pub id: String,
    pub geometry: LineString<f64>,
    /// Recorded pipe length; expected to match the geometric length.
    pub length: f64,
    /// Nominal diameter in inches, `None` when unknown.
    pub diameter: Option<f64>,
    pub upstream_invert: Option<f64>,
    pub downstream_invert: Option<f64>,
    pub utility: UtilityKind,
    /// Pipe material, informational only.
    pub material: Option<String>,
}

impl PipeSegment {
    /// Upstream endpoint, `None` for an empty geometry.
    pub fn upstream(&self) -> Option<Coordinate<f64>> {
        self.geometry.0.first().copied()
    }

    /// Downstream endpoint, `None` for an empty geometry.
    pub fn downstream(&self) -> Option<Coordinate<f64>> {
        self.geometry.0.last().copied()
    }

    /// Slope in elevation units per unit length, positive when falling
    /// downstream. Requires both inverts; a degenerate recorded length
    /// yields a flat pipe rather than a division error.
    pub fn slope(&self) -> Option<f64> {
        let up = self.upstream_invert?;
        let down = self.downstream_invert?;
        if self.length > 0. {
            Some((up - down) / self.length)
        } else {
            Some(0.)
        }
    }

    /// Checks the segment carries geometry usable for intersection
    /// testing.
    pub fn geometry_fault(&self) -> Option<GeometryFault> {
        if self.geometry.0.len() < 2 {
            return Some(GeometryFault::TooFewVertices);
        }
        if self
            .geometry
            .0
            .iter()
            .any(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Some(GeometryFault::NonFiniteCoordinate);
        }
        None
    }
}

/// Why a segment was excluded from intersection testing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFault {
    #[error("segment has fewer than two vertices")]
    TooFewVertices,
    #[error("segment has a non-finite coordinate")]
    NonFiniteCoordinate,
}

/// A screened-out segment, reported alongside the assembled records.
///
/// One bad segment never aborts a run; it is dropped from its network's
/// passes and surfaces here instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub utility: UtilityKind,
    pub segment_id: String,
    pub fault: GeometryFault,
}

/// An ordered collection of pipe segments of one utility system.
///
/// Built by the ingestion layer, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LineNetwork {
    kind: UtilityKind,
    segments: Vec<PipeSegment>,
}

impl LineNetwork {
    pub fn new(kind: UtilityKind, segments: Vec<PipeSegment>) -> Self {
        LineNetwork { kind, segments }
    }

    pub fn kind(&self) -> UtilityKind {
        self.kind
    }

    pub fn segments(&self) -> &[PipeSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Partition into geometrically usable segments and diagnostics for
    /// the rest. Segment order is preserved.
    pub(crate) fn screen(&self) -> (Vec<&PipeSegment>, Vec<Diagnostic>) {
        let mut usable = Vec::with_capacity(self.segments.len());
        let mut diagnostics = Vec::new();
        for segment in &self.segments {
            match segment.geometry_fault() {
                None => usable.push(segment),
                Some(fault) => diagnostics.push(Diagnostic {
                    utility: self.kind,
                    segment_id: segment.id.clone(),
                    fault,
                }),
            }
        }
        (usable, diagnostics)
    }
}

/// Bare-bones segment constructor shared across the test modules.
#[cfg(test)]
pub(crate) fn test_segment(
    id: &str,
    coords: Vec<(f64, f64)>,
    length: f64,
    up: Option<f64>,
    down: Option<f64>,
    utility: UtilityKind,
) -> PipeSegment {
    PipeSegment {
        id: id.to_owned(),
        geometry: LineString::from(coords),
        length,
        diameter: None,
        upstream_invert: up,
        downstream_invert: down,
        utility,
        material: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::test_segment as segment;

    #[test]
    fn invert_sentinels_normalize_to_missing() {
        assert_eq!(normalize_invert(0.), None);
        assert_eq!(normalize_invert(-9999.), None);
        assert_eq!(normalize_invert(f64::NAN), None);
        assert_eq!(normalize_invert(231.65), Some(231.65));
        assert_eq!(normalize_invert(-4.2), Some(-4.2));
    }

    #[test]
    fn diameter_sentinels_normalize_to_missing() {
        assert_eq!(normalize_diameter(0.), None);
        assert_eq!(normalize_diameter(-9999.), None);
        assert_eq!(normalize_diameter(24.), Some(24.));
    }

    #[test]
    fn slope_requires_both_inverts() {
        let seg = segment(
            "SW-1",
            vec![(0., 0.), (100., 0.)],
            100.,
            Some(100.),
            None,
            UtilityKind::Storm,
        );
        assert_eq!(seg.slope(), None);
    }

    #[test]
    fn zero_length_degenerates_to_flat_slope() {
        let seg = segment(
            "SW-2",
            vec![(0., 0.), (0., 0.)],
            0.,
            Some(100.),
            Some(90.),
            UtilityKind::Storm,
        );
        assert_eq!(seg.slope(), Some(0.));
    }

    #[test]
    fn screen_reports_bad_geometry() {
        let good = segment(
            "SN-1",
            vec![(0., 0.), (10., 0.)],
            10.,
            None,
            None,
            UtilityKind::SanitarySewer,
        );
        let stub = segment(
            "SN-2",
            vec![(3., 3.)],
            0.,
            None,
            None,
            UtilityKind::SanitarySewer,
        );
        let bent = segment(
            "SN-3",
            vec![(0., 0.), (f64::NAN, 1.)],
            1.,
            None,
            None,
            UtilityKind::SanitarySewer,
        );
        let net = LineNetwork::new(UtilityKind::SanitarySewer, vec![good, stub, bent]);

        let (usable, diagnostics) = net.screen();
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].id, "SN-1");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].segment_id, "SN-2");
        assert_eq!(diagnostics[0].fault, GeometryFault::TooFewVertices);
        assert_eq!(diagnostics[1].fault, GeometryFault::NonFiniteCoordinate);
    }
}
