use geo::Coordinate;
use log::debug;

use crate::classify::{classify, Classification, ClassifyParams, CrossingType};
use crate::intersect::{intersections_of, SegmentIntersection};
use crate::interpolate::invert_at;
use crate::network::{Diagnostic, LineNetwork, PipeSegment, UtilityKind};

/// Which two networks a record came from.
///
/// The variant's word order fixes the roles: the utility named first is
/// the record's `first` contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    StormSewer,
    StormWater,
    SewerWater,
}

impl PairKind {
    fn utilities(&self) -> (UtilityKind, UtilityKind) {
        match self {
            PairKind::StormSewer => (UtilityKind::Storm, UtilityKind::SanitarySewer),
            PairKind::StormWater => (UtilityKind::Storm, UtilityKind::Water),
            PairKind::SewerWater => (UtilityKind::SanitarySewer, UtilityKind::Water),
        }
    }
}

/// Snapshot of one contributing pipe, evaluated at the crossing.
///
/// Copied out of the segment so a record stands on its own once the
/// input networks are gone; the roles keep the two contributors'
/// attributes apart without the field-name collisions a flat merge
/// would produce.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub id: String,
    /// Nominal diameter in inches, if known.
    pub diameter: Option<f64>,
    pub length: f64,
    pub slope: Option<f64>,
    /// Invert elevation interpolated at the crossing point.
    pub invert: Option<f64>,
}

impl SegmentSummary {
    fn at(segment: &PipeSegment, point: Coordinate<f64>) -> Self {
        SegmentSummary {
            id: segment.id.clone(),
            diameter: segment.diameter,
            length: segment.length,
            slope: segment.slope(),
            invert: invert_at(segment, point),
        }
    }
}

/// One classified crossing point. Immutable once assembled; never
/// re-classified.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingRecord {
    pub point: Coordinate<f64>,
    pub pair: PairKind,
    pub first: SegmentSummary,
    pub second: SegmentSummary,
    /// `None` iff `kind` is a missing-data outcome.
    pub separation: Option<f64>,
    pub kind: CrossingType,
    pub pipes_overlap: bool,
}

impl CrossingRecord {
    fn build(pair: PairKind, hit: SegmentIntersection<'_>, params: &ClassifyParams) -> Self {
        let first = SegmentSummary::at(hit.first, hit.point);
        let second = SegmentSummary::at(hit.second, hit.point);
        let Classification {
            separation,
            kind,
            pipes_overlap,
        } = classify(
            first.invert,
            first.diameter,
            second.invert,
            second.diameter,
            params,
        );
        CrossingRecord {
            point: hit.point,
            pair,
            first,
            second,
            separation,
            kind,
            pipes_overlap,
        }
    }

    /// Human-readable crossing label for table writers, e.g.
    /// "Storm over Sewer", "Water Data Missing", "Bad Data?".
    pub fn label(&self) -> String {
        let (first, second) = self.pair.utilities();
        match self.kind {
            CrossingType::FirstOverSecond => format!("{} over {}", first.name(), second.name()),
            CrossingType::SecondOverFirst => format!("{} over {}", second.name(), first.name()),
            CrossingType::SuspectData => "Bad Data?".to_owned(),
            CrossingType::FirstDataMissing => format!("{} Data Missing", first.name()),
            CrossingType::SecondDataMissing => format!("{} Data Missing", second.name()),
            // Second network first and no "Data", matching the strings
            // the legacy table consumers key on.
            CrossingType::BothDataMissing => {
                format!("{} and {} Missing", second.name(), first.name())
            }
        }
    }
}

/// Everything one run produces: the merged records plus diagnostics for
/// segments that were excluded from testing.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub records: Vec<CrossingRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs crossing detection over the three network pairs and merges the
/// results.
///
/// The passes run in the order Storm↔Sewer, Storm↔Water, Sewer↔Water and
/// are concatenated in that order; each pass's internal order is
/// preserved but no cross-pair ordering is promised. Each network is
/// screened exactly once, so a bad segment appears once in
/// `diagnostics` and in no pass; nothing here aborts the run.
///
/// Water mains carry no invert data by design, so every water-involving
/// record classifies as a missing-data outcome with no separation. That
/// is the expected result, not an error.
pub fn assemble(
    storm: &LineNetwork,
    sewer: &LineNetwork,
    water: &LineNetwork,
    params: &ClassifyParams,
) -> Assembly {
    let (storm_ok, mut diagnostics) = storm.screen();
    let (sewer_ok, more) = sewer.screen();
    diagnostics.extend(more);
    let (water_ok, more) = water.screen();
    diagnostics.extend(more);

    let passes: [(PairKind, &[&PipeSegment], &[&PipeSegment]); 3] = [
        (PairKind::StormSewer, &storm_ok, &sewer_ok),
        (PairKind::StormWater, &storm_ok, &water_ok),
        (PairKind::SewerWater, &sewer_ok, &water_ok),
    ];

    let mut records = Vec::new();
    for &(pair, first, second) in passes.iter() {
        let hits = intersections_of(first, second);
        debug!("{:?}: {} crossings", pair, hits.len());
        records.extend(
            hits.into_iter()
                .map(|hit| CrossingRecord::build(pair, hit, params)),
        );
    }

    debug!(
        "assembled {} records, {} segments screened out",
        records.len(),
        diagnostics.len()
    );
    Assembly {
        records,
        diagnostics,
    }
}
