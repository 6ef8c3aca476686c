/// Diameters are nominal inches; elevations are feet.
const INCHES_PER_FOOT: f64 = 12.;

/// Categorical outcome of a single crossing test.
///
/// "First"/"Second" refer to the roles the two networks played in the
/// intersection pass, not to any fixed utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingType {
    FirstOverSecond,
    SecondOverFirst,
    /// Separation exceeded the plausibility threshold; the underlying
    /// invert data is suspect.
    SuspectData,
    FirstDataMissing,
    SecondDataMissing,
    BothDataMissing,
}

impl CrossingType {
    /// True for the three missing-data outcomes, which always carry a
    /// `None` separation.
    pub fn is_data_missing(&self) -> bool {
        matches!(
            self,
            CrossingType::FirstDataMissing
                | CrossingType::SecondDataMissing
                | CrossingType::BothDataMissing
        )
    }
}

/// Classification tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyParams {
    /// A separation strictly greater than this (in elevation units) is
    /// reported as [`CrossingType::SuspectData`]. Twenty feet of clear
    /// space between buried pipes is not credible data.
    pub suspect_threshold: f64,
}

impl Default for ClassifyParams {
    fn default() -> Self {
        ClassifyParams {
            suspect_threshold: 20.,
        }
    }
}

/// Result of classifying one crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Signed clear distance between the upper pipe's invert and the top
    /// of the lower pipe; `None` iff `kind` is a missing-data outcome.
    pub separation: Option<f64>,
    pub kind: CrossingType,
    /// True iff the pipe envelopes physically intersect
    /// (`separation < 0` strictly; exactly zero is touching, not
    /// overlapping).
    pub pipes_overlap: bool,
}

/// Computes the vertical separation and crossing category for a pair of
/// interpolated inverts.
///
/// The lower pipe's wall occupies the space above its invert, so its
/// diameter (inches, converted to feet) is subtracted from the gap; an
/// unknown diameter contributes no wall.
///
/// Exactly equal elevations are resolved deterministically: the
/// smaller-diameter pipe is deemed on top (an unknown diameter compares
/// as zero), and if the diameters tie as well the first network is on
/// top.
pub fn classify(
    first_elevation: Option<f64>,
    first_diameter: Option<f64>,
    second_elevation: Option<f64>,
    second_diameter: Option<f64>,
    params: &ClassifyParams,
) -> Classification {
    let (first, second) = match (first_elevation, second_elevation) {
        (None, None) => return missing(CrossingType::BothDataMissing),
        (None, Some(_)) => return missing(CrossingType::FirstDataMissing),
        (Some(_), None) => return missing(CrossingType::SecondDataMissing),
        (Some(first), Some(second)) => (first, second),
    };

    let first_on_top = if first != second {
        first > second
    } else {
        first_diameter.unwrap_or(0.) <= second_diameter.unwrap_or(0.)
    };

    let (higher, lower, lower_diameter) = if first_on_top {
        (first, second, second_diameter)
    } else {
        (second, first, first_diameter)
    };
    let separation = higher - (lower + lower_diameter.unwrap_or(0.) / INCHES_PER_FOOT);

    let kind = if separation > params.suspect_threshold {
        CrossingType::SuspectData
    } else if first_on_top {
        CrossingType::FirstOverSecond
    } else {
        CrossingType::SecondOverFirst
    };

    Classification {
        separation: Some(separation),
        kind,
        pipes_overlap: separation < 0.,
    }
}

fn missing(kind: CrossingType) -> Classification {
    Classification {
        separation: None,
        kind,
        pipes_overlap: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn params() -> ClassifyParams {
        ClassifyParams::default()
    }

    #[test]
    fn presence_table() {
        let c = classify(None, None, None, None, &params());
        assert_eq!(c.kind, CrossingType::BothDataMissing);
        assert_eq!(c.separation, None);

        let c = classify(None, None, Some(80.), Some(8.), &params());
        assert_eq!(c.kind, CrossingType::FirstDataMissing);
        assert_eq!(c.separation, None);

        let c = classify(Some(95.), Some(24.), None, None, &params());
        assert_eq!(c.kind, CrossingType::SecondDataMissing);
        assert_eq!(c.separation, None);

        let c = classify(Some(95.), Some(24.), Some(80.), Some(8.), &params());
        assert!(c.separation.is_some());
    }

    #[test]
    fn lower_pipe_wall_is_subtracted() {
        // 95 over 80 with an 8 inch lower pipe: 95 - (80 + 8/12).
        let c = classify(Some(95.), Some(24.), Some(80.), Some(8.), &params());
        assert_eq!(c.kind, CrossingType::FirstOverSecond);
        assert_relative_eq!(c.separation.unwrap(), 95. - 80. - 8. / 12.);
        assert!(!c.pipes_overlap);
    }

    #[test]
    fn direction_follows_elevation() {
        let c = classify(Some(80.), Some(8.), Some(95.), Some(24.), &params());
        assert_eq!(c.kind, CrossingType::SecondOverFirst);
        assert_relative_eq!(c.separation.unwrap(), 95. - 80. - 8. / 12.);
    }

    #[test]
    fn unknown_diameter_contributes_no_wall() {
        let c = classify(Some(95.), None, Some(80.), None, &params());
        assert_relative_eq!(c.separation.unwrap(), 15.);
    }

    #[test]
    fn threshold_is_strict() {
        // Exactly at the threshold is still a plausible crossing.
        let c = classify(Some(120.), None, Some(100.), None, &params());
        assert_eq!(c.kind, CrossingType::FirstOverSecond);
        assert_relative_eq!(c.separation.unwrap(), 20.);

        let c = classify(Some(120.0001), None, Some(100.), None, &params());
        assert_eq!(c.kind, CrossingType::SuspectData);
    }

    #[test]
    fn suspect_overrides_direction() {
        let c = classify(Some(100.), None, Some(125.), None, &params());
        assert_eq!(c.kind, CrossingType::SuspectData);
        assert_relative_eq!(c.separation.unwrap(), 25.);
    }

    #[test]
    fn overlap_is_strict_below_zero() {
        // Touching exactly: 100 over 99 with a 12 inch lower pipe.
        let c = classify(Some(100.), None, Some(99.), Some(12.), &params());
        assert_relative_eq!(c.separation.unwrap(), 0.);
        assert!(!c.pipes_overlap);

        let c = classify(Some(100.), None, Some(99.0001), Some(12.), &params());
        assert!(c.separation.unwrap() < 0.);
        assert!(c.pipes_overlap);
    }

    #[test]
    fn equal_elevations_put_smaller_diameter_on_top() {
        let c = classify(Some(90.), Some(12.), Some(90.), Some(8.), &params());
        assert_eq!(c.kind, CrossingType::SecondOverFirst);
        // The 12 inch pipe is below; its wall eats a foot.
        assert_relative_eq!(c.separation.unwrap(), -1.);
        assert!(c.pipes_overlap);

        // Mirrored arguments give the mirrored outcome.
        let c = classify(Some(90.), Some(8.), Some(90.), Some(12.), &params());
        assert_eq!(c.kind, CrossingType::FirstOverSecond);
        assert_relative_eq!(c.separation.unwrap(), -1.);
    }

    #[test]
    fn full_tie_favors_first_network() {
        let c = classify(Some(90.), None, Some(90.), None, &params());
        assert_eq!(c.kind, CrossingType::FirstOverSecond);
        assert_relative_eq!(c.separation.unwrap(), 0.);
        assert!(!c.pipes_overlap);
    }
}
