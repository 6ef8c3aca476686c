//! Locates every plan-view point where pairs of buried utility networks
//! (storm drainage, sanitary sewer, potable water) cross, and computes
//! which pipe is vertically above the other and by how much where the
//! invert data allows it.
//!
//! The engine is a pure batch computation: ingestion (projection, datum,
//! sentinel cleanup) and persistence are owned by the caller. Feed it
//! up to three [`LineNetwork`]s and [`assemble`] returns one merged
//! collection of classified [`CrossingRecord`]s plus diagnostics for
//! segments whose geometry was unusable.
//!
//! Pairwise crossing detection is also available on its own via
//! [`intersections`], and the interpolation and classification steps via
//! [`invert_at`] and [`classify`].
//!
//! # Usage
//!
//! ```rust
//! use geo::LineString;
//! use utility_crossings::{
//!     assemble, ClassifyParams, LineNetwork, PipeSegment, UtilityKind,
//! };
//!
//! let storm = LineNetwork::new(
//!     UtilityKind::Storm,
//!     vec![PipeSegment {
//!         id: "SW-1".into(),
//!         geometry: LineString::from(vec![(0., 5.), (10., 5.)]),
//!         length: 10.,
//!         diameter: Some(24.),
//!         upstream_invert: Some(100.),
//!         downstream_invert: Some(99.),
//!         utility: UtilityKind::Storm,
//!         material: None,
//!     }],
//! );
//! let sewer = LineNetwork::new(
//!     UtilityKind::SanitarySewer,
//!     vec![PipeSegment {
//!         id: "SN-1".into(),
//!         geometry: LineString::from(vec![(5., 0.), (5., 10.)]),
//!         length: 10.,
//!         diameter: Some(8.),
//!         upstream_invert: Some(95.),
//!         downstream_invert: Some(94.),
//!         utility: UtilityKind::SanitarySewer,
//!         material: None,
//!     }],
//! );
//! let water = LineNetwork::new(UtilityKind::Water, vec![]);
//!
//! let out = assemble(&storm, &sewer, &water, &ClassifyParams::default());
//! assert_eq!(out.records.len(), 1);
//! assert_eq!(out.records[0].label(), "Storm over Sewer");
//! ```

mod network;
pub use network::{
    normalize_diameter, normalize_invert, Diagnostic, GeometryFault, LineNetwork, PipeSegment,
    UtilityKind,
};

mod intersect;
pub use intersect::{intersections, SegmentIntersection};

mod interpolate;
pub use interpolate::invert_at;

mod classify;
pub use classify::{classify, Classification, ClassifyParams, CrossingType};

mod assemble;
pub use assemble::{assemble, Assembly, CrossingRecord, PairKind, SegmentSummary};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
