//! Per-vessel trajectory construction, fanned out over the rayon pool.

use crate::assembler::{assemble, resolve_ship_attributes};
use crate::config::TrajectoryConfig;
use crate::model::{AisPoint, TrajectoryRecord};
use crate::outlier::remove_outliers;
use crate::segmenter::segment;
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;

/// Bookkeeping for one vessel's run through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VesselSummary {
    pub mmsi: u32,
    pub input_points: usize,
    pub outliers: usize,
    /// Cleaned points that fell in spans too short to become a record.
    pub dropped_points: usize,
    pub trajectories: usize,
}

#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub trajectories: Vec<TrajectoryRecord>,
    pub vessels: Vec<VesselSummary>,
}

impl BuildOutcome {
    pub fn outliers(&self) -> usize {
        self.vessels.iter().map(|v| v.outliers).sum()
    }

    pub fn dropped_points(&self) -> usize {
        self.vessels.iter().map(|v| v.dropped_points).sum()
    }
}

/// Builds the trajectories of a single vessel.
///
/// Points are sorted by timestamp first; records come out in ascending
/// time order.
pub fn build_vessel(
    mmsi: u32,
    mut points: Vec<AisPoint>,
    config: &TrajectoryConfig,
) -> (Vec<TrajectoryRecord>, VesselSummary) {
    let input_points = points.len();
    points.sort_by_key(|p| p.timestamp);

    let points = remove_outliers(points, config);
    let ship = resolve_ship_attributes(&points);

    let mut records = Vec::new();
    let mut dropped_points = 0;
    for span in segment(&points, config) {
        match assemble(mmsi, &points, span, &ship, config) {
            Some(record) => records.push(record),
            None => dropped_points += span.len(),
        }
    }

    let summary = VesselSummary {
        mmsi,
        input_points,
        outliers: input_points - points.len(),
        dropped_points,
        trajectories: records.len(),
    };
    if dropped_points > 0 {
        debug!(
            "mmsi {mmsi}: {dropped_points} point(s) in spans too short for a trajectory"
        );
    }
    (records, summary)
}

pub fn group_by_vessel(points: Vec<AisPoint>) -> HashMap<u32, Vec<AisPoint>> {
    let mut groups: HashMap<u32, Vec<AisPoint>> = HashMap::new();
    for point in points {
        groups.entry(point.mmsi).or_default().push(point);
    }
    groups
}

/// Groups points by vessel and builds every vessel independently on the
/// current rayon pool. Vessel order in the result is unspecified.
pub fn build_trajectories(points: Vec<AisPoint>, config: &TrajectoryConfig) -> BuildOutcome {
    let groups = group_by_vessel(points);
    debug!("building trajectories for {} vessel(s)", groups.len());

    let (trajectories, vessels): (Vec<Vec<TrajectoryRecord>>, Vec<VesselSummary>) = groups
        .into_par_iter()
        .map(|(mmsi, points)| build_vessel(mmsi, points, config))
        .unzip();

    BuildOutcome {
        trajectories: trajectories.into_iter().flatten().collect(),
        vessels,
    }
}
