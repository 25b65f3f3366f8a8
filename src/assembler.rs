//! Turns one span of a vessel's cleaned points into a trajectory record.

use crate::config::TrajectoryConfig;
use crate::mode::{dominant, mode, NaPolicy};
use crate::model::{
    AisPoint, ShipAttributes, ShipType, TemporalSequence, TrajectoryGeometry, TrajectoryPoint,
    TrajectoryRecord,
};
use crate::segmenter::Span;
use crate::temporal::{build_sequence, MissingValues};

/// Labels the AIS export uses for "not known".
const UNKNOWN_LABELS: [&str; 2] = ["Unknown", "Undefined"];

fn known(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !UNKNOWN_LABELS.contains(v))
        .map(str::to_owned)
}

/// Most frequent known static attributes over the vessel's whole history.
pub fn resolve_ship_attributes(points: &[AisPoint]) -> ShipAttributes {
    ShipAttributes {
        imo: dominant(points.iter().map(|p| p.imo)),
        name: dominant(points.iter().map(|p| known(&p.name))),
        callsign: dominant(points.iter().map(|p| known(&p.callsign))),
        mobile_type: dominant(points.iter().map(|p| known(&p.mobile_type))),
        position_fixing_device: dominant(points.iter().map(|p| known(&p.position_fixing_device))),
        ship_type: dominant(
            points
                .iter()
                .map(|p| p.ship_type.clone().filter(|t| *t != ShipType::Undefined)),
        ),
        data_source: dominant(points.iter().map(|p| p.data_source)),
        a: dominant(points.iter().map(|p| p.a)),
        b: dominant(points.iter().map(|p| p.b)),
        c: dominant(points.iter().map(|p| p.c)),
        d: dominant(points.iter().map(|p| p.d)),
    }
}

fn measured<F>(points: &[AisPoint], value: F) -> Option<TemporalSequence>
where
    F: Fn(&AisPoint) -> Option<f64>,
{
    build_sequence(
        points.iter().map(|p| (p.timestamp, value(p))),
        MissingValues::Drop,
    )
}

/// Builds the record for `span`, or `None` when the span is malformed or
/// holds no more than `min_points_per_trajectory` points.
pub fn assemble(
    mmsi: u32,
    points: &[AisPoint],
    span: Span,
    ship: &ShipAttributes,
    config: &TrajectoryConfig,
) -> Option<TrajectoryRecord> {
    if span.to < span.from as isize || span.to as usize >= points.len() {
        return None;
    }
    if span.len() <= config.min_points_per_trajectory {
        return None;
    }

    let working = &points[span.from..=span.to as usize];
    let first = working.first()?;
    let last = working.last()?;

    let (eta, navigational_status, destination) = mode(
        working
            .iter()
            .map(|p| (p.eta, p.navigational_status.clone(), p.destination.clone())),
        NaPolicy::Retain,
    )?;

    let trajectory = TrajectoryGeometry {
        points: working
            .iter()
            .map(|p| TrajectoryPoint {
                timestamp: p.timestamp,
                longitude: p.longitude,
                latitude: p.latitude,
            })
            .collect(),
    };

    Some(TrajectoryRecord {
        mmsi,
        start: first.timestamp,
        end: last.timestamp,
        duration: last.timestamp - first.timestamp,
        inferred_stopped: span.inferred_stopped,
        trajectory,
        rot: measured(working, |p| p.rot),
        heading: measured(working, |p| p.heading),
        draught: measured(working, |p| p.draught),
        navigational_status,
        destination,
        eta,
        ship: ship.clone(),
    })
}
