//! Stepwise temporal sequences built from per-report measurements.

use crate::model::{TemporalInstant, TemporalSequence};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValues {
    Drop,
    Keep,
}

/// Compacts ordered `(timestamp, value)` samples into a stepwise sequence.
///
/// Runs of equal values collapse onto their first sample. The last sample
/// is always kept so the sequence ends at the last report, even when it
/// repeats the value before it. Returns `None` when no sample is left,
/// which callers must read as "absent" rather than zero.
pub fn build_sequence<I>(samples: I, missing: MissingValues) -> Option<TemporalSequence>
where
    I: IntoIterator<Item = (NaiveDateTime, Option<f64>)>,
{
    let mut instants: Vec<TemporalInstant> = Vec::new();
    let mut last_raw: Option<TemporalInstant> = None;

    for (timestamp, value) in samples {
        if missing == MissingValues::Drop && value.map_or(true, f64::is_nan) {
            continue;
        }
        let value = value.filter(|v| !v.is_nan());
        let sample = TemporalInstant { timestamp, value };
        if last_raw.map_or(true, |prev| prev.value != value) {
            instants.push(sample);
        }
        last_raw = Some(sample);
    }

    let last_raw = last_raw?;
    if instants.last().map(|i| i.timestamp) != Some(last_raw.timestamp) {
        instants.push(last_raw);
    }
    Some(TemporalSequence { instants })
}
