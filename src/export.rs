//! Flat CSV rows handed to the bulk insert stage.
//!
//! Missing values are replaced by the warehouse sentinels here and nowhere
//! else.

use crate::model::{TemporalSequence, TrajectoryRecord};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::io::Write;

pub const UNKNOWN_INT_VALUE: i64 = -1;
pub const UNKNOWN_FLOAT_VALUE: f64 = -1.0;
pub const UNKNOWN_STRING_VALUE: &str = "Unknown";
pub const UNKNOWN_DESTINATION: &str = "UNKNOWN DESTINATION";

/// `yyyymmdd` smart key of a date.
pub fn date_smart_id(datetime: Option<NaiveDateTime>) -> i64 {
    datetime.map_or(UNKNOWN_INT_VALUE, |d| {
        i64::from(d.year()) * 10_000 + i64::from(d.month()) * 100 + i64::from(d.day())
    })
}

/// `hhmmss` smart key of a time of day.
pub fn time_smart_id(datetime: Option<NaiveDateTime>) -> i64 {
    datetime.map_or(UNKNOWN_INT_VALUE, |d| {
        i64::from(d.hour()) * 10_000 + i64::from(d.minute()) * 100 + i64::from(d.second())
    })
}

#[derive(Debug, serde::Serialize)]
pub struct TrajectoryRow {
    pub start_date_id: i64,
    pub start_time_id: i64,
    pub end_date_id: i64,
    pub end_time_id: i64,
    pub eta_date_id: i64,
    pub eta_time_id: i64,
    pub nav_status: String,
    pub duration: i64,
    pub trajectory: String,
    pub infer_stopped: bool,
    pub destination: String,
    pub rot: Option<String>,
    pub heading: Option<String>,
    pub draught: Option<String>,
    pub imo: i64,
    pub mmsi: u32,
    pub mobile_type: String,
    pub ship_type: String,
    pub ship_name: String,
    pub ship_callsign: String,
    pub location_system_type: String,
    pub position_fixing_device: String,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNKNOWN_STRING_VALUE.to_owned())
}

fn sequence_text(sequence: &Option<TemporalSequence>) -> Option<String> {
    sequence.as_ref().map(TemporalSequence::to_string)
}

impl From<&TrajectoryRecord> for TrajectoryRow {
    fn from(record: &TrajectoryRecord) -> Self {
        let ship = &record.ship;
        Self {
            start_date_id: date_smart_id(Some(record.start)),
            start_time_id: time_smart_id(Some(record.start)),
            end_date_id: date_smart_id(Some(record.end)),
            end_time_id: time_smart_id(Some(record.end)),
            eta_date_id: date_smart_id(record.eta),
            eta_time_id: time_smart_id(record.eta),
            nav_status: or_unknown(
                record
                    .navigational_status
                    .as_ref()
                    .map(|s| s.label().to_owned()),
            ),
            duration: record.duration.num_seconds(),
            trajectory: record.trajectory.to_string(),
            infer_stopped: record.inferred_stopped,
            destination: record
                .destination
                .clone()
                .unwrap_or_else(|| UNKNOWN_DESTINATION.to_owned()),
            rot: sequence_text(&record.rot),
            heading: sequence_text(&record.heading),
            draught: sequence_text(&record.draught),
            imo: ship.imo.map_or(UNKNOWN_INT_VALUE, i64::from),
            mmsi: record.mmsi,
            mobile_type: or_unknown(ship.mobile_type.clone()),
            ship_type: or_unknown(ship.ship_type.as_ref().map(|t| t.label().to_owned())),
            ship_name: or_unknown(ship.name.clone()),
            ship_callsign: or_unknown(ship.callsign.clone()),
            location_system_type: or_unknown(ship.data_source.map(|s| format!("{s:?}"))),
            position_fixing_device: or_unknown(ship.position_fixing_device.clone()),
            a: ship.a.unwrap_or(UNKNOWN_FLOAT_VALUE),
            b: ship.b.unwrap_or(UNKNOWN_FLOAT_VALUE),
            c: ship.c.unwrap_or(UNKNOWN_FLOAT_VALUE),
            d: ship.d.unwrap_or(UNKNOWN_FLOAT_VALUE),
        }
    }
}

pub fn write_to<W: Write>(writer: W, records: &[TrajectoryRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(TrajectoryRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_trajectories(path: &str, records: &[TrajectoryRecord]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("failed to create {path}"))?;
    write_to(file, records).with_context(|| format!("writing trajectories to {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        NavigationalStatus, ShipAttributes, TemporalInstant, TrajectoryGeometry, TrajectoryPoint,
    };
    use chrono::{Duration, NaiveDate};

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, d)
            .and_then(|date| date.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn smart_ids() {
        assert_eq!(date_smart_id(Some(at(31, 10, 10, 20))), 20220131);
        assert_eq!(date_smart_id(Some(at(2, 0, 0, 0))), 20220102);
        assert_eq!(date_smart_id(None), -1);
        assert_eq!(time_smart_id(Some(at(1, 11, 11, 11))), 111111);
        assert_eq!(time_smart_id(Some(at(1, 4, 5, 6))), 40506);
        assert_eq!(time_smart_id(Some(at(1, 0, 18, 0))), 1800);
        assert_eq!(time_smart_id(None), UNKNOWN_INT_VALUE);
    }

    fn record() -> TrajectoryRecord {
        let start = at(31, 13, 14, 15);
        let end = start + Duration::minutes(2);
        TrajectoryRecord {
            mmsi: 219_000_001,
            start,
            end,
            duration: end - start,
            inferred_stopped: false,
            trajectory: TrajectoryGeometry {
                points: vec![
                    TrajectoryPoint { timestamp: start, longitude: 10.5, latitude: 56.25 },
                    TrajectoryPoint { timestamp: end, longitude: 10.75, latitude: 56.5 },
                ],
            },
            rot: None,
            heading: Some(TemporalSequence {
                instants: vec![
                    TemporalInstant { timestamp: start, value: Some(90.0) },
                    TemporalInstant { timestamp: end, value: Some(91.5) },
                ],
            }),
            draught: None,
            navigational_status: Some(NavigationalStatus::Under),
            destination: None,
            eta: None,
            ship: ShipAttributes {
                imo: Some(9_428_217),
                a: Some(109.0),
                ..ShipAttributes::default()
            },
        }
    }

    #[test]
    fn row_substitutes_sentinels() {
        let row = TrajectoryRow::from(&record());
        assert_eq!(row.start_date_id, 20220131);
        assert_eq!(row.start_time_id, 131415);
        assert_eq!(row.end_time_id, 131615);
        assert_eq!(row.eta_date_id, -1);
        assert_eq!(row.duration, 120);
        assert_eq!(row.destination, UNKNOWN_DESTINATION);
        assert_eq!(row.nav_status, "Under way using engine");
        assert_eq!(row.ship_name, UNKNOWN_STRING_VALUE);
        assert_eq!(row.imo, 9_428_217);
        assert_eq!(row.a, 109.0);
        assert_eq!(row.b, UNKNOWN_FLOAT_VALUE);
        assert_eq!(row.rot, None);
        assert_eq!(
            row.trajectory,
            "[POINT(10.5 56.25)@2022-01-31 13:14:15,POINT(10.75 56.5)@2022-01-31 13:16:15]"
        );
        assert_eq!(
            row.heading.as_deref(),
            Some("Interp=Stepwise;[90@2022-01-31 13:14:15,91.5@2022-01-31 13:16:15]")
        );
    }

    #[test]
    fn writes_header_and_rows() {
        let mut out = Vec::new();
        write_to(&mut out, &[record(), record()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("start_date_id,start_time_id,end_date_id"));
        assert!(lines[1].contains("UNKNOWN DESTINATION"));
    }
}
