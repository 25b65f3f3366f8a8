//! Reading raw AIS CSV exports into cleaned position reports.

use crate::config::IngestConfig;
use crate::model::{AisPoint, Record};
use crate::projection::project;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::fs::File;
use std::io::Read;

/// Timestamp layout of the AIS export (`07/09/2021 00:00:00`).
pub const CSV_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const MIN_MMSI: u32 = 99_999_999;
const MAX_MMSI: u32 = 990_000_000;
const RESERVED_MMSI_LOW: u32 = 111_000_000;
const RESERVED_MMSI_HIGH: u32 = 112_000_000;

#[derive(Debug, Default)]
pub struct IngestSummary {
    pub points: Vec<AisPoint>,
    pub rows: usize,
    /// Rows failing the cleaning rules or outside the region.
    pub rejected: usize,
    /// Rows that could not be parsed at all.
    pub malformed: usize,
}

pub fn read_points(path: &str, config: &IngestConfig) -> Result<IngestSummary> {
    let file = File::open(path).with_context(|| format!("failed to open file {path}"))?;
    let summary = read_from(file, config).with_context(|| format!("reading {path}"))?;

    info!(
        "{} has {} of {} records passed ({} rejected, {} malformed).",
        path,
        summary.points.len(),
        summary.rows,
        summary.rejected,
        summary.malformed
    );
    Ok(summary)
}

/// Reads CSV rows positionally, skipping the header line.
pub fn read_from<R: Read>(reader: R, config: &IngestConfig) -> Result<IngestSummary> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut summary = IngestSummary::default();

    for (line, result) in rdr.deserialize().enumerate().skip(1) {
        summary.rows += 1;
        let record: Record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed row {}: {}", line + 1, e);
                summary.malformed += 1;
                continue;
            }
        };
        // skip this one.
        if !is_valid_record(&record, config) {
            summary.rejected += 1;
            continue;
        }
        match to_point(record) {
            Ok(point) => summary.points.push(point),
            Err(e) => {
                warn!("skipping row {}: {:#}", line + 1, e);
                summary.malformed += 1;
            }
        }
    }

    Ok(summary)
}

fn is_valid_record(record: &Record, config: &IngestConfig) -> bool {
    // implausible draught, missing is fine
    if record.draught.map_or(false, |d| d >= config.max_draught) {
        return false;
    }

    // missing dimensions do not pass
    if !record.width.map_or(false, |w| w < config.max_width)
        || !record.length.map_or(false, |l| l < config.max_length)
    {
        return false;
    }

    if record.mmsi <= MIN_MMSI || record.mmsi >= MAX_MMSI {
        return false;
    }
    if record.mmsi > RESERVED_MMSI_LOW && record.mmsi < RESERVED_MMSI_HIGH {
        return false;
    }

    // outside ROI range.
    config.region.contains(record.lon, record.lat)
}

fn to_point(record: Record) -> Result<AisPoint> {
    let timestamp = NaiveDateTime::parse_from_str(&record.timestamp, CSV_TIMESTAMP_FORMAT)
        .with_context(|| format!("bad timestamp {:?}", record.timestamp))?;
    let eta = record
        .eta
        .as_deref()
        .and_then(|eta| NaiveDateTime::parse_from_str(eta, CSV_TIMESTAMP_FORMAT).ok());

    Ok(AisPoint {
        mmsi: record.mmsi,
        timestamp,
        longitude: record.lon,
        latitude: record.lat,
        position: project(record.lon, record.lat)?,
        speed: record.sog,
        rot: record.rot,
        heading: record.heading,
        draught: record.draught,
        navigational_status: record.status,
        destination: record.destination,
        eta,
        imo: record.imo,
        name: record.name,
        callsign: record.callsign,
        mobile_type: record.type_mobile,
        position_fixing_device: record.type_device,
        ship_type: record.ship_type,
        data_source: record.data_source,
        a: record.a,
        b: record.b,
        c: record.c,
        d: record.d,
    })
}
