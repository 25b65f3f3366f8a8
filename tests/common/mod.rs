#![allow(dead_code)]

use ais_trajectory::config::KNOTS_PER_METER_SECONDS;
use ais_trajectory::model::{AisPoint, NavigationalStatus, Position, ShipType};
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const FERRY_MMSI: u32 = 219_000_431;
pub const FERRY_IMO: u32 = 9_353_113;

// metres per degree, close enough around 56N for fixture geometry
const METERS_PER_DEG_LAT: f64 = 111_320.0;
const METERS_PER_DEG_LON: f64 = 62_250.0;

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 1, 31)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .unwrap()
}

fn meters_per_minute(knots: f64) -> f64 {
    knots / KNOTS_PER_METER_SECONDS * 60.0
}

pub fn report(mmsi: u32, seconds: i64, x: f64, y: f64, speed: f64) -> AisPoint {
    let origin = Position::new(4_250_000.0, 3_200_000.0);
    AisPoint {
        mmsi,
        timestamp: start_time() + Duration::seconds(seconds),
        longitude: 11.0 + (x - origin.x) / METERS_PER_DEG_LON,
        latitude: 56.0 + (y - origin.y) / METERS_PER_DEG_LAT,
        position: Position::new(x, y),
        speed: Some(speed),
        heading: Some(45.0),
        draught: Some(5.2),
        navigational_status: Some(NavigationalStatus::Under),
        imo: Some(FERRY_IMO),
        name: Some("KATTEGAT FERRY".to_owned()),
        callsign: Some("OZFE".to_owned()),
        mobile_type: Some("Class A".to_owned()),
        position_fixing_device: Some("GPS".to_owned()),
        ship_type: Some(ShipType::Passenger),
        a: Some(80.0),
        b: Some(20.0),
        c: Some(10.0),
        d: Some(10.0),
        ..AisPoint::default()
    }
}

/// A ferry idling ten minutes at one port, crossing for half an hour at
/// 14 knots and idling ten minutes at the other port. One report a minute.
pub fn ferry_crossing() -> Vec<AisPoint> {
    let step = meters_per_minute(14.0);
    let (x0, y0) = (4_250_000.0, 3_200_000.0);
    let mut points = Vec::new();
    let mut minute = 0;

    for _ in 0..10 {
        let mut p = report(FERRY_MMSI, 60 * minute, x0, y0, 0.0);
        p.navigational_status = Some(NavigationalStatus::Moored);
        p.destination = Some("GRENAA".to_owned());
        points.push(p);
        minute += 1;
    }

    for i in 1..=30 {
        let offset = step * i as f64 / 2f64.sqrt();
        let mut p = report(FERRY_MMSI, 60 * minute, x0 + offset, y0 + offset, 14.0);
        p.destination = Some("GRENAA".to_owned());
        if i % 7 == 0 {
            // patchy static data must not split the vessel's identity
            p.imo = None;
            p.name = Some("Unknown".to_owned());
        }
        points.push(p);
        minute += 1;
    }

    let arrival = points[points.len() - 1].position;
    for _ in 0..10 {
        let mut p = report(FERRY_MMSI, 60 * minute, arrival.x, arrival.y, 0.0);
        p.navigational_status = Some(NavigationalStatus::Moored);
        p.destination = Some("HALMSTAD".to_owned());
        points.push(p);
        minute += 1;
    }

    points
}

/// Twenty reports of a vessel steaming at 10 knots, optionally with a
/// silence of `gap_seconds` inserted after the tenth report.
pub fn steady_transit(mmsi: u32, gap_seconds: Option<i64>) -> Vec<AisPoint> {
    let step = meters_per_minute(10.0);
    let mut points = Vec::new();
    let mut seconds = 0;
    let mut x = 4_250_000.0;

    for i in 0..20 {
        if i == 10 {
            if let Some(gap) = gap_seconds {
                // keep steaming through the silence so speeds stay plausible
                seconds += gap - 60;
                x += step * (gap - 60) as f64 / 60.0;
            }
        }
        points.push(report(mmsi, seconds, x, 3_200_000.0, 10.0));
        seconds += 60;
        x += step;
    }
    points
}
