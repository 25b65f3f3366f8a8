//! Speed based outlier removal for a single vessel.

use crate::config::TrajectoryConfig;
use crate::model::AisPoint;
use crate::speed::{assumed_speed, calculated_speed_knots};
use log::trace;

pub fn is_time_ordered(points: &[AisPoint]) -> bool {
    points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}

/// Removes every point whose assumed speed relative to the nearest kept
/// predecessor exceeds the speed threshold, or that shares its
/// predecessor's timestamp.
///
/// Each point is only ever compared against the last surviving point, so
/// dropping an outlier re-tests its successor against the new predecessor
/// in the same left-to-right pass. Kept points get their `speed` replaced
/// by the assumed speed; the first point is always kept untouched.
pub fn remove_outliers(points: Vec<AisPoint>, config: &TrajectoryConfig) -> Vec<AisPoint> {
    debug_assert!(
        is_time_ordered(&points),
        "points must be sorted by timestamp before outlier removal"
    );

    let mut kept: Vec<AisPoint> = Vec::with_capacity(points.len());
    for mut point in points {
        if let Some(prev) = kept.last() {
            match plausible_speed(prev, &point, config) {
                Some(speed) => point.speed = Some(speed),
                None => {
                    trace!(
                        "mmsi {}: dropping outlier at {}",
                        point.mmsi,
                        point.timestamp
                    );
                    continue;
                }
            }
        }
        kept.push(point);
    }
    kept
}

/// Assumed speed of `cur` coming from `prev`, or `None` if `cur` is an outlier.
fn plausible_speed(prev: &AisPoint, cur: &AisPoint, config: &TrajectoryConfig) -> Option<f64> {
    let elapsed = (cur.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
    if elapsed == 0.0 {
        return None;
    }

    let calculated = calculated_speed_knots(prev.position, cur.position, elapsed);
    let speed = assumed_speed(calculated, cur.speed, config.computed_vs_reported_knots);
    if speed > config.speed_threshold_knots {
        None
    } else {
        Some(speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KNOTS_PER_METER_SECONDS;
    use crate::model::Position;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, 31)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap()
    }

    // Vessel steaming east at `knots`, one report per minute.
    fn steaming(n: usize, knots: f64) -> Vec<AisPoint> {
        let step = knots / KNOTS_PER_METER_SECONDS * 60.0;
        (0..n)
            .map(|i| AisPoint {
                mmsi: 219_000_001,
                timestamp: t0() + Duration::seconds(60 * i as i64),
                position: Position::new(4_200_000.0 + step * i as f64, 3_300_000.0),
                speed: Some(knots),
                ..AisPoint::default()
            })
            .collect()
    }

    #[test]
    fn keeps_plausible_track() {
        let points = steaming(10, 12.0);
        let cleaned = remove_outliers(points, &TrajectoryConfig::default());
        assert_eq!(cleaned.len(), 10);
        for p in &cleaned[1..] {
            assert!((p.speed.unwrap() - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn first_point_is_never_classified() {
        let mut points = steaming(3, 10.0);
        points[0].speed = None;
        points[0].position = Position::new(0.0, 0.0);
        let cleaned = remove_outliers(points, &TrajectoryConfig::default());
        assert_eq!(cleaned[0].speed, None);
        assert_eq!(cleaned[0].position, Position::new(0.0, 0.0));
    }

    #[test]
    fn removes_position_spike_and_retests_successor() {
        let mut points = steaming(6, 10.0);
        points[3].position.y += 10_000.0;
        let spike_time = points[3].timestamp;

        let cleaned = remove_outliers(points, &TrajectoryConfig::default());
        assert_eq!(cleaned.len(), 5);
        assert!(cleaned.iter().all(|p| p.timestamp != spike_time));
        // point 4 now measured against point 2: two steps in two minutes
        assert!((cleaned[3].speed.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn cascades_over_consecutive_spikes() {
        let mut points = steaming(8, 10.0);
        points[3].position.y += 10_000.0;
        points[4].position.y += 20_000.0;
        let cleaned = remove_outliers(points, &TrajectoryConfig::default());
        assert_eq!(cleaned.len(), 6);
    }

    #[test]
    fn same_timestamp_is_an_outlier() {
        let mut points = steaming(4, 10.0);
        let mut duplicate = points[1].clone();
        duplicate.position.x += 5.0;
        points.insert(2, duplicate);

        let cleaned = remove_outliers(points, &TrajectoryConfig::default());
        assert_eq!(cleaned.len(), 4);
        assert!(cleaned.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut points = steaming(20, 8.0);
        points[5].position.x -= 50_000.0;
        points[6].speed = Some(3.0);
        points[9].speed = None;
        points[12].timestamp = points[11].timestamp;
        points[15].position.y += 9_000.0;
        points[16].position.y += 9_000.0;

        let config = TrajectoryConfig::default();
        let once = remove_outliers(points, &config);
        let twice = remove_outliers(once.clone(), &config);
        assert_eq!(once, twice);
    }

    #[test]
    #[should_panic(expected = "sorted by timestamp")]
    fn unordered_input_fails_loudly() {
        let mut points = steaming(3, 10.0);
        points.swap(0, 2);
        remove_outliers(points, &TrajectoryConfig::default());
    }
}
