//! Distance and speed estimation between two consecutive reports.

use crate::config::KNOTS_PER_METER_SECONDS;
use crate::model::Position;

pub fn euclidean_distance(a: Position, b: Position) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Speed in knots needed to cover the distance between `from` and `to` in
/// `elapsed_seconds`. Callers must not pass a zero elapsed time.
pub fn calculated_speed_knots(from: Position, to: Position, elapsed_seconds: f64) -> f64 {
    debug_assert!(elapsed_seconds != 0.0, "speed is undefined for a zero time delta");
    euclidean_distance(from, to) / elapsed_seconds * KNOTS_PER_METER_SECONDS
}

/// Reconciles the self-reported speed with the calculated one.
///
/// The reported value wins while it lies within `threshold_knots` of the
/// calculated value; a missing or NaN report always defers to geometry.
pub fn assumed_speed(calculated: f64, reported: Option<f64>, threshold_knots: f64) -> f64 {
    let interlaced = reported.filter(|s| !s.is_nan()).unwrap_or(calculated);
    if (calculated - interlaced).abs() <= threshold_knots {
        interlaced
    } else {
        calculated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_itself() {
        let pairs = [
            (Position::new(0.0, 0.0), Position::new(3.0, 4.0)),
            (Position::new(4_212_345.5, 3_398_001.25), Position::new(4_213_001.0, 3_397_450.0)),
            (Position::new(-12.5, 7.0), Position::new(100.0, -300.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(euclidean_distance(a, b), euclidean_distance(b, a));
            assert_eq!(euclidean_distance(a, a), 0.0);
        }
        assert_eq!(euclidean_distance(pairs[0].0, pairs[0].1), 5.0);
    }

    #[test]
    fn converts_metres_per_second_to_knots() {
        let speed = calculated_speed_knots(Position::new(0.0, 0.0), Position::new(100.0, 0.0), 100.0);
        assert!((speed - KNOTS_PER_METER_SECONDS).abs() < 1e-12);
    }

    #[test]
    fn reported_speed_wins_within_threshold() {
        assert_eq!(assumed_speed(10.0, Some(11.5), 2.0), 11.5);
        assert_eq!(assumed_speed(10.0, Some(12.0), 2.0), 12.0);
    }

    #[test]
    fn calculated_speed_wins_on_divergence() {
        assert_eq!(assumed_speed(10.0, Some(12.5), 2.0), 10.0);
        assert_eq!(assumed_speed(300.0, Some(0.0), 2.0), 300.0);
    }

    #[test]
    fn missing_report_falls_back_to_calculated() {
        assert_eq!(assumed_speed(7.25, None, 2.0), 7.25);
        assert_eq!(assumed_speed(7.25, Some(f64::NAN), 2.0), 7.25);
    }
}
