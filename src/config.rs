use anyhow::{ensure, Result};

/// Knots per metre/second.
pub const KNOTS_PER_METER_SECONDS: f64 = 1.943844;

/// Longest nominal AIS reporting interval, in seconds.
pub const AIS_LONGEST_REPORTING_RATE_SECONDS: i64 = 3 * 60;

/// Thresholds driving outlier removal, segmentation and span admission.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryConfig {
    /// Assumed speeds above this are physically implausible.
    pub speed_threshold_knots: f64,
    /// Largest tolerated gap between reported and calculated speed before
    /// the calculated one wins.
    pub computed_vs_reported_knots: f64,
    pub stopped_knots_threshold: f64,
    pub stopped_duration_seconds: i64,
    pub point_time_gap_seconds: i64,
    /// Spans must hold strictly more points than this.
    pub min_points_per_trajectory: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            speed_threshold_knots: 100.0,
            computed_vs_reported_knots: 2.0,
            stopped_knots_threshold: 0.5,
            stopped_duration_seconds: 5 * 60,
            point_time_gap_seconds: AIS_LONGEST_REPORTING_RATE_SECONDS * 5,
            min_points_per_trajectory: 2,
        }
    }
}

impl TrajectoryConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.speed_threshold_knots.is_finite() && self.speed_threshold_knots > 0.0,
            "speed threshold must be a positive number of knots, got {}",
            self.speed_threshold_knots
        );
        ensure!(
            self.computed_vs_reported_knots.is_finite() && self.computed_vs_reported_knots >= 0.0,
            "speed reconciliation threshold must be non-negative, got {}",
            self.computed_vs_reported_knots
        );
        ensure!(
            self.stopped_knots_threshold.is_finite() && self.stopped_knots_threshold > 0.0,
            "stopped speed threshold must be a positive number of knots, got {}",
            self.stopped_knots_threshold
        );
        ensure!(
            self.stopped_knots_threshold < self.speed_threshold_knots,
            "stopped speed threshold ({}) must be below the outlier speed threshold ({})",
            self.stopped_knots_threshold,
            self.speed_threshold_knots
        );
        ensure!(
            self.stopped_duration_seconds > 0,
            "stopped duration must be positive, got {}s",
            self.stopped_duration_seconds
        );
        ensure!(
            self.point_time_gap_seconds > 0,
            "point time gap must be positive, got {}s",
            self.point_time_gap_seconds
        );
        Ok(())
    }
}

/// Rectangular region of interest in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub low_lat: f64,
    pub low_lon: f64,
    pub high_lat: f64,
    pub high_lon: f64,
}

impl BoundingBox {
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lat >= self.low_lat && lat <= self.high_lat && lon >= self.low_lon && lon <= self.high_lon
    }
}

impl Default for BoundingBox {
    // Danish waters.
    fn default() -> Self {
        Self {
            low_lat: 53.5,
            low_lon: 3.0,
            high_lat: 58.5,
            high_lon: 16.5,
        }
    }
}

/// Coarse non-spatial cleaning rules applied while reading raw rows.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub region: BoundingBox,
    pub max_draught: f64,
    pub max_width: f64,
    pub max_length: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            region: BoundingBox::default(),
            max_draught: 28.5,
            max_width: 75.0,
            max_length: 488.0,
        }
    }
}
