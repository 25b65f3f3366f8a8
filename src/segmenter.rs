//! Splits a cleaned point sequence into alternating moving and stopped spans.

use crate::config::TrajectoryConfig;
use crate::model::AisPoint;
use crate::outlier::is_time_ordered;
use chrono::NaiveDateTime;

/// Inclusive index range of a vessel's cleaned points.
///
/// `to < from` marks an empty span, produced when a stop is confirmed on
/// the first point of a moving span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub to: isize,
    pub inferred_stopped: bool,
}

impl Span {
    fn closed_before(from: usize, next: usize, inferred_stopped: bool) -> Self {
        Self {
            from,
            to: next as isize - 1,
            inferred_stopped,
        }
    }

    pub fn len(&self) -> usize {
        if self.to < self.from as isize {
            0
        } else {
            (self.to - self.from as isize + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ScanningMoving,
    Stopped,
}

/// Earliest point of the current run of slow reports.
#[derive(Debug, Clone, Copy)]
struct StopCandidate {
    index: usize,
    timestamp: NaiveDateTime,
}

struct Segmenter<'a> {
    config: &'a TrajectoryConfig,
    spans: Vec<Span>,
    state: State,
    from: usize,
    candidate: Option<StopCandidate>,
}

impl<'a> Segmenter<'a> {
    fn new(config: &'a TrajectoryConfig) -> Self {
        Self {
            config,
            spans: Vec::new(),
            state: State::ScanningMoving,
            from: 0,
            candidate: None,
        }
    }

    fn is_slow(&self, point: &AisPoint) -> bool {
        // no speed at all is no evidence of a stop
        point
            .speed
            .map_or(false, |s| s < self.config.stopped_knots_threshold)
    }

    fn is_gap(&self, prev: &AisPoint, cur: &AisPoint) -> bool {
        (cur.timestamp - prev.timestamp).num_seconds() >= self.config.point_time_gap_seconds
    }

    /// Closes the open span just before `next` and opens a new one there.
    fn close(&mut self, next: usize, state: State) {
        let stopped = self.state == State::Stopped;
        self.spans.push(Span::closed_before(self.from, next, stopped));
        self.from = next;
        self.state = state;
        self.candidate = None;
    }

    fn step(&mut self, points: &[AisPoint], idx: usize) {
        let point = &points[idx];

        if idx > self.from && self.is_gap(&points[idx - 1], point) {
            self.close(idx, self.state);
        }

        match self.state {
            State::ScanningMoving => {
                if !self.is_slow(point) {
                    self.candidate = None;
                } else if self.candidate.is_none() {
                    self.candidate = Some(StopCandidate {
                        index: idx,
                        timestamp: point.timestamp,
                    });
                }

                if let Some(candidate) = self.candidate {
                    let dwell = (point.timestamp - candidate.timestamp).num_seconds();
                    if dwell >= self.config.stopped_duration_seconds {
                        self.close(candidate.index, State::Stopped);
                    }
                }
            }
            State::Stopped => {
                if !self.is_slow(point) {
                    self.close(idx, State::ScanningMoving);
                }
            }
        }
    }

    fn finish(mut self, len: usize) -> Vec<Span> {
        let state = self.state;
        self.close(len, state);
        self.spans
    }
}

/// Partitions `points` into consecutive spans covering every index once.
///
/// A span closes when the time between two reports reaches the gap
/// threshold, when slow reports have lasted the stopped duration (the
/// moving span ends right before the first slow report), or, while
/// stopped, at the first report back above the stopped speed. Empty spans
/// are returned too so the caller sees every split.
pub fn segment(points: &[AisPoint], config: &TrajectoryConfig) -> Vec<Span> {
    debug_assert!(
        is_time_ordered(points),
        "points must be sorted by timestamp before segmentation"
    );

    if points.is_empty() {
        return Vec::new();
    }

    let mut segmenter = Segmenter::new(config);
    for idx in 0..points.len() {
        segmenter.step(points, idx);
    }
    segmenter.finish(points.len())
}
