//! The 24-hour timeline: per-city rows and click handling.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::error::SundialResult;
use crate::local_time::{LocalTime, MINUTES_PER_DAY};
use crate::overlap::{
    OverlapSegment, TimelineWindow, find_overlap, timeline_windows, total_overlap_hours,
};
use crate::projector::Projector;
use crate::provider::TimeZoneProvider;

const MS_PER_DAY: i64 = MINUTES_PER_DAY as i64 * 60 * 1000;

/// Largest bar position; positions live in [0, 1).
const MAX_FRACTION: f64 = 1.0 - f64::EPSILON;

/// One city's bar on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub city: City,
    pub local: LocalTime,
    /// Where the current-time marker sits on the city's own 24h bar, in [0, 1).
    pub marker: f64,
    /// The city's working hours on the reference timeline.
    pub window: TimelineWindow,
}

/// Everything needed to draw the timeline for one reference instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub reference: City,
    pub rows: Vec<TimelineRow>,
    pub overlap: Vec<OverlapSegment>,
}

impl Timeline {
    pub fn total_overlap_hours(&self) -> f64 {
        total_overlap_hours(&self.overlap)
    }
}

pub fn build_timeline<P: TimeZoneProvider>(
    projector: &Projector<P>,
    cities: &[City],
    instant: DateTime<Utc>,
    reference: &City,
) -> SundialResult<Timeline> {
    let windows = timeline_windows(projector, cities, instant, reference)?;

    let rows = cities
        .iter()
        .zip(windows)
        .map(|(city, window)| {
            let local = projector.local_time_of(instant, &city.timezone)?;
            Ok(TimelineRow {
                city: city.clone(),
                local,
                marker: local.day_progress(),
                window,
            })
        })
        .collect::<SundialResult<Vec<_>>>()?;

    Ok(Timeline {
        reference: reference.clone(),
        rows,
        overlap: find_overlap(projector, cities, instant, reference)?,
    })
}

/// New reference instant after a click at `fraction` along `city`'s 24-hour
/// bar.
///
/// The instant is shifted by the difference between the clicked hour and the
/// city's current hour with plain arithmetic, not re-resolved through the
/// timezone database. Clicks only move within the displayed day, so the
/// shift is small. Positions outside [0, 1) are clamped.
pub fn resolve_click<P: TimeZoneProvider>(
    projector: &Projector<P>,
    fraction: f64,
    city: &City,
    instant: DateTime<Utc>,
) -> SundialResult<DateTime<Utc>> {
    let position = clamp_fraction(fraction);
    let local = projector.local_time_of(instant, &city.timezone)?;

    let target_ms = ((position * MS_PER_DAY as f64).round() as i64).min(MS_PER_DAY - 1);
    let current_ms = i64::from(local.minute_of_day()) * 60 * 1000;
    let delta = Duration::milliseconds(target_ms - current_ms);

    log::debug!(
        "click at {:.4} on {}: {:02}:{:02} local, shifting by {}s",
        position,
        city.name,
        local.hour,
        local.minute,
        delta.num_seconds()
    );

    Ok(instant + delta)
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        log::warn!("timeline position is NaN, using 0");
        return 0.0;
    }
    let clamped = fraction.clamp(0.0, MAX_FRACTION);
    if clamped != fraction {
        log::warn!("timeline position {} clamped to {}", fraction, clamped);
    }
    clamped
}
