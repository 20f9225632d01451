//! Shared working hours across cities.
//!
//! Each city's working hours are moved onto the timeline of a reference city
//! (its 24-hour clock is the horizontal axis), then the timeline is sampled
//! every 30 minutes and samples where every city is working are merged into
//! segments.
//!
//! Sampling means a boundary that falls between two samples (a zone at +5:45
//! for instance) is only detected at the next sample. That is accepted
//! behavior and tightening it would change results at segment edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::error::SundialResult;
use crate::local_time::MINUTES_PER_DAY;
use crate::projector::Projector;
use crate::provider::TimeZoneProvider;

const SAMPLE_STEP_MINUTES: u32 = 30;

/// Local working hours, identical for every city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkWindow {
    pub const STANDARD: WorkWindow = WorkWindow {
        start_hour: 9,
        end_hour: 17,
    };
}

/// A city's working hours in timeline coordinates.
///
/// Bounds are minutes after midnight on the reference clock. When the end
/// comes before the start the window runs past midnight and covers
/// `[start, 24h) ∪ [0, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimelineWindow {
    /// Place `window` on the timeline of a reference clock, given how many
    /// minutes the city's clock is ahead of it (modulo a day).
    pub fn place(window: WorkWindow, offset_minutes: i64) -> Self {
        let shift = |hour: u32| {
            (i64::from(hour) * 60 - offset_minutes).rem_euclid(i64::from(MINUTES_PER_DAY)) as u32
        };
        TimelineWindow {
            start_minute: shift(window.start_hour),
            end_minute: shift(window.end_hour),
        }
    }

    pub fn wraps_around(&self) -> bool {
        self.end_minute < self.start_minute
    }

    pub fn contains(&self, minute: u32) -> bool {
        if self.wraps_around() {
            minute >= self.start_minute || minute < self.end_minute
        } else {
            minute >= self.start_minute && minute < self.end_minute
        }
    }

    pub fn start_hour(&self) -> f64 {
        f64::from(self.start_minute) / 60.0
    }

    pub fn end_hour(&self) -> f64 {
        f64::from(self.end_minute) / 60.0
    }
}

/// Closed-open range `[start, end)` of timeline hours where every city works.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapSegment {
    pub start: f64,
    pub end: f64,
}

impl OverlapSegment {
    pub fn duration_hours(&self) -> f64 {
        self.end - self.start
    }
}

pub fn total_overlap_hours(segments: &[OverlapSegment]) -> f64 {
    segments.iter().map(OverlapSegment::duration_hours).sum()
}

/// Working-hour window of every city on `reference`'s timeline at `instant`.
pub fn timeline_windows<P: TimeZoneProvider>(
    projector: &Projector<P>,
    cities: &[City],
    instant: DateTime<Utc>,
    reference: &City,
) -> SundialResult<Vec<TimelineWindow>> {
    let minute_in = |zone: &str| -> SundialResult<i64> {
        Ok(i64::from(projector.local_time_of(instant, zone)?.minute_of_day()))
    };
    let reference_minute = minute_in(&reference.timezone)?;

    cities
        .iter()
        .map(|city| {
            let offset = minute_in(&city.timezone)? - reference_minute;
            Ok(TimelineWindow::place(WorkWindow::STANDARD, offset))
        })
        .collect()
}

/// Timeline ranges, on `reference`'s clock, where every city in `cities` is
/// inside its working hours at `instant`.
///
/// Segments come back sorted and disjoint. An empty city list has no overlap.
pub fn find_overlap<P: TimeZoneProvider>(
    projector: &Projector<P>,
    cities: &[City],
    instant: DateTime<Utc>,
    reference: &City,
) -> SundialResult<Vec<OverlapSegment>> {
    if cities.is_empty() {
        return Ok(Vec::new());
    }

    let windows = timeline_windows(projector, cities, instant, reference)?;
    let segments = merge_samples(&windows);

    log::debug!(
        "{} cities on {}'s timeline: {} overlap segment(s), {}h total",
        cities.len(),
        reference.name,
        segments.len(),
        total_overlap_hours(&segments)
    );

    Ok(segments)
}

/// Sample the day and merge contiguous samples that fall in every window.
fn merge_samples(windows: &[TimelineWindow]) -> Vec<OverlapSegment> {
    let working: Vec<u32> = (0..MINUTES_PER_DAY)
        .step_by(SAMPLE_STEP_MINUTES as usize)
        .filter(|&minute| windows.iter().all(|w| w.contains(minute)))
        .collect();

    let Some((&first, rest)) = working.split_first() else {
        return Vec::new();
    };

    let to_segment = |start: u32, last: u32| OverlapSegment {
        start: f64::from(start) / 60.0,
        end: f64::from(last + SAMPLE_STEP_MINUTES) / 60.0,
    };

    let mut segments = Vec::new();
    let mut start = first;
    let mut prev = first;
    for &minute in rest {
        if minute - prev > SAMPLE_STEP_MINUTES {
            segments.push(to_segment(start, prev));
            start = minute;
        }
        prev = minute;
    }
    segments.push(to_segment(start, prev));

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CityRegistry;
    use crate::provider::TzdbProvider;
    use chrono::TimeZone;

    fn city(query: &str) -> City {
        CityRegistry::builtin().find(query).cloned().unwrap()
    }

    fn projector() -> Projector {
        Projector::new(TzdbProvider)
    }

    fn january_noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn same_zone_cities_share_full_window() {
        let cities = vec![city("Bari"), city("Rome")];
        let segments = find_overlap(&projector(), &cities, january_noon_utc(), &cities[1]).unwrap();

        assert_eq!(segments, vec![OverlapSegment { start: 9.0, end: 17.0 }]);
        assert_eq!(total_overlap_hours(&segments), 8.0);
    }

    #[test]
    fn single_city_overlaps_with_itself() {
        let tokyo = city("Tokyo");
        for hour in [0, 7, 13, 22] {
            let instant = Utc.with_ymd_and_hms(2024, 5, 10, hour, 20, 0).unwrap();
            let segments = find_overlap(&projector(), &[tokyo.clone()], instant, &tokyo).unwrap();
            assert_eq!(segments, vec![OverlapSegment { start: 9.0, end: 17.0 }]);
        }
    }

    #[test]
    fn twelve_hours_apart_has_no_overlap() {
        let accra = city("Accra");
        let plus_twelve = City::new("utc12", "Plus Twelve", "Nowhere", "Etc/GMT-12", 12.0);
        let cities = vec![accra.clone(), plus_twelve];

        let segments = find_overlap(&projector(), &cities, january_noon_utc(), &accra).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn london_new_york_winter_overlap() {
        let london = city("London");
        let cities = vec![london.clone(), city("New York")];

        let segments = find_overlap(&projector(), &cities, january_noon_utc(), &london).unwrap();
        assert_eq!(segments, vec![OverlapSegment { start: 14.0, end: 17.0 }]);
        assert_eq!(total_overlap_hours(&segments), 3.0);
    }

    #[test]
    fn reference_outside_the_set() {
        // Tokyo is at 21:00 while London is at 12:00
        let segments =
            find_overlap(&projector(), &[city("Tokyo")], january_noon_utc(), &city("London"))
                .unwrap();
        assert_eq!(segments, vec![OverlapSegment { start: 0.0, end: 8.0 }]);
    }

    #[test]
    fn wrapping_window_splits_into_sorted_segments() {
        // Sydney (UTC+11 in January) is at 23:00 while London is at 12:00
        let segments =
            find_overlap(&projector(), &[city("Sydney")], january_noon_utc(), &city("London"))
                .unwrap();
        assert_eq!(
            segments,
            vec![
                OverlapSegment { start: 0.0, end: 6.0 },
                OverlapSegment { start: 22.0, end: 24.0 },
            ]
        );
    }

    #[test]
    fn half_hour_zone_overlap() {
        // Mumbai is 5:30 ahead of London in January
        let london = city("London");
        let cities = vec![london.clone(), city("Mumbai")];
        let segments = find_overlap(&projector(), &cities, january_noon_utc(), &london).unwrap();

        assert_eq!(segments, vec![OverlapSegment { start: 9.0, end: 11.5 }]);
    }

    #[test]
    fn quarter_hour_zone_is_sampled() {
        // Kathmandu is 5:45 ahead: its window ends at 11:15 on London's clock,
        // but the last passing sample is 11:00 so the segment runs to 11:30
        let london = city("London");
        let cities = vec![london.clone(), city("Kathmandu")];
        let segments = find_overlap(&projector(), &cities, january_noon_utc(), &london).unwrap();

        assert_eq!(segments, vec![OverlapSegment { start: 9.0, end: 11.5 }]);
    }

    #[test]
    fn empty_city_set() {
        let segments =
            find_overlap(&projector(), &[], january_noon_utc(), &city("London")).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn segments_are_sorted_and_disjoint() {
        let reference = city("Honolulu");
        let cities = vec![city("Auckland"), city("Sydney"), city("Tokyo")];
        for hour in 0..24 {
            let instant = Utc.with_ymd_and_hms(2024, 3, 1, hour, 45, 0).unwrap();
            let segments = find_overlap(&projector(), &cities, instant, &reference).unwrap();
            for pair in segments.windows(2) {
                assert!(pair[0].end < pair[1].start);
            }
            for segment in &segments {
                assert!(segment.start < segment.end);
                assert!(segment.start >= 0.0 && segment.end <= 24.0);
            }
        }
    }

    #[test]
    fn unknown_zone_propagates() {
        let bogus = City::new("x", "Bogus", "Nowhere", "Nowhere/Special", 0.0);
        let result = find_overlap(&projector(), &[bogus], january_noon_utc(), &city("London"));
        assert!(result.is_err());
    }

    #[test]
    fn window_placement() {
        let window = TimelineWindow::place(WorkWindow::STANDARD, -12 * 60);
        assert_eq!(window, TimelineWindow { start_minute: 21 * 60, end_minute: 5 * 60 });
        assert!(window.wraps_around());
        assert!(window.contains(23 * 60));
        assert!(window.contains(0));
        assert!(!window.contains(5 * 60));

        let same = TimelineWindow::place(WorkWindow::STANDARD, 0);
        assert!(!same.wraps_around());
        assert_eq!((same.start_hour(), same.end_hour()), (9.0, 17.0));
    }
}
