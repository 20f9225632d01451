//! Moving between UTC instants and wall clocks.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::error::{SundialError, SundialResult};
use crate::local_time::LocalTime;
use crate::provider::{TimeZoneProvider, TzdbProvider};

/// Half-width of the window searched around the naive guess.
const SEARCH_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// 48h / 2^20 leaves a bracket of about 165ms.
const SEARCH_ITERATIONS: u32 = 20;

/// Projects instants into zones and back, using a timezone provider for
/// every offset it needs.
#[derive(Debug, Clone, Default)]
pub struct Projector<P = TzdbProvider> {
    provider: P,
}

impl<P: TimeZoneProvider> Projector<P> {
    pub fn new(provider: P) -> Self {
        Projector { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Wall clock of `zone` at `instant`.
    pub fn local_time_of(&self, instant: DateTime<Utc>, zone: &str) -> SundialResult<LocalTime> {
        let offset = self.provider.offset_at(zone, instant)?;
        Ok(LocalTime::from_naive(shift(instant, offset)?))
    }

    /// Instant at which `zone` shows `local`.
    ///
    /// The provider only maps instants to offsets, so this searches for the
    /// answer: starting from the wall clock read as if it were UTC, it
    /// bisects a ±24h window, projecting each candidate forward and comparing
    /// wall-clock seconds. The result is rounded to the whole second.
    ///
    /// Known limitations around daylight saving transitions:
    /// - a wall clock skipped by a spring-forward gap resolves to the
    ///   transition instant, whose wall clock is the first one after the gap
    /// - a wall clock repeated by a fall-back overlap resolves to one of its
    ///   two instants; which one is unspecified
    pub fn instant_for_local_time(
        &self,
        local: &LocalTime,
        zone: &str,
    ) -> SundialResult<DateTime<Utc>> {
        self.provider.validate(zone)?;
        let target = local.to_naive()?.and_utc().timestamp();

        let guess = target * 1000;
        let mut lo = guess - SEARCH_WINDOW_MS;
        let mut hi = guess + SEARCH_WINDOW_MS;

        // Invariant: wall(lo) < target <= wall(hi)
        for _ in 0..SEARCH_ITERATIONS {
            let mid = lo + (hi - lo) / 2;
            if self.wall_seconds_at(mid, zone)? < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let millis = (hi + 500).div_euclid(1000) * 1000;
        let instant = from_millis(millis)?;

        let reached = self.local_time_of(instant, zone)?;
        if reached != *local {
            log::debug!(
                "{} does not exist in {}; resolved to {} (wall clock {})",
                local,
                zone,
                instant,
                reached
            );
        } else {
            log::trace!("resolved {} in {} to {}", local, zone, instant);
        }

        Ok(instant)
    }

    /// Shorthand for `instant_for_local_time` at the start of a minute.
    pub fn instant_for(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        zone: &str,
    ) -> SundialResult<DateTime<Utc>> {
        let local = LocalTime::new(year, month, day, hour, minute)?;
        self.instant_for_local_time(&local, zone)
    }

    /// Wall clock of `zone` at a millisecond timestamp, as seconds since the
    /// epoch of a UTC clock showing the same reading.
    fn wall_seconds_at(&self, millis: i64, zone: &str) -> SundialResult<i64> {
        let instant = from_millis(millis)?;
        let offset = self.provider.offset_at(zone, instant)?;
        Ok(shift(instant, offset)?.and_utc().timestamp())
    }
}

fn from_millis(millis: i64) -> SundialResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(SundialError::InstantOutOfRange)
}

/// Wall clock at `offset`, or an error when it falls outside chrono's range.
fn shift(instant: DateTime<Utc>, offset: FixedOffset) -> SundialResult<NaiveDateTime> {
    instant
        .naive_utc()
        .checked_add_offset(offset)
        .ok_or(SundialError::InstantOutOfRange)
}
