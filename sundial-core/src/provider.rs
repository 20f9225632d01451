//! Timezone data providers.
//!
//! Wall-clock projection needs the UTC offset a zone observes at a given
//! instant, including daylight saving. That knowledge lives in the IANA
//! timezone database, so the projector asks a provider for it instead of
//! doing any offset arithmetic of its own.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;

use crate::error::{SundialError, SundialResult};

/// Source of UTC offsets for named zones.
pub trait TimeZoneProvider {
    /// Offset observed by `zone` at `instant`.
    ///
    /// Unknown identifiers fail with `SundialError::InvalidTimezone`; a
    /// provider must never fall back to UTC.
    fn offset_at(&self, zone: &str, instant: DateTime<Utc>) -> SundialResult<FixedOffset>;

    /// Check that `zone` is known to this provider.
    fn validate(&self, zone: &str) -> SundialResult<()> {
        self.offset_at(zone, DateTime::<Utc>::UNIX_EPOCH).map(|_| ())
    }
}

impl<P: TimeZoneProvider + ?Sized> TimeZoneProvider for &P {
    fn offset_at(&self, zone: &str, instant: DateTime<Utc>) -> SundialResult<FixedOffset> {
        (**self).offset_at(zone, instant)
    }
}

/// Provider backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzdbProvider;

impl TzdbProvider {
    fn zone(&self, zone: &str) -> SundialResult<Tz> {
        zone.parse::<Tz>()
            .map_err(|_| SundialError::InvalidTimezone(zone.to_string()))
    }
}

impl TimeZoneProvider for TzdbProvider {
    fn offset_at(&self, zone: &str, instant: DateTime<Utc>) -> SundialResult<FixedOffset> {
        let tz = self.zone(zone)?;
        Ok(instant.with_timezone(&tz).offset().fix())
    }
}
