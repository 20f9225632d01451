//! Wall-clock readings.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{SundialError, SundialResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// What a clock on the wall of some city reads.
///
/// A `LocalTime` is always derived from an instant and a zone. It is a
/// throwaway projection; state keeps the instant, never this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl LocalTime {
    /// Validated wall-clock time at the start of a minute.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> SundialResult<Self> {
        let local = LocalTime {
            year,
            month,
            day,
            hour,
            minute,
            second: 0,
        };
        local.to_naive()?;
        Ok(local)
    }

    pub fn from_naive(naive: NaiveDateTime) -> Self {
        LocalTime {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
            second: naive.second(),
        }
    }

    pub fn to_naive(&self) -> SundialResult<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or_else(|| SundialError::InvalidLocalTime(self.to_string()))
    }

    pub fn date(&self) -> SundialResult<NaiveDate> {
        Ok(self.to_naive()?.date())
    }

    /// Minutes since local midnight; seconds are dropped.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Hour of day with minutes as a fraction, e.g. 14:30 is 14.5.
    pub fn fractional_hour(&self) -> f64 {
        f64::from(self.minute_of_day()) / 60.0
    }

    /// How far through the local day this reading is, in [0, 1).
    pub fn day_progress(&self) -> f64 {
        self.fractional_hour() / 24.0
    }

    /// Between 06:00 and 20:00.
    pub fn is_daytime(&self) -> bool {
        (6..20).contains(&self.hour)
    }

    pub fn phase(&self) -> DayPhase {
        DayPhase::of_hour(self.hour)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Coarse part of the day a local hour falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    /// 05:00 to 08:00
    Dawn,
    /// 08:00 to 17:00
    Day,
    /// 17:00 to 20:00
    Dusk,
    Night,
}

impl DayPhase {
    pub fn of_hour(hour: u32) -> Self {
        match hour {
            5..=7 => DayPhase::Dawn,
            8..=16 => DayPhase::Day,
            17..=19 => DayPhase::Dusk,
            _ => DayPhase::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPhase::Dawn => "dawn",
            DayPhase::Day => "day",
            DayPhase::Dusk => "dusk",
            DayPhase::Night => "night",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> LocalTime {
        LocalTime::new(2024, 6, 3, hour, minute).unwrap()
    }

    #[test]
    fn new_rejects_impossible_values() {
        assert!(LocalTime::new(2024, 2, 30, 10, 0).is_err());
        assert!(LocalTime::new(2024, 6, 3, 24, 0).is_err());
        assert!(LocalTime::new(2024, 6, 3, 10, 60).is_err());
        assert!(LocalTime::new(2024, 2, 29, 23, 59).is_ok());
    }

    #[test]
    fn fractional_hour_ignores_seconds() {
        let mut local = at(14, 30);
        local.second = 59;
        assert_eq!(local.minute_of_day(), 870);
        assert_eq!(local.fractional_hour(), 14.5);
        assert_eq!(local.day_progress(), 870.0 / 1440.0);
    }

    #[test]
    fn daytime_bounds() {
        assert!(!at(5, 59).is_daytime());
        assert!(at(6, 0).is_daytime());
        assert!(at(19, 59).is_daytime());
        assert!(!at(20, 0).is_daytime());
    }

    #[test]
    fn phases() {
        assert_eq!(at(4, 59).phase(), DayPhase::Night);
        assert_eq!(at(5, 0).phase(), DayPhase::Dawn);
        assert_eq!(at(8, 0).phase(), DayPhase::Day);
        assert_eq!(at(16, 59).phase(), DayPhase::Day);
        assert_eq!(at(17, 0).phase(), DayPhase::Dusk);
        assert_eq!(at(20, 0).phase(), DayPhase::Night);
    }

    #[test]
    fn naive_conversion_keeps_fields() {
        let local = at(9, 15);
        let naive = local.to_naive().unwrap();
        assert_eq!(LocalTime::from_naive(naive), local);
        assert_eq!(local.to_string(), "2024-06-03 09:15:00");
    }
}
