//! City reference records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A city that can be compared on the timeline.
///
/// `utc_offset_hours` is the nominal standard offset shown next to the city
/// name. It ignores daylight saving and must never be used for arithmetic;
/// wall clocks always come from the timezone database via `timezone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    /// IANA zone identifier, e.g. "Europe/Rome"
    pub timezone: String,
    pub utc_offset_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl City {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        timezone: impl Into<String>,
        utc_offset_hours: f64,
    ) -> Self {
        City {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            timezone: timezone.into(),
            utc_offset_hours,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Nominal offset label, e.g. "UTC+5.5", "UTC-3.5", "UTC+0".
    pub fn utc_offset_label(&self) -> String {
        let sign = if self.utc_offset_hours >= 0.0 { "+" } else { "" };
        format!("UTC{}{}", sign, self.utc_offset_hours)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}
