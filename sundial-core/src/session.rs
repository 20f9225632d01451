//! Application state: home city, compared cities and the shared instant.

use chrono::{DateTime, NaiveDate, Utc};

use crate::city::City;
use crate::error::{SundialError, SundialResult};
use crate::local_time::LocalTime;
use crate::overlap::{OverlapSegment, find_overlap};
use crate::projector::Projector;
use crate::provider::TimeZoneProvider;
use crate::timeline::{Timeline, build_timeline, resolve_click};

/// The single owner of mutable state.
///
/// Everything time-related is derived from `reference` on demand; wall
/// clocks are never stored. The home city is the timeline reference and is
/// always part of the comparison.
#[derive(Debug, Clone)]
pub struct Session<P: TimeZoneProvider> {
    projector: Projector<P>,
    home: City,
    cities: Vec<City>,
    reference: DateTime<Utc>,
}

impl<P: TimeZoneProvider> Session<P> {
    pub fn new(
        projector: Projector<P>,
        home: City,
        reference: DateTime<Utc>,
    ) -> SundialResult<Self> {
        projector.provider().validate(&home.timezone)?;
        Ok(Session {
            projector,
            home,
            cities: Vec::new(),
            reference,
        })
    }

    pub fn projector(&self) -> &Projector<P> {
        &self.projector
    }

    pub fn home(&self) -> &City {
        &self.home
    }

    /// Compared cities, not including home.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Home first, then the compared cities in the order they were added.
    pub fn all_cities(&self) -> Vec<City> {
        std::iter::once(self.home.clone())
            .chain(self.cities.iter().cloned())
            .collect()
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    fn contains(&self, id: &str) -> bool {
        self.home.id == id || self.cities.iter().any(|c| c.id == id)
    }

    pub fn add_city(&mut self, city: City) -> SundialResult<()> {
        if self.contains(&city.id) {
            return Err(SundialError::DuplicateCity(city.name));
        }
        self.projector.provider().validate(&city.timezone)?;
        self.cities.push(city);
        Ok(())
    }

    pub fn remove_city(&mut self, id: &str) -> SundialResult<City> {
        if self.home.id == id {
            return Err(SundialError::HomeCityLocked(self.home.name.clone()));
        }
        let index = self
            .cities
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SundialError::CityNotFound(id.to_string()))?;
        Ok(self.cities.remove(index))
    }

    /// Make `city` the home city. The previous home stays in the comparison.
    pub fn set_home(&mut self, city: City) -> SundialResult<()> {
        if city.id == self.home.id {
            return Ok(());
        }
        self.projector.provider().validate(&city.timezone)?;
        self.cities.retain(|c| c.id != city.id);
        let previous = std::mem::replace(&mut self.home, city);
        self.cities.insert(0, previous);
        Ok(())
    }

    pub fn set_reference(&mut self, instant: DateTime<Utc>) {
        self.reference = instant;
    }

    pub fn set_now(&mut self) {
        self.reference = Utc::now();
    }

    /// Set the home clock to `hour:minute`, keeping the home city's date.
    pub fn set_home_time(&mut self, hour: u32, minute: u32) -> SundialResult<()> {
        if hour >= 24 || minute >= 60 {
            return Err(SundialError::InvalidLocalTime(format!("{:02}:{:02}", hour, minute)));
        }
        let date = self.home_local_time()?.date()?;
        self.set_home_wall_clock(date, hour, minute)
    }

    /// Move to `date` in the home city, keeping the home clock's hour and minute.
    pub fn set_home_date(&mut self, date: NaiveDate) -> SundialResult<()> {
        let local = self.home_local_time()?;
        self.set_home_wall_clock(date, local.hour, local.minute)
    }

    fn set_home_wall_clock(
        &mut self,
        date: NaiveDate,
        hour: u32,
        minute: u32,
    ) -> SundialResult<()> {
        let naive = date.and_hms_opt(hour, minute, 0).ok_or_else(|| {
            SundialError::InvalidLocalTime(format!("{} {:02}:{:02}", date, hour, minute))
        })?;
        let local = LocalTime::from_naive(naive);
        self.reference = self.projector.instant_for_local_time(&local, &self.home.timezone)?;
        Ok(())
    }

    /// Apply a click at `fraction` along the bar of the city with `city_id`.
    pub fn click_timeline(&mut self, city_id: &str, fraction: f64) -> SundialResult<DateTime<Utc>> {
        let city = self
            .all_cities()
            .into_iter()
            .find(|c| c.id == city_id)
            .ok_or_else(|| SundialError::CityNotFound(city_id.to_string()))?;
        self.reference = resolve_click(&self.projector, fraction, &city, self.reference)?;
        Ok(self.reference)
    }

    pub fn local_time(&self, city: &City) -> SundialResult<LocalTime> {
        self.projector.local_time_of(self.reference, &city.timezone)
    }

    pub fn home_local_time(&self) -> SundialResult<LocalTime> {
        self.local_time(&self.home)
    }

    /// Wall clock of every city, home first.
    pub fn clocks(&self) -> SundialResult<Vec<(City, LocalTime)>> {
        self.all_cities()
            .into_iter()
            .map(|city| {
                let local = self.local_time(&city)?;
                Ok((city, local))
            })
            .collect()
    }

    pub fn overlap(&self) -> SundialResult<Vec<OverlapSegment>> {
        find_overlap(&self.projector, &self.all_cities(), self.reference, &self.home)
    }

    pub fn timeline(&self) -> SundialResult<Timeline> {
        build_timeline(&self.projector, &self.all_cities(), self.reference, &self.home)
    }
}
