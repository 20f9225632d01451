pub mod cities;
pub mod click;
pub mod show;
pub mod timeline;

use anyhow::{Context as _, Result};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike, Utc};
use clap::Args;
use sundial_core::config::{ClockFormat, SundialConfig};
use sundial_core::{City, CityRegistry, LocalTime, Projector, Session, SundialError, TzdbProvider};

/// Options shared by every command that looks at a point in time.
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Home city (catalog id or name); its clock is the timeline axis
    #[arg(long, global = true)]
    pub home: Option<String>,

    /// City to compare, repeatable; replaces the configured list
    #[arg(short, long = "city", global = true)]
    pub cities: Vec<String>,

    /// Wall clock in the home city, e.g. "14:30", "2025-06-03 14:30" or "tomorrow 3pm"
    #[arg(long, global = true, conflicts_with = "utc")]
    pub at: Option<String>,

    /// Reference instant in RFC 3339, e.g. "2025-06-03T12:00:00Z"
    #[arg(long, global = true)]
    pub utc: Option<String>,

    /// Print clocks in 24-hour format
    #[arg(long = "24h", global = true)]
    pub twenty_four_hour: bool,
}

/// Common context for every command, built once per invocation.
pub struct Context {
    pub session: Session<TzdbProvider>,
    pub clock: ClockFormat,
}

impl Context {
    pub fn build(view: &ViewArgs, config: &SundialConfig) -> Result<Self> {
        let registry = CityRegistry::builtin();

        let home = resolve_home(registry, view.home.as_deref().or(config.home_city.as_deref()))?;

        let reference = match &view.utc {
            Some(s) => DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("Invalid RFC 3339 instant: \"{}\"", s))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        let mut session = Session::new(Projector::new(TzdbProvider), home, reference)?;

        let cities = if !view.cities.is_empty() {
            resolve_cities(registry, &view.cities)?
        } else if !config.cities.is_empty() {
            resolve_cities(registry, &config.cities)?
        } else {
            registry.default_selection()
        };

        for city in cities {
            match session.add_city(city) {
                Err(SundialError::DuplicateCity(name)) => {
                    log::info!("{} is already selected", name)
                }
                other => other?,
            }
        }

        if let Some(at) = &view.at {
            apply_wall_clock(&mut session, at)?;
        }

        let clock = if view.twenty_four_hour {
            ClockFormat::TwentyFourHour
        } else {
            config.clock
        };

        Ok(Context { session, clock })
    }
}

fn resolve_city(registry: &CityRegistry, query: &str) -> Result<City> {
    registry.find(query).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "City '{}' not found. Run `sundial cities` to see the catalog",
            query
        )
    })
}

fn resolve_cities(registry: &CityRegistry, queries: &[String]) -> Result<Vec<City>> {
    queries.iter().map(|q| resolve_city(registry, q)).collect()
}

/// Home city from flag/config, else the first catalog city in the system zone.
fn resolve_home(registry: &CityRegistry, configured: Option<&str>) -> Result<City> {
    if let Some(query) = configured {
        return resolve_city(registry, query);
    }

    let system_zone = iana_time_zone::get_timezone()
        .context("Could not detect the system timezone. Use --home or set home_city")?;

    match registry.by_timezone(&system_zone) {
        Some(city) => {
            log::info!("using {} as home city (system timezone {})", city.name, system_zone);
            Ok(city.clone())
        }
        None => anyhow::bail!(
            "No catalog city uses the system timezone '{}'.\n\n\
            Pick a home city with:\n  \
            sundial --home <city> ...\n\n\
            or set home_city in the config file",
            system_zone
        ),
    }
}

/// Point the session at a wall-clock reading of the home city.
///
/// Accepts "HH:MM" (home city's current date), "YYYY-MM-DD HH:MM", or
/// anything fuzzydate understands. Relative phrases like "tomorrow" are
/// anchored on the system clock.
fn apply_wall_clock(session: &mut Session<TzdbProvider>, input: &str) -> Result<()> {
    let input = input.trim();

    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        session.set_home_time(time.hour(), time.minute())?;
        return Ok(());
    }

    let explicit = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok());

    let naive = match explicit {
        Some(naive) => naive,
        None => fuzzydate::parse(input)
            .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?,
    };

    let mut local = LocalTime::from_naive(naive);
    local.second = 0;
    let instant = session
        .projector()
        .instant_for_local_time(&local, &session.home().timezone)?;
    session.set_reference(instant);

    Ok(())
}
