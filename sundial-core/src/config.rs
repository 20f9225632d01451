//! Global sundial configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SundialError, SundialResult};

/// How wall clocks are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Configuration at ~/.config/sundial/config.toml
///
/// Every key can also be set through a `SUNDIAL_` environment variable,
/// e.g. `SUNDIAL_HOME_CITY=Tokyo` or `SUNDIAL_CITIES=London,Sydney`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct SundialConfig {
    /// Catalog id or name of the home city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_city: Option<String>,

    /// Catalog ids or names compared against the home city
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<String>,

    #[serde(default)]
    pub clock: ClockFormat,
}

impl SundialConfig {
    pub fn config_path() -> SundialResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SundialError::Config("Could not determine config directory".into()))?
            .join("sundial");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> SundialResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) layered with `SUNDIAL_*` variables.
    pub fn load_from(path: &Path) -> SundialResult<Self> {
        Self::load_layered(path, Self::environment())
    }

    /// `SUNDIAL_*` variables; `SUNDIAL_CITIES` is a comma separated list.
    fn environment() -> Environment {
        Environment::with_prefix("SUNDIAL")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cities")
    }

    fn load_layered(path: &Path, environment: Environment) -> SundialResult<Self> {
        let config: SundialConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| SundialError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SundialError::Config(e.to_string()))?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> SundialResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| SundialError::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SundialResult<()> {
        let contents = "\
# sundial configuration

# Your home city (catalog id or name). Its clock is the timeline axis.
# Defaults to the first catalog city in the system timezone.
# home_city = \"London\"

# Cities to compare against the home city:
# cities = [\"New York\", \"Tokyo\"]

# Clock format: \"12h\" or \"24h\"
# clock = \"12h\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SundialError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SundialError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        SundialConfig::create_default_config(&path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let config: SundialConfig = toml::from_str(&content).unwrap();
        assert_eq!(config, SundialConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let config: SundialConfig = toml::from_str(
            r#"
home_city = "Tokyo"
cities = ["London", "56"]
clock = "24h"
"#,
        )
        .unwrap();

        assert_eq!(config.home_city.as_deref(), Some("Tokyo"));
        assert_eq!(config.cities, ["London", "56"]);
        assert_eq!(config.clock, ClockFormat::TwentyFourHour);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = SundialConfig {
            home_city: Some("Rome".into()),
            cities: vec!["Sydney".into(), "Lima".into()],
            clock: ClockFormat::TwentyFourHour,
        };
        config.save(&path).unwrap();

        let loaded = SundialConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SundialConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.clock, ClockFormat::TwelveHour);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        SundialConfig {
            home_city: Some("Rome".into()),
            cities: vec!["Lima".into()],
            clock: ClockFormat::TwelveHour,
        }
        .save(&path)
        .unwrap();

        let vars = config::Map::from([
            ("SUNDIAL_CITIES".to_string(), "London,Sydney".to_string()),
            ("SUNDIAL_CLOCK".to_string(), "24h".to_string()),
        ]);
        let environment = SundialConfig::environment().source(Some(vars));
        let loaded = SundialConfig::load_layered(&path, environment).unwrap();

        assert_eq!(loaded.home_city.as_deref(), Some("Rome"));
        assert_eq!(loaded.cities, ["London", "Sydney"]);
        assert_eq!(loaded.clock, ClockFormat::TwentyFourHour);
    }

    #[test]
    fn unknown_clock_format_is_rejected() {
        let result: Result<SundialConfig, _> = toml::from_str("clock = \"36h\"");
        assert!(result.is_err());
    }
}
