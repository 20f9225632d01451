//! Built-in city catalog.

use std::sync::LazyLock;

use crate::city::City;

/// Number of catalog entries selected when nothing else is configured.
const DEFAULT_SELECTION_LEN: usize = 4;

/// (id, name, country, timezone, nominal offset, latitude, longitude)
type CityRow = (&'static str, &'static str, &'static str, &'static str, f64, f64, f64);

#[rustfmt::skip]
const CITY_ROWS: &[CityRow] = &[
    ("1", "Baker Island", "US Minor Outlying Islands", "Etc/GMT+12", -12.0, 0.1936, -176.4769),
    ("2", "Pago Pago", "American Samoa", "Pacific/Pago_Pago", -11.0, -14.2756, -170.7020),
    ("3", "Honolulu", "USA", "Pacific/Honolulu", -10.0, 21.3069, -157.8583),
    ("4", "Taiohae", "French Polynesia", "Pacific/Marquesas", -9.5, -8.9167, -140.1000),
    ("5", "Anchorage", "USA", "America/Anchorage", -9.0, 61.2181, -149.9003),
    ("6", "Los Angeles", "USA", "America/Los_Angeles", -8.0, 34.0522, -118.2437),
    ("7", "Vancouver", "Canada", "America/Vancouver", -8.0, 49.2827, -123.1207),
    ("8", "Denver", "USA", "America/Denver", -7.0, 39.7392, -104.9903),
    ("9", "Phoenix", "USA", "America/Phoenix", -7.0, 33.4484, -112.0740),
    ("10", "Chicago", "USA", "America/Chicago", -6.0, 41.8781, -87.6298),
    ("11", "Mexico City", "Mexico", "America/Mexico_City", -6.0, 19.4326, -99.1332),
    ("12", "New York", "USA", "America/New_York", -5.0, 40.7128, -74.006),
    ("13", "Toronto", "Canada", "America/Toronto", -5.0, 43.6532, -79.3832),
    ("14", "Lima", "Peru", "America/Lima", -5.0, -12.0464, -77.0428),
    ("15", "Santiago", "Chile", "America/Santiago", -4.0, -33.4489, -70.6693),
    ("16", "Caracas", "Venezuela", "America/Caracas", -4.0, 10.4806, -66.9036),
    ("17", "St. John's", "Canada", "America/St_Johns", -3.5, 47.5615, -52.7126),
    ("18", "São Paulo", "Brazil", "America/Sao_Paulo", -3.0, -23.5505, -46.6333),
    ("19", "Buenos Aires", "Argentina", "America/Argentina/Buenos_Aires", -3.0, -34.6037, -58.3816),
    ("20", "Fernando de Noronha", "Brazil", "America/Noronha", -2.0, -3.8547, -32.4247),
    ("21", "Praia", "Cape Verde", "Atlantic/Cape_Verde", -1.0, 14.9315, -23.5125),
    ("22", "Azores", "Portugal", "Atlantic/Azores", -1.0, 37.7412, -25.6756),
    ("23", "London", "UK", "Europe/London", 0.0, 51.5074, -0.1278),
    ("24", "Reykjavik", "Iceland", "Atlantic/Reykjavik", 0.0, 64.1466, -21.9426),
    ("25", "Accra", "Ghana", "Africa/Accra", 0.0, 5.6037, -0.1870),
    ("26", "Paris", "France", "Europe/Paris", 1.0, 48.8566, 2.3522),
    ("27", "Berlin", "Germany", "Europe/Berlin", 1.0, 52.52, 13.405),
    ("28", "Lagos", "Nigeria", "Africa/Lagos", 1.0, 6.5244, 3.3792),
    ("73", "Bari", "Italy", "Europe/Rome", 1.0, 41.1171, 16.8719),
    ("74", "Rome", "Italy", "Europe/Rome", 1.0, 41.9028, 12.4964),
    ("75", "Milan", "Italy", "Europe/Rome", 1.0, 45.4642, 9.1900),
    ("76", "Naples", "Italy", "Europe/Rome", 1.0, 40.8518, 14.2681),
    ("29", "Cairo", "Egypt", "Africa/Cairo", 2.0, 30.0444, 31.2357),
    ("30", "Johannesburg", "South Africa", "Africa/Johannesburg", 2.0, -26.2041, 28.0473),
    ("31", "Athens", "Greece", "Europe/Athens", 2.0, 37.9838, 23.7275),
    ("32", "Moscow", "Russia", "Europe/Moscow", 3.0, 55.7558, 37.6173),
    ("33", "Nairobi", "Kenya", "Africa/Nairobi", 3.0, -1.2921, 36.8219),
    ("34", "Riyadh", "Saudi Arabia", "Asia/Riyadh", 3.0, 24.7136, 46.6753),
    ("35", "Tehran", "Iran", "Asia/Tehran", 3.5, 35.6892, 51.3890),
    ("36", "Dubai", "UAE", "Asia/Dubai", 4.0, 25.2048, 55.2708),
    ("37", "Baku", "Azerbaijan", "Asia/Baku", 4.0, 40.4093, 49.8671),
    ("38", "Kabul", "Afghanistan", "Asia/Kabul", 4.5, 34.5553, 69.2075),
    ("39", "Karachi", "Pakistan", "Asia/Karachi", 5.0, 24.8607, 67.0011),
    ("40", "Tashkent", "Uzbekistan", "Asia/Tashkent", 5.0, 41.2995, 69.2401),
    ("41", "Mumbai", "India", "Asia/Kolkata", 5.5, 19.076, 72.8777),
    ("42", "Delhi", "India", "Asia/Kolkata", 5.5, 28.7041, 77.1025),
    ("43", "Kathmandu", "Nepal", "Asia/Kathmandu", 5.75, 27.7172, 85.3240),
    ("44", "Dhaka", "Bangladesh", "Asia/Dhaka", 6.0, 23.8103, 90.4125),
    ("45", "Almaty", "Kazakhstan", "Asia/Almaty", 6.0, 43.2220, 76.8512),
    ("46", "Yangon", "Myanmar", "Asia/Yangon", 6.5, 16.8661, 96.1951),
    ("47", "Bangkok", "Thailand", "Asia/Bangkok", 7.0, 13.7563, 100.5018),
    ("48", "Jakarta", "Indonesia", "Asia/Jakarta", 7.0, -6.2088, 106.8456),
    ("49", "Ho Chi Minh City", "Vietnam", "Asia/Ho_Chi_Minh", 7.0, 10.8231, 106.6297),
    ("50", "Singapore", "Singapore", "Asia/Singapore", 8.0, 1.3521, 103.8198),
    ("51", "Hong Kong", "China", "Asia/Hong_Kong", 8.0, 22.3193, 114.1694),
    ("52", "Shanghai", "China", "Asia/Shanghai", 8.0, 31.2304, 121.4737),
    ("53", "Perth", "Australia", "Australia/Perth", 8.0, -31.9505, 115.8605),
    ("54", "Manila", "Philippines", "Asia/Manila", 8.0, 14.5995, 120.9842),
    ("55", "Eucla", "Australia", "Australia/Eucla", 8.75, -31.6833, 128.8833),
    ("56", "Tokyo", "Japan", "Asia/Tokyo", 9.0, 35.6762, 139.6503),
    ("57", "Seoul", "South Korea", "Asia/Seoul", 9.0, 37.5665, 126.9780),
    ("58", "Darwin", "Australia", "Australia/Darwin", 9.5, -12.4634, 130.8456),
    ("59", "Adelaide", "Australia", "Australia/Adelaide", 9.5, -34.9285, 138.6007),
    ("60", "Sydney", "Australia", "Australia/Sydney", 10.0, -33.8688, 151.2093),
    ("61", "Melbourne", "Australia", "Australia/Melbourne", 10.0, -37.8136, 144.9631),
    ("62", "Brisbane", "Australia", "Australia/Brisbane", 10.0, -27.4698, 153.0251),
    ("63", "Port Moresby", "Papua New Guinea", "Pacific/Port_Moresby", 10.0, -9.4438, 147.1803),
    ("64", "Lord Howe Island", "Australia", "Australia/Lord_Howe", 10.5, -31.5553, 159.0821),
    ("65", "Nouméa", "New Caledonia", "Pacific/Noumea", 11.0, -22.2758, 166.4580),
    ("66", "Solomon Islands", "Solomon Islands", "Pacific/Guadalcanal", 11.0, -9.4456, 160.0022),
    ("67", "Auckland", "New Zealand", "Pacific/Auckland", 12.0, -36.8485, 174.7633),
    ("68", "Fiji", "Fiji", "Pacific/Fiji", 12.0, -18.1416, 178.4419),
    ("69", "Chatham Islands", "New Zealand", "Pacific/Chatham", 12.75, -43.9531, -176.5401),
    ("70", "Apia", "Samoa", "Pacific/Apia", 13.0, -13.8333, -171.7500),
    ("71", "Nuku'alofa", "Tonga", "Pacific/Tongatapu", 13.0, -21.2114, -175.1998),
    ("72", "Kiritimati", "Kiribati", "Pacific/Kiritimati", 14.0, 1.8721, -157.4278),
];

static BUILTIN: LazyLock<CityRegistry> = LazyLock::new(|| {
    let cities = CITY_ROWS
        .iter()
        .map(|&(id, name, country, timezone, offset, lat, lng)| {
            City::new(id, name, country, timezone, offset).with_coordinates(lat, lng)
        })
        .collect();
    CityRegistry { cities }
});

/// Immutable collection of known cities.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: Vec<City>,
}

impl CityRegistry {
    /// The static catalog shipped with sundial, ordered west to east.
    pub fn builtin() -> &'static CityRegistry {
        &BUILTIN
    }

    pub fn list_cities(&self) -> &[City] {
        &self.cities
    }

    pub fn get(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Look a city up by id, or by exact name ignoring case.
    pub fn find(&self, query: &str) -> Option<&City> {
        let query = query.trim();
        self.get(query).or_else(|| {
            let lower = query.to_lowercase();
            self.cities.iter().find(|c| c.name.to_lowercase() == lower)
        })
    }

    /// First city whose zone is `timezone`.
    pub fn by_timezone(&self, timezone: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.timezone == timezone)
    }

    /// Catalog cities that are not already in `selected`.
    pub fn unselected<'a>(&'a self, selected: &'a [City]) -> impl Iterator<Item = &'a City> + 'a {
        self.cities
            .iter()
            .filter(move |c| !selected.iter().any(|s| s.id == c.id))
    }

    pub fn default_selection(&self) -> Vec<City> {
        self.cities.iter().take(DEFAULT_SELECTION_LEN).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::provider::{TimeZoneProvider, TzdbProvider};

    #[test]
    fn catalog_ids_are_unique() {
        let registry = CityRegistry::builtin();
        let ids: HashSet<_> = registry.list_cities().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), registry.list_cities().len());
        assert_eq!(registry.list_cities().len(), 76);
    }

    #[test]
    fn every_catalog_zone_resolves() {
        let provider = TzdbProvider;
        for city in CityRegistry::builtin().list_cities() {
            assert!(
                provider.validate(&city.timezone).is_ok(),
                "{} has unknown zone {}",
                city.name,
                city.timezone
            );
        }
    }

    #[test]
    fn find_by_id_or_name() {
        let registry = CityRegistry::builtin();
        assert_eq!(registry.find("74").map(|c| c.name.as_str()), Some("Rome"));
        assert_eq!(registry.find("tokyo").map(|c| c.id.as_str()), Some("56"));
        assert_eq!(registry.find("  New York ").map(|c| c.id.as_str()), Some("12"));
        assert_eq!(registry.find("São Paulo").map(|c| c.id.as_str()), Some("18"));
        assert!(registry.find("Atlantis").is_none());
    }

    #[test]
    fn by_timezone_returns_first_match() {
        let registry = CityRegistry::builtin();
        assert_eq!(
            registry.by_timezone("Europe/Rome").map(|c| c.name.as_str()),
            Some("Bari")
        );
        assert!(registry.by_timezone("Mars/Olympus_Mons").is_none());
    }

    #[test]
    fn unselected_skips_chosen_cities() {
        let registry = CityRegistry::builtin();
        let selected = registry.default_selection();
        let remaining: Vec<_> = registry.unselected(&selected).collect();

        assert_eq!(remaining.len(), 72);
        assert!(remaining.iter().all(|c| !selected.contains(*c)));
    }

    #[test]
    fn default_selection_is_first_four() {
        let names: Vec<_> = CityRegistry::builtin()
            .default_selection()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Baker Island", "Pago Pago", "Honolulu", "Taiohae"]);
    }
}
