//! Static rate tables loaded once at start-up.
//!
//! A [`RateCatalog`] bundles the base nightly rates per property type, the
//! city multipliers and the legacy postcode table. It is validated on
//! construction and never mutated afterwards, so one instance can be shared
//! across requests behind an `Arc`.

mod import;

use std::collections::{BTreeMap, HashMap};

use super::domain::PropertyType;

pub use import::BaseRateImportError;

/// Multiplier applied when the address names none of the configured cities.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Base nightly rates keyed by property type, then bedroom count.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    schedules: BTreeMap<PropertyType, BTreeMap<u32, u32>>,
}

impl RateTable {
    pub fn new(schedules: BTreeMap<PropertyType, BTreeMap<u32, u32>>) -> Self {
        Self { schedules }
    }

    pub fn standard() -> Self {
        let rows: [(PropertyType, [u32; 5]); 4] = [
            (PropertyType::House, [60, 85, 110, 140, 170]),
            (PropertyType::Apartment, [55, 75, 100, 125, 150]),
            (PropertyType::Bungalow, [50, 70, 95, 120, 145]),
            (PropertyType::Studio, [45, 65, 85, 105, 125]),
        ];

        let schedules = rows
            .into_iter()
            .map(|(property_type, rates)| {
                let by_bedrooms = (1..).zip(rates).collect::<BTreeMap<u32, u32>>();
                (property_type, by_bedrooms)
            })
            .collect();

        Self { schedules }
    }

    pub fn property_types(&self) -> impl Iterator<Item = PropertyType> + '_ {
        self.schedules.keys().copied()
    }

    pub fn contains(&self, property_type: PropertyType) -> bool {
        self.schedules.contains_key(&property_type)
    }

    /// Base rate for the largest configured bedroom count not above
    /// `bedrooms`, or the smallest configured count when every key is larger.
    pub fn base_rate(&self, property_type: PropertyType, bedrooms: i64) -> Option<u32> {
        let schedule = self.schedules.get(&property_type)?;
        let ceiling = u32::try_from(bedrooms.max(0)).unwrap_or(u32::MAX);

        schedule
            .range(..=ceiling)
            .next_back()
            .or_else(|| schedule.iter().next())
            .map(|(_, rate)| *rate)
    }

    pub(crate) fn replace_schedule(
        &mut self,
        property_type: PropertyType,
        schedule: BTreeMap<u32, u32>,
    ) {
        self.schedules.insert(property_type, schedule);
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (property_type, schedule) in &self.schedules {
            if schedule.is_empty() {
                return Err(CatalogError::EmptySchedule(*property_type));
            }
            for (bedrooms, rate) in schedule {
                if *bedrooms == 0 || *rate == 0 {
                    return Err(CatalogError::NonPositiveBaseRate {
                        property_type: *property_type,
                        bedrooms: *bedrooms,
                    });
                }
            }
        }
        Ok(())
    }
}

/// City multipliers in priority order; the first token found in the address
/// wins.
#[derive(Debug, Clone, PartialEq)]
pub struct CityMultiplierTable {
    entries: Vec<(String, f64)>,
}

impl CityMultiplierTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(city, factor)| (city.into().to_ascii_uppercase(), factor))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new([
            ("LONDON", 1.6),
            ("MANCHESTER", 1.3),
            ("LIVERPOOL", 1.2),
            ("BIRMINGHAM", 1.2),
            ("LEEDS", 1.1),
            ("GLASGOW", 1.1),
            ("EDINBURGH", 1.3),
            ("BRISTOL", 1.2),
            ("CARDIFF", 1.1),
            ("SHEFFIELD", 1.0),
        ])
    }

    /// The matched city token and its multiplier, if any.
    pub fn lookup(&self, address: &str) -> Option<(&str, f64)> {
        let upper = address.to_uppercase();
        self.entries
            .iter()
            .find(|(city, _)| upper.contains(city.as_str()))
            .map(|(city, factor)| (city.as_str(), *factor))
    }

    pub fn multiplier_for(&self, address: &str) -> f64 {
        self.lookup(address)
            .map(|(_, factor)| factor)
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        match self
            .entries
            .iter()
            .find(|(_, factor)| !factor.is_finite() || *factor <= 0.0)
        {
            Some((city, factor)) => Err(CatalogError::InvalidMultiplier {
                city: city.clone(),
                factor: *factor,
            }),
            None => Ok(()),
        }
    }
}

/// Nightly rates keyed by `"<postcode prefix>-<bedrooms>"`, consulted only
/// when the heuristic cannot price a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRateTable {
    rates: HashMap<String, u32>,
}

impl LegacyRateTable {
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(key, rate)| (key.into().to_ascii_uppercase(), rate))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new([
            ("L4-3", 130),
            ("L4-4", 160),
            ("L5-3", 130),
            ("L5-4", 160),
            ("L6-3", 120),
            ("L6-4", 150),
        ])
    }

    pub fn key(prefix: &str, bedrooms: i64) -> String {
        format!("{}-{}", prefix.to_ascii_uppercase(), bedrooms)
    }

    pub fn rate(&self, prefix: &str, bedrooms: i64) -> Option<u32> {
        self.rates.get(&Self::key(prefix, bedrooms)).copied()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        match self.rates.iter().find(|(_, rate)| **rate == 0) {
            Some((key, _)) => Err(CatalogError::NonPositiveLegacyRate(key.clone())),
            None => Ok(()),
        }
    }
}

/// Validated bundle of every table the estimator reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCatalog {
    base_rates: RateTable,
    cities: CityMultiplierTable,
    legacy: LegacyRateTable,
}

impl RateCatalog {
    pub fn new(
        base_rates: RateTable,
        cities: CityMultiplierTable,
        legacy: LegacyRateTable,
    ) -> Result<Self, CatalogError> {
        base_rates.validate()?;
        cities.validate()?;
        legacy.validate()?;
        Ok(Self {
            base_rates,
            cities,
            legacy,
        })
    }

    pub fn standard() -> Self {
        Self {
            base_rates: RateTable::standard(),
            cities: CityMultiplierTable::standard(),
            legacy: LegacyRateTable::standard(),
        }
    }

    /// Standard tables with the base rates overridden by a CSV export.
    pub fn with_base_rates_csv<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        let mut base_rates = RateTable::standard();
        import::apply_base_rates(&mut base_rates, reader)?;
        Self::new(
            base_rates,
            CityMultiplierTable::standard(),
            LegacyRateTable::standard(),
        )
    }

    pub fn from_base_rates_path(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| CatalogError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::with_base_rates_csv(file)
    }

    pub fn base_rates(&self) -> &RateTable {
        &self.base_rates
    }

    pub fn cities(&self) -> &CityMultiplierTable {
        &self.cities
    }

    pub fn legacy(&self) -> &LegacyRateTable {
        &self.legacy
    }

    /// Recognized property type labels, alphabetically.
    pub fn known_property_types(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = self
            .base_rates
            .property_types()
            .map(PropertyType::label)
            .collect();
        labels.sort_unstable();
        labels
    }
}

impl Default for RateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration faults detected while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("property type '{0}' has no bedroom rates configured")]
    EmptySchedule(PropertyType),
    #[error("base rate for {property_type} with {bedrooms} bedrooms must be positive")]
    NonPositiveBaseRate {
        property_type: PropertyType,
        bedrooms: u32,
    },
    #[error("city multiplier for {city} must be a positive number, got {factor}")]
    InvalidMultiplier { city: String, factor: f64 },
    #[error("legacy rate for {0} must be positive")]
    NonPositiveLegacyRate(String),
    #[error("failed to read base rates from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Import(#[from] BaseRateImportError),
}
