use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::catalog::RateCatalog;
use super::domain::PropertyType;
use super::postcode::extract_prefix;

/// Inputs every rate source sees.
#[derive(Debug, Clone, Copy)]
pub struct RateQuery<'a> {
    pub address: &'a str,
    pub property_type: &'a str,
    pub bedrooms: i64,
}

/// Which link of the chain priced the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSourceKind {
    Heuristic,
    LegacyPostcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEstimate {
    pub nightly_rate: u32,
    pub source: RateSourceKind,
}

/// One strategy for pricing a night. Returning `None` hands the query to the
/// next source in the chain.
pub trait RateSource: Debug + Send + Sync {
    fn kind(&self) -> RateSourceKind;
    fn estimate(&self, query: &RateQuery<'_>) -> Option<u32>;
}

/// Base rate by type and bedrooms, scaled by the first matching city.
#[derive(Debug, Clone)]
pub struct HeuristicRateSource {
    catalog: Arc<RateCatalog>,
}

impl HeuristicRateSource {
    pub fn new(catalog: Arc<RateCatalog>) -> Self {
        Self { catalog }
    }
}

impl RateSource for HeuristicRateSource {
    fn kind(&self) -> RateSourceKind {
        RateSourceKind::Heuristic
    }

    fn estimate(&self, query: &RateQuery<'_>) -> Option<u32> {
        let Some(property_type) = PropertyType::parse(query.property_type) else {
            warn!(
                property_type = query.property_type,
                "unrecognised property type for nightly rate estimate"
            );
            return None;
        };

        let base_rate = self
            .catalog
            .base_rates()
            .base_rate(property_type, query.bedrooms)?;

        let multiplier = match self.catalog.cities().lookup(query.address) {
            Some((city, factor)) => {
                debug!(city, factor, "applied city multiplier");
                factor
            }
            None => super::catalog::DEFAULT_MULTIPLIER,
        };

        let rate = scale_rate(base_rate, multiplier);
        debug!(%property_type, base_rate, multiplier, ?rate, "heuristic nightly rate");
        rate
    }
}

/// Static rates keyed by postcode area and bedroom count.
#[derive(Debug, Clone)]
pub struct LegacyPostcodeRateSource {
    catalog: Arc<RateCatalog>,
}

impl LegacyPostcodeRateSource {
    pub fn new(catalog: Arc<RateCatalog>) -> Self {
        Self { catalog }
    }
}

impl RateSource for LegacyPostcodeRateSource {
    fn kind(&self) -> RateSourceKind {
        RateSourceKind::LegacyPostcode
    }

    fn estimate(&self, query: &RateQuery<'_>) -> Option<u32> {
        let prefix = extract_prefix(query.address)?;
        let rate = self.catalog.legacy().rate(&prefix, query.bedrooms);
        debug!(%prefix, bedrooms = query.bedrooms, ?rate, "legacy postcode lookup");
        rate
    }
}

/// `round(base * multiplier)` with halves rounded away from zero. Results
/// below one night's worth of currency are treated as no estimate.
pub fn scale_rate(base_rate: u32, multiplier: f64) -> Option<u32> {
    let scaled = (f64::from(base_rate) * multiplier).round();
    if scaled.is_finite() && scaled >= 1.0 && scaled <= f64::from(u32::MAX) {
        Some(scaled as u32)
    } else {
        None
    }
}

/// Ordered chain of rate sources; the first source with an answer wins.
#[derive(Debug, Clone)]
pub struct NightlyRateEstimator {
    catalog: Arc<RateCatalog>,
    sources: Vec<Arc<dyn RateSource>>,
}

impl NightlyRateEstimator {
    /// Heuristic first, legacy postcode table second.
    pub fn new(catalog: Arc<RateCatalog>) -> Self {
        let sources: Vec<Arc<dyn RateSource>> = vec![
            Arc::new(HeuristicRateSource::new(catalog.clone())),
            Arc::new(LegacyPostcodeRateSource::new(catalog.clone())),
        ];
        Self { catalog, sources }
    }

    pub fn with_sources(catalog: Arc<RateCatalog>, sources: Vec<Arc<dyn RateSource>>) -> Self {
        Self { catalog, sources }
    }

    pub fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }

    /// Heuristic estimate only, without the legacy fallback.
    pub fn estimate(&self, address: &str, property_type: &str, bedrooms: i64) -> Option<u32> {
        HeuristicRateSource::new(self.catalog.clone()).estimate(&RateQuery {
            address,
            property_type,
            bedrooms,
        })
    }

    /// Legacy postcode lookup only.
    pub fn legacy_fallback(&self, address: &str, bedrooms: i64) -> Option<u32> {
        LegacyPostcodeRateSource::new(self.catalog.clone()).estimate(&RateQuery {
            address,
            property_type: "",
            bedrooms,
        })
    }

    pub fn resolve(&self, query: &RateQuery<'_>) -> Option<RateEstimate> {
        self.sources.iter().find_map(|source| {
            source.estimate(query).map(|nightly_rate| RateEstimate {
                nightly_rate,
                source: source.kind(),
            })
        })
    }
}
