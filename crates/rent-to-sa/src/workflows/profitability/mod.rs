//! Rent-to-serviced-accommodation profitability pipeline.
//!
//! A request flows through validation, rent parsing, nightly rate resolution
//! (heuristic first, legacy postcode table second), profit projection and
//! message rendering. Everything here is synchronous and pure except the
//! optional [`ResultNotifier`] hook invoked by
//! [`ProfitabilityService::process`].

pub mod catalog;
pub mod domain;
pub mod estimator;
pub mod message;
pub mod notifier;
pub mod postcode;
pub mod profit;
pub mod rent;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    BaseRateImportError, CatalogError, CityMultiplierTable, LegacyRateTable, RateCatalog,
    RateTable, DEFAULT_MULTIPLIER,
};
pub use domain::{
    CalculationRequest, CalculationResult, Occupancy, ProfitProjection, PropertyListing,
    PropertyType,
};
pub use estimator::{
    HeuristicRateSource, LegacyPostcodeRateSource, NightlyRateEstimator, RateEstimate, RateQuery,
    RateSource, RateSourceKind,
};
pub use message::render_message;
pub use notifier::{NotifyError, ResultNotifier, WebhookNotifier};
pub use postcode::extract_prefix;
pub use profit::{compute_profits, MONTHLY_BILLS};
pub use rent::{parse_rent, RentParseError};
pub use router::profitability_router;
pub use service::{validate, CalculationError, ProfitabilityService, ValidationError};
