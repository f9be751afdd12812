use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::catalog::RateCatalog;
use super::domain::{CalculationRequest, CalculationResult, PropertyListing, PropertyType};
use super::estimator::{NightlyRateEstimator, RateQuery};
use super::message::render_message;
use super::notifier::ResultNotifier;
use super::profit::compute_profits;
use super::rent::{parse_rent, RentParseError};

/// Request fields that failed validation, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid or missing 'address'.")]
    Address,
    #[error("Invalid or missing 'price'.")]
    Price,
    #[error("Missing 'bedrooms'.")]
    MissingBedrooms,
    #[error("'bedrooms' must be an integer.")]
    Bedrooms,
    #[error("'property_type' must be a string.")]
    PropertyType,
}

/// Per-request failures. None of them are faults of the service itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Rent(#[from] RentParseError),
    #[error(
        "Unable to determine nightly rate for the provided inputs. Please ensure the property type is one of: {}.",
        .known_property_types.join(", ")
    )]
    RateUnresolved {
        known_property_types: Vec<&'static str>,
    },
}

impl CalculationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RateUnresolved { .. })
    }
}

/// Validates a request, prices the property and shapes the result.
pub struct ProfitabilityService<N> {
    estimator: NightlyRateEstimator,
    notifier: Option<Arc<N>>,
}

impl<N> ProfitabilityService<N>
where
    N: ResultNotifier + 'static,
{
    pub fn new(catalog: Arc<RateCatalog>, notifier: Option<Arc<N>>) -> Self {
        Self::with_estimator(NightlyRateEstimator::new(catalog), notifier)
    }

    pub fn with_estimator(estimator: NightlyRateEstimator, notifier: Option<Arc<N>>) -> Self {
        Self {
            estimator,
            notifier,
        }
    }

    pub fn catalog(&self) -> &RateCatalog {
        self.estimator.catalog()
    }

    /// Pure calculation; never touches the notifier.
    pub fn evaluate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, CalculationError> {
        let listing = validate(request)?;
        let rent = parse_rent(&listing.price)?;

        let query = RateQuery {
            address: &listing.address,
            property_type: &listing.property_type,
            bedrooms: listing.bedrooms,
        };
        let estimate =
            self.estimator
                .resolve(&query)
                .ok_or_else(|| CalculationError::RateUnresolved {
                    known_property_types: self.catalog().known_property_types(),
                })?;
        debug!(
            nightly_rate = estimate.nightly_rate,
            source = ?estimate.source,
            "resolved nightly rate"
        );

        let profits = compute_profits(estimate.nightly_rate, rent);
        let message = render_message(&listing.address, listing.bedrooms, rent, &profits);

        Ok(CalculationResult {
            nightly_rate: estimate.nightly_rate,
            profits,
            message,
        })
    }

    /// Calculation followed by a best-effort notification.
    pub fn process(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, CalculationError> {
        let result = self.evaluate(request)?;
        info!(nightly_rate = result.nightly_rate, "calculated profitability");

        if let Some(notifier) = &self.notifier {
            if let Err(err) = notifier.publish(&result) {
                warn!(error = %err, "failed to dispatch result notification");
            }
        }

        Ok(result)
    }
}

/// Checks fields in order (address, price, bedrooms, property type) and stops
/// at the first failure.
pub fn validate(request: &CalculationRequest) -> Result<PropertyListing, ValidationError> {
    let address = non_empty_string(request.address.as_ref()).ok_or(ValidationError::Address)?;
    let price = non_empty_string(request.price.as_ref()).ok_or(ValidationError::Price)?;
    let bedrooms = match request.bedrooms.as_ref() {
        None => return Err(ValidationError::MissingBedrooms),
        Some(value) => coerce_bedrooms(value).ok_or(ValidationError::Bedrooms)?,
    };
    let property_type = match request.property_type.as_ref() {
        None => PropertyType::House.label().to_string(),
        Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(_) => return Err(ValidationError::PropertyType),
    };

    Ok(PropertyListing {
        address,
        price,
        bedrooms,
        property_type,
    })
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Integers pass through, floats truncate toward zero and strings must hold
/// an integer literal.
fn coerce_bedrooms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(f64::trunc)
                .filter(|float| *float >= i64::MIN as f64 && *float <= i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}
