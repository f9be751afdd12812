use super::common::*;
use crate::workflows::profitability::catalog::RateCatalog;
use crate::workflows::profitability::domain::{CalculationRequest, Occupancy};
use crate::workflows::profitability::rent::RentParseError;
use crate::workflows::profitability::{CalculationError, ProfitabilityService, ValidationError};
use std::sync::Arc;

#[test]
fn liverpool_house_end_to_end() {
    let (service, _) = build_service();

    let result = service
        .evaluate(&liverpool_request())
        .expect("liverpool house is priced");

    assert_eq!(result.nightly_rate, 132);
    assert_eq!(result.profits.get(Occupancy::Half), Some(480.0));
    assert_eq!(result.profits.get(Occupancy::Typical), Some(1272.0));
    assert_eq!(result.profits.get(Occupancy::Full), Some(2460.0));

    assert!(result.message.starts_with("45 Smith St, Liverpool L4 3XY, 3 Bed"));
    assert!(result.message.contains("Rent + Bills = £1500.00"));
    let lines: Vec<&str> = result.message.lines().rev().take(3).collect();
    assert_eq!(
        lines,
        vec![
            "£2460.00 PPM @ 100%",
            "£1272.00 PPM @ 70%",
            "£480.00 PPM @ 50%",
        ]
    );
}

#[test]
fn unrecognised_type_falls_back_to_legacy_rates() {
    let (service, _) = build_service();

    let result = service
        .evaluate(&legacy_request())
        .expect("legacy table prices L4 3-bed");

    assert_eq!(result.nightly_rate, 130);
    assert_eq!(result.profits.get(Occupancy::Full), Some(2550.0));
}

#[test]
fn unresolvable_inputs_are_not_found() {
    let (service, notifier) = build_service();

    let err = service
        .process(&unresolvable_request())
        .expect_err("no rate available");

    assert!(err.is_not_found());
    match err {
        CalculationError::RateUnresolved {
            known_property_types,
        } => assert_eq!(
            known_property_types,
            vec!["apartment", "bungalow", "house", "studio"]
        ),
        other => panic!("expected unresolved rate, got {other:?}"),
    }
    assert!(notifier.events().is_empty());
}

#[test]
fn rent_parse_failures_are_reported() {
    let (service, _) = build_service();
    let mut request = liverpool_request();
    request.price = Some(serde_json::json!("£ POA"));

    match service.evaluate(&request) {
        Err(CalculationError::Rent(RentParseError::NoNumericContent(raw))) => {
            assert_eq!(raw, "£ POA")
        }
        other => panic!("expected rent parse error, got {other:?}"),
    }
}

#[test]
fn validation_errors_short_circuit() {
    let (service, notifier) = build_service();
    let mut request = liverpool_request();
    request.address = None;
    request.bedrooms = None;

    assert_eq!(
        service.process(&request),
        Err(CalculationError::Validation(ValidationError::Address))
    );
    assert!(notifier.events().is_empty());
}

#[test]
fn process_publishes_successful_results() {
    let (service, notifier) = build_service();

    let result = service
        .process(&liverpool_request())
        .expect("calculation succeeds");

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], result);
}

#[test]
fn evaluate_never_publishes() {
    let (service, notifier) = build_service();

    service
        .evaluate(&liverpool_request())
        .expect("calculation succeeds");

    assert!(notifier.events().is_empty());
}

#[test]
fn notifier_failures_do_not_alter_the_result() {
    let quiet = ProfitabilityService::<FailingNotifier>::new(Arc::new(RateCatalog::standard()), None);
    let failing = ProfitabilityService::new(
        Arc::new(RateCatalog::standard()),
        Some(Arc::new(FailingNotifier)),
    );

    let expected = quiet
        .process(&liverpool_request())
        .expect("calculation succeeds");
    let actual = failing
        .process(&liverpool_request())
        .expect("notifier error is swallowed");

    assert_eq!(actual, expected);
}

#[test]
fn null_property_type_is_unrecognised_rather_than_house() {
    let (service, _) = build_service();
    let request = CalculationRequest::from_body(
        r#"{"address": "12 Walton Lane, L4 0TH", "price": "£750", "bedrooms": 3, "property_type": null}"#.as_bytes(),
    );

    let result = service.evaluate(&request).expect("legacy table prices L4 3-bed");

    assert_eq!(result.nightly_rate, 130);
}
