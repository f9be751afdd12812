use clap::Args;
use rent_to_sa::config::AppConfig;
use rent_to_sa::error::AppError;
use rent_to_sa::workflows::profitability::{
    CalculationRequest, CalculationResult, ProfitabilityService, RateCatalog, WebhookNotifier,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::load_catalog;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Full address including town and postcode
    #[arg(long)]
    pub(crate) address: String,
    /// Monthly rent as advertised, e.g. "£1,200 pcm"
    #[arg(long)]
    pub(crate) price: String,
    /// Number of bedrooms
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) bedrooms: i64,
    /// Property type (house, apartment, bungalow, studio)
    #[arg(long, default_value = "house")]
    pub(crate) property_type: String,
    /// CSV of base rates overriding the built-in table
    #[arg(long)]
    pub(crate) rates_csv: Option<PathBuf>,
    /// Print the JSON payload instead of the message
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.rates, args.rates_csv.as_deref())?;
    let result = quote(&args, catalog)?;
    println!("{}", render_quote(&result, args.json));
    Ok(())
}

pub(crate) fn quote(args: &QuoteArgs, catalog: RateCatalog) -> Result<CalculationResult, AppError> {
    let service = ProfitabilityService::<WebhookNotifier>::new(Arc::new(catalog), None);
    let request = CalculationRequest::new(
        args.address.clone(),
        args.price.clone(),
        args.bedrooms,
        Some(args.property_type.as_str()),
    );
    Ok(service.evaluate(&request)?)
}

pub(crate) fn render_quote(result: &CalculationResult, as_json: bool) -> String {
    if as_json {
        match serde_json::to_string_pretty(result) {
            Ok(json) => json,
            Err(err) => format!("result payload unavailable: {err}"),
        }
    } else {
        format!("Nightly rate: £{}\n\n{}", result.nightly_rate, result.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(property_type: &str) -> QuoteArgs {
        QuoteArgs {
            address: "45 Smith St, Liverpool L4 3XY".to_string(),
            price: "£900 pcm".to_string(),
            bedrooms: 3,
            property_type: property_type.to_string(),
            rates_csv: None,
            json: false,
        }
    }

    #[test]
    fn quote_prices_the_property() {
        let result = quote(&args("house"), RateCatalog::standard()).expect("quote succeeds");
        assert_eq!(result.nightly_rate, 132);

        let rendered = render_quote(&result, false);
        assert!(rendered.starts_with("Nightly rate: £132"));
        assert!(rendered.contains("£480.00 PPM @ 50%"));
    }

    #[test]
    fn json_rendering_includes_profits() {
        let result = quote(&args("house"), RateCatalog::standard()).expect("quote succeeds");
        let rendered = render_quote(&result, true);
        let payload: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(payload["profits"]["100"], serde_json::json!(2460.0));
    }

    #[test]
    fn unresolvable_quote_is_an_error() {
        let mut args = args("yurt");
        args.address = "A Field".to_string();
        let err = quote(&args, RateCatalog::standard()).expect_err("no rate");
        assert!(err.to_string().contains("Unable to determine nightly rate"));
    }
}
