use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RentParseError {
    #[error("Could not parse rent from price string '{0}': no numeric content")]
    NoNumericContent(String),
    #[error("Invalid numeric value in price string '{0}'")]
    InvalidNumber(String),
}

/// Extracts the monthly rent from strings such as `"£1,200 pcm"`.
///
/// Everything other than ASCII digits and `.` is discarded before parsing, so
/// currency symbols, thousands separators and suffixes are tolerated.
pub fn parse_rent(price: &str) -> Result<f64, RentParseError> {
    let cleaned: String = price
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    if cleaned.is_empty() {
        return Err(RentParseError::NoNumericContent(price.to_string()));
    }

    let rent = cleaned
        .parse::<f64>()
        .map_err(|_| RentParseError::InvalidNumber(price.to_string()))?;
    debug!(price, rent, "parsed rent");
    Ok(rent)
}
