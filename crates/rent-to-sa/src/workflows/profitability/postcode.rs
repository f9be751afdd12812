use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn postcode_area_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z]{1,2}[0-9]{1,2}").expect("postcode pattern compiles"))
}

/// First UK postcode-area token ("L4", "M14", "SW1") in the address,
/// uppercased.
pub fn extract_prefix(address: &str) -> Option<String> {
    let prefix = postcode_area_pattern()
        .find(address)
        .map(|found| found.as_str().to_ascii_uppercase());
    debug!(address, ?prefix, "extracted postcode prefix");
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_area_and_district() {
        assert_eq!(extract_prefix("123 High St, L4 2AB"), Some("L4".to_string()));
        assert_eq!(
            extract_prefix("Flat 2, Oxford Rd, Manchester m14 5rq"),
            Some("M14".to_string())
        );
    }

    #[test]
    fn returns_none_without_postcode() {
        assert_eq!(extract_prefix("No Postcode Here"), None);
        assert_eq!(extract_prefix(""), None);
    }

    #[test]
    fn uses_first_match_only() {
        assert_eq!(
            extract_prefix("Unit B12, 45 Smith St, Liverpool L4 3XY"),
            Some("B12".to_string())
        );
    }
}
