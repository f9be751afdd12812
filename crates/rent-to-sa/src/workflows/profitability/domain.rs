use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Property categories with a configured base-rate schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Bungalow,
    Studio,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 4] {
        [Self::House, Self::Apartment, Self::Bungalow, Self::Studio]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Bungalow => "bungalow",
            Self::Studio => "studio",
        }
    }

    /// Case-insensitive lookup; `None` means the caller supplied a type we
    /// hold no rates for.
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|candidate| candidate.label() == canonical)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Occupancy levels used for monthly projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Occupancy {
    Half,
    Typical,
    Full,
}

impl Occupancy {
    pub const fn ordered() -> [Self; 3] {
        [Self::Half, Self::Typical, Self::Full]
    }

    pub const fn percent(self) -> u32 {
        match self {
            Self::Half => 50,
            Self::Typical => 70,
            Self::Full => 100,
        }
    }

    pub fn label(self) -> String {
        self.percent().to_string()
    }
}

/// Profit at each occupancy level, kept in ascending occupancy order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitProjection {
    entries: Vec<(Occupancy, f64)>,
}

impl ProfitProjection {
    pub(crate) fn from_entries(entries: Vec<(Occupancy, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, occupancy: Occupancy) -> Option<f64> {
        self.entries
            .iter()
            .find(|(level, _)| *level == occupancy)
            .map(|(_, profit)| *profit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Occupancy, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl Serialize for ProfitProjection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (occupancy, profit) in &self.entries {
            map.serialize_entry(&occupancy.label(), profit)?;
        }
        map.end()
    }
}

/// Successful calculation payload returned to callers and forwarded to the
/// webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub nightly_rate: u32,
    pub profits: ProfitProjection,
    pub message: String,
}

/// Raw request body. Fields stay untyped so validation can report which
/// field is wrong instead of failing deserialization wholesale.
///
/// `property_type` distinguishes an absent key (`None`) from an explicit
/// `null` (`Some(Value::Null)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub bedrooms: Option<Value>,
    #[serde(default, deserialize_with = "present_value")]
    pub property_type: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl CalculationRequest {
    pub fn new(
        address: impl Into<String>,
        price: impl Into<String>,
        bedrooms: i64,
        property_type: Option<&str>,
    ) -> Self {
        Self {
            address: Some(Value::String(address.into())),
            price: Some(Value::String(price.into())),
            bedrooms: Some(Value::from(bedrooms)),
            property_type: property_type.map(|value| Value::String(value.to_string())),
        }
    }

    /// Lenient body decoding: anything that is not a JSON object is treated
    /// as an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Request fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyListing {
    pub address: String,
    pub price: String,
    pub bedrooms: i64,
    pub property_type: String,
}
