use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use serde::Deserialize;

use super::RateTable;
use crate::workflows::profitability::domain::PropertyType;

#[derive(Debug, thiserror::Error)]
pub enum BaseRateImportError {
    #[error("invalid base rate CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown property type '{value}'")]
    UnknownPropertyType { row: usize, value: String },
    #[error("row {row}: bedrooms and nightly_rate must be positive")]
    NonPositive { row: usize },
}

#[derive(Debug, Deserialize)]
struct BaseRateRow {
    property_type: String,
    bedrooms: u32,
    nightly_rate: u32,
}

/// Applies `property_type,bedrooms,nightly_rate` rows on top of `table`.
/// Types present in the export replace their whole schedule; other types keep
/// their existing rows.
pub(super) fn apply_base_rates<R: Read>(
    table: &mut RateTable,
    reader: R,
) -> Result<(), BaseRateImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut imported: HashMap<PropertyType, BTreeMap<u32, u32>> = HashMap::new();

    for (index, record) in csv_reader.deserialize::<BaseRateRow>().enumerate() {
        let row = record?;
        let row_number = index + 1;
        let property_type = PropertyType::parse(&row.property_type).ok_or_else(|| {
            BaseRateImportError::UnknownPropertyType {
                row: row_number,
                value: row.property_type.clone(),
            }
        })?;
        if row.bedrooms == 0 || row.nightly_rate == 0 {
            return Err(BaseRateImportError::NonPositive { row: row_number });
        }

        imported
            .entry(property_type)
            .or_default()
            .insert(row.bedrooms, row.nightly_rate);
    }

    for (property_type, schedule) in imported {
        table.replace_schedule(property_type, schedule);
    }
    Ok(())
}
