use tracing::debug;

use super::domain::{Occupancy, ProfitProjection};

/// Assumed monthly utility bills for a serviced-accommodation unit.
pub const MONTHLY_BILLS: f64 = 600.0;

/// Nights per month used for projections.
pub const NIGHTS_PER_MONTH: u64 = 30;

/// `nightly_rate * 30 * occupancy - rent - 600` at every occupancy level,
/// rounded to pence.
pub fn compute_profits(nightly_rate: u32, rent: f64) -> ProfitProjection {
    let entries = Occupancy::ordered()
        .into_iter()
        .map(|occupancy| {
            let income = monthly_income(nightly_rate, occupancy);
            let profit = round_pence(income - rent - MONTHLY_BILLS);
            debug!(occupancy = occupancy.percent(), profit, "calculated profit");
            (occupancy, profit)
        })
        .collect();

    ProfitProjection::from_entries(entries)
}

/// Integer arithmetic up to the final division; 70% of a whole-pound rate
/// stays exact.
fn monthly_income(nightly_rate: u32, occupancy: Occupancy) -> f64 {
    let occupied_pounds =
        u64::from(nightly_rate) * NIGHTS_PER_MONTH * u64::from(occupancy.percent());
    occupied_pounds as f64 / 100.0
}

fn round_pence(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
